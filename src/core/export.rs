/// CSV export of a filtered projection
///
/// Fixed five-column schema, every cell quoted (internal quotes doubled),
/// absent values as empty strings, `\n` line endings, UTF-8. Exporting an
/// empty projection is refused so the user never downloads a useless file.

use crate::error::{FloraError, Result};
use crate::store::Record;
use chrono::NaiveDate;

/// Column headers, in the fixed export order
pub const EXPORT_HEADERS: [&str; 5] = [
    "Scientific Name",
    "Latitude",
    "Longitude",
    "Year",
    "Age Category",
];

/// Serializes projections into tabular bytes
pub struct ExportProjector;

impl ExportProjector {
    /// Render the projection as CSV bytes.
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - Header row plus one row per record
    /// * `Err(FloraError::EmptyProjection)` - If the projection has no rows
    pub fn to_csv(projection: &[Record]) -> Result<Vec<u8>> {
        if projection.is_empty() {
            return Err(FloraError::EmptyProjection);
        }

        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(Vec::new());

        writer.write_record(EXPORT_HEADERS)?;
        for record in projection {
            writer.write_record([
                record.scientific_name.clone(),
                record.latitude.map(|v| v.to_string()).unwrap_or_default(),
                record.longitude.map(|v| v.to_string()).unwrap_or_default(),
                record.year.map(|v| v.to_string()).unwrap_or_default(),
                record.age_category.to_string(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| FloraError::Generic(format!("CSV flush failed: {}", e)))
    }

    /// Conventional filename for an export made on the given date
    pub fn filename(date: NaiveDate) -> String {
        format!("plant_data_{}.csv", date.format("%Y-%m-%d"))
    }
}
