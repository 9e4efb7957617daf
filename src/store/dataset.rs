/// Base dataset loading
///
/// The base dataset ships inside the binary (same trick the app uses for
/// its other bundled assets) as a CSV with the columns
/// `Scientific Name, Decimal Latitude, Decimal Longitude, Year, AgeCategory`.
/// Numeric cells are parsed leniently - malformed values degrade to unset
/// rather than failing the load - and the pre-classified age category is
/// trusted as supplied.

use crate::error::Result;
use crate::store::models::{parse_coordinate, parse_year, AgeCategory, Record};
use serde::Deserialize;
use std::io::Read;

/// One raw row of the base dataset, everything as text
#[derive(Debug, Deserialize)]
struct BaseRow {
    #[serde(rename = "Scientific Name", default)]
    scientific_name: String,
    #[serde(rename = "Decimal Latitude", default)]
    latitude: String,
    #[serde(rename = "Decimal Longitude", default)]
    longitude: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "AgeCategory", default)]
    age_category: String,
}

impl BaseRow {
    fn into_record(self) -> Record {
        Record {
            scientific_name: self.scientific_name.trim().to_string(),
            latitude: parse_coordinate(&self.latitude),
            longitude: parse_coordinate(&self.longitude),
            year: parse_year(&self.year),
            age_category: AgeCategory::from_label(&self.age_category),
            notes: None,
            id: None,
            created_by: None,
            created_at: None,
        }
    }
}

/// Load base records from CSV, preserving source order.
///
/// Rows without a scientific name are dropped - they have no display key
/// and nothing downstream could do anything with them.
pub fn from_csv<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<BaseRow>() {
        let record = row?.into_record();
        if record.scientific_name.is_empty() {
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

/// The dataset bundled with the binary
pub fn bundled() -> Result<Vec<Record>> {
    from_csv(include_str!("../../data/plant_records.csv").as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_preserves_order_and_trusts_category() {
        let input = "\
Scientific Name,Decimal Latitude,Decimal Longitude,Year,AgeCategory
Eucalyptus regnans,-37.5,145.1,2010,10-20
Banksia serrata,-33.8,151.2,2021,<5
";
        let records = from_csv(input.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].scientific_name, "Eucalyptus regnans");
        assert_eq!(records[0].age_category, AgeCategory::TenToTwenty);
        assert_eq!(records[1].latitude, Some(-33.8));
        assert_eq!(records[1].age_category, AgeCategory::Under5);
        assert!(records.iter().all(|r| r.id.is_none()));
    }

    #[test]
    fn test_malformed_numerics_degrade_to_unset() {
        let input = "\
Scientific Name,Decimal Latitude,Decimal Longitude,Year,AgeCategory
Acacia dealbata,not-a-number,151.2,circa 1990,Unknown
";
        let records = from_csv(input.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].latitude, None);
        assert_eq!(records[0].longitude, Some(151.2));
        assert_eq!(records[0].year, None);
    }

    #[test]
    fn test_nameless_rows_are_dropped() {
        let input = "\
Scientific Name,Decimal Latitude,Decimal Longitude,Year,AgeCategory
,-37.5,145.1,2010,10-20
Banksia serrata,-33.8,151.2,2021,<5
";
        let records = from_csv(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scientific_name, "Banksia serrata");
    }

    #[test]
    fn test_unrecognized_category_maps_to_unknown() {
        let input = "\
Scientific Name,Decimal Latitude,Decimal Longitude,Year,AgeCategory
Banksia serrata,-33.8,151.2,2021,fresh
";
        let records = from_csv(input.as_bytes()).unwrap();
        assert_eq!(records[0].age_category, AgeCategory::Unknown);
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let records = bundled().unwrap();
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| !r.scientific_name.is_empty()));
    }
}
