/// Age classification for plant records
///
/// Maps an observation year to one of five ordinal buckets. Pure and total:
/// any year (or none) classifies, nothing ever fails.

use crate::store::AgeCategory;

/// Classify an observation year against the given current year.
///
/// Absent year means Unknown. A future year gives a negative age, which
/// still lands in the `<5` bucket; permissive on purpose so a slightly
/// wrong clock never drops a record.
pub fn classify(year: Option<i32>, current_year: i32) -> AgeCategory {
    let Some(year) = year else {
        return AgeCategory::Unknown;
    };

    let age = current_year - year;
    if age < 5 {
        AgeCategory::Under5
    } else if age < 10 {
        AgeCategory::FiveToTen
    } else if age < 20 {
        AgeCategory::TenToTwenty
    } else {
        AgeCategory::TwentyPlus
    }
}
