/// Data models for plant-occurrence records
///
/// Records travel to and from the UI layer as JSON, so everything here
/// derives serde. Numeric fields coming from user input are parsed
/// leniently: malformed text degrades to "unset" instead of failing.

use serde::{Deserialize, Serialize};

/// Age bucket derived from a record's observation year
///
/// Never set directly by callers: overlay records get it from the
/// classifier whenever `year` changes, base records arrive pre-classified.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AgeCategory {
    #[serde(rename = "<5")]
    Under5,
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = "10-20")]
    TenToTwenty,
    #[serde(rename = "20+")]
    TwentyPlus,
    Unknown,
}

impl AgeCategory {
    /// Parse a label from the base dataset. Anything unrecognized maps to
    /// Unknown so a sloppy source file can't poison the working set.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "<5" => AgeCategory::Under5,
            "5-10" => AgeCategory::FiveToTen,
            "10-20" => AgeCategory::TenToTwenty,
            "20+" => AgeCategory::TwentyPlus,
            _ => AgeCategory::Unknown,
        }
    }
}

impl std::fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AgeCategory::Under5 => "<5",
            AgeCategory::FiveToTen => "5-10",
            AgeCategory::TenToTwenty => "10-20",
            AgeCategory::TwentyPlus => "20+",
            AgeCategory::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// A single plant-occurrence record
///
/// Base records carry no `id` and no provenance; overlay records (user
/// created) carry all three. The `id` is the only stable handle for
/// edit/delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub scientific_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub year: Option<i32>,
    pub age_category: AgeCategory,
    pub notes: Option<String>,
    pub id: Option<i64>,
    pub created_by: Option<String>,
    pub created_at: Option<String>, // ISO 8601
}

impl Record {
    /// A record is mappable only when both coordinates are present.
    /// 0.0 is a real coordinate (equator / prime meridian), not "missing".
    pub fn position(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Year rendered for display and export ("Unknown" when absent)
    pub fn year_label(&self) -> String {
        self.year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Editable fields for inserting or editing an overlay record
///
/// Identity and provenance are never part of a draft; the store owns those.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordDraft {
    pub scientific_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub year: Option<i32>,
    pub notes: Option<String>,
}

/// Filter predicate evaluated against the working set
///
/// An empty prefix matches every name; an absent window matches every year.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterPredicate {
    pub species_prefix: String,
    pub recency_window_years: Option<i32>,
}

impl FilterPredicate {
    pub fn new(species_prefix: impl Into<String>, recency_window_years: Option<i32>) -> Self {
        Self {
            species_prefix: species_prefix.into(),
            recency_window_years,
        }
    }

    /// True when the predicate filters nothing out
    pub fn is_match_all(&self) -> bool {
        self.species_prefix.is_empty() && self.recency_window_years.is_none()
    }
}

/// Parse a recency-window input. Empty or unparseable means "match all".
pub fn parse_window(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

/// Parse a latitude/longitude cell. Malformed text degrades to unset.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// Parse a year cell. Accepts values like "2010.0" (common in exported
/// spreadsheets) by truncating; anything else degrades to unset.
pub fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    trimmed.parse::<f64>().ok().map(|y| y.trunc() as i32)
}
