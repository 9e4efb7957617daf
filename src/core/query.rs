/// Filter evaluation over the working set
///
/// A predicate is a species prefix plus an optional recency window. The
/// engine is a pure, order-preserving filter: same predicate, same working
/// set, same output, every time. No pagination, no deduplication - two
/// records with the same name are independent entries.

use crate::store::{FilterPredicate, Record};
use std::collections::BTreeMap;

/// Evaluates filter predicates against a working set
pub struct QueryEngine {
    current_year: i32,
}

impl QueryEngine {
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Filter the working set down to the records matching the predicate.
    ///
    /// Species match: empty prefix matches everything, otherwise the name
    /// must start with the prefix, case-insensitively. Recency match: an
    /// absent window matches everything; a record without a year never
    /// matches a window.
    pub fn evaluate(&self, predicate: &FilterPredicate, working_set: &[Record]) -> Vec<Record> {
        let prefix = predicate.species_prefix.to_lowercase();

        working_set
            .iter()
            .filter(|record| {
                self.species_match(record, &prefix)
                    && self.recency_match(record, predicate.recency_window_years)
            })
            .cloned()
            .collect()
    }

    fn species_match(&self, record: &Record, lowercase_prefix: &str) -> bool {
        lowercase_prefix.is_empty()
            || record
                .scientific_name
                .to_lowercase()
                .starts_with(lowercase_prefix)
    }

    fn recency_match(&self, record: &Record, window_years: Option<i32>) -> bool {
        let Some(window) = window_years else {
            return true;
        };
        match record.year {
            Some(year) => self.current_year - year <= window,
            None => false,
        }
    }

    /// Count projection records per species name, sorted by name.
    ///
    /// Feeds the summary output; not part of filtering itself.
    pub fn species_counts(&self, projection: &[Record]) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in projection {
            *counts.entry(record.scientific_name.clone()).or_insert(0) += 1;
        }
        counts
    }
}
