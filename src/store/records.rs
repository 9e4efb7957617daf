/// In-memory record store: immutable base dataset plus session overlay
///
/// The base records are loaded once and never change. All user mutations
/// (insert/edit/delete) go through the overlay, keyed by a session-unique
/// monotonic id. Every mutation either fully commits or leaves the overlay
/// untouched.

use crate::core::age::classify;
use crate::error::{FloraError, Result};
use crate::store::models::{Record, RecordDraft};
use chrono::{Datelike, Utc};

/// Owns the working record set for one session
pub struct RecordStore {
    base: Vec<Record>,
    overlay: Vec<Record>,
    next_id: i64,
    current_year: i32,
}

impl RecordStore {
    /// Create a store over the given base dataset.
    pub fn new(base: Vec<Record>) -> Self {
        Self::with_current_year(base, Utc::now().year())
    }

    /// Create a store with a pinned "current year".
    ///
    /// Used by tests so age buckets don't drift with the wall clock; the
    /// production path goes through `new`.
    pub fn with_current_year(base: Vec<Record>, current_year: i32) -> Self {
        Self {
            base,
            overlay: Vec::new(),
            next_id: 1,
            current_year,
        }
    }

    /// The year this session classifies ages against
    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Insert a new overlay record.
    ///
    /// Assigns the next id, derives the age category from the draft's year,
    /// stamps provenance, and appends to the overlay.
    ///
    /// # Returns
    /// * `Ok(Record)` - The stored record, id and provenance included
    /// * `Err(FloraError::Validation)` - If the scientific name is empty
    pub fn insert(&mut self, draft: RecordDraft, created_by: &str) -> Result<Record> {
        let name = Self::validate_name(&draft.scientific_name)?;

        let record = Record {
            scientific_name: name,
            latitude: draft.latitude,
            longitude: draft.longitude,
            year: draft.year,
            age_category: classify(draft.year, self.current_year),
            notes: draft.notes,
            id: Some(self.next_id),
            created_by: Some(created_by.to_string()),
            created_at: Some(Utc::now().to_rfc3339()),
        };
        self.next_id += 1;

        self.overlay.push(record.clone());
        Ok(record)
    }

    /// Replace the editable fields of the overlay record with this id.
    ///
    /// Identity and provenance are preserved, position in the overlay is
    /// preserved, and the age category is re-derived from the new year.
    /// Base records carry no id, so they can never be targeted.
    pub fn edit(&mut self, id: i64, draft: RecordDraft) -> Result<Record> {
        let name = Self::validate_name(&draft.scientific_name)?;

        let record = self
            .overlay
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or(FloraError::NotFound(id))?;

        record.scientific_name = name;
        record.latitude = draft.latitude;
        record.longitude = draft.longitude;
        record.year = draft.year;
        record.age_category = classify(draft.year, self.current_year);
        record.notes = draft.notes;

        Ok(record.clone())
    }

    /// Remove the overlay record with this id, returning it.
    pub fn delete(&mut self, id: i64) -> Result<Record> {
        let index = self
            .overlay
            .iter()
            .position(|r| r.id == Some(id))
            .ok_or(FloraError::NotFound(id))?;

        Ok(self.overlay.remove(index))
    }

    /// The merged working set: base records in source order followed by
    /// overlay records in insertion order.
    ///
    /// Freshly concatenated on every call - callers must not assume a
    /// stable reference across mutations.
    pub fn working_set(&self) -> Vec<Record> {
        let mut set = Vec::with_capacity(self.base.len() + self.overlay.len());
        set.extend(self.base.iter().cloned());
        set.extend(self.overlay.iter().cloned());
        set
    }

    /// Store statistics for status output
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            base_records: self.base.len(),
            overlay_records: self.overlay.len(),
            next_id: self.next_id,
        }
    }

    fn validate_name(name: &str) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FloraError::Validation(
                "scientific name is required".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }
}

/// Counts describing the store's contents
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub base_records: usize,
    pub overlay_records: usize,
    pub next_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::AgeCategory;

    fn base_record(name: &str, year: Option<i32>, category: AgeCategory) -> Record {
        Record {
            scientific_name: name.to_string(),
            latitude: Some(-37.5),
            longitude: Some(145.1),
            year,
            age_category: category,
            notes: None,
            id: None,
            created_by: None,
            created_at: None,
        }
    }

    fn draft(name: &str, year: Option<i32>) -> RecordDraft {
        RecordDraft {
            scientific_name: name.to_string(),
            latitude: Some(-33.0),
            longitude: Some(151.0),
            year,
            notes: None,
        }
    }

    fn setup() -> RecordStore {
        let base = vec![base_record(
            "Eucalyptus regnans",
            Some(2010),
            AgeCategory::TenToTwenty,
        )];
        RecordStore::with_current_year(base, 2024)
    }

    #[test]
    fn test_insert_appends_and_classifies() {
        let mut store = setup();
        let before = store.working_set().len();

        let record = store.insert(draft("Banksia serrata", Some(2024)), "tester").unwrap();

        assert_eq!(record.id, Some(1));
        assert_eq!(record.age_category, AgeCategory::Under5);
        assert!(record.created_by.as_deref() == Some("tester"));
        assert!(record.created_at.is_some());
        assert_eq!(store.working_set().len(), before + 1);
    }

    #[test]
    fn test_insert_rejects_empty_name() {
        let mut store = setup();
        let before = store.working_set();

        let result = store.insert(draft("   ", Some(2024)), "tester");

        assert!(matches!(result, Err(FloraError::Validation(_))));
        assert_eq!(store.working_set(), before);
    }

    #[test]
    fn test_insert_trims_name() {
        let mut store = setup();
        let record = store.insert(draft("  Acacia dealbata  ", None), "tester").unwrap();
        assert_eq!(record.scientific_name, "Acacia dealbata");
        assert_eq!(record.age_category, AgeCategory::Unknown);
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut store = setup();
        let a = store.insert(draft("A", Some(2024)), "t").unwrap().id.unwrap();
        let b = store.insert(draft("B", Some(2024)), "t").unwrap().id.unwrap();
        store.delete(b).unwrap();
        let c = store.insert(draft("C", Some(2024)), "t").unwrap().id.unwrap();

        assert!(a < b);
        assert!(b < c); // deleting B does not free its id
    }

    #[test]
    fn test_edit_recomputes_age_and_preserves_identity() {
        let mut store = setup();
        let record = store.insert(draft("Banksia serrata", Some(2024)), "tester").unwrap();
        let id = record.id.unwrap();

        let updated = store
            .edit(id, draft("Banksia serrata", Some(2000)))
            .unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.age_category, AgeCategory::TwentyPlus);
        assert_eq!(updated.created_by, record.created_by);
        assert_eq!(updated.created_at, record.created_at);
    }

    #[test]
    fn test_edit_preserves_overlay_position() {
        let mut store = setup();
        let first = store.insert(draft("First", None), "t").unwrap();
        store.insert(draft("Second", None), "t").unwrap();

        store.edit(first.id.unwrap(), draft("First renamed", None)).unwrap();

        let set = store.working_set();
        // base record, then the edited record still ahead of "Second"
        assert_eq!(set[1].scientific_name, "First renamed");
        assert_eq!(set[2].scientific_name, "Second");
    }

    #[test]
    fn test_edit_unknown_id_fails_without_mutation() {
        let mut store = setup();
        store.insert(draft("Banksia serrata", Some(2024)), "tester").unwrap();
        let before = store.working_set();

        let result = store.edit(999, draft("Changed", None));

        assert!(matches!(result, Err(FloraError::NotFound(999))));
        assert_eq!(store.working_set(), before);
    }

    #[test]
    fn test_delete_removes_by_id() {
        let mut store = setup();
        let id = store
            .insert(draft("Banksia serrata", Some(2024)), "tester")
            .unwrap()
            .id
            .unwrap();

        let removed = store.delete(id).unwrap();
        assert_eq!(removed.id, Some(id));
        assert_eq!(store.stats().overlay_records, 0);

        let result = store.delete(id);
        assert!(matches!(result, Err(FloraError::NotFound(_))));
    }

    #[test]
    fn test_working_set_order_is_base_then_overlay() {
        let mut store = setup();
        store.insert(draft("Banksia serrata", Some(2024)), "tester").unwrap();

        let set = store.working_set();
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].scientific_name, "Eucalyptus regnans");
        assert!(set[0].id.is_none());
        assert_eq!(set[1].scientific_name, "Banksia serrata");
        assert!(set[1].id.is_some());
    }

    #[test]
    fn test_stats() {
        let mut store = setup();
        store.insert(draft("Banksia serrata", Some(2024)), "tester").unwrap();

        let stats = store.stats();
        assert_eq!(stats.base_records, 1);
        assert_eq!(stats.overlay_records, 1);
        assert_eq!(stats.next_id, 2);
    }
}
