/// Record storage: models, the session store, and the bundled base dataset

pub mod dataset;
pub mod models;
pub mod records;

pub use models::{
    parse_coordinate, parse_window, parse_year, AgeCategory, FilterPredicate, Record, RecordDraft,
};
pub use records::{RecordStore, StoreStats};
