/// florascope library
///
/// Session-local engine for exploring geotagged plant-occurrence records:
/// a merged base+overlay record store, prefix/recency filtering, marker
/// reconciliation, and CSV export.

pub mod core;
pub mod error;
pub mod session;
pub mod store;

// Re-exports for convenience
pub use error::{FloraError, Result};
pub use store::RecordStore;
