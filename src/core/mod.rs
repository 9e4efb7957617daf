/// Core engine: age classification, filter evaluation, marker
/// reconciliation, and tabular export

pub mod age;
pub mod export;
pub mod markers;
pub mod query;

pub use export::ExportProjector;
pub use markers::{Marker, MarkerSurface, MarkerSync};
pub use query::QueryEngine;
