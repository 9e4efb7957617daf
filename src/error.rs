/// Error types for florascope
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for florascope operations
#[derive(Error, Debug)]
pub enum FloraError {
    /// A required field was missing or empty on insert/edit
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Edit/delete referenced an overlay record that does not exist
    #[error("No record with id {0}")]
    NotFound(i64),

    /// Export was requested while the current projection has no rows
    #[error("Nothing to export: the current filter matches no records")]
    EmptyProjection,

    /// A mutation was attempted without the privileged-editor capability
    #[error("Operation requires a privileged editor session")]
    NotPermitted,

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for florascope operations
pub type Result<T> = std::result::Result<T, FloraError>;

/// Convert FloraError to a user-friendly error message
impl FloraError {
    pub fn user_message(&self) -> String {
        match self {
            FloraError::Validation(reason) => {
                format!("Could not save record: {}", reason)
            }
            FloraError::NotFound(id) => {
                format!(
                    "Record {} was not found (only records you added can be changed)",
                    id
                )
            }
            FloraError::EmptyProjection => {
                "Nothing to export - the current filter matches no records".to_string()
            }
            FloraError::NotPermitted => {
                "Sign in as an editor to add, edit or delete records".to_string()
            }
            FloraError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            FloraError::Csv(e) => {
                format!("Tabular data error: {}", e)
            }
            FloraError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            FloraError::Generic(msg) => msg.clone(),
        }
    }
}
