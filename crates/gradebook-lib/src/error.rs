// ABOUTME: Error types for Gradebook operations
// ABOUTME: Defines GradebookError for hard precondition violations and export failures

use thiserror::Error;

/// Errors that can occur during Gradebook operations
///
/// Expected conditions such as a missing student or a duplicate name are not
/// errors; they are reported as [`crate::Outcome`] values.
#[derive(Error, Debug)]
pub enum GradebookError {
    /// A caller passed an argument the journal cannot accept
    #[error("Некорректный аргумент: {0}")]
    InvalidArgument(String),

    /// The named student is not in the journal
    #[error("Ученик не найден: {0}")]
    NotFound(String),

    /// Writing the spreadsheet failed
    #[error("Ошибка при экспорте: {0}")]
    Export(String),

    /// I/O error reading or writing files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rust_xlsxwriter::XlsxError> for GradebookError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        GradebookError::Export(err.to_string())
    }
}
