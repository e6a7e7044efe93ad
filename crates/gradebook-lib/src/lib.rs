// ABOUTME: Core library for the Gradebook CLI providing the class journal
// ABOUTME: Includes the journal store, outcome messages, xlsx export and configuration

pub mod config;
pub mod error;
pub mod export;
pub mod journal;
pub mod outcome;

pub use config::GradebookConfig;
pub use error::GradebookError;
pub use export::export_to_xlsx;
pub use journal::{Journal, StudentRecord};
pub use outcome::{format_mark, Column, Outcome, StudentReport, AVERAGE_LABEL};

/// Result type alias using [`GradebookError`]
pub type Result<T> = std::result::Result<T, GradebookError>;
