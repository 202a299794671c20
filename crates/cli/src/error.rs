//! CLI error types.

use homefront_core::calendar::EntryError;
use homefront_core::storage::RepositoryError;
use thiserror::Error;

/// Result type alias for the CLI crate.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid entry: {0}")]
    InvalidEntry(#[from] EntryError),

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
