//! Error types for data operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Label is not present in the panel
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// Required column is absent from a table
    #[error("Missing column {column} in table {label}")]
    MissingColumn {
        /// Label of the table
        label: String,
        /// Name of the missing column
        column: String,
    },

    /// Source file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Column values do not match the table height
    #[error("Length mismatch for column {column} in table {label}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Label of the table
        label: String,
        /// Column being written
        column: String,
        /// Table height
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
