//! Error types for sheetmerge-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetmerge-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not in the accepted set
    #[error("unsupported file format: '{path}'")]
    UnsupportedFormat { path: PathBuf },

    /// File contents could not be interpreted as the declared format
    #[error("failed to parse '{path}': {message}")]
    ParseFailure { path: PathBuf, message: String },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Spreadsheet parsing error from calamine
    #[error("spreadsheet error in '{path}': {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Every selected file was rejected by the format check
    #[error("none of the selected files have a supported format")]
    NoSupportedFiles,

    /// Operation requires table data that is not present
    #[error("no table data to operate on")]
    NoData,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ZIP container error during spreadsheet export
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
