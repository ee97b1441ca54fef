//! Error types for source table loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a source file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a supported spreadsheet format.
    #[error("unsupported file format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Text encoding is not supported (UTF-16 etc.).
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to open or decode a workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Workbook has no worksheets.
    #[error("workbook has no worksheets: {path}")]
    NoWorksheet { path: PathBuf },

    /// Requested worksheet does not exist.
    #[error("worksheet '{sheet}' not found in {path}")]
    SheetNotFound { path: PathBuf, sheet: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
