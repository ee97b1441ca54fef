//! Error types for aggregation and output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or writing the master dataset.
#[derive(Debug, Error)]
pub enum OutputError {
    /// A frame did not carry the canonical columns in canonical order.
    #[error("frame {index} does not have the canonical column layout")]
    ColumnLayout { index: usize },

    /// Failed to create the output file or its directory.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output path has an extension no writer handles.
    #[error("unsupported output format for {path}: .{extension}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The workbook writer rejected a cell or failed to save.
    #[error("failed to write workbook {path}: {message}")]
    Xlsx { path: PathBuf, message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
