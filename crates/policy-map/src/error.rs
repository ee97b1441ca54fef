//! Error types for mapping operations.

use thiserror::Error;

/// Errors from building a standardized table.
#[derive(Debug, Error)]
pub enum MapError {
    /// A resolved source column disappeared from the frame.
    #[error("source column '{column}' not found")]
    ColumnNotFound { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for MapError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MapError>;
