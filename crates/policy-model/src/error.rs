//! Error types for mapping and manifest configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building mappings or loading a manifest.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Mapping names a target column outside the canonical schema.
    #[error("unknown canonical column '{name}'")]
    UnknownColumn { name: String },

    /// Manifest entry references a mapping that does not exist.
    #[error("unknown mapping '{name}'")]
    UnknownMapping { name: String },

    /// Manifest lists no files.
    #[error("manifest {path} lists no input files")]
    EmptyManifest { path: PathBuf },

    /// Manifest could not be read.
    #[error("failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid JSON for the expected shape.
    #[error("failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
