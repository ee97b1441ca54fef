//! Data model for the policy inventory master builder.
//!
//! - [`CanonicalColumn`]: the fixed 18-column master schema
//! - [`MappingRule`] / [`ColumnMapping`]: how each canonical column is sourced
//! - [`Manifest`]: the ordered list of input files and their mappings

pub mod builtin;
pub mod error;
pub mod manifest;
pub mod mapping;
pub mod schema;

pub use builtin::{
    CLIMATE_MAPPING, DEFAULT_INVENTORY_FILES, builtin_mapping, builtin_mapping_names,
    climate_mapping,
};
pub use error::{ModelError, Result};
pub use manifest::{InputFile, Manifest};
pub use mapping::{ColumnMapping, MappingRule};
pub use schema::{CanonicalColumn, canonical_column_names};
