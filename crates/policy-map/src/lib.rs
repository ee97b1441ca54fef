//! Column mapping for policy inventory sources.
//!
//! Resolves each canonical column's [`MappingRule`](policy_model::MappingRule)
//! against a source table and builds a [`StandardizedTable`] holding exactly
//! the canonical columns.

mod error;
mod mapper;
mod resolve;

pub use error::{MapError, Result};
pub use mapper::{ColumnResolution, StandardizedTable, missing_column, standardize};
pub use resolve::{Resolution, resolve_column, resolve_rule, resolve_source};
