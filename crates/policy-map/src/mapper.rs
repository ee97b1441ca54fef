//! Column mapper: source table to standardized table.

use polars::prelude::{Column, DataFrame, DataType};
use tracing::{debug, trace};

use policy_model::{CanonicalColumn, ColumnMapping};

use crate::error::{MapError, Result};
use crate::resolve::{Resolution, resolve_rule};

/// How one canonical column was filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnResolution {
    pub column: CanonicalColumn,
    pub resolution: Resolution,
}

/// A table with exactly the canonical columns, in canonical order.
#[derive(Debug, Clone)]
pub struct StandardizedTable {
    pub data: DataFrame,
    /// One entry per canonical column, in canonical order.
    pub resolutions: Vec<ColumnResolution>,
}

impl StandardizedTable {
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Source column feeding `column`, if one was found.
    pub fn source_for(&self, column: CanonicalColumn) -> Option<&str> {
        self.resolutions
            .get(column.position())
            .and_then(|r| r.resolution.source())
    }

    /// Canonical columns whose rule named sources that this table lacks.
    pub fn unmatched_columns(&self) -> Vec<CanonicalColumn> {
        self.resolutions
            .iter()
            .filter(|r| r.resolution == Resolution::Unmatched)
            .map(|r| r.column)
            .collect()
    }
}

/// A column of missing-value markers.
pub fn missing_column(column: CanonicalColumn, height: usize) -> Column {
    Column::full_null(column.name().into(), height, &DataType::Null)
}

/// Builds the standardized table for one source.
///
/// Every canonical column is present. A resolved source column is copied
/// under the canonical name with its values and dtype untouched; anything
/// else is filled with missing-value markers.
pub fn standardize(source: &DataFrame, mapping: &ColumnMapping) -> Result<StandardizedTable> {
    let height = source.height();
    let mut columns = Vec::with_capacity(CanonicalColumn::ALL.len());
    let mut resolutions = Vec::with_capacity(CanonicalColumn::ALL.len());

    for (column, rule) in mapping.rules() {
        let resolution = resolve_rule(rule, source);
        let values = match &resolution {
            Resolution::Matched(name) => {
                let mut values = source
                    .column(name)
                    .map_err(|_| MapError::ColumnNotFound {
                        column: name.clone(),
                    })?
                    .clone();
                values.rename(column.name().into());
                trace!(canonical = %column, source = %name, "column matched");
                values
            }
            Resolution::Absent | Resolution::Unmatched => missing_column(column, height),
        };
        columns.push(values);
        resolutions.push(ColumnResolution { column, resolution });
    }

    let data = DataFrame::new(columns)?;
    let matched = resolutions
        .iter()
        .filter(|r| matches!(r.resolution, Resolution::Matched(_)))
        .count();
    debug!(
        mapping = mapping.name(),
        rows = height,
        matched,
        "standardized table built"
    );
    Ok(StandardizedTable { data, resolutions })
}
