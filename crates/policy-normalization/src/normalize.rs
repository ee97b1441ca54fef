//! Per-table normalization pass.

use polars::prelude::DataFrame;
use tracing::debug;

use policy_map::StandardizedTable;
use policy_model::ColumnMapping;

use crate::error::Result;
use crate::funding::{FundingCounts, normalize_funding_indicator};
use crate::row_filter::drop_empty_rows;

/// What normalization did to one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationSummary {
    /// `None` when the table had no funding source column.
    pub funding: Option<FundingCounts>,
    pub dropped_rows: usize,
}

/// Derives the funding indicator, then drops all-missing rows.
///
/// The funding pass runs first, so a row whose only source value is its
/// budget text survives with a `Yes`/`No` indicator.
pub fn normalize_table(
    table: &mut StandardizedTable,
    source: &DataFrame,
    mapping: &ColumnMapping,
) -> Result<NormalizationSummary> {
    let funding = normalize_funding_indicator(table, source, mapping)?;
    let dropped_rows = drop_empty_rows(&mut table.data)?;
    debug!(
        rows = table.height(),
        dropped = dropped_rows,
        "table normalized"
    );
    Ok(NormalizationSummary {
        funding,
        dropped_rows,
    })
}
