//! Funding indicator derivation.
//!
//! The funding column is recomputed from the raw budget text of the source
//! table. The text is lower-cased and compared for exact equality with a
//! fixed set of negative phrases; no trimming or substring matching is done,
//! so `" not specified"` classifies as `Yes`.

use std::fmt;

use polars::prelude::{DataFrame, DataType, NamedFrom, Series};
use tracing::debug;

use policy_map::{Resolution, StandardizedTable, resolve_column};
use policy_model::{CanonicalColumn, ColumnMapping};

use crate::error::Result;

/// Lower-cased budget texts that mean no funding was committed.
pub const NEGATIVE_FUNDING_PHRASES: [&str; 5] = [
    "not specified",
    "no exclusive",
    "not publicly specified",
    "not direct",
    "no dedicated budget",
];

/// Derived Yes/No value of the funding column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingIndicator {
    Yes,
    No,
}

impl FundingIndicator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl fmt::Display for FundingIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies one budget cell. `None` is the missing-value marker.
pub fn classify_funding(value: Option<&str>) -> FundingIndicator {
    let Some(text) = value else {
        return FundingIndicator::No;
    };
    let lowered = text.to_lowercase();
    if lowered.is_empty() || NEGATIVE_FUNDING_PHRASES.contains(&lowered.as_str()) {
        FundingIndicator::No
    } else {
        FundingIndicator::Yes
    }
}

/// Yes/No tallies for one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FundingCounts {
    pub yes: usize,
    pub no: usize,
}

/// Overwrites the funding column from its source column.
///
/// The source column is found with the same rule resolution the mapper
/// uses. When no source column exists the table is left untouched and
/// `None` is returned.
pub fn normalize_funding_indicator(
    table: &mut StandardizedTable,
    source: &DataFrame,
    mapping: &ColumnMapping,
) -> Result<Option<FundingCounts>> {
    let Resolution::Matched(source_name) = resolve_column(mapping, CanonicalColumn::FUNDING, source)
    else {
        return Ok(None);
    };

    let text = source.column(&source_name)?.cast(&DataType::String)?;
    let mut counts = FundingCounts::default();
    let mut values: Vec<&'static str> = Vec::with_capacity(source.height());
    for cell in text.as_materialized_series().str()? {
        let indicator = classify_funding(cell);
        match indicator {
            FundingIndicator::Yes => counts.yes += 1,
            FundingIndicator::No => counts.no += 1,
        }
        values.push(indicator.as_str());
    }

    table
        .data
        .with_column(Series::new(CanonicalColumn::FUNDING.name().into(), values))?;
    debug!(
        source = %source_name,
        yes = counts.yes,
        no = counts.no,
        "funding indicator derived"
    );
    Ok(Some(counts))
}
