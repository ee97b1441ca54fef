//! Normalization of standardized policy tables.
//!
//! - [`normalize_funding_indicator`] recomputes the funding column as
//!   `Yes`/`No` from the raw budget text.
//! - [`drop_empty_rows`] removes rows whose every cell is missing.
//! - [`normalize_table`] runs both in that order.

mod error;
mod funding;
mod normalize;
mod row_filter;

pub use error::{NormalizeError, Result};
pub use funding::{
    FundingCounts, FundingIndicator, NEGATIVE_FUNDING_PHRASES, classify_funding,
    normalize_funding_indicator,
};
pub use normalize::{NormalizationSummary, normalize_table};
pub use row_filter::drop_empty_rows;
