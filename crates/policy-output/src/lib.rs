//! Master dataset assembly and output.
//!
//! Standardized frames are stacked by [`aggregate`], which unifies column
//! dtypes and renumbers the identifier column, and written by
//! [`write_master`] as xlsx or CSV.

mod aggregate;
mod error;
mod writer;

pub use aggregate::{aggregate, assign_identifiers, unified_dtype, unify_column_dtypes};
pub use error::{OutputError, Result};
pub use writer::{
    DEFAULT_OUTPUT_FILE, MASTER_SHEET_NAME, OutputFormat, write_master, write_master_csv,
    write_master_xlsx,
};
