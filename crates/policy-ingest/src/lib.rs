//! Policy inventory ingestion utilities.
//!
//! Loads source spreadsheets into Polars DataFrames with their original
//! column names intact.
//!
//! # Features
//!
//! - **Workbooks**: xlsx, xlsm, xlsb, xls and ods via `calamine`
//! - **CSV**: via the Polars CSV reader
//! - **Value helpers**: `AnyValue` to text conversion shared by later stages
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use policy_ingest::load_source_table;
//!
//! let table = load_source_table(Path::new("Policies Inventory_Nigeria.xlsx"), None)?;
//! println!("{} rows from sheet {:?}", table.height(), table.sheet);
//! ```

mod csv;
mod error;
mod headers;
mod loader;
mod polars_utils;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use csv::{read_csv_table, validate_encoding};
pub use loader::{SourceFormat, SourceTable, load_source_table};
pub use workbook::read_workbook_table;

// === Headers ===
pub use headers::{dedupe_headers, unnamed_header};

// === Value Helpers ===
pub use polars_utils::{any_to_string, any_to_text, format_numeric};
