//! Source table loading.
//!
//! [`load_source_table`] is the single entry point the pipeline uses. It
//! picks a reader from the file extension and never inspects column names:
//! every column of the file is returned as-is.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::debug;

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};
use crate::workbook::read_workbook_table;

/// Spreadsheet format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Workbook,
}

impl SourceFormat {
    /// Detects the format from the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "ods" => Ok(Self::Workbook),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// An in-memory table loaded from one source file.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub path: PathBuf,
    /// Worksheet that was read; `None` for CSV.
    pub sheet: Option<String>,
    pub data: DataFrame,
}

impl SourceTable {
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Returns true if the table has a column with exactly this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.data.column(name).is_ok()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }
}

/// Loads a spreadsheet or CSV file.
///
/// `sheet` selects a worksheet in a workbook and is ignored for CSV files.
pub fn load_source_table(path: &Path, sheet: Option<&str>) -> Result<SourceTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let table = match SourceFormat::from_path(path)? {
        SourceFormat::Csv => {
            if let Some(sheet) = sheet {
                debug!(path = %path.display(), sheet, "sheet ignored for CSV source");
            }
            SourceTable {
                path: path.to_path_buf(),
                sheet: None,
                data: read_csv_table(path)?,
            }
        }
        SourceFormat::Workbook => {
            let (data, sheet_name) = read_workbook_table(path, sheet)?;
            SourceTable {
                path: path.to_path_buf(),
                sheet: Some(sheet_name),
                data,
            }
        }
    };

    debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.data.width(),
        "loaded source table"
    );
    Ok(table)
}
