//! Writers for the master dataset.
//!
//! The format follows the output file extension: `.xlsx` gives a single
//! worksheet workbook, `.csv` a comma-separated file. Both start with one
//! header row in canonical column order.

use std::fs::{self, File};
use std::path::Path;

use polars::prelude::{Column, CsvWriter, DataFrame, DataType, SerWriter};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::info;

use crate::error::{OutputError, Result};

/// Default file name of the master dataset.
pub const DEFAULT_OUTPUT_FILE: &str = "MASTER_POLICY_DATASET.xlsx";

/// Worksheet name used for xlsx output.
pub const MASTER_SHEET_NAME: &str = "Master";

/// Master dataset file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

impl OutputFormat {
    /// Detects the format from the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            _ => Err(OutputError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Writes the master dataset in the format named by `path`'s extension,
/// replacing any existing file.
pub fn write_master(path: &Path, df: &mut DataFrame) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(path)?;
    match format {
        OutputFormat::Xlsx => write_master_xlsx(path, df)?,
        OutputFormat::Csv => write_master_csv(path, df)?,
    }
    info!(path = %path.display(), rows = df.height(), "master dataset written");
    Ok(format)
}

/// Writes the master dataset as CSV with a header row.
pub fn write_master_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    create_parent_dir(path)?;
    let mut file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

fn xlsx_error(path: &Path, message: impl ToString) -> OutputError {
    OutputError::Xlsx {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Writes the master dataset as a one-sheet workbook with a bold header row.
///
/// Numbers and booleans keep their cell type; every other dtype is written
/// as text. Missing values are left as empty cells.
pub fn write_master_xlsx(path: &Path, df: &DataFrame) -> Result<()> {
    create_parent_dir(path)?;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(MASTER_SHEET_NAME)
        .map_err(|err| xlsx_error(path, err))?;
    let header = Format::new().set_bold();
    for (idx, column) in df.get_columns().iter().enumerate() {
        let col = u16::try_from(idx)
            .map_err(|_| xlsx_error(path, format!("too many columns ({})", df.width())))?;
        sheet
            .write_string_with_format(0, col, column.name().as_str(), &header)
            .map_err(|err| xlsx_error(path, err))?;
        write_xlsx_column(path, sheet, col, column)?;
    }
    workbook.save(path).map_err(|err| xlsx_error(path, err))?;
    Ok(())
}

/// Row number of the `idx`-th data row; row 0 is the header.
fn data_row(path: &Path, idx: usize) -> Result<u32> {
    u32::try_from(idx + 1)
        .map_err(|_| xlsx_error(path, format!("row {idx} exceeds the worksheet limit")))
}

fn write_xlsx_column(path: &Path, sheet: &mut Worksheet, col: u16, column: &Column) -> Result<()> {
    let dtype = column.dtype();
    if dtype.is_integer() || dtype.is_float() {
        let numbers = column.cast(&DataType::Float64)?;
        for (idx, value) in numbers.as_materialized_series().f64()?.into_iter().enumerate() {
            if let Some(value) = value {
                sheet
                    .write_number(data_row(path, idx)?, col, value)
                    .map_err(|err| xlsx_error(path, err))?;
            }
        }
    } else if matches!(dtype, DataType::Boolean) {
        for (idx, value) in column.as_materialized_series().bool()?.into_iter().enumerate() {
            if let Some(value) = value {
                sheet
                    .write_boolean(data_row(path, idx)?, col, value)
                    .map_err(|err| xlsx_error(path, err))?;
            }
        }
    } else {
        let text = column.cast(&DataType::String)?;
        for (idx, value) in text.as_materialized_series().str()?.into_iter().enumerate() {
            if let Some(value) = value {
                sheet
                    .write_string(data_row(path, idx)?, col, value)
                    .map_err(|err| xlsx_error(path, err))?;
            }
        }
    }
    Ok(())
}
