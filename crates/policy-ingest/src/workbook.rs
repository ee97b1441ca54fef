//! Workbook (xlsx/xlsm/xlsb/xls/ods) reading via calamine.
//!
//! The first row of the sheet's used range is the header row. Each column's
//! dtype is inferred from its non-empty cells:
//!
//! | cells                              | dtype     |
//! |------------------------------------|-----------|
//! | integers or integral floats        | `Int64`   |
//! | any numbers                        | `Float64` |
//! | booleans                           | `Boolean` |
//! | anything else, or no values at all | `String`  |

use std::path::Path;

use calamine::{Data, DataType, Range, Reader, open_workbook_auto};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::headers::dedupe_headers;
use crate::polars_utils::format_numeric;

/// A cell reduced to the value kinds the loader distinguishes.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Missing,
}

impl Cell {
    fn from_data(data: &Data) -> Self {
        match data {
            Data::Int(v) => Cell::Int(*v),
            Data::Float(v) => Cell::Float(*v),
            Data::Bool(b) => Cell::Bool(*b),
            Data::String(s) if s.is_empty() => Cell::Missing,
            Data::String(s) => Cell::Text(s.clone()),
            Data::DateTime(_) => data
                .as_datetime()
                .map(|dt| {
                    if dt.time() == chrono::NaiveTime::MIN {
                        dt.format("%Y-%m-%d").to_string()
                    } else {
                        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
                    }
                })
                .map_or(Cell::Missing, Cell::Text),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(_) | Data::Empty => Cell::Missing,
        }
    }

    fn as_integral(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            Cell::Float(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => Some(*v as i64),
            _ => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            Cell::Int(v) => Some(v.to_string()),
            Cell::Float(v) => Some(format_numeric(v)),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Text(s) => Some(s),
            Cell::Missing => None,
        }
    }
}

/// Reads one worksheet into a DataFrame.
///
/// Returns the DataFrame and the name of the sheet that was read. With no
/// `sheet`, the first worksheet is used.
pub fn read_workbook_table(path: &Path, sheet: Option<&str>) -> Result<(DataFrame, String)> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|n| n == name) {
                return Err(IngestError::SheetNotFound {
                    path: path.to_path_buf(),
                    sheet: name.to_string(),
                });
            }
            name.to_string()
        }
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| IngestError::NoWorksheet {
                path: path.to_path_buf(),
            })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        height = range.height(),
        width = range.width(),
        "read worksheet range"
    );

    let df = range_to_dataframe(&range)?;
    Ok((df, sheet_name))
}

/// Converts a sheet range to a DataFrame using its first row as headers.
fn range_to_dataframe(range: &Range<Data>) -> Result<DataFrame> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let raw_headers: Vec<String> = header_row.iter().map(header_text).collect();
    let headers = dedupe_headers(raw_headers);

    let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (idx, column) in cells.iter_mut().enumerate() {
            let cell = row.get(idx).map_or(Cell::Missing, Cell::from_data);
            column.push(cell);
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(cells)
        .map(|(name, values)| build_column(name, values))
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn header_text(data: &Data) -> String {
    Cell::from_data(data).into_text().unwrap_or_default()
}

fn build_column(name: &str, values: Vec<Cell>) -> Column {
    let present: Vec<&Cell> = values.iter().filter(|c| **c != Cell::Missing).collect();

    if !present.is_empty() && present.iter().all(|c| c.as_integral().is_some()) {
        let ints: Vec<Option<i64>> = values.iter().map(Cell::as_integral).collect();
        return Series::new(name.into(), ints).into();
    }
    if !present.is_empty() && present.iter().all(|c| c.as_float().is_some()) {
        let floats: Vec<Option<f64>> = values.iter().map(Cell::as_float).collect();
        return Series::new(name.into(), floats).into();
    }
    if !present.is_empty() && present.iter().all(|c| matches!(c, Cell::Bool(_))) {
        let bools: Vec<Option<bool>> = values
            .iter()
            .map(|c| match c {
                Cell::Bool(b) => Some(*b),
                _ => None,
            })
            .collect();
        return Series::new(name.into(), bools).into();
    }
    let text: Vec<Option<String>> = values.into_iter().map(Cell::into_text).collect();
    Series::new(name.into(), text).into()
}
