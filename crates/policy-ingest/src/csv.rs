//! CSV reading via Polars.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

/// Rejects UTF-16 encoded files, which the CSV reader cannot decode.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a CSV file with a single header row into a DataFrame.
///
/// Dtypes are inferred from the whole file so that a late text value does
/// not fail a column inferred as numeric from its first rows.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
