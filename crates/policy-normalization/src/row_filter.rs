//! Removal of rows with no values at all.

use polars::prelude::{BooleanChunked, ChunkFull, DataFrame};

use crate::error::Result;

/// Rows where at least one column holds a non-missing value.
fn rows_with_values(df: &DataFrame) -> BooleanChunked {
    df.get_columns().iter().fold(
        BooleanChunked::full("keep".into(), false, df.height()),
        |keep, column| &keep | &column.is_not_null(),
    )
}

/// Drops rows whose cells are all missing. Returns the number dropped.
///
/// Row order is preserved, and a second pass never drops anything.
pub fn drop_empty_rows(df: &mut DataFrame) -> Result<usize> {
    let height = df.height();
    if height == 0 {
        return Ok(0);
    }
    let filtered = df.filter(&rows_with_values(df))?;
    let dropped = height - filtered.height();
    if dropped > 0 {
        *df = filtered;
    }
    Ok(dropped)
}
