//! Concatenation of standardized frames into the master dataset.

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::debug;

use policy_ingest::format_numeric;
use policy_model::{CanonicalColumn, canonical_column_names};

use crate::error::{OutputError, Result};

/// Common dtype for one column across frames.
///
/// `Null` dtypes carry no information and are skipped. If the rest agree
/// their dtype wins; otherwise, or if nothing is left, the column is text.
pub fn unified_dtype<'a>(dtypes: impl IntoIterator<Item = &'a DataType>) -> DataType {
    let mut found: Option<&DataType> = None;
    for dtype in dtypes {
        if matches!(dtype, DataType::Null) {
            continue;
        }
        match found {
            None => found = Some(dtype),
            Some(existing) if existing == dtype => {}
            Some(_) => return DataType::String,
        }
    }
    found.cloned().unwrap_or(DataType::String)
}

/// Text rendering of a column. Floats drop trailing zeros, so `2020.0`
/// becomes `"2020"`; other dtypes use the polars string cast.
fn to_text_column(column: &Column) -> Result<Column> {
    if !column.dtype().is_float() {
        return Ok(column.cast(&DataType::String)?);
    }
    let floats = column.cast(&DataType::Float64)?;
    let values: Vec<Option<String>> = floats
        .as_materialized_series()
        .f64()?
        .into_iter()
        .map(|value| value.map(format_numeric))
        .collect();
    Ok(Series::new(column.name().clone(), values).into_column())
}

fn coerce_column(column: &Column, target: &DataType) -> Result<Column> {
    if column.dtype() == target {
        return Ok(column.clone());
    }
    if matches!(target, DataType::String) && !matches!(column.dtype(), DataType::Null) {
        return to_text_column(column);
    }
    Ok(column.cast(target)?)
}

fn check_layout(frames: &[DataFrame]) -> Result<()> {
    let expected = canonical_column_names();
    for (index, frame) in frames.iter().enumerate() {
        let names = frame.get_column_names();
        let matches = names.len() == expected.len()
            && names
                .iter()
                .zip(&expected)
                .all(|(name, canonical)| name.as_str() == *canonical);
        if !matches {
            return Err(OutputError::ColumnLayout { index });
        }
    }
    Ok(())
}

/// Casts every canonical column to one dtype shared by all frames.
pub fn unify_column_dtypes(frames: &mut [DataFrame]) -> Result<()> {
    for column in CanonicalColumn::ALL {
        let name = column.name();
        let mut dtypes = Vec::with_capacity(frames.len());
        for frame in frames.iter() {
            dtypes.push(frame.column(name)?.dtype().clone());
        }
        let target = unified_dtype(&dtypes);
        for frame in frames.iter_mut() {
            let current = frame.column(name)?;
            if current.dtype() != &target {
                let coerced = coerce_column(current, &target)?;
                frame.with_column(coerced)?;
            }
        }
    }
    Ok(())
}

/// Overwrites the identifier column with `1..=height` as `Int64`.
pub fn assign_identifiers(df: &mut DataFrame) -> Result<()> {
    let height = i64::try_from(df.height()).unwrap_or(i64::MAX);
    let ids: Vec<i64> = (1..=height).collect();
    df.with_column(Series::new(CanonicalColumn::IDENTIFIER.name().into(), ids))?;
    Ok(())
}

/// Stacks standardized frames in the given order and renumbers them.
///
/// Returns `None` when there is nothing to aggregate. Rows keep input-frame
/// order, then intra-frame order.
pub fn aggregate(mut frames: Vec<DataFrame>) -> Result<Option<DataFrame>> {
    if frames.is_empty() {
        return Ok(None);
    }
    check_layout(&frames)?;
    unify_column_dtypes(&mut frames)?;

    let count = frames.len();
    let mut iter = frames.into_iter();
    let Some(mut master) = iter.next() else {
        return Ok(None);
    };
    for frame in iter {
        master.vstack_mut(&frame)?;
    }
    assign_identifiers(&mut master)?;
    debug!(frames = count, rows = master.height(), "master dataset aggregated");
    Ok(Some(master))
}
