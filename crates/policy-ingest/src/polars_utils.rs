//! Polars AnyValue utility functions.
//!
//! Helpers for turning Polars `AnyValue`s into text, used wherever a cell
//! has to be read as a string regardless of its column dtype.

use polars::prelude::AnyValue;

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null, properly formats numeric types.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts an AnyValue to text, or `None` for the missing-value marker.
///
/// Unlike [`any_to_string`] an empty string stays `Some("")`, so callers can
/// tell a null cell from an empty one.
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        other => Some(any_to_string(other)),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
