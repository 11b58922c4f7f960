//! Patient count coercion.

use influx_common::{any_to_f64, parse_f64};
use polars::prelude::AnyValue;

/// Parses a count written as text, ignoring thousands separators and whitespace.
///
/// "1,234" and " 1 234 " both give 1234.
pub fn parse_count_text(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| *ch != ',' && !ch.is_whitespace())
        .collect();
    parse_f64(&cleaned)
}

/// Coerces a raw cell to a patient count.
///
/// Returns `None` for empty, unparseable, non-finite or negative values.
pub fn coerce_count(value: AnyValue<'_>) -> Option<f64> {
    any_to_f64(value, parse_count_text).filter(|v| v.is_finite() && *v >= 0.0)
}
