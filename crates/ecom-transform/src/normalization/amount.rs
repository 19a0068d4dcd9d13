//! Currency amount normalization.
//!
//! Turns free-form currency text (`$1,234.50`, `(12.00)`, `  89.00`) into a
//! finite `f64`, or `None` when the cell is empty, a missing-value token, or
//! not a number once formatting is stripped.

use ecom_common::any_to_string;
use polars::prelude::{AnyValue, Column, NamedFrom, Series};

/// Textual tokens treated as absent data.
pub const MISSING_TOKENS: [&str; 5] = ["", "None", "none", "NaN", "nan"];

/// Normalizes one currency string.
///
/// # Examples
///
/// ```
/// use ecom_transform::normalization::normalize_amount;
///
/// assert_eq!(normalize_amount("$1,234.50"), Some(1234.5));
/// assert_eq!(normalize_amount("(123.45)"), Some(-123.45));
/// assert_eq!(normalize_amount("nan"), None);
/// assert_eq!(normalize_amount("twelve"), None);
/// ```
pub fn normalize_amount(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if MISSING_TOKENS.contains(&trimmed) {
        return None;
    }

    let stripped: String = trimmed.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    // `$ 1,234.50` leaves a space behind the symbol
    let stripped = stripped.trim();

    // Accounting notation: (123.45) means -123.45
    let signed = match stripped
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => format!("-{}", inner.trim()),
        None => stripped.to_string(),
    };

    signed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalizes one loosely-typed cell by coercing it to text first.
pub fn normalize_amount_value(value: AnyValue<'_>) -> Option<f64> {
    normalize_amount(&any_to_string(value))
}

/// Normalizes every cell of a column into a nullable `Float64` series.
pub fn normalize_amount_column(column: &Column, name: &str) -> Series {
    let values: Vec<Option<f64>> = (0..column.len())
        .map(|idx| normalize_amount_value(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect();
    Series::new(name.into(), values)
}
