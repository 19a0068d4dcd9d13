//! Purchase date normalization.
//!
//! Source exports mix `MM/DD/YYYY` and `MM-DD-YYYY` (and the odd `MM.DD.YYYY`).
//! Separators are unified to `/` and the result is parsed strictly as
//! month/day/4-digit-year. Day-first, two-digit-year and ISO-ordered values are
//! rejected as missing rather than guessed.

use chrono::NaiveDate;
use ecom_common::any_to_string;
use polars::prelude::{AnyValue, Column, DataType, NamedFrom, PolarsResult, Series};

/// Unix epoch, day zero of the polars `Date` physical representation.
const EPOCH: NaiveDate = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date");

/// Normalizes one date string to a calendar date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ecom_transform::normalization::normalize_date;
///
/// assert_eq!(normalize_date("01/15/2024"), NaiveDate::from_ymd_opt(2024, 1, 15));
/// assert_eq!(normalize_date("02-20-2024"), NaiveDate::from_ymd_opt(2024, 2, 20));
/// assert_eq!(normalize_date("bad"), None);
/// ```
pub fn normalize_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let unified: String = trimmed
        .chars()
        .map(|c| if matches!(c, '-' | '.') { '/' } else { c })
        .collect();
    parse_month_day_year(&unified)
}

/// Parses `M/D/YYYY` with 1-2 digit month and day and an exactly 4-digit year.
fn parse_month_day_year(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('/');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    if !is_digits(month, 1..=2) || !is_digits(day, 1..=2) || !is_digits(year, 4..=4) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn is_digits(field: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&field.len()) && field.bytes().all(|b| b.is_ascii_digit())
}

/// Normalizes one loosely-typed cell by coercing it to text first.
pub fn normalize_date_value(value: AnyValue<'_>) -> Option<NaiveDate> {
    normalize_date(&any_to_string(value))
}

/// Days since the Unix epoch, the physical value of a polars `Date`.
pub fn epoch_days(date: NaiveDate) -> i32 {
    // Any NaiveDate fits: chrono's year range keeps this well inside i32.
    (date - EPOCH).num_days() as i32
}

/// Inverse of [`epoch_days`].
pub fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    EPOCH.checked_add_signed(chrono::Duration::days(i64::from(days)))
}

/// Builds a nullable polars `Date` series from calendar dates.
pub fn date_series(name: &str, dates: &[Option<NaiveDate>]) -> PolarsResult<Series> {
    let days: Vec<Option<i32>> = dates.iter().map(|d| d.map(epoch_days)).collect();
    Series::new(name.into(), days).cast(&DataType::Date)
}

/// Normalizes every cell of a raw date column.
pub fn normalize_date_values(column: &Column) -> Vec<Option<NaiveDate>> {
    (0..column.len())
        .map(|idx| normalize_date_value(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    #[test]
    fn test_separator_conventions_agree() {
        assert_eq!(normalize_date("03/02/2024"), ymd(2024, 3, 2));
        assert_eq!(normalize_date("03-02-2024"), ymd(2024, 3, 2));
        assert_eq!(normalize_date("03.02.2024"), ymd(2024, 3, 2));
        assert_eq!(normalize_date(" 3/2/2024 "), ymd(2024, 3, 2));
    }

    #[test]
    fn test_rejects_other_orders() {
        assert_eq!(normalize_date("2024-03-02"), None); // ISO order
        assert_eq!(normalize_date("03/02/24"), None); // two-digit year
        assert_eq!(normalize_date("15/01/2024"), None); // day-first
        assert_eq!(normalize_date("03/02/02024"), None);
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert_eq!(normalize_date("13/01/2024"), None);
        assert_eq!(normalize_date("02/31/2024"), None);
        assert_eq!(normalize_date("02/29/2023"), None);
        assert_eq!(normalize_date("02/29/2024"), ymd(2024, 2, 29));
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("None"), None);
        assert_eq!(normalize_date("03/02/2024 10:30"), None);
        assert_eq!(normalize_date("03//2024"), None);
        assert_eq!(normalize_date("+3/02/2024"), None);
    }

    #[test]
    fn test_epoch_days_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(epoch_days(EPOCH), 0);
        assert_eq!(date_from_epoch_days(epoch_days(date)), Some(date));
    }

    #[test]
    fn test_date_series_dtype() {
        let series = date_series("Purchase_Date", &[ymd(2024, 1, 15), None]).unwrap();
        assert_eq!(series.dtype(), &DataType::Date);
        assert_eq!(series.null_count(), 1);
    }
}
