//! Calendar features derived from a normalized purchase date.

use chrono::{Datelike, NaiveDate, Weekday};
use ecom_model::columns::DATE_FEATURE_COLUMNS;
use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use super::date::date_from_epoch_days;

/// Year, month, day and weekday name of one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFeatures {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub weekday: &'static str,
}

/// Full English weekday name.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Derives calendar features from a date (proleptic Gregorian, no timezone).
pub fn derive_date_features(date: NaiveDate) -> DateFeatures {
    DateFeatures {
        year: date.year(),
        month: date.month(),
        day: date.day(),
        weekday: weekday_name(date.weekday()),
    }
}

/// Builds the four feature columns, each null exactly where the date is null.
pub fn date_feature_columns(dates: &[Option<NaiveDate>]) -> Vec<Column> {
    let features: Vec<Option<DateFeatures>> =
        dates.iter().map(|d| d.map(derive_date_features)).collect();

    let years: Vec<Option<i32>> = features.iter().map(|f| f.map(|f| f.year)).collect();
    // month and day are 1..=31, always representable as i32
    let months: Vec<Option<i32>> = features.iter().map(|f| f.map(|f| f.month as i32)).collect();
    let days: Vec<Option<i32>> = features.iter().map(|f| f.map(|f| f.day as i32)).collect();
    let weekdays: Vec<Option<&str>> = features.iter().map(|f| f.map(|f| f.weekday)).collect();

    let [year, month, day, weekday] = DATE_FEATURE_COLUMNS;
    vec![
        Series::new(year.into(), years).into_column(),
        Series::new(month.into(), months).into_column(),
        Series::new(day.into(), days).into_column(),
        Series::new(weekday.into(), weekdays).into_column(),
    ]
}

/// Reads a normalized date cell.
///
/// Accepts polars `Date` cells and ISO `YYYY-MM-DD` text, which is how a
/// persisted checkpoint's date column reads back from CSV.
pub fn date_cell(value: AnyValue<'_>) -> Option<NaiveDate> {
    match value {
        AnyValue::Date(days) => date_from_epoch_days(days),
        AnyValue::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
        AnyValue::StringOwned(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
        _ => None,
    }
}

/// Reads every cell of a normalized date column.
pub fn date_values(column: &Column) -> Vec<Option<NaiveDate>> {
    (0..column.len())
        .map(|idx| date_cell(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect()
}

/// Appends the four feature columns derived from `date_col`.
///
/// Returns `Ok(false)` and leaves the frame untouched when `date_col` is absent.
/// Existing feature columns are replaced, so re-deriving is idempotent.
pub fn add_date_features(df: &mut DataFrame, date_col: &str) -> PolarsResult<bool> {
    let Ok(column) = df.column(date_col) else {
        return Ok(false);
    };
    let dates = date_values(column);
    for feature in date_feature_columns(&dates) {
        df.with_column(feature)?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::date::date_series;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_derive_date_features() {
        let features = derive_date_features(ymd(2024, 3, 2));
        assert_eq!(
            features,
            DateFeatures {
                year: 2024,
                month: 3,
                day: 2,
                weekday: "Saturday",
            }
        );
        assert_eq!(derive_date_features(ymd(2024, 1, 1)).weekday, "Monday");
    }

    #[test]
    fn test_feature_columns_mirror_missing_dates() {
        let columns = date_feature_columns(&[Some(ymd(2024, 1, 15)), None]);
        let names: Vec<&str> = columns.iter().map(|c| c.name().as_str()).collect();
        assert_eq!(names, DATE_FEATURE_COLUMNS);
        for column in &columns {
            assert_eq!(column.len(), 2);
            assert_eq!(column.null_count(), 1);
            assert!(column.get(1).unwrap().is_null());
        }
    }

    #[test]
    fn test_date_cell_accepts_iso_text() {
        assert_eq!(date_cell(AnyValue::String("2024-03-03")), Some(ymd(2024, 3, 3)));
        assert_eq!(date_cell(AnyValue::String("03/03/2024")), None);
        assert_eq!(date_cell(AnyValue::Null), None);
    }

    #[test]
    fn test_add_date_features_absent_column() {
        let mut df = DataFrame::new(vec![
            Series::new("Customer_ID".into(), &[1i64]).into_column(),
        ])
        .unwrap();
        assert!(!add_date_features(&mut df, "Purchase_Date").unwrap());
        assert_eq!(df.width(), 1);
    }

    #[test]
    fn test_add_date_features_is_idempotent() {
        let dates = date_series("Purchase_Date", &[Some(ymd(2024, 2, 20)), None]).unwrap();
        let mut df = DataFrame::new(vec![dates.into_column()]).unwrap();

        assert!(add_date_features(&mut df, "Purchase_Date").unwrap());
        let first = df.clone();
        assert!(add_date_features(&mut df, "Purchase_Date").unwrap());

        assert_eq!(df.width(), 5);
        assert!(df.equals_missing(&first));
    }
}
