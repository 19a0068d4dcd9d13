//! Exploratory data analysis artifacts for a cleaned table.
//!
//! [`write_eda`] writes, into the artifacts directory:
//!
//! - `eda_head.csv`: first rows
//! - `eda_info.txt`: shape plus per-column non-null count and dtype
//! - `eda_describe.csv`: summary statistics of numeric and boolean columns
//! - `eda_missing.csv`: missing cells per column
//! - `eda_duplicates.txt`: rows identical to an earlier row
//! - `eda_filter_stats.csv`: high-value filter outcome (needs `Purchase_Amount_clean`)
//! - `eda_category_summary.csv`: per-category aggregates (needs `Purchase_Category`)

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Result, ensure};
use ecom_common::{any_to_string, column_f64_values};
use ecom_model::columns::{
    CUSTOMER_SATISFACTION, DISCOUNT_USED, PURCHASE_AMOUNT_CLEAN, PURCHASE_CATEGORY,
};
use polars::prelude::{
    AnyValue, BooleanChunked, DataFrame, DataType, Expr, IntoColumn, IntoLazy, NamedFrom, Series,
    SortMultipleOptions, col, len,
};
use tracing::{debug, info, info_span};

use crate::common::{
    mean, numeric_columns, quantile_linear, quantile_nearest, round_to, sample_std, sorted,
    lines_to_text, write_csv_artifact, write_text_artifact,
};
use crate::options::ReportOptions;

/// Rows written to `eda_head.csv`.
pub const HEAD_ROWS: usize = 5;

/// Quantile used for the high-value filter; 0.10 keeps roughly the top 90%.
pub const FILTER_QUANTILE: f64 = 0.10;

const DESCRIBE_STATS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Outcome of the high-value filter on `Purchase_Amount_clean`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStats {
    /// Label such as `p90`.
    pub percentile: String,
    /// `None` when the column has no values.
    pub threshold: Option<f64>,
    pub rows_kept: usize,
    pub rows_total: usize,
    pub kept_share: f64,
}

/// What an EDA run produced.
#[derive(Debug, Clone)]
pub struct EdaReport {
    pub rows: usize,
    pub columns: usize,
    pub duplicates: usize,
    pub filter: Option<FilterStats>,
    pub artifacts: Vec<PathBuf>,
}

/// Keeps rows whose `column` value is at or above its `q` quantile.
///
/// The threshold is the value at the nearest rank of the sorted non-missing
/// values. Rows with a missing value are dropped. Returns the kept rows and the
/// threshold, which is `None` (with no rows kept) when the column has no values.
pub fn high_value_filter(df: &DataFrame, column: &str, q: f64) -> Result<(DataFrame, Option<f64>)> {
    let values = column_f64_values(df.column(column)?);
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let threshold = quantile_nearest(&sorted(&present), q);

    let mask: BooleanChunked = values
        .iter()
        .map(|value| match (value, threshold) {
            (Some(v), Some(t)) => *v >= t,
            _ => false,
        })
        .collect();
    Ok((df.filter(&mask)?, threshold))
}

/// Percentile label for the share of rows a quantile keeps (`0.10` -> `p90`).
pub fn percentile_label(q: f64) -> String {
    format!("p{}", ((1.0 - q) * 100.0).round() as i64)
}

/// Runs the high-value filter when `Purchase_Amount_clean` exists.
pub fn filter_stats(df: &DataFrame) -> Result<Option<FilterStats>> {
    if df.column(PURCHASE_AMOUNT_CLEAN).is_err() {
        return Ok(None);
    }
    let (kept, threshold) = high_value_filter(df, PURCHASE_AMOUNT_CLEAN, FILTER_QUANTILE)?;
    let rows_total = df.height();
    let kept_share = if rows_total == 0 {
        0.0
    } else {
        kept.height() as f64 / rows_total as f64
    };
    Ok(Some(FilterStats {
        percentile: percentile_label(FILTER_QUANTILE),
        threshold: threshold.map(|t| round_to(t, 2)),
        rows_kept: kept.height(),
        rows_total,
        kept_share: round_to(kept_share, 4),
    }))
}

fn filter_stats_frame(stats: &FilterStats) -> Result<DataFrame> {
    Ok(DataFrame::new(vec![
        Series::new("percentile".into(), [stats.percentile.as_str()]).into_column(),
        Series::new("threshold_value".into(), [stats.threshold]).into_column(),
        Series::new("rows_kept".into(), [stats.rows_kept as u64]).into_column(),
        Series::new("rows_total".into(), [stats.rows_total as u64]).into_column(),
        Series::new("kept_share".into(), [stats.kept_share]).into_column(),
    ])?)
}

/// Groups by `Purchase_Category` (missing is its own group), sorted by category.
///
/// Always carries `n`; adds `avg_amount`, `avg_satisfaction` and
/// `discount_rate` for whichever source columns exist.
pub fn summarize_by_category(df: &DataFrame) -> Result<DataFrame> {
    ensure!(
        df.column(PURCHASE_CATEGORY).is_ok(),
        "column {PURCHASE_CATEGORY} not found"
    );

    let mut aggs: Vec<Expr> = vec![len().cast(DataType::UInt64).alias("n")];
    for (source, alias) in [
        (PURCHASE_AMOUNT_CLEAN, "avg_amount"),
        (CUSTOMER_SATISFACTION, "avg_satisfaction"),
        (DISCOUNT_USED, "discount_rate"),
    ] {
        if df.column(source).is_ok() {
            aggs.push(col(source).cast(DataType::Float64).mean().alias(alias));
        }
    }

    let summary = df
        .clone()
        .lazy()
        .group_by([col(PURCHASE_CATEGORY)])
        .agg(aggs)
        .sort(
            [PURCHASE_CATEGORY],
            SortMultipleOptions::default().with_nulls_last(true),
        )
        .collect()?;
    Ok(summary)
}

/// Count, mean, sample std, min, quartiles and max of every numeric column.
///
/// Values are rounded to 2 decimals. Returns `None` when no column is numeric.
pub fn describe(df: &DataFrame) -> Result<Option<DataFrame>> {
    let names = numeric_columns(df);
    if names.is_empty() {
        return Ok(None);
    }

    let mut columns = vec![Series::new("statistic".into(), DESCRIBE_STATS).into_column()];
    for name in &names {
        let present: Vec<f64> = column_f64_values(df.column(name)?)
            .into_iter()
            .flatten()
            .collect();
        let ordered = sorted(&present);
        let stats = [
            Some(present.len() as f64),
            mean(&present),
            sample_std(&present),
            ordered.first().copied(),
            quantile_linear(&ordered, 0.25),
            quantile_linear(&ordered, 0.50),
            quantile_linear(&ordered, 0.75),
            ordered.last().copied(),
        ];
        let rounded: Vec<Option<f64>> = stats.iter().map(|s| s.map(|v| round_to(v, 2))).collect();
        columns.push(Series::new(name.as_str().into(), rounded).into_column());
    }
    Ok(Some(DataFrame::new(columns)?))
}

/// Missing cells per column, as `column,n_missing`.
pub fn missing_counts(df: &DataFrame) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let counts: Vec<u64> = df
        .get_columns()
        .iter()
        .map(|column| column.null_count() as u64)
        .collect();
    Ok(DataFrame::new(vec![
        Series::new("column".into(), names).into_column(),
        Series::new("n_missing".into(), counts).into_column(),
    ])?)
}

/// Rows identical (missing cells included) to an earlier row.
pub fn duplicate_count(df: &DataFrame) -> usize {
    let columns = df.get_columns();
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(df.height());
    let mut duplicates = 0;
    for idx in 0..df.height() {
        let key: Vec<Option<String>> = columns
            .iter()
            .map(|column| match column.get(idx) {
                Ok(AnyValue::Null) | Err(_) => None,
                Ok(value) => Some(any_to_string(value)),
            })
            .collect();
        if !seen.insert(key) {
            duplicates += 1;
        }
    }
    duplicates
}

/// Shape plus per-column non-null count and dtype.
pub fn info_text(df: &DataFrame) -> String {
    let mut lines = vec![
        format!("rows: {}", df.height()),
        format!("columns: {}", df.width()),
        String::new(),
    ];

    let width = df
        .get_column_names()
        .iter()
        .map(|name| name.len())
        .max()
        .unwrap_or(0)
        .max("column".len());
    lines.push(format!("{:>3}  {:<width$}  {:>8}  dtype", "#", "column", "non_null"));
    for (idx, column) in df.get_columns().iter().enumerate() {
        let non_null = column.len() - column.null_count();
        lines.push(format!(
            "{idx:>3}  {:<width$}  {non_null:>8}  {}",
            column.name().as_str(),
            column.dtype()
        ));
    }
    lines_to_text(&lines)
}

/// Writes every EDA artifact for an already-cleaned table.
pub fn write_eda(df: &DataFrame, artifacts_dir: &Path) -> Result<EdaReport> {
    let mut artifacts = Vec::new();

    let mut head = df.head(Some(HEAD_ROWS));
    artifacts.push(write_csv_artifact(artifacts_dir, "eda_head.csv", &mut head)?);

    artifacts.push(write_text_artifact(
        artifacts_dir,
        "eda_info.txt",
        &info_text(df),
    )?);

    match describe(df)? {
        Some(mut stats) => {
            artifacts.push(write_csv_artifact(artifacts_dir, "eda_describe.csv", &mut stats)?);
        }
        None => debug!("no numeric columns; describe skipped"),
    }

    let mut missing = missing_counts(df)?;
    artifacts.push(write_csv_artifact(artifacts_dir, "eda_missing.csv", &mut missing)?);

    let duplicates = duplicate_count(df);
    artifacts.push(write_text_artifact(
        artifacts_dir,
        "eda_duplicates.txt",
        &duplicates.to_string(),
    )?);

    let filter = filter_stats(df)?;
    if let Some(stats) = &filter {
        let mut frame = filter_stats_frame(stats)?;
        artifacts.push(write_csv_artifact(
            artifacts_dir,
            "eda_filter_stats.csv",
            &mut frame,
        )?);
    }

    if df.column(PURCHASE_CATEGORY).is_ok() {
        let mut summary = summarize_by_category(df)?;
        artifacts.push(write_csv_artifact(
            artifacts_dir,
            "eda_category_summary.csv",
            &mut summary,
        )?);
    }

    Ok(EdaReport {
        rows: df.height(),
        columns: df.width(),
        duplicates,
        filter,
        artifacts,
    })
}

/// Loads and cleans `path`, then writes the EDA artifacts.
pub fn run_eda(path: &Path, options: &ReportOptions) -> Result<EdaReport> {
    let span = info_span!("eda", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let df = ecom_transform::load_and_clean(path, false)?;
    let report = write_eda(&df, &options.artifacts_dir)?;

    info!(
        rows = report.rows,
        artifacts = report.artifacts.len(),
        dir = %options.artifacts_dir.display(),
        duration_ms = start.elapsed().as_millis(),
        "eda complete"
    );
    Ok(report)
}
