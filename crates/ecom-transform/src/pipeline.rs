//! Cleaning pipeline for raw transaction tables.
//!
//! Loads a raw CSV export, appends normalized amount and date columns plus the
//! derived calendar features, and optionally persists a checkpoint copy.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ecom_transform::pipeline::{CleanOptions, run_clean};
//!
//! let options = CleanOptions::default().with_save_processed(true);
//! let output = run_clean(Path::new("data/raw/orders.csv"), &options)?;
//! println!("{} rows", output.summary.rows);
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use ecom_ingest::{read_csv_table, write_csv_table};
use ecom_model::DetectedColumns;
use ecom_model::columns::{
    CLEANED_COLUMNS, PURCHASE_AMOUNT, PURCHASE_AMOUNT_CLEAN, PURCHASE_DATE, TIME_OF_PURCHASE,
};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use crate::error::Result;
use crate::normalization::{
    date_feature_columns, date_series, normalize_amount_column, normalize_date_values,
};

/// Default location of the raw export.
pub const DEFAULT_CSV: &str = "data/raw/Ecommerce_Consumer_Behavior_Analysis_Data.csv";

/// Default checkpoint location for the cleaned table.
pub const DEFAULT_CHECKPOINT: &str = "data/processed/ecom_clean.csv";

/// Options for a cleaning run.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Persist the cleaned table to `checkpoint_path`.
    pub save_processed: bool,
    /// Where the checkpoint is written when `save_processed` is set.
    pub checkpoint_path: PathBuf,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            save_processed: false,
            checkpoint_path: PathBuf::from(DEFAULT_CHECKPOINT),
        }
    }
}

impl CleanOptions {
    #[must_use]
    pub fn with_save_processed(mut self, save: bool) -> Self {
        self.save_processed = save;
        self
    }

    #[must_use]
    pub fn with_checkpoint_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.checkpoint_path = path.into();
        self
    }
}

/// Counts describing one cleaning run.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanSummary {
    pub rows: usize,
    pub detected: DetectedColumns,
    /// Cells of `Purchase_Amount_clean` that ended up missing.
    pub missing_amounts: Option<usize>,
    /// Cells of `Purchase_Date` that ended up missing.
    pub missing_dates: Option<usize>,
    /// Checkpoint path, when one was written.
    pub checkpoint: Option<PathBuf>,
}

/// Cleaned table plus run summary.
#[derive(Debug, Clone)]
pub struct CleanOutput {
    pub frame: DataFrame,
    pub summary: CleanSummary,
}

/// Appends the normalized columns to a raw table. No I/O.
///
/// Recognized columns are detected once from the frame header. A table with
/// neither `Purchase_Amount` nor `Time_of_Purchase` is returned unchanged.
pub fn clean_frame(mut df: DataFrame) -> Result<(DataFrame, DetectedColumns)> {
    let detected =
        DetectedColumns::from_names(df.get_column_names().into_iter().map(|n| n.as_str()));

    if detected.amount {
        let amounts = normalize_amount_column(df.column(PURCHASE_AMOUNT)?, PURCHASE_AMOUNT_CLEAN);
        debug!(missing = amounts.null_count(), "normalized purchase amounts");
        df.with_column(amounts)?;
    }

    if detected.purchase_time {
        let dates = normalize_date_values(df.column(TIME_OF_PURCHASE)?);
        let parsed = date_series(PURCHASE_DATE, &dates)?;
        debug!(missing = parsed.null_count(), "parsed purchase dates");
        df.with_column(parsed)?;
        for feature in date_feature_columns(&dates) {
            df.with_column(feature)?;
        }
    }

    if detected.is_passthrough() {
        debug!("no recognized source columns; table passes through");
    }

    Ok((df, detected))
}

/// Loads, cleans and optionally persists a table.
///
/// Fails only when the input cannot be loaded (a missing path reports
/// [`TransformError::is_not_found`](crate::TransformError::is_not_found)) or
/// when the checkpoint cannot be written.
pub fn run_clean(path: &Path, options: &CleanOptions) -> Result<CleanOutput> {
    let span = info_span!("clean", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let raw = read_csv_table(path)?;
    debug!(columns = raw.width(), "read table");

    let (mut frame, detected) = clean_frame(raw)?;

    let missing_amounts = detected
        .amount
        .then(|| frame.column(PURCHASE_AMOUNT_CLEAN).map(|c| c.null_count()))
        .transpose()?;
    let missing_dates = detected
        .purchase_time
        .then(|| frame.column(PURCHASE_DATE).map(|c| c.null_count()))
        .transpose()?;

    let checkpoint = if options.save_processed {
        Some(write_csv_table(&mut frame, &options.checkpoint_path)?)
    } else {
        None
    };

    info!(
        rows = frame.height(),
        columns = frame.width(),
        appended = CLEANED_COLUMNS
            .iter()
            .filter(|&&name| frame.column(name).is_ok())
            .count(),
        amount = detected.amount,
        purchase_time = detected.purchase_time,
        checkpoint = checkpoint.as_ref().map(|p| p.display().to_string()),
        duration_ms = start.elapsed().as_millis(),
        "clean complete"
    );

    let summary = CleanSummary {
        rows: frame.height(),
        detected,
        missing_amounts,
        missing_dates,
        checkpoint,
    };
    Ok(CleanOutput { frame, summary })
}

/// Loads and cleans a table, persisting it to the default checkpoint when asked.
pub fn load_and_clean(path: &Path, save_processed: bool) -> Result<DataFrame> {
    let options = CleanOptions::default().with_save_processed(save_processed);
    run_clean(path, &options).map(|output| output.frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_clean_frame_amount_only() {
        let df = DataFrame::new(vec![
            Series::new("Purchase_Amount".into(), &["$10.00", "(5)", "None"]).into_column(),
        ])
        .unwrap();

        let (cleaned, detected) = clean_frame(df).unwrap();

        assert!(detected.amount);
        assert!(!detected.purchase_time);
        let names: Vec<&str> = cleaned.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Purchase_Amount", "Purchase_Amount_clean"]);
        let clean = cleaned.column("Purchase_Amount_clean").unwrap();
        assert_eq!(ecom_common::column_f64_values(clean), vec![Some(10.0), Some(-5.0), None]);
    }

    #[test]
    fn test_clean_frame_passthrough() {
        let df = DataFrame::new(vec![
            Series::new("Customer_ID".into(), &[1i64, 2]).into_column(),
            Series::new("Notes".into(), &["a", "b"]).into_column(),
        ])
        .unwrap();
        let original = df.clone();

        let (cleaned, detected) = clean_frame(df).unwrap();

        assert!(detected.is_passthrough());
        assert!(cleaned.equals_missing(&original));
    }

    #[test]
    fn test_options_builder() {
        let options = CleanOptions::default()
            .with_save_processed(true)
            .with_checkpoint_path("out/clean.csv");
        assert!(options.save_processed);
        assert_eq!(options.checkpoint_path, PathBuf::from("out/clean.csv"));
    }
}
