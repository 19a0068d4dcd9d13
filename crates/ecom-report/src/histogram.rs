//! Equal-width histogram of the cleaned purchase amount.

use std::path::{Path, PathBuf};

use anyhow::Result;
use ecom_common::column_f64_values;
use ecom_model::SkipReason;
use ecom_model::columns::PURCHASE_AMOUNT_CLEAN;
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use tracing::{info, info_span, warn};

use crate::common::{lines_to_text, numeric_columns, write_csv_artifact};
use crate::options::ReportOptions;

/// Number of equal-width bins.
pub const HISTOGRAM_BINS: usize = 20;

/// Artifact name of the binned counts.
pub const HISTOGRAM_FILE: &str = "hist_purchase_amount.csv";

/// One bin; every bin is half-open except the last, which is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistogramOutcome {
    Written {
        histogram: Histogram,
        path: PathBuf,
    },
    Skipped {
        reason: SkipReason,
    },
}

/// Bins values into `bins` equal-width intervals over `[min, max]`.
///
/// NaN is ignored. When every value is equal the range widens to
/// `[v - 0.5, v + 0.5]`. No values (or zero bins) gives no bins.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let present: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if present.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = present.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for value in present {
        let idx = (((value - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            start: lo + width * idx as f64,
            end: if idx + 1 == bins {
                hi
            } else {
                lo + width * (idx + 1) as f64
            },
            count,
        })
        .collect()
}

/// Picks `Purchase_Amount_clean`, else the first numeric or boolean column.
pub fn histogram_column(df: &DataFrame) -> Option<String> {
    if df.column(PURCHASE_AMOUNT_CLEAN).is_ok() {
        return Some(PURCHASE_AMOUNT_CLEAN.to_string());
    }
    numeric_columns(df).into_iter().next()
}

/// Builds the histogram of the chosen column, or `None` when nothing is numeric.
pub fn histogram_for_frame(df: &DataFrame) -> Result<Option<Histogram>> {
    let Some(column) = histogram_column(df) else {
        return Ok(None);
    };
    let values: Vec<f64> = column_f64_values(df.column(&column)?)
        .into_iter()
        .flatten()
        .collect();
    Ok(Some(Histogram {
        bins: histogram_bins(&values, HISTOGRAM_BINS),
        column,
    }))
}

/// Writes `bin_start,bin_end,count`.
pub fn write_histogram(histogram: &Histogram, artifacts_dir: &Path) -> Result<PathBuf> {
    let starts: Vec<f64> = histogram.bins.iter().map(|bin| bin.start).collect();
    let ends: Vec<f64> = histogram.bins.iter().map(|bin| bin.end).collect();
    let counts: Vec<u64> = histogram.bins.iter().map(|bin| bin.count as u64).collect();
    let mut frame = DataFrame::new(vec![
        Series::new("bin_start".into(), starts).into_column(),
        Series::new("bin_end".into(), ends).into_column(),
        Series::new("count".into(), counts).into_column(),
    ])?;
    write_csv_artifact(artifacts_dir, HISTOGRAM_FILE, &mut frame)
}

/// Loads and cleans `path`, then writes the histogram of its amount column.
pub fn make_histogram(path: &Path, options: &ReportOptions) -> Result<HistogramOutcome> {
    let span = info_span!("histogram", path = %path.display());
    let _guard = span.enter();

    let df = ecom_transform::load_and_clean(path, false)?;
    let Some(histogram) = histogram_for_frame(&df)? else {
        warn!("no numeric columns available for plotting");
        return Ok(HistogramOutcome::Skipped {
            reason: SkipReason::NoNumericColumns,
        });
    };

    let path = write_histogram(&histogram, &options.artifacts_dir)?;
    info!(
        column = %histogram.column,
        values = histogram.total(),
        path = %path.display(),
        "histogram written"
    );
    Ok(HistogramOutcome::Written { histogram, path })
}

/// Renders the histogram as horizontal text bars, longest bar `width` wide.
pub fn render_bars(histogram: &Histogram, width: usize) -> String {
    let max = histogram.bins.iter().map(|bin| bin.count).max().unwrap_or(0);
    let mut lines = vec![format!("Histogram of {}", histogram.column)];
    for bin in &histogram.bins {
        let bar = if max == 0 { 0 } else { bin.count * width / max };
        lines.push(format!(
            "{:>10.2} - {:<10.2} | {:<width$} {}",
            bin.start,
            bin.end,
            "#".repeat(bar),
            bin.count
        ));
    }
    lines_to_text(&lines)
}
