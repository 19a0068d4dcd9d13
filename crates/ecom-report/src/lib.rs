//! Reports over cleaned transaction tables.
//!
//! - **EDA**: head, info, describe, missing counts, duplicates, high-value filter,
//!   per-category summary
//! - **Histogram**: equal-width bins of the cleaned purchase amount
//! - **Model**: baseline logistic regression predicting `Discount_Used`
//!
//! Every entry point loads its input through the cleaning pipeline without
//! persisting a checkpoint, and writes into [`ReportOptions::artifacts_dir`].

mod common;
pub mod eda;
pub mod histogram;
pub mod model;
mod options;

pub use eda::{
    EdaReport, FilterStats, describe, high_value_filter, run_eda, summarize_by_category, write_eda,
};
pub use histogram::{
    Histogram, HistogramBin, HistogramOutcome, histogram_bins, histogram_for_frame, make_histogram,
    render_bars,
};
pub use model::{model_report_text, run_baseline, train_on_df, write_model_artifacts};
pub use options::{ClassifierOptions, DEFAULT_ARTIFACTS_DIR, ReportOptions};
