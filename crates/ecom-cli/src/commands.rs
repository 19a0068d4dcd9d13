use anyhow::Result;
use ecom_model::ModelOutcome;
use ecom_report::{
    ClassifierOptions, EdaReport, HistogramOutcome, ReportOptions, make_histogram, run_baseline,
    run_eda,
};
use ecom_transform::{CleanOptions, CleanOutput, run_clean};

use crate::cli::{CleanArgs, ReportArgs};

pub fn run_clean_command(args: &CleanArgs) -> Result<CleanOutput> {
    let options = CleanOptions::default()
        .with_save_processed(args.save)
        .with_checkpoint_path(&args.checkpoint);
    Ok(run_clean(&args.csv, &options)?)
}

pub fn run_eda_command(args: &ReportArgs) -> Result<EdaReport> {
    run_eda(&args.csv, &report_options(args))
}

pub fn run_hist_command(args: &ReportArgs) -> Result<HistogramOutcome> {
    make_histogram(&args.csv, &report_options(args))
}

pub fn run_model_command(args: &ReportArgs) -> Result<ModelOutcome> {
    run_baseline(
        &args.csv,
        &report_options(args),
        &ClassifierOptions::default(),
    )
}

fn report_options(args: &ReportArgs) -> ReportOptions {
    ReportOptions::new(&args.artifacts)
}
