//! `ecom-prep`: clean and explore e-commerce transaction exports.

use clap::Parser;
use ecom_cli::cli::{Cli, Command, log_config_from_cli};
use ecom_cli::commands::{
    run_clean_command, run_eda_command, run_hist_command, run_model_command,
};
use ecom_cli::logging::init_logging;
use ecom_cli::summary::{
    print_clean_summary, print_eda_summary, print_histogram, print_model_summary,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Clean(args) => run_clean_command(args).map(|output| print_clean_summary(&output)),
        Command::Eda(args) => run_eda_command(args).map(|report| print_eda_summary(&report)),
        Command::Hist(args) => run_hist_command(args).map(|outcome| print_histogram(&outcome)),
        Command::Model(args) => run_model_command(args).map(|outcome| print_model_summary(&outcome)),
    };
    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
