//! CLI argument definitions for `ecom-prep`.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ecom_report::DEFAULT_ARTIFACTS_DIR;
use ecom_transform::{DEFAULT_CHECKPOINT, DEFAULT_CSV};
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "ecom-prep",
    version,
    about = "Clean and explore e-commerce transaction exports",
    long_about = "Clean raw e-commerce transaction exports and run exploratory reports.\n\n\
                  Normalizes currency amounts and mixed-format purchase dates, derives\n\
                  calendar features, and writes EDA, histogram and baseline model artifacts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a raw export and optionally save the checkpoint.
    Clean(CleanArgs),

    /// Write exploratory data analysis artifacts.
    Eda(ReportArgs),

    /// Write histogram bins of the cleaned purchase amount.
    Hist(ReportArgs),

    /// Train the baseline discount classifier.
    Model(ReportArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Raw CSV export to clean.
    #[arg(long = "csv", value_name = "PATH", default_value = DEFAULT_CSV)]
    pub csv: PathBuf,

    /// Persist the cleaned table to the checkpoint path.
    #[arg(long = "save")]
    pub save: bool,

    /// Checkpoint location used with --save.
    #[arg(long = "checkpoint", value_name = "PATH", default_value = DEFAULT_CHECKPOINT)]
    pub checkpoint: PathBuf,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Raw CSV export to load and clean.
    #[arg(long = "csv", value_name = "PATH", default_value = DEFAULT_CSV)]
    pub csv: PathBuf,

    /// Directory for report artifacts.
    #[arg(long = "artifacts", value_name = "DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Build logging configuration from CLI flags with consistent precedence.
///
/// `--log-level` wins over `-v/-q`; `RUST_LOG` is honored only when neither is given.
pub fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
