//! Integration tests for argument parsing, commands and summaries.

use std::path::{Path, PathBuf};

use clap::Parser;
use ecom_cli::cli::{Cli, Command, LogFormatArg, log_config_from_cli};
use ecom_cli::commands::{run_clean_command, run_eda_command, run_hist_command, run_model_command};
use ecom_cli::logging::LogFormat;
use ecom_cli::summary::{clean_summary_table, eda_summary_table, model_summary_line, preview_table};
use ecom_model::{ModelOutcome, SkipReason};
use ecom_report::HistogramOutcome;
use tracing::level_filters::LevelFilter;

const MINI_CSV: &str = "Customer_ID,Purchase_Amount,Time_of_Purchase,Purchase_Category,Discount_Used\n\
                        1,$100.00,03/02/2024,Books,0\n\
                        2,$250.00,03-03-2024,Toys,1\n";

fn write_csv(dir: &Path) -> PathBuf {
    let path = dir.join("mini.csv");
    std::fs::write(&path, MINI_CSV).unwrap();
    path
}

#[test]
fn clean_defaults() {
    let cli = Cli::try_parse_from(["ecom-prep", "clean"]).unwrap();
    let Command::Clean(args) = cli.command else {
        panic!("expected clean");
    };
    assert_eq!(
        args.csv,
        PathBuf::from("data/raw/Ecommerce_Consumer_Behavior_Analysis_Data.csv")
    );
    assert!(!args.save);
    assert_eq!(args.checkpoint, PathBuf::from("data/processed/ecom_clean.csv"));
}

#[test]
fn report_flags_and_global_options() {
    let cli = Cli::try_parse_from([
        "ecom-prep",
        "model",
        "--csv",
        "in.csv",
        "--artifacts",
        "out",
        "--log-format",
        "json",
        "--log-level",
        "debug",
    ])
    .unwrap();

    assert_eq!(cli.log_format, LogFormatArg::Json);
    let config = log_config_from_cli(&cli);
    assert_eq!(config.level_filter, LevelFilter::DEBUG);
    assert_eq!(config.format, LogFormat::Json);
    assert!(!config.use_env_filter);

    let Command::Model(args) = cli.command else {
        panic!("expected model");
    };
    assert_eq!(args.csv, PathBuf::from("in.csv"));
    assert_eq!(args.artifacts, PathBuf::from("out"));
}

#[test]
fn verbosity_flags_set_level() {
    let cli = Cli::try_parse_from(["ecom-prep", "-v", "eda"]).unwrap();
    let config = log_config_from_cli(&cli);
    assert_eq!(config.level_filter, LevelFilter::INFO);
    assert!(!config.use_env_filter);

    let cli = Cli::try_parse_from(["ecom-prep", "hist"]).unwrap();
    let config = log_config_from_cli(&cli);
    assert_eq!(config.level_filter, LevelFilter::WARN);
    assert!(config.use_env_filter);
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["ecom-prep", "plot"]).is_err());
}

#[test]
fn clean_command_saves_checkpoint_and_summarizes() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path());
    let checkpoint = dir.path().join("processed").join("clean.csv");
    let cli = Cli::try_parse_from([
        "ecom-prep",
        "clean",
        "--csv",
        csv.to_str().unwrap(),
        "--save",
        "--checkpoint",
        checkpoint.to_str().unwrap(),
    ])
    .unwrap();
    let Command::Clean(args) = cli.command else {
        panic!("expected clean");
    };

    let output = run_clean_command(&args).unwrap();

    assert!(checkpoint.exists());
    let summary = clean_summary_table(&output.summary).to_string();
    assert!(summary.contains("Rows"));
    assert!(summary.contains("Purchase_Amount"));
    assert!(summary.contains("clean.csv"));

    let preview = preview_table(&output.frame, 5).to_string();
    assert!(preview.contains("Purchase_DayOfWeek"));
    assert!(preview.contains("Saturday"));
}

#[test]
fn clean_command_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.csv");
    let cli = Cli::try_parse_from(["ecom-prep", "clean", "--csv", missing.to_str().unwrap()])
        .unwrap();
    let Command::Clean(args) = cli.command else {
        panic!("expected clean");
    };

    let error = run_clean_command(&args).unwrap_err();

    assert_eq!(
        format!("{error:#}"),
        format!("CSV file not found: {}", missing.display())
    );
}

#[test]
fn report_commands_write_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path());
    let artifacts = dir.path().join("artifacts");
    let parse = |command: &str| {
        let cli = Cli::try_parse_from([
            "ecom-prep",
            command,
            "--csv",
            csv.to_str().unwrap(),
            "--artifacts",
            artifacts.to_str().unwrap(),
        ])
        .unwrap();
        match cli.command {
            Command::Eda(args) | Command::Hist(args) | Command::Model(args) => args,
            Command::Clean(_) => panic!("expected a report command"),
        }
    };

    let report = run_eda_command(&parse("eda")).unwrap();
    assert_eq!(report.rows, 2);
    assert!(eda_summary_table(&report).to_string().contains("p90 threshold"));

    let histogram = run_hist_command(&parse("hist")).unwrap();
    assert!(matches!(histogram, HistogramOutcome::Written { .. }));

    let outcome = run_model_command(&parse("model")).unwrap();
    assert!(artifacts.join("model_report.txt").exists());
    assert!(model_summary_line(&outcome).starts_with("Model "));
}

#[test]
fn model_summary_lines() {
    let skipped = ModelOutcome::Skipped {
        reason: SkipReason::MissingTarget,
    };
    insta::assert_snapshot!(model_summary_line(&skipped), @"Model skipped: missing target");
}
