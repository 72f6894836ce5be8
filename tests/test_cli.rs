//! Tests for CLI argument parsing and the binary

use assert_cmd::Command;
use clap::Parser;
use predicates::prelude::*;
use seglogit::cli::Cli;
use seglogit::pipeline::Direction;
use std::path::PathBuf;

#[path = "common/mod.rs"]
mod common;

use common::{create_survey_dataframe, create_temp_csv};

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["seglogit", "-i", "survey.csv"]);

    assert_eq!(cli.input, PathBuf::from("survey.csv"));
    assert_eq!(cli.max_iterations, 25);
    assert_eq!(cli.tolerance, 1e-8);
    assert_eq!(cli.direction, Direction::Both);
    assert_eq!(cli.infer_schema_length, 10000);
    assert!(cli.export.is_none());
    assert!(!cli.no_banner);
}

#[test]
fn test_cli_custom_options() {
    let cli = Cli::parse_from([
        "seglogit",
        "--input",
        "survey.tsv",
        "--max-iterations",
        "50",
        "--tolerance",
        "1e-10",
        "--direction",
        "forward",
        "--export",
        "out.json",
        "--no-banner",
    ]);

    assert_eq!(cli.max_iterations, 50);
    assert_eq!(cli.tolerance, 1e-10);
    assert_eq!(cli.direction, Direction::Forward);
    assert_eq!(cli.export, Some(PathBuf::from("out.json")));
    assert!(cli.no_banner);

    let config = cli.to_config();
    assert_eq!(config.logit.max_iterations, 50);
    assert_eq!(config.direction, Direction::Forward);
}

#[test]
fn test_cli_rejects_bad_values() {
    assert!(Cli::try_parse_from(["seglogit", "-i", "a.csv", "--tolerance", "2"]).is_err());
    assert!(Cli::try_parse_from(["seglogit", "-i", "a.csv", "--max-iterations", "0"]).is_err());
    assert!(Cli::try_parse_from(["seglogit", "-i", "a.csv", "--direction", "sideways"]).is_err());
    assert!(Cli::try_parse_from(["seglogit"]).is_err());
}

#[test]
fn test_binary_runs_and_exports() {
    let mut df = create_survey_dataframe(200, 71);
    let (dir, path) = create_temp_csv(&mut df);
    let export = dir.path().join("figures.json");

    Command::cargo_bin("seglogit")
        .unwrap()
        .args(["--no-banner", "-i"])
        .arg(&path)
        .arg("--export")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Figure 1: Descriptive Statistics"))
        .stdout(predicate::str::contains("Figure 5: Stepwise-Selected Logistic Model"))
        .stdout(predicate::str::contains("RUN SUMMARY"));

    assert!(export.exists());
}

#[test]
fn test_binary_fails_on_missing_file() {
    Command::cargo_bin("seglogit")
        .unwrap()
        .args(["-i", "/no/such/survey.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_help_lists_input_formats() {
    Command::cargo_bin("seglogit")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CSV, TSV or Parquet"));
}
