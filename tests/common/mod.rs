//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

use seglogit::pipeline::{ID_COLUMN, PREDICTOR_COLUMNS, SEGMENT_COLUMN};

/// Create a synthetic survey with the full 14-column schema
///
/// Predictors are Likert-style integers stored as Float64. The segment is
/// drawn from a logistic model driven by `park_run_walk` (positive) and
/// `freq_drink_coffee_tea` (negative), so those two carry real signal.
pub fn create_survey_dataframe(rows: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let ids: Vec<String> = (0..rows).map(|i| format!("R{:05}", i)).collect();
    let predictors: Vec<Vec<f64>> = PREDICTOR_COLUMNS
        .iter()
        .map(|name| {
            let upper = if *name == "brand_loyalty" { 7 } else { 5 };
            (0..rows).map(|_| rng.gen_range(1..=upper) as f64).collect()
        })
        .collect();

    let segment: Vec<i32> = (0..rows)
        .map(|i| {
            let eta = -0.5 + 0.9 * (predictors[0][i] - 3.0) - 0.7 * (predictors[10][i] - 3.0);
            let p = 1.0 / (1.0 + (-eta).exp());
            i32::from(rng.gen::<f64>() < p)
        })
        .collect();

    let mut columns: Vec<Column> = Vec::with_capacity(PREDICTOR_COLUMNS.len() + 2);
    columns.push(Column::new(ID_COLUMN.into(), ids));
    columns.push(Column::new(SEGMENT_COLUMN.into(), segment));
    for (name, values) in PREDICTOR_COLUMNS.iter().zip(predictors) {
        columns.push(Column::new((*name).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("survey.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a tab-separated test file
pub fn create_temp_tsv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let tsv_path = temp_dir.path().join("survey.tsv");

    let mut file = std::fs::File::create(&tsv_path).unwrap();
    CsvWriter::new(&mut file)
        .with_separator(b'\t')
        .finish(df)
        .unwrap();

    (temp_dir, tsv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("survey.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Two-predictor frame whose MLE slopes are exactly zero
///
/// Within each x1 and x2 level the response is split evenly, so neither
/// predictor explains anything and both should be dropped by stepwise search.
pub fn create_uninformative_dataframe() -> DataFrame {
    df! {
        "y" => [0i32, 1, 0, 1, 0, 1, 0, 1],
        "x1" => [1.0f64, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0],
        "x2" => [5.0f64, 5.0, 1.0, 1.0, 4.0, 4.0, 2.0, 2.0],
    }
    .unwrap()
}

/// Large sample where both predictors have strong, independent effects
pub fn create_informative_dataframe(rows: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let x1: Vec<f64> = (0..rows).map(|_| rng.gen_range(-2.0..2.0)).collect();
    let x2: Vec<f64> = (0..rows).map(|_| rng.gen_range(-2.0..2.0)).collect();
    let y: Vec<i32> = x1
        .iter()
        .zip(&x2)
        .map(|(a, b)| {
            let eta = 2.0 * a - 2.0 * b;
            let p = 1.0 / (1.0 + (-eta).exp());
            i32::from(rng.gen::<f64>() < p)
        })
        .collect();

    df! {
        "y" => y,
        "x1" => x1,
        "x2" => x2,
    }
    .unwrap()
}

/// Names as owned strings
pub fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Assert two floats agree within an absolute tolerance
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {} within {} of {}",
        actual,
        tol,
        expected
    );
}
