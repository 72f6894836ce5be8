//! Tests for descriptive statistics

use polars::prelude::*;
use seglogit::pipeline::{modeling_columns, summarize, summarize_all, summarize_values};

#[path = "common/mod.rs"]
mod common;

use common::{assert_close, create_survey_dataframe};

#[test]
fn test_summary_with_outlier() {
    let df = df! {
        "x" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0],
    }
    .unwrap();

    let r = summarize(&df, "x").unwrap();

    assert_eq!(r.count, 10);
    assert_eq!(r.missing, 0);
    assert_close(r.min, 1.0, 1e-12);
    assert_close(r.max, 100.0, 1e-12);
    assert_close(r.range, 99.0, 1e-12);
    assert_close(r.mean, 14.5, 1e-12);
    assert_close(r.median, 5.5, 1e-12);
    assert_close(r.q1, 3.25, 1e-12);
    assert_close(r.q3, 7.75, 1e-12);
    assert_close(r.iqr, 4.5, 1e-12);
    assert_close(r.outlier_threshold, 21.25, 1e-12);
    assert_eq!(r.outlier_count, 1);
    assert_close(r.outlier_pct, 0.1, 1e-12);
}

#[test]
fn test_summary_counts_missing() {
    let df = df! {
        "x" => [Some(2.0f64), None, Some(4.0), None],
    }
    .unwrap();

    let r = summarize(&df, "x").unwrap();
    assert_eq!(r.observations, 4);
    assert_eq!(r.count, 2);
    assert_eq!(r.missing, 2);
    assert_close(r.mean, 3.0, 1e-12);
    assert_close(r.std_dev, std::f64::consts::SQRT_2, 1e-12);
}

#[test]
fn test_constant_column_has_no_outliers() {
    let r = summarize_values("c", "f64", &[5.0; 8]);
    assert_eq!(r.iqr, 0.0);
    assert_eq!(r.outlier_threshold, 5.0);
    assert_eq!(r.outlier_count, 0);
    assert_eq!(r.std_dev, 0.0);
}

#[test]
fn test_all_missing_column() {
    let r = summarize_values("empty", "f64", &[f64::NAN, f64::NAN]);
    assert_eq!(r.count, 0);
    assert_eq!(r.missing, 2);
    assert!(r.mean.is_nan());
    assert!(r.median.is_nan());
    assert_eq!(r.outlier_count, 0);
}

#[test]
fn test_summarize_all_keeps_declared_order() {
    let df = create_survey_dataframe(40, 11);
    let columns = modeling_columns();

    let records = summarize_all(&df, &columns).unwrap();

    assert_eq!(records.len(), 13);
    let variables: Vec<&str> = records.iter().map(|r| r.variable.as_str()).collect();
    let expected: Vec<&str> = columns.iter().map(|s| s.as_str()).collect();
    assert_eq!(variables, expected);
    assert!(records.iter().all(|r| r.count == 40));
}

#[test]
fn test_summarize_rejects_unknown_and_text_columns() {
    let df = df! {
        "label" => ["a", "b", "c"],
    }
    .unwrap();

    assert!(summarize(&df, "nope").is_err());
    assert!(summarize(&df, "label").is_err());
}

#[test]
fn test_outlier_count_grows_with_injected_magnitude() {
    let base: Vec<f64> = (1..=9).map(f64::from).collect();
    let magnitudes = [5.0, 9.0, 15.0, 21.25, 21.5, 30.0, 100.0, 1e3, 1e6];

    let counts: Vec<usize> = magnitudes
        .iter()
        .map(|&v| {
            let mut values = base.clone();
            values.push(v);
            summarize_values("x", "f64", &values).outlier_count
        })
        .collect();

    // At or below Q3 + 3*IQR = 21.25 nothing is flagged
    assert_eq!(&counts[..4], &[0, 0, 0, 0]);
    assert!(counts[4..].iter().all(|&c| c == 1));
    assert!(counts.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_outlier_count_with_several_injected_values() {
    let base: Vec<f64> = (1..=18).map(f64::from).collect();
    let mut previous = 0;
    for k in [1.0, 10.0, 30.0, 100.0, 1000.0] {
        let mut values = base.clone();
        values.extend([18.0 * k, 18.0 * k + 1.0]);
        let record = summarize_values("x", "f64", &values);
        assert!(record.outlier_count >= previous);
        previous = record.outlier_count;
    }
    assert_eq!(previous, 2);
}
