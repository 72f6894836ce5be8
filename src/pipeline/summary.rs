//! Descriptive statistics per variable

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use super::columns::float_values;

/// Multiplier on the IQR above Q3 beyond which a value counts as an outlier
pub const OUTLIER_IQR_MULTIPLIER: f64 = 3.0;

/// Descriptive statistics for one column
///
/// Every statistic ignores missing values (null or NaN). For an entirely
/// missing column the location and spread fields are NaN and the outlier
/// count is zero.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRecord {
    pub variable: String,
    pub dtype: String,
    /// Rows in the table, missing included
    pub observations: usize,
    /// Non-missing values
    pub count: usize,
    pub missing: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub mean: f64,
    pub q3: f64,
    pub max: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    pub range: f64,
    pub iqr: f64,
    pub outlier_threshold: f64,
    pub outlier_count: usize,
    pub outlier_pct: f64,
}

/// Summarize a single column
pub fn summarize(df: &DataFrame, column: &str) -> Result<SummaryRecord> {
    let dtype = df
        .column(column)
        .with_context(|| format!("Column '{}' not found", column))?
        .dtype()
        .to_string();
    let raw = float_values(df, column)
        .with_context(|| format!("Column '{}' must be numeric to summarize", column))?;

    Ok(summarize_values(column, &dtype, &raw))
}

/// Summarize every column in declaration order
pub fn summarize_all(df: &DataFrame, columns: &[String]) -> Result<Vec<SummaryRecord>> {
    columns.iter().map(|name| summarize(df, name)).collect()
}

/// Core computation over raw values (NaN = missing)
pub fn summarize_values(variable: &str, dtype: &str, raw: &[f64]) -> SummaryRecord {
    let observations = raw.len();
    let mut values: Vec<f64> = raw.iter().copied().filter(|v| !v.is_nan()).collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let count = values.len();
    let missing = observations - count;

    let (min, max) = match (values.first(), values.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => (f64::NAN, f64::NAN),
    };

    let mean = if count > 0 {
        values.iter().sum::<f64>() / count as f64
    } else {
        f64::NAN
    };

    let std_dev = if count > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        (ss / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    let q1 = quantile_sorted(&values, 0.25);
    let median = quantile_sorted(&values, 0.5);
    let q3 = quantile_sorted(&values, 0.75);

    let iqr = q3 - q1;
    let outlier_threshold = q3 + OUTLIER_IQR_MULTIPLIER * iqr;

    // NaN threshold compares false against everything, so no outliers
    let outlier_count = if outlier_threshold.is_nan() {
        0
    } else {
        values.iter().filter(|&&v| v > outlier_threshold).count()
    };

    let outlier_pct = if observations > 0 {
        outlier_count as f64 / observations as f64
    } else {
        0.0
    };

    SummaryRecord {
        variable: variable.to_string(),
        dtype: dtype.to_string(),
        observations,
        count,
        missing,
        min,
        q1,
        median,
        mean,
        q3,
        max,
        std_dev,
        range: max - min,
        iqr,
        outlier_threshold,
        outlier_count,
        outlier_pct,
    }
}

/// Linear-interpolation quantile on sorted, NaN-free data
///
/// Uses `h = (n - 1) * p` and interpolates between the neighbouring ranks.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
            let lo = h.floor() as usize;
            let hi = h.ceil() as usize;
            let frac = h - lo as f64;
            sorted[lo] + frac * (sorted[hi] - sorted[lo])
        }
    }
}
