//! Pearson correlation matrix over the modeling columns

use anyhow::{bail, Context, Result};
use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::columns::float_values;

/// Square, symmetric correlation matrix with labelled rows and columns
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlation between two labelled variables
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == a)?;
        let j = self.labels.iter().position(|l| l == b)?;
        Some(self.values[i][j])
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Represents a correlated pair of variables
#[derive(Debug, Clone, Serialize)]
pub struct CorrelatedPair {
    pub feature1: String,
    pub feature2: String,
    pub correlation: f64,
}

/// Compute the full Pearson correlation matrix over `columns`
///
/// Complete columns go through the matrix method. Any missing value switches
/// to pairwise-complete estimation. The diagonal is exactly 1.0 and entries
/// for degenerate pairs (constant column, fewer than two shared rows) are NaN.
pub fn correlate(df: &DataFrame, columns: &[String]) -> Result<CorrelationMatrix> {
    if columns.is_empty() {
        bail!("No columns to correlate");
    }
    let data: Vec<Vec<f64>> = columns
        .iter()
        .map(|name| {
            float_values(df, name)
                .with_context(|| format!("Column '{}' must be numeric to correlate", name))
        })
        .collect::<Result<_>>()?;

    let complete = data.iter().all(|col| col.iter().all(|v| !v.is_nan()));

    let values = match complete.then(|| compute_correlation_matrix_fast(&data)).flatten() {
        Some(matrix) => matrix,
        None => compute_correlation_pairwise(&data),
    };

    Ok(CorrelationMatrix {
        labels: columns.to_vec(),
        values,
    })
}

/// Pairwise-complete correlation, parallel over the upper triangle
fn compute_correlation_pairwise(data: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = data.len();

    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let upper: Vec<(usize, usize, f64)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let r = compute_pearson_correlation(&data[i], &data[j]).unwrap_or(f64::NAN);
            (i, j, r)
        })
        .collect();

    let mut values = identity(n);
    for (i, j, r) in upper {
        values[i][j] = r;
        values[j][i] = r;
    }
    values
}

/// Pearson correlation on rows where both values are present
///
/// Single-pass Welford update for numerical stability.
pub fn compute_pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() {
        return None;
    }

    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        if x.is_nan() || y.is_nan() {
            continue;
        }
        n += 1.0;
        let dx = x - mean_x;
        let dy = y - mean_y;
        mean_x += dx / n;
        mean_y += dy / n;
        var_x += dx * (x - mean_x);
        var_y += dy * (y - mean_y);
        cov_xy += dx * (y - mean_y);
    }

    if n < 2.0 || var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    Some((cov_xy / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Correlation matrix via standardized cross-products (complete data only).
///
/// Algorithm:
/// 1. Standardize each column: Z = (X - mean) / (std * sqrt(n))
/// 2. R = Z^T * Z
///
/// Constant columns are left as zero vectors and patched to NaN afterwards.
fn compute_correlation_matrix_fast(data: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let n_cols = data.len();
    let n_rows = data.first()?.len();
    if n_rows < 2 {
        return None;
    }

    let standardized: Vec<Option<Vec<f64>>> = data
        .par_iter()
        .map(|col| {
            let mean = col.iter().sum::<f64>() / n_rows as f64;
            let ss: f64 = col.iter().map(|x| (x - mean) * (x - mean)).sum();
            if ss <= 0.0 {
                return None;
            }
            let scale = ss.sqrt();
            Some(col.iter().map(|x| (x - mean) / scale).collect())
        })
        .collect();

    let mut z = Mat::<f64>::zeros(n_rows, n_cols);
    for (col_idx, col) in standardized.iter().enumerate() {
        if let Some(col) = col {
            for (row_idx, &val) in col.iter().enumerate() {
                z[(row_idx, col_idx)] = val;
            }
        }
    }

    let r = z.transpose() * &z;

    let mut values = identity(n_cols);
    for i in 0..n_cols {
        for j in (i + 1)..n_cols {
            let v = if standardized[i].is_some() && standardized[j].is_some() {
                r[(i, j)].clamp(-1.0, 1.0)
            } else {
                f64::NAN
            };
            values[i][j] = v;
            values[j][i] = v;
        }
    }
    Some(values)
}

fn identity(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

/// Upper-triangle pairs sorted by absolute correlation descending (NaN skipped)
pub fn correlation_pairs(matrix: &CorrelationMatrix) -> Vec<CorrelatedPair> {
    let n = matrix.len();
    let mut pairs = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let corr = matrix.values[i][j];
            if !corr.is_nan() {
                pairs.push(CorrelatedPair {
                    feature1: matrix.labels[i].clone(),
                    feature2: matrix.labels[j].clone(),
                    correlation: corr,
                });
            }
        }
    }

    pairs.sort_by(|a, b| {
        b.correlation
            .abs()
            .partial_cmp(&a.correlation.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    pairs
}
