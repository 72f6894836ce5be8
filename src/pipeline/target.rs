//! Segment (dependent variable) validation
//!
//! The customer segment must already be 0/1 coded. Values within a small
//! tolerance of 0.0 or 1.0 are accepted so that Float64 columns produced by
//! spreadsheet exports pass.

use polars::prelude::*;

use super::error::LoadError;

/// Tolerance for floating point comparison when checking binary 0/1 values
pub const TOLERANCE: f64 = 1e-9;

/// Class balance of a validated binary target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetBalance {
    pub events: usize,
    pub non_events: usize,
    pub missing: usize,
}

/// Check whether a value is 0 or 1 within tolerance
pub fn is_binary_value(v: f64) -> bool {
    v.abs() < TOLERANCE || (v - 1.0).abs() < TOLERANCE
}

/// Validate that the target column is binary (contains only 0 and 1)
///
/// Nulls are allowed and counted as missing. Returns the class balance.
pub fn validate_binary_target(df: &DataFrame, target: &str) -> Result<TargetBalance, LoadError> {
    let target_col = df
        .column(target)
        .map_err(|_| LoadError::MissingColumns(vec![target.to_string()]))?;

    if !target_col.dtype().is_primitive_numeric() {
        return Err(LoadError::NonNumericColumn {
            column: target.to_string(),
            dtype: target_col.dtype().to_string(),
        });
    }

    let float_col = target_col
        .cast(&DataType::Float64)
        .map_err(|source| column_error(target, source))?;
    let ca = float_col.f64().map_err(|source| column_error(target, source))?;

    let mut balance = TargetBalance {
        events: 0,
        non_events: 0,
        missing: 0,
    };
    let mut offending: Vec<String> = Vec::new();

    for value in ca.iter() {
        match value {
            None => balance.missing += 1,
            Some(v) if v.is_nan() => balance.missing += 1,
            Some(v) if (v - 1.0).abs() < TOLERANCE => balance.events += 1,
            Some(v) if v.abs() < TOLERANCE => balance.non_events += 1,
            Some(v) => {
                let rendered = format!("{}", v);
                if !offending.contains(&rendered) {
                    offending.push(rendered);
                }
            }
        }
    }

    if !offending.is_empty() {
        offending.sort();
        return Err(LoadError::NonBinaryTarget {
            column: target.to_string(),
            values: offending,
        });
    }

    Ok(balance)
}

fn column_error(column: &str, source: PolarsError) -> LoadError {
    LoadError::Column {
        column: column.to_string(),
        source,
    }
}
