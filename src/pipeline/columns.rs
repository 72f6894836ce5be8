//! Column extraction helpers

use polars::prelude::*;

/// Extract a numeric column as `f64`, with nulls mapped to NaN
///
/// Non-numeric columns are rejected rather than cast to all-null.
pub fn float_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    let column = df.column(name)?;
    if !column.dtype().is_primitive_numeric() {
        return Err(PolarsError::InvalidOperation(
            format!("column '{}' has non-numeric dtype {}", name, column.dtype()).into(),
        ));
    }
    let float_col = column.cast(&DataType::Float64)?;
    let values = float_col
        .f64()?
        .iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();
    Ok(values)
}
