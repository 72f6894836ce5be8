//! Error types for survey loading and model fitting.
//!
//! `LoadError` is fatal: the run cannot continue without a valid observation
//! table. `FitError` is scoped to a single model and can be isolated per row
//! in the paired batch.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while reading and validating the survey file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input path does not exist.
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The extension does not map to a supported reader.
    #[error("Unsupported file format: '{0}'. Supported formats: csv, tsv, parquet")]
    UnsupportedFormat(String),

    /// The reader failed (I/O, malformed rows, encoding).
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// A column could not be cast or accessed during validation.
    #[error("Failed to access column '{column}': {source}")]
    Column {
        column: String,
        #[source]
        source: PolarsError,
    },

    /// One or more required schema columns are absent.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A modeling column has a non-numeric dtype.
    #[error("Column '{column}' must be numeric, found {dtype}")]
    NonNumericColumn { column: String, dtype: String },

    /// The respondent identifier has a null at the given row.
    #[error("Identifier column '{column}' has a null value at row {row}")]
    NullIdentifier { column: String, row: usize },

    /// The respondent identifier is not unique.
    #[error("Identifier column '{column}' has duplicate value '{value}'")]
    DuplicateIdentifier { column: String, value: String },

    /// The segment column holds something other than 0/1.
    #[error("Target column '{column}' must be 0/1 coded, found values: {}", .values.join(", "))]
    NonBinaryTarget { column: String, values: Vec<String> },

    /// The file parsed but holds no rows.
    #[error("Dataset contains zero rows")]
    EmptyDataset,
}

/// Errors raised while fitting a single logistic model.
#[derive(Debug, Error)]
pub enum FitError {
    /// A referenced column is not in the table.
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    /// A referenced column cannot be cast to Float64.
    #[error("Column '{column}' is not numeric ({dtype})")]
    NonNumeric { column: String, dtype: String },

    /// The response has values outside {0, 1}.
    #[error("Response '{column}' must be 0/1, found {value}")]
    NonBinaryResponse { column: String, value: f64 },

    /// Too few complete rows to estimate the requested terms.
    #[error("Insufficient data: {rows} complete row(s) for {terms} term(s)")]
    InsufficientData { rows: usize, terms: usize },

    /// The information matrix is not positive definite (collinear or constant predictors).
    #[error("Singular information matrix for terms [{}]", .terms.join(", "))]
    Singular { terms: Vec<String> },

    /// The regression backend rejected the fit (non-finite linear predictor, bad input).
    #[error("Logistic fit failed: {0}")]
    Diverged(String),

    /// Underlying column access failed.
    #[error("Column access failed: {0}")]
    Column(#[from] PolarsError),
}
