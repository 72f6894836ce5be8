//! Survey loader for delimited and Parquet files
//!
//! Reads the file into a polars `DataFrame`, validates it against the fixed
//! survey schema, and indexes rows by respondent identifier.

use std::collections::HashMap;
use std::path::Path;

use polars::prelude::*;

use super::error::LoadError;
use super::schema::{modeling_columns, required_columns, ID_COLUMN, SEGMENT_COLUMN};
use super::target::{validate_binary_target, TargetBalance};

/// Observation table keyed by respondent identifier
#[derive(Debug, Clone)]
pub struct SurveyData {
    pub frame: DataFrame,
    index: HashMap<String, usize>,
    balance: TargetBalance,
}

impl SurveyData {
    /// Validate a frame against the survey schema and build the identifier index
    pub fn from_frame(frame: DataFrame) -> Result<Self, LoadError> {
        if frame.height() == 0 {
            return Err(LoadError::EmptyDataset);
        }
        validate_schema(&frame)?;
        let index = build_identifier_index(&frame, ID_COLUMN)?;
        let balance = validate_binary_target(&frame, SEGMENT_COLUMN)?;
        Ok(Self {
            frame,
            index,
            balance,
        })
    }

    /// Number of respondents
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Row position for a respondent identifier
    pub fn row_of(&self, respondent: &str) -> Option<usize> {
        self.index.get(respondent).copied()
    }

    /// Segment class balance
    pub fn balance(&self) -> TargetBalance {
        self.balance
    }

    /// Estimated in-memory size in megabytes
    pub fn memory_mb(&self) -> f64 {
        self.frame.estimated_size() as f64 / (1024.0 * 1024.0)
    }
}

/// Load and validate the survey file
///
/// # Arguments
/// * `path` - Input file (csv, tsv, or parquet by extension)
/// * `infer_schema_length` - Rows used for CSV type inference, 0 for a full scan
pub fn load_survey(path: &Path, infer_schema_length: usize) -> Result<SurveyData, LoadError> {
    let frame = load_dataset(path, infer_schema_length)?;
    SurveyData::from_frame(frame)
}

/// Load a dataset from a file without schema validation
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame, LoadError> {
    scan(path, infer_schema_length)?
        .collect()
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Read only the column names from a file
pub fn get_column_names(path: &Path) -> Result<Vec<String>, LoadError> {
    let df = scan(path, 100)?
        .limit(0)
        .collect()
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect())
}

fn scan(path: &Path, infer_schema_length: usize) -> Result<LazyFrame, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means scan every row, matching polars' `None`
    let infer = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(infer)
            .finish(),
        "tsv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(b'\t')
            .with_infer_schema_length(infer)
            .finish(),
        "parquet" => LazyFrame::scan_parquet(path, Default::default()),
        _ => return Err(LoadError::UnsupportedFormat(extension)),
    };

    lf.map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Check required columns are present and modeling columns are numeric
pub fn validate_schema(df: &DataFrame) -> Result<(), LoadError> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<String> = required_columns()
        .into_iter()
        .filter(|name| !present.contains(name))
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    for name in modeling_columns() {
        let column = df.column(&name).map_err(|source| LoadError::Column {
            column: name.clone(),
            source,
        })?;
        if !column.dtype().is_primitive_numeric() {
            return Err(LoadError::NonNumericColumn {
                column: name,
                dtype: column.dtype().to_string(),
            });
        }
    }

    Ok(())
}

/// Map each identifier to its row, rejecting nulls and duplicates
pub fn build_identifier_index(
    df: &DataFrame,
    id_column: &str,
) -> Result<HashMap<String, usize>, LoadError> {
    let column = df
        .column(id_column)
        .map_err(|_| LoadError::MissingColumns(vec![id_column.to_string()]))?;
    let as_str = column
        .cast(&DataType::String)
        .map_err(|source| LoadError::Column {
            column: id_column.to_string(),
            source,
        })?;
    let ca = as_str.str().map_err(|source| LoadError::Column {
        column: id_column.to_string(),
        source,
    })?;

    let mut index = HashMap::with_capacity(df.height());
    for (row, value) in ca.iter().enumerate() {
        let id = value.ok_or_else(|| LoadError::NullIdentifier {
            column: id_column.to_string(),
            row,
        })?;
        if index.insert(id.to_string(), row).is_some() {
            return Err(LoadError::DuplicateIdentifier {
                column: id_column.to_string(),
                value: id.to_string(),
            });
        }
    }

    Ok(index)
}
