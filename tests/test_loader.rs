//! Tests for survey loading and schema validation

use polars::prelude::*;
use seglogit::pipeline::{
    get_column_names, load_dataset, load_survey, LoadError, SurveyData, ID_COLUMN,
    SEGMENT_COLUMN,
};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::{create_survey_dataframe, create_temp_csv, create_temp_parquet, create_temp_tsv};

#[test]
fn test_load_csv_survey() {
    let mut df = create_survey_dataframe(50, 1);
    let (_dir, path) = create_temp_csv(&mut df);

    let survey = load_survey(&path, 100).unwrap();

    assert_eq!(survey.height(), 50);
    assert_eq!(survey.frame.width(), 14);
    assert_eq!(survey.row_of("R00000"), Some(0));
    assert_eq!(survey.row_of("R00049"), Some(49));
    assert_eq!(survey.row_of("nobody"), None);

    let balance = survey.balance();
    assert_eq!(balance.events + balance.non_events, 50);
    assert_eq!(balance.missing, 0);
}

#[test]
fn test_load_tsv_survey() {
    let mut df = create_survey_dataframe(20, 2);
    let (_dir, path) = create_temp_tsv(&mut df);

    let survey = load_survey(&path, 100).unwrap();
    assert_eq!(survey.height(), 20);
    assert!(survey.memory_mb() >= 0.0);
}

#[test]
fn test_load_parquet_survey() {
    let mut df = create_survey_dataframe(30, 3);
    let (_dir, path) = create_temp_parquet(&mut df);

    let survey = load_survey(&path, 100).unwrap();
    assert_eq!(survey.height(), 30);
    assert_eq!(survey.row_of("R00010"), Some(10));
}

#[test]
fn test_missing_file_is_not_found() {
    let err = load_survey(Path::new("/definitely/not/here.csv"), 100).unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("survey.xlsx");
    std::fs::write(&path, "not a spreadsheet").unwrap();

    let err = load_dataset(&path, 100).unwrap_err();
    match err {
        LoadError::UnsupportedFormat(ext) => assert_eq!(ext, "xlsx"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_missing_schema_columns_are_listed() {
    let df = create_survey_dataframe(10, 4);
    let mut df = df.drop("brand_loyalty").unwrap().drop("park_skiing").unwrap();
    let (_dir, path) = create_temp_csv(&mut df);

    match load_survey(&path, 100).unwrap_err() {
        LoadError::MissingColumns(missing) => {
            assert_eq!(missing, vec!["park_skiing", "brand_loyalty"]);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_non_numeric_predictor_rejected() {
    let mut df = create_survey_dataframe(5, 5);
    let text = Column::new("park_biking".into(), ["a", "b", "c", "d", "e"]);
    df.with_column(text).unwrap();

    match SurveyData::from_frame(df).unwrap_err() {
        LoadError::NonNumericColumn { column, .. } => assert_eq!(column, "park_biking"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_duplicate_identifier_rejected() {
    let mut df = create_survey_dataframe(5, 6);
    let ids = Column::new(ID_COLUMN.into(), ["A", "B", "C", "B", "E"]);
    df.with_column(ids).unwrap();

    match SurveyData::from_frame(df).unwrap_err() {
        LoadError::DuplicateIdentifier { value, .. } => assert_eq!(value, "B"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_null_identifier_rejected() {
    let mut df = create_survey_dataframe(3, 7);
    let ids = Column::new(ID_COLUMN.into(), [Some("A"), None, Some("C")]);
    df.with_column(ids).unwrap();

    match SurveyData::from_frame(df).unwrap_err() {
        LoadError::NullIdentifier { row, .. } => assert_eq!(row, 1),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_numeric_identifier_accepted() {
    let mut df = create_survey_dataframe(4, 8);
    let ids = Column::new(ID_COLUMN.into(), [101i64, 102, 103, 104]);
    df.with_column(ids).unwrap();

    let survey = SurveyData::from_frame(df).unwrap();
    assert_eq!(survey.row_of("103"), Some(2));
}

#[test]
fn test_non_binary_segment_rejected() {
    let mut df = create_survey_dataframe(5, 9);
    let segment = Column::new(SEGMENT_COLUMN.into(), [0i32, 1, 2, 1, 3]);
    df.with_column(segment).unwrap();

    match SurveyData::from_frame(df).unwrap_err() {
        LoadError::NonBinaryTarget { values, .. } => assert_eq!(values, vec!["2", "3"]),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_header_only_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("survey.csv");
    let header = seglogit::pipeline::required_columns().join(",");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{}", header).unwrap();
    drop(file);

    let err = load_survey(&path, 100).unwrap_err();
    assert!(matches!(err, LoadError::EmptyDataset));
}

#[test]
fn test_get_column_names() {
    let mut df = create_survey_dataframe(5, 10);
    let (_dir, path) = create_temp_csv(&mut df);

    let names = get_column_names(&path).unwrap();
    assert_eq!(names.len(), 14);
    assert_eq!(names[0], ID_COLUMN);
    assert_eq!(names[1], SEGMENT_COLUMN);
}
