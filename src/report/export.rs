//! JSON export of every figure

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    AnalysisResults, CorrelationMatrix, Direction, LogitModel, LogitOptions,
    PairedRegressionRecord, StepwiseResult, SummaryRecord,
};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    pub version: String,
    pub input_file: String,
    pub dependent: String,
    pub independents: Vec<String>,
    pub observations: usize,
    pub options: LogitOptions,
    pub direction: Direction,
}

/// A figure that was either computed or failed
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FigureExport<T> {
    Ok { data: T },
    Failed { error: String },
}

impl<T> FigureExport<T> {
    fn failed(error: impl ToString) -> Self {
        FigureExport::Failed {
            error: error.to_string(),
        }
    }
}

/// One paired regression, keyed by its independent variable
#[derive(Serialize)]
pub struct PairedRowExport<'a> {
    pub independent: &'a str,
    #[serde(flatten)]
    pub outcome: FigureExport<&'a PairedRegressionRecord>,
}

/// Complete export: metadata plus Figures 1-5
#[derive(Serialize)]
pub struct AnalysisExport<'a> {
    pub metadata: ExportMetadata,
    pub descriptive_statistics: FigureExport<&'a [SummaryRecord]>,
    pub correlation_matrix: FigureExport<&'a CorrelationMatrix>,
    pub paired_regressions: Vec<PairedRowExport<'a>>,
    pub full_model: FigureExport<&'a LogitModel>,
    pub stepwise_model: FigureExport<&'a StepwiseResult>,
}

/// Assemble the export structure without writing it
pub fn build_export<'a>(
    results: &'a AnalysisResults,
    input_file: &str,
    observations: usize,
) -> AnalysisExport<'a> {
    let metadata = ExportMetadata {
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        input_file: input_file.to_string(),
        dependent: results.config.dependent.clone(),
        independents: results.config.independents.clone(),
        observations,
        options: results.config.logit,
        direction: results.config.direction,
    };

    let paired_regressions = results
        .paired
        .rows
        .iter()
        .map(|row| PairedRowExport {
            independent: &row.independent,
            outcome: match &row.outcome {
                Ok(record) => FigureExport::Ok { data: record },
                Err(e) => FigureExport::failed(e),
            },
        })
        .collect();

    AnalysisExport {
        metadata,
        descriptive_statistics: match &results.summary {
            Ok(records) => FigureExport::Ok {
                data: records.as_slice(),
            },
            Err(e) => FigureExport::failed(format!("{:#}", e)),
        },
        correlation_matrix: match &results.correlation {
            Ok(matrix) => FigureExport::Ok { data: matrix },
            Err(e) => FigureExport::failed(format!("{:#}", e)),
        },
        paired_regressions,
        full_model: match &results.full {
            Ok(model) => FigureExport::Ok { data: model },
            Err(e) => FigureExport::failed(e),
        },
        stepwise_model: match &results.stepwise {
            Ok(result) => FigureExport::Ok { data: result },
            Err(e) => FigureExport::failed(format!("{:#}", e)),
        },
    }
}

/// Export all figures to a pretty-printed JSON file
pub fn export_analysis(
    results: &AnalysisResults,
    input_file: &str,
    observations: usize,
    output_path: &Path,
) -> Result<()> {
    let export = build_export(results, input_file, observations);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize analysis results to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write analysis export to {}", output_path.display()))?;

    Ok(())
}
