//! Analysis driver: runs every stage from one configuration
//!
//! Each figure carries its own outcome so that a failure in one stage is
//! reported in place while the remaining figures still render.

use std::time::{Duration, Instant};

use anyhow::anyhow;
use polars::prelude::*;
use serde::Serialize;

use super::correlation::{correlate, CorrelationMatrix};
use super::error::FitError;
use super::full::{fit_full, LogitModel};
use super::logit::LogitOptions;
use super::paired::{run_paired_batch, PairedBatch};
use super::schema::{predictor_columns, SEGMENT_COLUMN};
use super::stepwise::{select_stepwise, Direction, StepwiseResult};
use super::summary::{summarize_all, SummaryRecord};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_failure, print_step_header,
    print_step_time, print_warning,
};

/// Everything a run needs besides the data
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisConfig {
    pub dependent: String,
    /// Independent variables in declared order
    pub independents: Vec<String>,
    pub logit: LogitOptions,
    pub direction: Direction,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dependent: SEGMENT_COLUMN.to_string(),
            independents: predictor_columns(),
            logit: LogitOptions::default(),
            direction: Direction::Both,
        }
    }
}

impl AnalysisConfig {
    /// Dependent followed by independents, as summarized and correlated
    pub fn variables(&self) -> Vec<String> {
        std::iter::once(self.dependent.clone())
            .chain(self.independents.iter().cloned())
            .collect()
    }
}

/// Wall-clock time spent per stage
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageTimings {
    pub summary: Duration,
    pub correlation: Duration,
    pub paired: Duration,
    pub full: Duration,
    pub stepwise: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.summary + self.correlation + self.paired + self.full + self.stepwise
    }
}

/// Outcome of every figure
#[derive(Debug)]
pub struct AnalysisResults {
    pub config: AnalysisConfig,
    pub summary: anyhow::Result<Vec<SummaryRecord>>,
    pub correlation: anyhow::Result<CorrelationMatrix>,
    pub paired: PairedBatch,
    pub full: Result<LogitModel, FitError>,
    pub stepwise: anyhow::Result<StepwiseResult>,
    pub timings: StageTimings,
}

/// Run summary, correlation, paired, full and stepwise stages in order
pub fn run_analysis(df: &DataFrame, config: &AnalysisConfig) -> AnalysisResults {
    let variables = config.variables();
    let mut timings = StageTimings::default();

    // Figure 1
    print_step_header(1, "Descriptive Statistics");
    let start = Instant::now();
    let spinner = create_spinner("Summarizing variables...");
    let summary = summarize_all(df, &variables);
    match &summary {
        Ok(records) => finish_with_success(
            &spinner,
            &format!("Summarized {} variable(s)", records.len()),
        ),
        Err(e) => finish_with_warning(&spinner, &format!("Summary failed: {:#}", e)),
    }
    timings.summary = start.elapsed();
    print_step_time(timings.summary);

    // Figure 2
    print_step_header(2, "Correlation Matrix");
    let start = Instant::now();
    let spinner = create_spinner("Calculating correlations...");
    let correlation = correlate(df, &variables);
    match &correlation {
        Ok(matrix) => finish_with_success(
            &spinner,
            &format!("Computed {}x{} correlation matrix", matrix.len(), matrix.len()),
        ),
        Err(e) => finish_with_warning(&spinner, &format!("Correlation failed: {:#}", e)),
    }
    timings.correlation = start.elapsed();
    print_step_time(timings.correlation);

    // Figure 3
    print_step_header(3, "Paired Logistic Regressions");
    let start = Instant::now();
    let paired = run_paired_batch(df, &config.dependent, &config.independents, &config.logit);
    for (independent, error) in paired.failures() {
        print_failure(&format!("{} ~ {}: {}", config.dependent, independent, error));
    }
    for record in paired.records() {
        for warning in &record.warnings {
            print_warning(&format!(
                "{} ~ {}: {}",
                config.dependent, record.independent, warning
            ));
        }
    }
    timings.paired = start.elapsed();
    print_step_time(timings.paired);

    // Figure 4
    print_step_header(4, "Full Logistic Model");
    let start = Instant::now();
    let spinner = create_spinner("Fitting full model...");
    let full = fit_full(df, &config.dependent, &config.independents, &config.logit);
    match &full {
        Ok(model) => {
            finish_with_success(
                &spinner,
                &format!(
                    "Full model fitted on {} observation(s), AIC {:.3}",
                    model.fit.n_obs, model.fit.aic
                ),
            );
            for warning in &model.fit.warnings {
                print_warning(&format!("full model: {}", warning));
            }
        }
        Err(e) => {
            finish_with_warning(&spinner, "Full model failed");
            print_failure(&e.to_string());
        }
    }
    timings.full = start.elapsed();
    print_step_time(timings.full);

    // Figure 5
    print_step_header(5, "Stepwise Selection");
    let start = Instant::now();
    let stepwise = match &full {
        Ok(model) => {
            let spinner = create_spinner(&format!("Searching ({})...", config.direction));
            let result = select_stepwise(model, config.direction, &config.logit)
                .map_err(anyhow::Error::from);
            match &result {
                Ok(selected) => {
                    finish_with_success(
                        &spinner,
                        &format!(
                            "Selected {} of {} predictor(s) in {} step(s)",
                            selected.model.predictors.len(),
                            model.predictors.len(),
                            selected.trace.len() - 1
                        ),
                    );
                    for (candidate, error) in &selected.skipped {
                        print_warning(&format!("stepwise candidate {} skipped: {}", candidate, error));
                    }
                }
                Err(e) => finish_with_warning(&spinner, &format!("Stepwise failed: {}", e)),
            }
            result
        }
        Err(e) => Err(anyhow!("Full model unavailable: {}", e)),
    };
    timings.stepwise = start.elapsed();
    print_step_time(timings.stepwise);

    AnalysisResults {
        config: config.clone(),
        summary,
        correlation,
        paired,
        full,
        stepwise,
        timings,
    }
}
