//! Single-predictor logistic regressions, one per independent variable

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::error::FitError;
use super::logit::{fit_logit, LogitOptions, ModelFrame};
use crate::utils::{create_fit_bar, finish_with_success, finish_with_warning};

/// Coefficients and fit quality of `dependent ~ 1 + independent`
#[derive(Debug, Clone, Serialize)]
pub struct PairedRegressionRecord {
    pub dependent: String,
    pub independent: String,
    pub aic: f64,
    pub intercept: f64,
    /// Slope term name with any categorical level prefix removed
    pub term: String,
    pub estimate: f64,
    pub std_error: f64,
    pub statistic: f64,
    pub p_value: f64,
    pub equation: String,
    pub n_obs: usize,
    pub warnings: Vec<String>,
}

/// One row of the paired batch: the predictor and its fit outcome
#[derive(Debug)]
pub struct PairedRow {
    pub independent: String,
    pub outcome: Result<PairedRegressionRecord, FitError>,
}

impl PairedRow {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// All paired fits for one dependent variable, in declared predictor order
#[derive(Debug)]
pub struct PairedBatch {
    pub dependent: String,
    pub rows: Vec<PairedRow>,
}

impl PairedBatch {
    /// Successful records in declared order
    pub fn records(&self) -> impl Iterator<Item = &PairedRegressionRecord> {
        self.rows.iter().filter_map(|row| row.outcome.as_ref().ok())
    }

    /// Failed rows as (independent, error)
    pub fn failures(&self) -> impl Iterator<Item = (&str, &FitError)> {
        self.rows.iter().filter_map(|row| match &row.outcome {
            Err(e) => Some((row.independent.as_str(), e)),
            Ok(_) => None,
        })
    }
}

/// Fit `dependent ~ 1 + independent` and extract the slope row
pub fn fit_pair(
    df: &DataFrame,
    dependent: &str,
    independent: &str,
    options: &LogitOptions,
) -> Result<PairedRegressionRecord, FitError> {
    let predictors = vec![independent.to_string()];
    let frame = ModelFrame::from_frame(df, dependent, &predictors)?;
    let fit = fit_logit(&frame, &predictors, options)?;

    let intercept = fit.intercept();
    let slope = fit
        .terms
        .get(1)
        .ok_or_else(|| FitError::MissingColumn(independent.to_string()))?;

    Ok(PairedRegressionRecord {
        dependent: dependent.to_string(),
        independent: independent.to_string(),
        aic: fit.aic,
        intercept,
        term: strip_level_prefix(&slope.term).to_string(),
        estimate: slope.estimate,
        std_error: slope.std_error,
        statistic: slope.statistic,
        p_value: slope.p_value,
        equation: pair_equation(dependent, intercept, slope.estimate, independent),
        n_obs: fit.n_obs,
        warnings: fit.warnings,
    })
}

/// Fit every independent against `dependent`; failures stay in their row
///
/// Fits run in parallel and are collected back in declared order.
pub fn run_paired_batch(
    df: &DataFrame,
    dependent: &str,
    independents: &[String],
    options: &LogitOptions,
) -> PairedBatch {
    let pb = create_fit_bar(independents.len(), &format!("{} ~ x", dependent));

    let rows: Vec<PairedRow> = independents
        .par_iter()
        .map(|independent| {
            let outcome = fit_pair(df, dependent, independent, options);
            pb.inc(1);
            PairedRow {
                independent: independent.clone(),
                outcome,
            }
        })
        .collect();

    let failed = rows.iter().filter(|r| !r.is_ok()).count();
    let summary = format!("Fitted {} paired model(s)", rows.len() - failed);
    if failed == 0 {
        finish_with_success(&pb, &summary);
    } else {
        finish_with_warning(&pb, &format!("{}, {} failed", summary, failed));
    }

    PairedBatch {
        dependent: dependent.to_string(),
        rows,
    }
}

/// Keep only the level of a categorical term (`x[T.a]` or `x[a]` becomes `a`)
///
/// Terms without a trailing bracketed level are returned unchanged.
pub fn strip_level_prefix(term: &str) -> &str {
    let Some(body) = term.strip_suffix(']') else {
        return term;
    };
    match body.rfind('[') {
        Some(open) => {
            let level = &body[open + 1..];
            level.strip_prefix("T.").unwrap_or(level)
        }
        None => term,
    }
}

/// `"<dependent> = <intercept> + <coefficient>*<independent>"`
pub fn pair_equation(dependent: &str, intercept: f64, coefficient: f64, independent: &str) -> String {
    format!(
        "{} = {} + {}*{}",
        dependent, intercept, coefficient, independent
    )
}
