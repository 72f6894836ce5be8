//! Full-model logistic regression on every independent variable

use polars::prelude::*;
use serde::Serialize;

use super::error::FitError;
use super::logit::{fit_logit, LogitFit, LogitOptions, ModelFrame, TermRecord, INTERCEPT};

/// A fitted multi-predictor model together with the rows it was fitted on
#[derive(Debug, Clone, Serialize)]
pub struct LogitModel {
    pub dependent: String,
    /// Predictors currently in the model, in declared order
    pub predictors: Vec<String>,
    #[serde(flatten)]
    pub fit: LogitFit,
    /// Complete-case rows shared by every refit of this model
    #[serde(skip)]
    pub frame: ModelFrame,
}

impl LogitModel {
    pub fn terms(&self) -> &[TermRecord] {
        &self.fit.terms
    }

    pub fn aic(&self) -> f64 {
        self.fit.aic
    }

    /// Refit on the same rows with a different predictor subset
    pub fn refit(&self, predictors: &[String], options: &LogitOptions) -> Result<Self, FitError> {
        let fit = fit_logit(&self.frame, predictors, options)?;
        Ok(Self {
            dependent: self.dependent.clone(),
            predictors: predictors.to_vec(),
            fit,
            frame: self.frame.clone(),
        })
    }
}

/// Fit `dependent ~ 1 + independents` (main effects only, listwise deletion)
pub fn fit_full(
    df: &DataFrame,
    dependent: &str,
    independents: &[String],
    options: &LogitOptions,
) -> Result<LogitModel, FitError> {
    let frame = ModelFrame::from_frame(df, dependent, independents)?;
    let fit = fit_logit(&frame, independents, options)?;
    Ok(LogitModel {
        dependent: dependent.to_string(),
        predictors: independents.to_vec(),
        fit,
        frame,
    })
}

/// Render `"<dependent> = <intercept> + <est>*<term> + ..."`
///
/// Non-intercept terms are sorted alphabetically by name.
pub fn model_formula(model: &LogitModel) -> String {
    let intercept = model
        .terms()
        .iter()
        .find(|t| t.term == INTERCEPT)
        .map(|t| t.estimate)
        .unwrap_or(0.0);

    let mut slopes: Vec<&TermRecord> = model
        .terms()
        .iter()
        .filter(|t| t.term != INTERCEPT)
        .collect();
    slopes.sort_by(|a, b| a.term.cmp(&b.term));

    let mut parts = vec![format!("{}", intercept)];
    parts.extend(slopes.iter().map(|t| format!("{}*{}", t.estimate, t.term)));

    format!("{} = {}", model.dependent, parts.join(" + "))
}
