//! Binomial (logit-link) regression on a listwise-complete model frame
//!
//! The fitter works on a `ModelFrame`: the response plus a set of candidate
//! predictors after listwise deletion. Any subset of the frame's predictors
//! can be fitted, so every model compared during stepwise selection sees
//! exactly the same rows. The IRLS fit itself is `anofox_regression`'s
//! `BinomialRegressor`; this module maps its result onto term records.
//!
//! Statistical warnings (non-convergence, fitted probabilities at 0 or 1) are
//! collected on the fit rather than raised. Only structural problems
//! (aliased or collinear terms, numerical failure, bad input) become `FitError`.

use anofox_regression::prelude::{
    variance_inflation_factor, BinomialLink, BinomialRegressor, FittedRegressor, Regressor,
};
use anofox_regression::solvers::RegressionError;
use faer::{Col, Mat};
use polars::prelude::*;
use serde::Serialize;

use super::columns::float_values;
use super::error::FitError;
use super::target::is_binary_value;

/// Display name of the intercept term
pub const INTERCEPT: &str = "(Intercept)";

/// Variance inflation above which a term is treated as collinear
const COLLINEARITY_LIMIT: f64 = 1e10;

/// Fitted probabilities this close to 0 or 1 count as saturated (the binomial family's clamp)
const FITTED_BOUNDARY: f64 = 1e-10;

/// Warning attached when the deviance criterion is not met in time
pub const WARN_NOT_CONVERGED: &str = "algorithm did not converge";

/// Warning attached when some fitted probabilities saturate
pub const WARN_FITTED_BOUNDARY: &str = "fitted probabilities numerically 0 or 1 occurred";

/// IRLS control parameters passed through to the regressor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogitOptions {
    /// Maximum IRLS iterations
    pub max_iterations: usize,
    /// Relative deviance change (or largest coefficient change) below which the fit has converged
    pub tolerance: f64,
}

impl Default for LogitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 25,
            tolerance: 1e-8,
        }
    }
}

/// Response and predictor columns after listwise deletion
#[derive(Debug, Clone)]
pub struct ModelFrame {
    pub response: String,
    pub y: Vec<f64>,
    pub predictors: Vec<String>,
    pub columns: Vec<Vec<f64>>,
    /// Rows removed because some value was missing or non-finite
    pub dropped_rows: usize,
}

impl ModelFrame {
    /// Extract `response` and `predictors` from a frame, dropping incomplete rows
    pub fn from_frame(
        df: &DataFrame,
        response: &str,
        predictors: &[String],
    ) -> Result<Self, FitError> {
        let y_raw = extract(df, response)?;
        let raw_columns: Vec<Vec<f64>> = predictors
            .iter()
            .map(|name| extract(df, name))
            .collect::<Result<_, _>>()?;

        let keep: Vec<usize> = (0..y_raw.len())
            .filter(|&i| y_raw[i].is_finite() && raw_columns.iter().all(|c| c[i].is_finite()))
            .collect();

        let y: Vec<f64> = keep.iter().map(|&i| y_raw[i]).collect();
        if let Some(&bad) = y.iter().find(|&&v| !is_binary_value(v)) {
            return Err(FitError::NonBinaryResponse {
                column: response.to_string(),
                value: bad,
            });
        }
        let y = y.into_iter().map(|v| v.round()).collect();

        let columns = raw_columns
            .iter()
            .map(|col| keep.iter().map(|&i| col[i]).collect())
            .collect();

        Ok(Self {
            response: response.to_string(),
            y,
            predictors: predictors.to_vec(),
            columns,
            dropped_rows: y_raw.len() - keep.len(),
        })
    }

    /// Number of complete observations
    pub fn n_obs(&self) -> usize {
        self.y.len()
    }

    /// Values of a predictor by name
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.predictors
            .iter()
            .position(|p| p == name)
            .map(|idx| self.columns[idx].as_slice())
    }
}

fn extract(df: &DataFrame, name: &str) -> Result<Vec<f64>, FitError> {
    let column = df
        .column(name)
        .map_err(|_| FitError::MissingColumn(name.to_string()))?;
    if !column.dtype().is_primitive_numeric() {
        return Err(FitError::NonNumeric {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
        });
    }
    Ok(float_values(df, name)?)
}

/// Coefficient row for one model term
#[derive(Debug, Clone, Serialize)]
pub struct TermRecord {
    pub term: String,
    pub estimate: f64,
    pub std_error: f64,
    /// Wald z statistic
    pub statistic: f64,
    pub p_value: f64,
}

/// Result of one logistic fit
#[derive(Debug, Clone, Serialize)]
pub struct LogitFit {
    /// Intercept first, then predictors in the order requested
    pub terms: Vec<TermRecord>,
    pub deviance: f64,
    pub null_deviance: f64,
    pub log_likelihood: f64,
    pub aic: f64,
    pub n_obs: usize,
    pub iterations: usize,
    pub converged: bool,
    pub warnings: Vec<String>,
}

impl LogitFit {
    /// Term record by name
    pub fn term(&self, name: &str) -> Option<&TermRecord> {
        self.terms.iter().find(|t| t.term == name)
    }

    /// Intercept estimate
    pub fn intercept(&self) -> f64 {
        self.terms.first().map(|t| t.estimate).unwrap_or(f64::NAN)
    }
}

/// Whether any fitted probability sits on the clamp at 0 or 1
fn touches_boundary(fitted: impl IntoIterator<Item = f64>) -> bool {
    fitted
        .into_iter()
        .any(|mu| mu <= FITTED_BOUNDARY || 1.0 - mu <= FITTED_BOUNDARY)
}

fn term_record(
    term: String,
    estimate: f64,
    std_error: Option<f64>,
    statistic: Option<f64>,
    p_value: Option<f64>,
) -> TermRecord {
    TermRecord {
        term,
        estimate,
        std_error: std_error.unwrap_or(f64::NAN),
        statistic: statistic.unwrap_or(f64::NAN),
        p_value: p_value.unwrap_or(f64::NAN),
    }
}

/// Fit `frame.response ~ 1 + predictors` on a subset of the frame's predictors
pub fn fit_logit(
    frame: &ModelFrame,
    predictors: &[String],
    options: &LogitOptions,
) -> Result<LogitFit, FitError> {
    let cols: Vec<&[f64]> = predictors
        .iter()
        .map(|name| {
            frame
                .column(name)
                .ok_or_else(|| FitError::MissingColumn(name.clone()))
        })
        .collect::<Result<_, _>>()?;

    let n = frame.n_obs();
    let p = predictors.len() + 1;
    if n < p {
        return Err(FitError::InsufficientData { rows: n, terms: p });
    }

    let term_names: Vec<String> = std::iter::once(INTERCEPT.to_string())
        .chain(predictors.iter().cloned())
        .collect();
    let singular = || FitError::Singular {
        terms: term_names.clone(),
    };

    let x = Mat::<f64>::from_fn(n, cols.len(), |i, j| cols[j][i]);
    let y = Col::<f64>::from_fn(n, |i| frame.y[i]);

    // Exact linear dependence among predictors shows up as an unbounded VIF
    if variance_inflation_factor(&x)
        .iter()
        .any(|&vif| !vif.is_finite() || vif > COLLINEARITY_LIMIT)
    {
        return Err(singular());
    }

    let fitted = BinomialRegressor::builder()
        .link(BinomialLink::Logit)
        .with_intercept(true)
        .compute_inference(true)
        .max_iterations(options.max_iterations)
        .tolerance(options.tolerance)
        .error_on_non_convergence(false)
        .build()
        .fit(&x, &y)
        .map_err(|e| match e {
            RegressionError::SingularMatrix | RegressionError::AllFeaturesConstant => singular(),
            RegressionError::InsufficientObservations { needed, got } => {
                FitError::InsufficientData {
                    rows: got,
                    terms: needed,
                }
            }
            other => FitError::Diverged(other.to_string()),
        })?;

    let result = fitted.result();
    // Constant predictors come back aliased with NaN coefficients
    if result.aliased.iter().any(|&aliased| aliased) {
        return Err(singular());
    }

    let (std_errors, statistics, p_values) =
        match (&result.std_errors, &result.t_statistics, &result.p_values) {
            (Some(se), Some(z), Some(pv)) => (se, z, pv),
            _ => return Err(singular()),
        };

    let intercept = result.intercept.ok_or_else(singular)?;
    let mut terms = Vec::with_capacity(p);
    terms.push(term_record(
        INTERCEPT.to_string(),
        intercept,
        result.intercept_std_error,
        result.intercept_t_statistic,
        result.intercept_p_value,
    ));
    for (j, name) in predictors.iter().enumerate() {
        terms.push(term_record(
            name.clone(),
            result.coefficients[j],
            Some(std_errors[j]),
            Some(statistics[j]),
            Some(p_values[j]),
        ));
    }

    if terms
        .iter()
        .any(|t| !t.estimate.is_finite() || !t.std_error.is_finite() || t.std_error <= 0.0)
    {
        return Err(singular());
    }

    let mut warnings = Vec::new();
    if !fitted.converged {
        warnings.push(format!(
            "{} after {} iterations",
            WARN_NOT_CONVERGED, fitted.iterations
        ));
    }
    if touches_boundary(result.fitted_values.iter().copied()) {
        warnings.push(WARN_FITTED_BOUNDARY.to_string());
    }

    Ok(LogitFit {
        terms,
        deviance: fitted.deviance,
        null_deviance: fitted.null_deviance,
        log_likelihood: result.log_likelihood,
        aic: result.aic,
        n_obs: n,
        iterations: fitted.iterations,
        converged: fitted.converged,
        warnings,
    })
}
