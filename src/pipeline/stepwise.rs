//! AIC-guided stepwise selection starting from the full model
//!
//! Each step scores every single-term drop and, when searching both ways,
//! every single-term re-addition. The candidate with the lowest AIC is taken
//! if it improves on the current model. Candidates are scanned drops first
//! and then additions, each in declared order, and a later candidate has to
//! undercut the incumbent by more than `AIC_IMPROVEMENT_EPSILON` to displace
//! it. On a tie (exact or within rounding) a drop beats an add and the
//! earlier term beats the later one.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::error::FitError;
use super::full::LogitModel;
use super::logit::LogitOptions;

/// Minimum AIC decrease for a step to count as an improvement
pub const AIC_IMPROVEMENT_EPSILON: f64 = 1e-7;

/// Upper bound on accepted steps
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Search direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Both,
    Backward,
    Forward,
}

impl Direction {
    fn allows_drop(self) -> bool {
        matches!(self, Direction::Both | Direction::Backward)
    }

    fn allows_add(self) -> bool {
        matches!(self, Direction::Both | Direction::Forward)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Both => write!(f, "both"),
            Direction::Backward => write!(f, "backward"),
            Direction::Forward => write!(f, "forward"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "both" => Ok(Direction::Both),
            "backward" => Ok(Direction::Backward),
            "forward" => Ok(Direction::Forward),
            _ => Err(format!(
                "Invalid direction '{}'. Options: both, backward, forward",
                s
            )),
        }
    }
}

/// A single accepted move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    Start,
    Add(String),
    Drop(String),
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::Start => write!(f, "start"),
            StepAction::Add(term) => write!(f, "+ {}", term),
            StepAction::Drop(term) => write!(f, "- {}", term),
        }
    }
}

// Exported as its display form, e.g. "- park_skiing"
impl Serialize for StepAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Trace entry: the move, the resulting AIC and term set
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step: usize,
    pub action: StepAction,
    pub aic: f64,
    pub terms: Vec<String>,
}

/// Selected model plus the audit trail that produced it
#[derive(Debug, Clone, Serialize)]
pub struct StepwiseResult {
    pub direction: Direction,
    pub model: LogitModel,
    pub trace: Vec<StepRecord>,
    /// Candidate refits that failed and were skipped, as (candidate, error)
    pub skipped: Vec<(String, String)>,
}

/// Stepwise selection from `full_model` with the default step cap
pub fn select_stepwise(
    full_model: &LogitModel,
    direction: Direction,
    options: &LogitOptions,
) -> Result<StepwiseResult, FitError> {
    select_stepwise_with_limit(full_model, direction, options, DEFAULT_MAX_STEPS)
}

/// Stepwise selection with an explicit cap on accepted steps
///
/// The scope runs from the intercept-only model up to the full model's terms.
pub fn select_stepwise_with_limit(
    full_model: &LogitModel,
    direction: Direction,
    options: &LogitOptions,
    max_steps: usize,
) -> Result<StepwiseResult, FitError> {
    let scope = full_model.predictors.clone();
    let mut current = full_model.clone();
    let mut skipped = Vec::new();
    let mut trace = vec![StepRecord {
        step: 0,
        action: StepAction::Start,
        aic: current.aic(),
        terms: current.predictors.clone(),
    }];

    for step in 1..=max_steps {
        let candidates = candidate_moves(&scope, &current.predictors, direction);

        let mut scored = Vec::with_capacity(candidates.len());
        for (action, predictors) in candidates {
            match current.refit(&predictors, options) {
                Ok(model) => {
                    let aic = model.aic();
                    scored.push(((action, model), aic));
                }
                Err(e) => skipped.push((action.to_string(), e.to_string())),
            }
        }

        match pick_best(scored) {
            Some(((action, model), aic)) if improves(aic, current.aic()) => {
                trace.push(StepRecord {
                    step,
                    action,
                    aic: model.aic(),
                    terms: model.predictors.clone(),
                });
                current = model;
            }
            _ => break,
        }
    }

    Ok(StepwiseResult {
        direction,
        model: current,
        trace,
        skipped,
    })
}

/// Whether `candidate` undercuts `incumbent` by more than the improvement epsilon
fn improves(candidate: f64, incumbent: f64) -> bool {
    candidate < incumbent - AIC_IMPROVEMENT_EPSILON
}

/// First entry in scan order among those with the lowest AIC
fn pick_best<T>(scored: impl IntoIterator<Item = (T, f64)>) -> Option<(T, f64)> {
    scored
        .into_iter()
        .fold(None, |best: Option<(T, f64)>, (item, aic)| {
            let incumbent = best.as_ref().map_or(f64::INFINITY, |(_, b)| *b);
            if improves(aic, incumbent) {
                Some((item, aic))
            } else {
                best
            }
        })
}

/// Candidate predictor sets: drops first, then additions, in declared order
fn candidate_moves(
    scope: &[String],
    included: &[String],
    direction: Direction,
) -> Vec<(StepAction, Vec<String>)> {
    let mut moves = Vec::new();

    if direction.allows_drop() {
        for term in scope.iter().filter(|t| included.contains(t)) {
            let remaining: Vec<String> = included.iter().filter(|t| *t != term).cloned().collect();
            moves.push((StepAction::Drop(term.clone()), remaining));
        }
    }

    if direction.allows_add() {
        for term in scope.iter().filter(|t| !included.contains(t)) {
            // Keep declared order in the design matrix
            let added: Vec<String> = scope
                .iter()
                .filter(|t| included.contains(t) || *t == term)
                .cloned()
                .collect();
            moves.push((StepAction::Add(term.clone()), added));
        }
    }

    moves
}
