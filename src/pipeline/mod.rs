//! Pipeline module - loading, statistics, and model fitting stages

pub mod analysis;
pub mod columns;
pub mod correlation;
pub mod error;
pub mod full;
pub mod loader;
pub mod logit;
pub mod paired;
pub mod schema;
pub mod stepwise;
pub mod summary;
pub mod target;

pub use analysis::*;
pub use correlation::*;
pub use error::{FitError, LoadError};
pub use full::*;
pub use loader::*;
pub use logit::{fit_logit, LogitFit, LogitOptions, ModelFrame, TermRecord, INTERCEPT};
pub use paired::*;
pub use schema::*;
pub use stepwise::*;
pub use summary::*;
pub use target::{validate_binary_target, TargetBalance};
