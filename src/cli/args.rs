//! Command-line argument definitions using clap

use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::{AnalysisConfig, Direction, LogitOptions};

/// seglogit - Logistic analysis of the customer-segment survey
#[derive(Parser, Debug)]
#[command(name = "seglogit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input survey file (CSV, TSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Maximum IRLS (Fisher scoring) iterations per model fit
    #[arg(long, default_value = "25", value_parser = validate_max_iterations)]
    pub max_iterations: usize,

    /// Relative deviance change below which a fit is considered converged (0.0 to 1.0, exclusive)
    #[arg(long, default_value = "1e-8", value_parser = validate_tolerance)]
    pub tolerance: f64,

    /// Stepwise search direction.
    /// Options: "both" (default), "backward" or "forward"
    #[arg(long, default_value = "both")]
    pub direction: Direction,

    /// Write every figure to this JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Skip the banner
    #[arg(long, default_value = "false")]
    pub no_banner: bool,
}

impl Cli {
    /// Analysis configuration for the fixed survey schema with these options
    pub fn to_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            logit: LogitOptions {
                max_iterations: self.max_iterations,
                tolerance: self.tolerance,
            },
            direction: self.direction,
            ..AnalysisConfig::default()
        }
    }
}

/// Validator for max_iterations parameter
fn validate_max_iterations(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid iteration count", s))?;

    if value == 0 {
        Err("max_iterations must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for tolerance parameter
fn validate_tolerance(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "tolerance must be between 0.0 and 1.0 (exclusive), got {}",
            value
        ))
    }
}
