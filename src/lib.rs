//! seglogit: customer-segment survey analysis
//!
//! Loads the survey, summarizes and correlates its variables, and fits the
//! paired, full and stepwise-selected logistic models behind Figures 1-5.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
