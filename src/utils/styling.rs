//! Terminal styling utilities for report output and diagnostics

use std::path::Path;
use std::time::Duration;

use console::{style, Emoji};

use crate::pipeline::{AnalysisConfig, LogitOptions};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static FAIL: Emoji<'_, '_> = Emoji("❌ ", "[x] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("seglogit").cyan().bold(),
        style("Customer segment logistic analysis").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, config: &AnalysisConfig, rows: usize, memory_mb: f64) {
    let LogitOptions {
        max_iterations,
        tolerance,
    } = config.logit;

    println!("    {}", style(format!("{}Configuration", GEAR)).cyan().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!("      {}Input:       {}", FOLDER, truncate_path(input, 38));
    println!(
        "      {}Dependent:   {}",
        TARGET,
        truncate_string(&config.dependent, 38)
    );
    println!(
        "      {}Predictors:  {}",
        CHART,
        style(config.independents.len()).yellow()
    );
    println!("      Rows:          {}", style(rows).yellow());
    println!("      Memory:        {:.2} MB", memory_mb);
    println!(
        "      IRLS:          max {} iterations, tolerance {:e}",
        style(max_iterations).yellow(),
        tolerance
    );
    println!("      Stepwise:      {}", style(config.direction).yellow());
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print elapsed time for a step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "    {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a recoverable problem (fit warning, skipped row)
pub fn print_warning(message: &str) {
    eprintln!("    {}{}", WARN, style(message).yellow());
}

/// Print a failed stage
pub fn print_failure(message: &str) {
    eprintln!("    {}{}", FAIL, style(message).red().bold());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Analysis complete!").green().bold()
    );
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let tail: String = s
            .chars()
            .rev()
            .take(max_len.saturating_sub(3))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    }
}
