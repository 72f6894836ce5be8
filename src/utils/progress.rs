//! Spinners and batch progress bars for the analysis stages

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner for a single long-running stage (load, summary, full fit, search)
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("    {spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Bar over a batch of independent model fits, one tick per fit
pub fn create_fit_bar(fits: usize, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(fits as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("    {msg} [{bar:30.cyan/blue}] {pos}/{len} fits")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
    );
    pb.set_message(label.to_string());
    pb
}

/// Stop the indicator with a green check
pub fn finish_with_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✅ {}", message));
}

/// Stop the indicator with a warning sign; details are printed separately
pub fn finish_with_warning(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("⚠️  {}", message));
}
