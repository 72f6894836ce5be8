//! Run summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{correlation_pairs, AnalysisResults, CorrelatedPair, StageTimings};

/// Headline numbers of one analysis run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub observations: usize,
    pub predictors: usize,
    pub paired_succeeded: usize,
    pub paired_failed: usize,
    /// Coefficients in the full model, intercept included
    pub full_terms: Option<usize>,
    pub stepwise_retained: Option<usize>,
    pub strongest_pair: Option<CorrelatedPair>,
    pub timings: StageTimings,
}

impl RunSummary {
    pub fn from_results(observations: usize, results: &AnalysisResults) -> Self {
        let strongest_pair = results
            .correlation
            .as_ref()
            .ok()
            .and_then(|m| correlation_pairs(m).into_iter().next());

        Self {
            observations,
            predictors: results.config.independents.len(),
            paired_succeeded: results.paired.records().count(),
            paired_failed: results.paired.failures().count(),
            full_terms: results.full.as_ref().ok().map(|m| m.terms().len()),
            stepwise_retained: results
                .stepwise
                .as_ref()
                .ok()
                .map(|s| s.model.predictors.len()),
            strongest_pair,
            timings: results.timings.clone(),
        }
    }

    /// Metric/value table
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Observations"),
            Cell::new(self.observations),
        ]);
        table.add_row(vec![
            Cell::new("📊 Predictors"),
            Cell::new(self.predictors),
        ]);
        table.add_row(vec![
            Cell::new("✅ Paired Fits"),
            Cell::new(self.paired_succeeded).fg(Color::Green),
        ]);
        table.add_row(vec![
            Cell::new("❌ Paired Failures"),
            Cell::new(self.paired_failed).fg(if self.paired_failed == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("🧮 Full Model Terms"),
            optional_cell(self.full_terms),
        ]);
        table.add_row(vec![
            Cell::new("🎯 Stepwise Retained"),
            optional_cell(self.stepwise_retained).add_attribute(Attribute::Bold),
        ]);

        let pair = match &self.strongest_pair {
            Some(p) => format!("{} / {} ({:.4})", p.feature1, p.feature2, p.correlation),
            None => "NA".to_string(),
        };
        table.add_row(vec![Cell::new("🔗 Strongest Correlation"), Cell::new(pair)]);

        for (label, elapsed) in [
            ("Summary", self.timings.summary),
            ("Correlation", self.timings.correlation),
            ("Paired", self.timings.paired),
            ("Full Model", self.timings.full),
            ("Stepwise", self.timings.stepwise),
        ] {
            table.add_row(vec![
                Cell::new(format!("⏱  {}", label)),
                Cell::new(format_duration(elapsed)),
            ]);
        }
        table.add_row(vec![
            Cell::new("⏱  Total").add_attribute(Attribute::Bold),
            Cell::new(format_duration(self.timings.total())).add_attribute(Attribute::Bold),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }
    }
}

fn optional_cell(value: Option<usize>) -> Cell {
    match value {
        Some(v) => Cell::new(v).fg(Color::Green),
        None => Cell::new("FAILED").fg(Color::Red),
    }
}

fn format_duration(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_marks_missing_models_failed() {
        let summary = RunSummary {
            observations: 10,
            predictors: 3,
            paired_succeeded: 2,
            paired_failed: 1,
            ..Default::default()
        };
        let text = summary.table().to_string();
        assert!(text.contains("FAILED"));
        assert!(text.contains("Strongest Correlation"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    }
}
