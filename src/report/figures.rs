//! Report figures: one titled comfy-table per computed table
//!
//! Each builder takes a stage outcome. A failed stage becomes a figure with
//! a failure notice in place of the table.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{
    model_formula, AnalysisResults, CorrelationMatrix, FitError, LogitModel, PairedBatch,
    StepwiseResult, SummaryRecord,
};

/// Significance level used to highlight p-values
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// A rendered report figure
#[derive(Debug)]
pub struct Figure {
    pub title: String,
    pub subtitle: Option<String>,
    pub tables: Vec<Table>,
    pub notes: Vec<String>,
    /// Set when the stage failed; replaces the tables
    pub failure: Option<String>,
}

impl Figure {
    fn new(title: &str, subtitle: Option<String>) -> Self {
        Self {
            title: title.to_string(),
            subtitle,
            tables: Vec::new(),
            notes: Vec::new(),
            failure: None,
        }
    }

    fn failed(title: &str, message: String) -> Self {
        Self {
            failure: Some(message),
            ..Self::new(title, None)
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Plain-text rendering
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        if let Some(subtitle) = &self.subtitle {
            out.push_str(subtitle);
            out.push('\n');
        }
        if let Some(failure) = &self.failure {
            out.push_str(&format!("FAILED: {}\n", failure));
            return out;
        }
        for table in &self.tables {
            out.push_str(&table.to_string());
            out.push('\n');
        }
        for note in &self.notes {
            out.push_str(note);
            out.push('\n');
        }
        out
    }

    /// Print the figure, indented and styled
    pub fn display(&self) {
        println!();
        println!("    {}", style(&self.title).white().bold());
        if let Some(subtitle) = &self.subtitle {
            println!("    {}", style(subtitle).dim());
        }
        println!("    {}", style("─".repeat(50)).dim());

        if let Some(failure) = &self.failure {
            println!("    {} {}", style("FAILED").red().bold(), failure);
            return;
        }

        for table in &self.tables {
            for line in table.to_string().lines() {
                println!("    {}", line);
            }
            println!();
        }
        for note in &self.notes {
            println!("    {}", style(note).dim());
        }
    }
}

/// Display label for a record field
pub fn relabel(field: &str) -> &str {
    match field {
        "variable" => "Variable",
        "dtype" => "Type",
        "observations" => "N",
        "count" => "Count",
        "missing" => "Missing",
        "min" => "Min",
        "q1" => "Q1",
        "median" => "Median",
        "mean" => "Mean",
        "q3" => "Q3",
        "max" => "Max",
        "std_dev" => "Std. Dev.",
        "range" => "Range",
        "iqr" => "IQR",
        "outlier_threshold" => "Outlier Threshold",
        "outlier_count" => "Outliers",
        "outlier_pct" => "Outlier %",
        "dependent" => "Dependent",
        "independent" => "Independent",
        "aic" => "AIC",
        "intercept" => "Intercept",
        "term" => "Term",
        "estimate" => "Estimate",
        "std_error" => "Std. Error",
        "statistic" => "z value",
        "p_value" => "Pr(>|z|)",
        "equation" => "Equation",
        "warnings" => "Warnings",
        "step" => "Step",
        "action" => "Action",
        "terms" => "Terms",
        other => other,
    }
}

/// Format a statistic with four decimals, NaN as `NA`
pub fn fmt_num(v: f64) -> String {
    if v.is_nan() {
        "NA".to_string()
    } else if v.is_infinite() {
        let sign = if v > 0.0 { "" } else { "-" };
        format!("{}Inf", sign)
    } else {
        format!("{:.4}", v)
    }
}

/// Format a p-value, switching to scientific notation below 1e-4
pub fn fmt_p(v: f64) -> String {
    if v.is_nan() {
        "NA".to_string()
    } else if v < 1e-4 {
        format!("{:.2e}", v)
    } else {
        format!("{:.4}", v)
    }
}

fn header(fields: &[&str]) -> Vec<Cell> {
    fields
        .iter()
        .map(|f| Cell::new(relabel(f)).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(fields: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header(fields));
    table
}

fn num_cell(v: f64) -> Cell {
    Cell::new(fmt_num(v)).set_alignment(CellAlignment::Right)
}

fn p_cell(p: f64) -> Cell {
    let cell = Cell::new(fmt_p(p)).set_alignment(CellAlignment::Right);
    if p < SIGNIFICANCE_LEVEL {
        cell.fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

/// Figure 1: descriptive statistics
pub fn summary_figure(outcome: &anyhow::Result<Vec<SummaryRecord>>) -> Figure {
    const TITLE: &str = "Figure 1: Descriptive Statistics";
    let records = match outcome {
        Ok(records) => records,
        Err(e) => return Figure::failed(TITLE, format!("{:#}", e)),
    };

    let fields = [
        "variable",
        "dtype",
        "count",
        "missing",
        "min",
        "q1",
        "median",
        "mean",
        "q3",
        "max",
        "std_dev",
        "range",
        "iqr",
        "outlier_threshold",
        "outlier_count",
        "outlier_pct",
    ];
    let mut table = new_table(&fields);

    for r in records {
        table.add_row(vec![
            Cell::new(&r.variable),
            Cell::new(&r.dtype),
            Cell::new(r.count).set_alignment(CellAlignment::Right),
            Cell::new(r.missing).set_alignment(CellAlignment::Right),
            num_cell(r.min),
            num_cell(r.q1),
            num_cell(r.median),
            num_cell(r.mean),
            num_cell(r.q3),
            num_cell(r.max),
            num_cell(r.std_dev),
            num_cell(r.range),
            num_cell(r.iqr),
            num_cell(r.outlier_threshold),
            Cell::new(r.outlier_count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}%", r.outlier_pct * 100.0)).set_alignment(CellAlignment::Right),
        ]);
    }

    let observations = records.first().map(|r| r.observations).unwrap_or(0);
    let mut figure = Figure::new(
        TITLE,
        Some(format!(
            "{} variable(s), {} observation(s); outliers are values above Q3 + 3 x IQR",
            records.len(),
            observations
        )),
    );
    figure.tables.push(table);
    figure
}

/// Figure 2: Pearson correlation matrix
pub fn correlation_figure(outcome: &anyhow::Result<CorrelationMatrix>) -> Figure {
    const TITLE: &str = "Figure 2: Correlation Matrix";
    let matrix = match outcome {
        Ok(matrix) => matrix,
        Err(e) => return Figure::failed(TITLE, format!("{:#}", e)),
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    let mut head = vec![Cell::new("").add_attribute(Attribute::Bold)];
    head.extend(
        matrix
            .labels
            .iter()
            .map(|l| Cell::new(l).add_attribute(Attribute::Bold)),
    );
    table.set_header(head);

    for (label, row) in matrix.labels.iter().zip(&matrix.values) {
        let mut cells = vec![Cell::new(label).add_attribute(Attribute::Bold)];
        cells.extend(row.iter().map(|&r| {
            let cell = Cell::new(fmt_num(r)).set_alignment(CellAlignment::Right);
            if !r.is_nan() && r.abs() >= 0.5 && r < 1.0 {
                cell.fg(Color::Yellow)
            } else {
                cell
            }
        }));
        table.add_row(cells);
    }

    let mut figure = Figure::new(
        TITLE,
        Some("Pearson correlation, pairwise-complete observations".to_string()),
    );
    figure.tables.push(table);
    figure
}

/// Figure 3: one single-predictor logistic model per independent variable
pub fn paired_figure(batch: &PairedBatch) -> Figure {
    let fields = [
        "independent",
        "aic",
        "intercept",
        "term",
        "std_error",
        "statistic",
        "p_value",
        "equation",
        "warnings",
    ];
    let mut table = new_table(&fields);

    for row in &batch.rows {
        match &row.outcome {
            Ok(r) => {
                table.add_row(vec![
                    Cell::new(&r.independent),
                    num_cell(r.aic),
                    num_cell(r.intercept),
                    Cell::new(&r.term),
                    num_cell(r.std_error),
                    num_cell(r.statistic),
                    p_cell(r.p_value),
                    Cell::new(&r.equation),
                    Cell::new(r.warnings.join("; ")),
                ]);
            }
            Err(e) => {
                let mut cells = vec![
                    Cell::new(&row.independent),
                    Cell::new("FAILED").fg(Color::Red).add_attribute(Attribute::Bold),
                ];
                cells.extend((0..6).map(|_| Cell::new("")));
                cells.push(Cell::new(e.to_string()).fg(Color::Red));
                table.add_row(cells);
            }
        }
    }

    let failed = batch.failures().count();
    let mut figure = Figure::new(
        "Figure 3: Paired Logistic Regressions",
        Some(format!(
            "{} ~ 1 + x for each of {} predictor(s); {} failed",
            batch.dependent,
            batch.rows.len(),
            failed
        )),
    );
    figure.tables.push(table);
    figure
}

fn term_table(model: &LogitModel) -> Table {
    let mut table = new_table(&["term", "estimate", "std_error", "statistic", "p_value"]);
    for t in model.terms() {
        table.add_row(vec![
            Cell::new(&t.term),
            num_cell(t.estimate),
            num_cell(t.std_error),
            num_cell(t.statistic),
            p_cell(t.p_value),
        ]);
    }
    table
}

fn model_notes(model: &LogitModel) -> Vec<String> {
    let mut notes = vec![
        format!(
            "AIC: {}  Residual deviance: {} on {} df  Null deviance: {}",
            fmt_num(model.fit.aic),
            fmt_num(model.fit.deviance),
            model.fit.n_obs.saturating_sub(model.fit.terms.len()),
            fmt_num(model.fit.null_deviance)
        ),
        format!(
            "Fisher scoring iterations: {}{}",
            model.fit.iterations,
            if model.fit.converged { "" } else { " (not converged)" }
        ),
        format!("Formula: {}", model_formula(model)),
    ];
    notes.extend(model.fit.warnings.iter().map(|w| format!("Warning: {}", w)));
    notes
}

/// Figure 4: full model on every independent variable
pub fn full_model_figure(outcome: &Result<LogitModel, FitError>) -> Figure {
    const TITLE: &str = "Figure 4: Full Logistic Model";
    let model = match outcome {
        Ok(model) => model,
        Err(e) => return Figure::failed(TITLE, e.to_string()),
    };

    let mut figure = Figure::new(
        TITLE,
        Some(format!(
            "{} ~ all {} predictor(s), n = {}",
            model.dependent,
            model.predictors.len(),
            model.fit.n_obs
        )),
    );
    figure.tables.push(term_table(model));
    figure.notes = model_notes(model);
    figure
}

/// Figure 5: stepwise-selected model plus its selection trace
pub fn stepwise_figure(outcome: &anyhow::Result<StepwiseResult>) -> Figure {
    const TITLE: &str = "Figure 5: Stepwise-Selected Logistic Model";
    let result = match outcome {
        Ok(result) => result,
        Err(e) => return Figure::failed(TITLE, format!("{:#}", e)),
    };

    let mut figure = Figure::new(
        TITLE,
        Some(format!(
            "AIC-guided selection, direction = {}, {} predictor(s) retained",
            result.direction,
            result.model.predictors.len()
        )),
    );
    figure.tables.push(term_table(&result.model));

    let mut trace = new_table(&["step", "action", "aic", "terms"]);
    for record in &result.trace {
        trace.add_row(vec![
            Cell::new(record.step).set_alignment(CellAlignment::Right),
            Cell::new(record.action.to_string()),
            num_cell(record.aic),
            Cell::new(record.terms.len()).set_alignment(CellAlignment::Right),
        ]);
    }
    figure.tables.push(trace);
    figure.notes = model_notes(&result.model);
    figure
        .notes
        .extend(result.skipped.iter().map(|(c, e)| format!("Skipped {}: {}", c, e)));
    figure
}

/// All five figures in report order
pub fn build_figures(results: &AnalysisResults) -> Vec<Figure> {
    vec![
        summary_figure(&results.summary),
        correlation_figure(&results.correlation),
        paired_figure(&results.paired),
        full_model_figure(&results.full),
        stepwise_figure(&results.stepwise),
    ]
}
