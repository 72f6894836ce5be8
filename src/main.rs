//! seglogit: Customer Segment Logistic Analysis CLI
//!
//! Loads the survey export, runs the five analysis stages and prints
//! Figures 1-5 followed by a run summary.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use seglogit::cli::Cli;
use seglogit::pipeline::{load_survey, run_analysis};
use seglogit::report::{build_figures, export_analysis, RunSummary};
use seglogit::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_info, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config();

    if !cli.no_banner {
        print_banner(env!("CARGO_PKG_VERSION"));
    }

    // Load and validate; any data problem is fatal
    let load_start = Instant::now();
    let spinner = create_spinner("Loading survey...");
    let survey = match load_survey(&cli.input, cli.infer_schema_length) {
        Ok(survey) => {
            finish_with_success(&spinner, "Survey loaded");
            survey
        }
        Err(e) => {
            finish_with_warning(&spinner, "Survey could not be loaded");
            return Err(e)
                .with_context(|| format!("Failed to load survey from {}", cli.input.display()));
        }
    };

    let balance = survey.balance();
    print_info(&format!(
        "{}: {} event(s), {} non-event(s), {} missing",
        config.dependent, balance.events, balance.non_events, balance.missing
    ));
    print_step_time(load_start.elapsed());
    println!();

    print_config(&cli.input, &config, survey.height(), survey.memory_mb());

    let results = run_analysis(&survey.frame, &config);

    println!();
    println!(
        "    {} {}",
        style("📈").cyan(),
        style("FIGURES").white().bold()
    );
    for figure in build_figures(&results) {
        figure.display();
    }

    RunSummary::from_results(survey.height(), &results).display();

    if let Some(path) = &cli.export {
        let input_file = cli.input.display().to_string();
        export_analysis(&results, &input_file, survey.height(), path)?;
        println!();
        print_success(&format!("Exported figures to {}", path.display()));
    }

    print_completion();
    Ok(())
}
