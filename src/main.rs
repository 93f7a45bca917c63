//! credit-features: Feature Matrix CLI Tool
//!
//! Loads the applicant and history tables, runs the feature pipeline, and
//! writes the enriched applicant table plus the statistics a paired test
//! run needs to replay.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use credit_features::cli::Cli;
use credit_features::pipeline::{
    all_missing_scores, build_features_with, load_statistics, load_table, save_statistics,
    save_table, Execution, Reference, SourceTables, BUREAU_COUNT, INST_COUNT, PREV_COUNT,
};
use credit_features::report::FeatureSummary;
use credit_features::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning, StatsMode,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output_path = cli.output_path();
    let stats_output = cli.stats_output_path();

    print_banner(env!("CARGO_PKG_VERSION"));

    let stats_mode = match &cli.stats_in {
        Some(input) => StatsMode::Replay {
            input,
            output: stats_output.as_deref(),
        },
        None => StatsMode::Fit {
            output: stats_output
                .as_deref()
                .unwrap_or_else(|| std::path::Path::new("-")),
        },
    };
    print_config(&cli.application, &output_path, &stats_mode);

    // Step 1: Load tables
    print_step_header(1, "Load Tables");
    let step_start = Instant::now();

    let spinner = create_spinner("Reading applicant and history tables...");
    let tables = SourceTables {
        applicant: load_table(&cli.application, cli.infer_schema_length)?,
        previous: load_table(&cli.previous, cli.infer_schema_length)?,
        bureau: load_table(&cli.bureau, cli.infer_schema_length)?,
        installments: load_table(&cli.installments, cli.infer_schema_length)?,
    };
    finish_with_success(&spinner, "Tables loaded");

    print_count("applicants", tables.applicant.height());
    print_count("previous applications", tables.previous.height());
    print_count("bureau records", tables.bureau.height());
    print_count("installment payments", tables.installments.height());

    let reference = match &cli.stats_in {
        Some(path) => {
            let stats = load_statistics(path)?;
            print_success(&format!("Replaying statistics from {}", path.display()));
            Reference::Supplied(stats)
        }
        None => Reference::Compute,
    };

    let mut summary = FeatureSummary::new(
        tables.applicant.height(),
        tables.applicant.width(),
        reference.is_supplied(),
    );
    let load_elapsed = step_start.elapsed();
    summary.set_load_time(load_elapsed);
    print_step_time(load_elapsed);

    // Step 2: Build features
    print_step_header(2, "Build Features");
    let step_start = Instant::now();

    if !reference.is_supplied() {
        for column in all_missing_scores(&tables.applicant)? {
            print_warning(&format!(
                "'{}' has no values; its median falls back to 0.0",
                column
            ));
        }
    }

    let execution = if cli.sequential {
        Execution::Sequential
    } else {
        Execution::Parallel
    };

    let spinner = create_spinner("Cleaning, imputing, deriving and aggregating...");
    let output = build_features_with(&tables, &reference, execution)?;
    if output.statistics.credit_income_edges.is_some() {
        finish_with_success(&spinner, "Feature pipeline complete");
    } else {
        finish_with_warning(
            &spinner,
            "Feature pipeline complete (no credit-income ratios, bins left empty)",
        );
    }

    let mut features = output.features;
    summary.set_output(&features);
    summary.set_statistics(&output.statistics);
    summary.add_coverage("previous", tables.previous.height(), &features, PREV_COUNT);
    summary.add_coverage("bureau", tables.bureau.height(), &features, BUREAU_COUNT);
    summary.add_coverage(
        "installments",
        tables.installments.height(),
        &features,
        INST_COUNT,
    );

    if features.height() != tables.applicant.height() {
        anyhow::bail!(
            "Applicant row count changed from {} to {}",
            tables.applicant.height(),
            features.height()
        );
    }
    print_info(&format!(
        "{} feature columns added",
        style(summary.added_columns()).yellow().bold()
    ));

    let features_elapsed = step_start.elapsed();
    summary.set_features_time(features_elapsed);
    print_step_time(features_elapsed);

    // Step 3: Save results
    print_step_header(3, "Save Results");
    let step_start = Instant::now();

    let spinner = create_spinner("Writing feature table...");
    save_table(&mut features, &output_path)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));

    match &stats_output {
        Some(path) => {
            save_statistics(&output.statistics, path)?;
            print_success(&format!("Statistics written to {}", path.display()));
        }
        None => print_info("Replayed statistics left unchanged"),
    }

    let save_elapsed = step_start.elapsed();
    summary.set_save_time(save_elapsed);
    print_step_time(save_elapsed);

    summary.display();
    print_completion();

    Ok(())
}
