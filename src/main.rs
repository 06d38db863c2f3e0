//! corrprune: Correlation-based Feature Pruning CLI
//!
//! Loads a dataset (or a precomputed correlation matrix), removes features
//! until no pair's absolute correlation exceeds the threshold, and optionally
//! writes the pruned dataset and a JSON report.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use corrprune::cli::Cli;
use corrprune::pipeline::{
    absolute_correlation_matrix, drop_removed, load_correlation_matrix, load_dataset,
    missing_columns, prune_with_trace, save_dataset, PruneError,
};
use corrprune::report::{export_prune_report, PruneReport, PruneSummary};
use corrprune::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.prune_config();
    let output_path = cli.output_path();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, output_path.as_deref(), &config);

    // Step 1: Correlation matrix
    print_step_header(1, "Correlation Matrix");
    let step_start = Instant::now();

    let dataset = if cli.matrix {
        None
    } else {
        let spinner = create_spinner("Loading dataset...");
        let df = load_dataset(&cli.input, cli.infer_schema_length)?;
        let unknown = missing_columns(&df, &cli.drop_columns);
        let df = drop_removed(&df, &cli.drop_columns);
        finish_with_success(&spinner, "Dataset loaded");
        if !unknown.is_empty() {
            print_info(&format!(
                "Ignoring --drop-columns not found in dataset: {}",
                unknown.join(", ")
            ));
        }

        let (rows, cols) = df.shape();
        println!("\n    {} Dataset Statistics:", style("✧").cyan());
        println!("      Rows: {}", rows);
        println!("      Columns: {}", cols);
        Some(df)
    };

    let matrix_result = match &dataset {
        Some(df) => absolute_correlation_matrix(df),
        None => load_correlation_matrix(&cli.input),
    };
    let matrix = match matrix_result {
        Ok(matrix) => matrix,
        Err(e) if is_empty_input(&e) => {
            print_info("No numeric features found - nothing to prune");
            println!("[]");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    print_success(&format!("Correlation matrix ready ({} features)", matrix.n()));
    print_step_time(step_start.elapsed());

    // Step 2: Pruning
    print_step_header(2, "Correlation Pruning");
    let step_start = Instant::now();
    let outcome = prune_with_trace(matrix, &config)?;
    let prune_elapsed = step_start.elapsed();

    if outcome.removed.is_empty() {
        print_info("No feature pairs exceed the correlation threshold");
    } else {
        print_count(
            "feature(s) to remove",
            outcome.removed.len(),
            Some(&format!("(>{:.2})", config.threshold)),
        );
    }
    print_step_time(prune_elapsed);

    let mut summary = PruneSummary::from_outcome(&outcome);
    summary.set_elapsed(prune_elapsed);

    // Step 3: Outputs
    if output_path.is_some() || cli.report_path().is_some() {
        print_step_header(3, "Save Results");
    }

    if let (Some(path), Some(df)) = (&output_path, &dataset) {
        let spinner = create_spinner("Writing output file...");
        let removed = outcome.removed_labels().unwrap_or_default();
        let mut pruned = drop_removed(df, &removed);
        save_dataset(&mut pruned, path)?;
        finish_with_success(&spinner, &format!("Saved to {}", path.display()));
    }

    if let Some(path) = cli.report_path() {
        let report = PruneReport::new(&outcome, &config, &cli.input);
        export_prune_report(&report, &path)?;
        print_success(&format!("Report written to {}", path.display()));
    }

    summary.display();

    let removal = outcome.into_removal(config.names_output)?;
    println!();
    println!("{}", serde_json::to_string(&removal)?);

    print_completion();

    Ok(())
}

fn is_empty_input(error: &anyhow::Error) -> bool {
    error
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<PruneError>(), Some(PruneError::EmptyInput)))
}
