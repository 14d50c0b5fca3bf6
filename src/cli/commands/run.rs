//! Run command implementation.
//!
//! Resolves configuration, drives a full fork-join generation against a
//! fresh in-memory store, prints the outcome, and writes the report file.
//! A health-flagged run still exits zero; the findings replace the metrics
//! in whatever output mode is active.

use crate::cli::RunArgs;
use crate::config::{BenchConfig, CliOverrides};
use crate::error::Result;
use crate::orchestrator::run_benchmark;
use crate::report::{self, ReportDocument};
use crate::store::{InMemoryStore, InventoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the store cannot be
/// seeded, a worker thread fails, or the report file cannot be written.
pub fn execute(args: &RunArgs, json: bool, quiet: bool) -> Result<()> {
    let overrides = overrides_from_args(args);
    let config = BenchConfig::resolve(args.config.as_deref(), &overrides)?;

    info!(
        workers = config.workers,
        warmup = config.warmup_runs,
        measured = config.measured_runs,
        "starting run"
    );

    let store: Arc<dyn InventoryStore> = Arc::new(InMemoryStore::new());
    let outcome = run_benchmark(&config, store)?;

    let doc = ReportDocument::build(&config, &outcome);
    let text = report::render_text(&doc);

    let path = config
        .report_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(report::default_report_name(config.workers)));
    report::write_report(&path, &text)?;

    if json {
        println!("{}", report::render_json(&doc)?);
    } else if !quiet {
        print!("{text}");
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}

fn overrides_from_args(args: &RunArgs) -> CliOverrides {
    CliOverrides {
        workers: args.workers,
        warmup_runs: args.warmup,
        measured_runs: args.runs,
        rare_percent: args.rare,
        frequent_percent: args.frequent,
        acquisition_batch: args.acquisition_batch,
        replenish_batch: args.replenish_batch,
        copies_per_replenish: args.copies_per_replenish,
        editor_picks_per_request: args.picks,
        purchases_per_interaction: args.purchases,
        base_seed: args.seed,
        report_path: args.report.clone(),
    }
}
