//! Report rendering for finished runs.
//!
//! Supports human-readable text output, machine-parseable JSON, and the
//! on-disk report file. The same [`ReportDocument`] backs all three so the
//! JSON a robot consumer reads never drifts from the text a human reads.
//!
//! A flagged run still renders: the per-worker rows are always included,
//! but the aggregate metrics block is replaced by the health findings.

use crate::config::BenchConfig;
use crate::error::Result;
use crate::orchestrator::{BenchOutcome, MetricsReport};
use crate::util::format_duration;
use crate::worker::RunResult;
use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Complete description of one finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub generated_at: DateTime<Utc>,
    pub workers: usize,
    pub warmup_runs: u32,
    pub measured_runs: u32,
    pub mix: MixSummary,
    pub healthy: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
    pub results: Vec<WorkerRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsSummary>,
}

/// The interaction mix the run was configured with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixSummary {
    pub rare_percent: f32,
    pub frequent_percent: f32,
    pub customer_percent: f32,
}

/// One worker's measured-phase counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRow {
    pub worker: usize,
    pub total_runs: u64,
    pub successful: u64,
    pub customer_attempts: u64,
    pub customer_successes: u64,
    pub elapsed_ms: f64,
}

/// Aggregate metrics, present only for healthy runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub throughput_per_sec: f64,
    pub mean_latency_ms: f64,
}

impl From<&RunResult> for WorkerRow {
    fn from(result: &RunResult) -> Self {
        Self {
            worker: result.worker,
            total_runs: result.total_runs,
            successful: result.successful,
            customer_attempts: result.customer_attempts,
            customer_successes: result.customer_successes,
            elapsed_ms: result.elapsed.as_secs_f64() * 1000.0,
        }
    }
}

impl From<&MetricsReport> for MetricsSummary {
    fn from(report: &MetricsReport) -> Self {
        Self {
            throughput_per_sec: report.throughput_per_sec,
            mean_latency_ms: report.mean_latency.as_secs_f64() * 1000.0,
        }
    }
}

impl ReportDocument {
    /// Assemble the document from a run's configuration and outcome.
    #[must_use]
    pub fn build(config: &BenchConfig, outcome: &BenchOutcome) -> Self {
        Self {
            generated_at: Utc::now(),
            workers: config.workers,
            warmup_runs: config.warmup_runs,
            measured_runs: config.measured_runs,
            mix: MixSummary {
                rare_percent: config.rare_percent,
                frequent_percent: config.frequent_percent,
                customer_percent: 100.0 - config.rare_percent - config.frequent_percent,
            },
            healthy: outcome.is_healthy(),
            issues: outcome.issues.iter().map(ToString::to_string).collect(),
            results: outcome.results.iter().map(WorkerRow::from).collect(),
            metrics: outcome.report.as_ref().map(MetricsSummary::from),
        }
    }
}

/// Report file name for a run against the in-memory store.
#[must_use]
pub fn default_report_name(workers: usize) -> String {
    format!("memory_{workers}_workers.txt")
}

/// Render the human-readable report.
#[must_use]
pub fn render_text(doc: &ReportDocument) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Workload run: memory store, {} workers", doc.workers);
    let _ = writeln!(out, "Generated: {}", doc.generated_at.to_rfc3339());
    let _ = writeln!(
        out,
        "Mix: {:.1}% acquisition / {:.1}% replenishment / {:.1}% customer",
        doc.mix.rare_percent, doc.mix.frequent_percent, doc.mix.customer_percent
    );
    let _ = writeln!(
        out,
        "Runs per worker: {} warm-up + {} measured\n",
        doc.warmup_runs, doc.measured_runs
    );

    let _ = writeln!(
        out,
        "{:>6}  {:>8}  {:>8}  {:>12}  {:>12}  {:>10}",
        "worker", "runs", "ok", "cust. tried", "cust. ok", "elapsed"
    );
    for row in &doc.results {
        let _ = writeln!(
            out,
            "{:>6}  {:>8}  {:>8}  {:>12}  {:>12}  {:>10}",
            row.worker,
            row.total_runs,
            row.successful,
            row.customer_attempts,
            row.customer_successes,
            format_duration(Duration::from_secs_f64(row.elapsed_ms / 1000.0))
        );
    }
    out.push('\n');

    if let Some(metrics) = &doc.metrics {
        let _ = writeln!(
            out,
            "Throughput: {:.1} customer purchases/sec",
            metrics.throughput_per_sec
        );
        let _ = writeln!(
            out,
            "Latency: {} mean measured phase",
            format_duration(Duration::from_secs_f64(metrics.mean_latency_ms / 1000.0))
        );
    } else {
        let _ = writeln!(out, "RUN FLAGGED: health check failed, metrics withheld");
        for issue in &doc.issues {
            let _ = writeln!(out, "  - {issue}");
        }
    }

    out
}

/// Render the machine-parseable report.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(doc: &ReportDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Write rendered report contents to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    info!(path = %path.display(), "report written");
    Ok(())
}
