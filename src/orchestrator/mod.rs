//! Run lifecycle: seed, fork, join, validate, reduce.
//!
//! The orchestrator owns the whole fork-join generation. It seeds the store
//! with the fixed catalog, spawns one named OS thread per worker, releases
//! them together through a barrier, and blocks until every worker returns.
//! There is no cancellation and no join timeout: a wedged store call keeps
//! the run alive, which is a documented limitation of the blocking design.
//!
//! Health checks run before any metric is computed. A flagged result
//! suppresses the metrics (they would be garbage) but never turns the run
//! into a process failure; callers get the issues alongside the raw
//! per-worker results and decide what to do with them.

use crate::config::BenchConfig;
use crate::error::{HarnessError, Result};
use crate::profile::InteractionProfile;
use crate::sampler::RecordSampler;
use crate::store::InventoryStore;
use crate::store::seed::seed_catalog;
use crate::util::progress::{create_progress_bar, should_show_progress};
use crate::validation::{HealthIssue, HealthValidator};
use crate::worker::{RunResult, Worker};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The reduction over all healthy per-worker results.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport {
    /// Sum over workers of customer successes per second of measured time.
    pub throughput_per_sec: f64,
    /// Mean measured-phase duration across workers.
    pub mean_latency: Duration,
}

impl MetricsReport {
    /// Reduce per-worker results into aggregate metrics.
    ///
    /// A worker that somehow measured zero elapsed time contributes nothing
    /// to throughput rather than dividing by zero.
    #[must_use]
    pub fn reduce(results: &[RunResult]) -> Self {
        let mut throughput_per_sec = 0.0;
        let mut total_elapsed = Duration::ZERO;

        for result in results {
            let secs = result.elapsed.as_secs_f64();
            if secs > 0.0 {
                throughput_per_sec += result.customer_successes as f64 / secs;
            }
            total_elapsed += result.elapsed;
        }

        let mean_latency = if results.is_empty() {
            Duration::ZERO
        } else {
            // worker pools are far smaller than u32::MAX
            #[allow(clippy::cast_possible_truncation)]
            let workers = results.len() as u32;
            total_elapsed / workers
        };

        Self {
            throughput_per_sec,
            mean_latency,
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct BenchOutcome {
    /// Raw per-worker results, in worker order.
    pub results: Vec<RunResult>,
    /// Aggregate metrics; `None` when the health check flagged the run.
    pub report: Option<MetricsReport>,
    /// Health-check findings, empty for a healthy run.
    pub issues: Vec<HealthIssue>,
}

impl BenchOutcome {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }

    /// The metrics, or a `Validation` error carrying the findings.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Validation` when the run was flagged.
    pub fn require_healthy(&self) -> Result<&MetricsReport> {
        match &self.report {
            Some(report) => Ok(report),
            None => Err(HarnessError::Validation {
                issues: self.issues.clone(),
            }),
        }
    }
}

/// Seed the store and drive one full fork-join benchmark generation.
///
/// Seeding errors are fatal: a half-seeded store would skew every number
/// the run produces. Worker panics surface as [`HarnessError::WorkerPanicked`]
/// after the panicking thread has been joined.
///
/// # Errors
///
/// Returns an error if seeding fails, a worker thread cannot be spawned, or
/// a worker panics.
pub fn run_benchmark(
    config: &BenchConfig,
    store: Arc<dyn InventoryStore>,
) -> Result<BenchOutcome> {
    let catalog = seed_catalog();
    store.bulk_insert(&catalog)?;
    info!(records = catalog.len(), "seeded initial catalog");

    let profile = InteractionProfile::from_config(config, Arc::clone(&store));
    let barrier = Arc::new(Barrier::new(config.workers));

    let mut handles = Vec::with_capacity(config.workers);
    for worker_id in 0..config.workers {
        let profile = profile.clone();
        let barrier = Arc::clone(&barrier);
        let sampler = match config.base_seed {
            Some(base) => RecordSampler::seeded(base.wrapping_add(worker_id as u64)),
            None => RecordSampler::new(),
        };

        let handle = thread::Builder::new()
            .name(format!("worker-{worker_id}"))
            .spawn(move || {
                // All workers start the warm-up together.
                barrier.wait();
                Worker::new(worker_id, profile, sampler).run()
            })?;
        handles.push(handle);
    }
    debug!(workers = handles.len(), "workers spawned, waiting for joins");

    let bar = create_progress_bar(
        handles.len() as u64,
        "Joining workers",
        should_show_progress(),
    );
    let mut results = Vec::with_capacity(handles.len());
    for (worker_id, handle) in handles.into_iter().enumerate() {
        let result = handle
            .join()
            .map_err(|_| HarnessError::WorkerPanicked { worker: worker_id })?;
        results.push(result);
        bar.inc(1);
    }
    bar.finish_and_clear();

    let issues = HealthValidator::validate_all(&results);
    if issues.is_empty() {
        let report = MetricsReport::reduce(&results);
        info!(
            throughput_per_sec = report.throughput_per_sec,
            mean_latency_ms = report.mean_latency.as_secs_f64() * 1000.0,
            "run healthy"
        );
        Ok(BenchOutcome {
            results,
            report: Some(report),
            issues,
        })
    } else {
        for issue in &issues {
            warn!(%issue, "health check flagged a result");
        }
        Ok(BenchOutcome {
            results,
            report: None,
            issues,
        })
    }
}
