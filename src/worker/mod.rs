//! The workload loop run by each worker thread.
//!
//! A worker owns a profile clone, a private sampler, and private counters.
//! It runs two phases back to back: an untimed warm-up whose results are
//! discarded, then the measured phase that produces a [`RunResult`]. Each
//! iteration draws a percent value and dispatches on cumulative thresholds:
//! `[0, rare)` acquires new stock, `[rare, rare + frequent)` replenishes the
//! lowest-stock records, and the remainder is the customer purchase path the
//! benchmark is really about.
//!
//! Errors never cross an iteration boundary. A failed store call or sample
//! is logged, counted as an unsuccessful iteration, and the loop moves on.

use crate::error::{HarnessError, Result};
use crate::model::{CopyRequest, RecordId, StockRecord};
use crate::profile::InteractionProfile;
use crate::sampler::RecordSampler;
use std::collections::BTreeSet;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, debug_span, trace};

/// Lifecycle of a worker. Construction of the [`RunResult`] is the DONE
/// state; it only exists once the measured phase has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Warmup,
    Measuring,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warmup => write!(f, "warmup"),
            Self::Measuring => write!(f, "measuring"),
        }
    }
}

/// Immutable summary of one worker's measured phase.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub worker: usize,
    /// Interactions attempted during measurement (always the configured
    /// measured-run count; failures still count as attempts).
    pub total_runs: u64,
    /// Interactions that completed without an error.
    pub successful: u64,
    /// Customer interactions attempted.
    pub customer_attempts: u64,
    /// Customer interactions that completed without an error.
    pub customer_successes: u64,
    /// Wall-clock time of the measured phase.
    pub elapsed: Duration,
}

impl RunResult {
    /// Fraction of measured interactions that succeeded.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total_runs == 0 {
            0.0
        } else {
            self.successful as f64 / self.total_runs as f64
        }
    }

    /// Customer share of successful interactions; `None` when nothing
    /// succeeded.
    #[must_use]
    pub fn customer_share(&self) -> Option<f64> {
        if self.successful == 0 {
            None
        } else {
            Some(self.customer_successes as f64 / self.successful as f64)
        }
    }
}

/// One workload generator. Spawned onto its own OS thread by the
/// orchestrator; `run` consumes the worker and returns its result.
#[derive(Debug)]
pub struct Worker {
    id: usize,
    profile: InteractionProfile,
    sampler: RecordSampler,
    customer_attempts: u64,
    customer_successes: u64,
}

impl Worker {
    #[must_use]
    pub fn new(id: usize, profile: InteractionProfile, sampler: RecordSampler) -> Self {
        Self {
            id,
            profile,
            sampler,
            customer_attempts: 0,
            customer_successes: 0,
        }
    }

    /// Warm up, then measure. Warm-up traffic hits the shared store like any
    /// other traffic but never reaches the report: the counters reset and
    /// the clock starts on the transition into the measured phase.
    #[must_use]
    pub fn run(mut self) -> RunResult {
        let span = debug_span!("worker", id = self.id);
        let _guard = span.enter();

        self.run_phase(Phase::Warmup, self.profile.warmup_runs);
        self.customer_attempts = 0;
        self.customer_successes = 0;

        let started = Instant::now();
        let successful = self.run_phase(Phase::Measuring, self.profile.measured_runs);
        let elapsed = started.elapsed();

        debug!(successful, ?elapsed, "worker done");
        RunResult {
            worker: self.id,
            total_runs: u64::from(self.profile.measured_runs),
            successful,
            customer_attempts: self.customer_attempts,
            customer_successes: self.customer_successes,
            elapsed,
        }
    }

    fn run_phase(&mut self, phase: Phase, runs: u32) -> u64 {
        let span = debug_span!("phase", %phase, runs);
        let _guard = span.enter();

        let mut successful = 0u64;
        for _ in 0..runs {
            if self.run_interaction() {
                successful += 1;
            }
        }
        successful
    }

    /// Dispatch and run a single interaction. Never propagates errors; a
    /// failure is this iteration's result, not the run's.
    fn run_interaction(&mut self) -> bool {
        let draw = self.sampler.roll_percent();
        let outcome = if draw < self.profile.rare_percent {
            self.acquire_new_stock()
        } else if draw < self.profile.rare_percent + self.profile.frequent_percent {
            self.replenish_low_stock()
        } else {
            self.customer_attempts += 1;
            let result = self.purchase_editor_picks();
            if result.is_ok() {
                self.customer_successes += 1;
            }
            result
        };

        match outcome {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "interaction failed");
                false
            }
        }
    }

    /// Rare path: synthesize a batch and insert the ids the current snapshot
    /// does not already hold. The snapshot can be stale by the time the
    /// insert lands; the store's duplicate rejection is the real guarantee,
    /// and when it fires the iteration simply counts as failed.
    fn acquire_new_stock(&mut self) -> Result<()> {
        let catalog = self.profile.store.list_all()?;
        let existing: BTreeSet<RecordId> = catalog.iter().map(|record| record.id).collect();

        let batch = self.sampler.generate_records(self.profile.acquisition_batch)?;
        let fresh: Vec<StockRecord> = batch
            .into_iter()
            .filter(|record| !existing.contains(&record.id))
            .collect();

        if fresh.is_empty() {
            trace!("every synthesized id already present, nothing to insert");
            return Ok(());
        }
        self.profile.store.bulk_insert(&fresh)?;
        Ok(())
    }

    /// Frequent path: top up the records with the least stock.
    fn replenish_low_stock(&mut self) -> Result<()> {
        let mut catalog = self.profile.store.list_all()?;
        // Stable sort: records with equal stock keep their catalog order.
        catalog.sort_by_key(|record| record.available_copies);

        let targets = catalog.len().min(self.profile.replenish_batch);
        let requests: Vec<CopyRequest> = catalog[..targets]
            .iter()
            .map(|record| CopyRequest::new(record.id, self.profile.copies_per_replenish))
            .collect();
        if requests.is_empty() {
            return Ok(());
        }

        let outcome = self.profile.store.add_copies(&requests)?;
        if !outcome.missing.is_empty() {
            trace!(missing = ?outcome.missing, "replenish targets vanished mid-flight");
        }
        Ok(())
    }

    /// Customer path (the hot path): fetch editor picks, sample a subset,
    /// buy one copy of each. An empty pick list or insufficient stock fails
    /// this iteration only.
    fn purchase_editor_picks(&mut self) -> Result<()> {
        let picks = self
            .profile
            .store
            .editor_picks(self.profile.editor_picks_per_request)?;
        if picks.is_empty() {
            return Err(HarnessError::NoEditorPicks);
        }

        let candidates: BTreeSet<RecordId> = picks.iter().map(|record| record.id).collect();
        let batch = self.profile.purchases_per_interaction.min(candidates.len());
        let chosen = self.sampler.sample_unique(&candidates, batch)?;

        let requests: Vec<CopyRequest> = chosen
            .into_iter()
            .map(|id| CopyRequest::new(id, 1))
            .collect();
        self.profile.store.purchase(&requests)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::seed_catalog;
    use crate::store::{InMemoryStore, InventoryStore};
    use std::sync::Arc;

    fn profile(
        store: Arc<dyn InventoryStore>,
        rare: f32,
        frequent: f32,
        warmup: u32,
        measured: u32,
    ) -> InteractionProfile {
        InteractionProfile {
            rare_percent: rare,
            frequent_percent: frequent,
            warmup_runs: warmup,
            measured_runs: measured,
            acquisition_batch: 5,
            replenish_batch: 5,
            copies_per_replenish: 10,
            editor_picks_per_request: 3,
            purchases_per_interaction: 2,
            store,
        }
    }

    fn seeded_store() -> Arc<dyn InventoryStore> {
        Arc::new(InMemoryStore::with_records(seed_catalog()).unwrap())
    }

    #[test]
    fn all_customer_mix_succeeds_against_the_seed_catalog() {
        let store = seeded_store();
        let prof = profile(Arc::clone(&store), 0.0, 0.0, 0, 20);
        let result = Worker::new(0, prof, RecordSampler::seeded(11)).run();

        assert_eq!(result.total_runs, 20);
        assert_eq!(result.successful, 20);
        assert_eq!(result.customer_attempts, 20);
        assert_eq!(result.customer_successes, 20);
    }

    #[test]
    fn all_rare_mix_grows_the_catalog() {
        let store = seeded_store();
        let prof = profile(Arc::clone(&store), 100.0, 0.0, 0, 10);
        let result = Worker::new(0, prof, RecordSampler::seeded(5)).run();

        assert_eq!(result.successful, 10);
        assert_eq!(result.customer_attempts, 0);
        // 10 acquisitions x 5 records on top of the 12 seeds. Synthesized
        // ids span the whole u32 range; a collision with an existing id only
        // shrinks that batch, so allow one.
        assert!(store.list_all().unwrap().len() >= 61);
    }

    #[test]
    fn all_frequent_mix_tops_up_the_scarcest_record() {
        let store = seeded_store();
        let prof = profile(Arc::clone(&store), 0.0, 100.0, 0, 4);
        let result = Worker::new(0, prof, RecordSampler::seeded(5)).run();

        assert_eq!(result.successful, 4);
        let scarce = store
            .list_all()
            .unwrap()
            .into_iter()
            .find(|record| record.id == 123_414)
            .unwrap();
        // Started at one copy and stays the scarcest record through all four
        // passes, so every pass tops it up by ten. The seed record carries
        // eight restocks already; four more land on top.
        assert_eq!(scarce.available_copies, 41);
        assert_eq!(scarce.restocks, 12);
    }

    #[test]
    fn warmup_traffic_never_reaches_the_result() {
        let store = seeded_store();
        let prof = profile(store, 0.0, 0.0, 15, 10);
        let result = Worker::new(3, prof, RecordSampler::seeded(2)).run();

        assert_eq!(result.worker, 3);
        assert_eq!(result.total_runs, 10);
        assert_eq!(result.customer_attempts, 10);
    }

    #[test]
    fn exhausted_picks_fail_every_customer_iteration() {
        let empty_pick = StockRecord::new(1, "Sold Out", "N. Stock", 5.0, 0)
            .with_editor_pick(true);
        let store: Arc<dyn InventoryStore> =
            Arc::new(InMemoryStore::with_records([empty_pick]).unwrap());
        let prof = profile(Arc::clone(&store), 0.0, 0.0, 0, 8);
        let result = Worker::new(0, prof, RecordSampler::seeded(9)).run();

        assert_eq!(result.total_runs, 8);
        assert_eq!(result.successful, 0);
        assert_eq!(result.customer_attempts, 8);
        assert_eq!(result.customer_successes, 0);

        let record = store.list_all().unwrap().pop().unwrap();
        assert_eq!(record.available_copies, 0);
        assert_eq!(record.sale_misses, 8);
    }

    #[test]
    fn store_with_no_picks_fails_without_panicking() {
        let no_picks = StockRecord::new(1, "Unendorsed", "A. Nobody", 5.0, 50);
        let store: Arc<dyn InventoryStore> =
            Arc::new(InMemoryStore::with_records([no_picks]).unwrap());
        let prof = profile(store, 0.0, 0.0, 0, 3);
        let result = Worker::new(0, prof, RecordSampler::seeded(1)).run();

        assert_eq!(result.successful, 0);
        assert_eq!(result.customer_attempts, 3);
    }

    #[test]
    fn run_result_ratios() {
        let result = RunResult {
            worker: 0,
            total_runs: 200,
            successful: 150,
            customer_attempts: 100,
            customer_successes: 90,
            elapsed: Duration::from_secs(1),
        };
        assert!((result.success_rate() - 0.75).abs() < 1e-9);
        assert!((result.customer_share().unwrap() - 0.6).abs() < 1e-9);

        let empty = RunResult {
            worker: 0,
            total_runs: 0,
            successful: 0,
            customer_attempts: 0,
            customer_successes: 0,
            elapsed: Duration::ZERO,
        };
        assert_eq!(empty.success_rate(), 0.0);
        assert!(empty.customer_share().is_none());
    }
}
