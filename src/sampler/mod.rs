//! Worker-private randomness: dispatch draws, unique id sampling, and
//! synthetic record generation.
//!
//! Every worker owns its own `RecordSampler` so no RNG state is shared
//! across threads. Seeded construction exists for reproducible runs and for
//! tests; the default pulls from OS entropy.

use crate::error::{HarnessError, Result};
use crate::model::{RecordId, StockRecord};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

/// Stock level every synthesized record starts with. New acquisitions arrive
/// well stocked so they do not immediately become replenishment targets.
pub const GENERATED_COPIES: u32 = 300;

/// Synthesized prices fall in `[1.00, 60.00]`, drawn in whole cents.
const PRICE_CENTS: std::ops::RangeInclusive<u32> = 100..=6000;

const FORMS: &[&str] = &[
    "A Field Guide to",
    "The Last",
    "Notes on",
    "Against",
    "A Short History of",
    "The Care of",
    "Manual for",
    "Letters from",
];

const SUBJECTS: &[&str] = &[
    "Loading Docks",
    "the Night Shift",
    "Cold Storage",
    "Paper Ledgers",
    "the Overstock Aisle",
    "Freight Elevators",
    "Shrink-Wrap",
    "the Returns Desk",
    "Pallet Towns",
    "Inventory Ghosts",
];

const AUTHORS: &[&str] = &[
    "R. Holt", "M. Okafor", "I. Strand", "T. Quist", "G. Verde", "E. Kline",
    "B. Braun", "A. Stern", "D. Jorgensen", "N. Macrae", "P. Engel", "H. Aldren",
];

static TITLE_POOL: Lazy<Vec<String>> = Lazy::new(|| {
    FORMS
        .iter()
        .flat_map(|form| SUBJECTS.iter().map(move |subject| format!("{form} {subject}")))
        .collect()
});

/// A private source of randomness for one worker.
#[derive(Debug)]
pub struct RecordSampler {
    rng: StdRng,
}

impl RecordSampler {
    /// Sampler seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sampler for reproducible runs and tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `[0, 100)` used for interaction dispatch.
    pub fn roll_percent(&mut self) -> f32 {
        self.rng.random_range(0.0..100.0)
    }

    /// Draw exactly `count` distinct members of `candidates`, uniformly,
    /// without replacement. The candidate set itself is not consumed.
    ///
    /// # Errors
    ///
    /// `ZeroCount` when `count == 0`; `SampleTooLarge` when the pool cannot
    /// cover the request (including an empty pool).
    pub fn sample_unique(
        &mut self,
        candidates: &BTreeSet<RecordId>,
        count: usize,
    ) -> Result<BTreeSet<RecordId>> {
        if count == 0 {
            return Err(HarnessError::ZeroCount { what: "sample" });
        }
        if count > candidates.len() {
            return Err(HarnessError::SampleTooLarge {
                requested: count,
                available: candidates.len(),
            });
        }

        let mut pool: Vec<RecordId> = candidates.iter().copied().collect();
        let mut picked = BTreeSet::new();
        for _ in 0..count {
            let slot = self.rng.random_range(0..pool.len());
            picked.insert(pool.swap_remove(slot));
        }
        Ok(picked)
    }

    /// Synthesize `count` new records with pairwise-distinct ids drawn from
    /// the full 32-bit space. Telemetry starts zeroed, stock at
    /// [`GENERATED_COPIES`], never an editor pick.
    ///
    /// # Errors
    ///
    /// `ZeroCount` when `count == 0`.
    pub fn generate_records(&mut self, count: usize) -> Result<Vec<StockRecord>> {
        if count == 0 {
            return Err(HarnessError::ZeroCount {
                what: "record synthesis",
            });
        }

        let mut seen = BTreeSet::new();
        let mut records = Vec::with_capacity(count);
        while records.len() < count {
            let id = self.rng.random_range(1..=RecordId::MAX);
            // Intra-batch collisions are vanishingly rare in a 32-bit space;
            // redraw rather than carry a duplicate.
            if !seen.insert(id) {
                continue;
            }
            records.push(self.synthesize(id));
        }
        Ok(records)
    }

    fn synthesize(&mut self, id: RecordId) -> StockRecord {
        let title = &TITLE_POOL[self.rng.random_range(0..TITLE_POOL.len())];
        let author = AUTHORS[self.rng.random_range(0..AUTHORS.len())];
        let cents = self.rng.random_range(PRICE_CENTS);
        StockRecord::new(
            id,
            title.clone(),
            author,
            f64::from(cents) / 100.0,
            GENERATED_COPIES,
        )
    }
}

impl Default for RecordSampler {
    fn default() -> Self {
        Self::new()
    }
}
