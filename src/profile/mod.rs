//! The immutable per-run interaction profile.
//!
//! One profile is built per benchmark run and cloned into every worker.
//! Nothing here is mutable after construction; the store handle is the only
//! shared object, and it is behind an `Arc`.

use crate::config::BenchConfig;
use crate::store::InventoryStore;
use std::sync::Arc;

/// Everything a worker needs to know about the run it is part of.
///
/// `rare_percent + frequent_percent <= 100`; the remainder is customer
/// traffic. The percentages are validated by [`BenchConfig::validate`]
/// before a profile is ever built.
#[derive(Debug, Clone)]
pub struct InteractionProfile {
    /// Share of interactions that acquire brand-new stock, in percent.
    pub rare_percent: f32,
    /// Share of interactions that replenish low stock, in percent.
    pub frequent_percent: f32,
    /// Untimed iterations run before measurement starts.
    pub warmup_runs: u32,
    /// Timed iterations per worker.
    pub measured_runs: u32,
    /// Records synthesized per acquisition interaction.
    pub acquisition_batch: usize,
    /// Lowest-stock records targeted per replenishment interaction.
    pub replenish_batch: usize,
    /// Copies added to each targeted record per replenishment.
    pub copies_per_replenish: u32,
    /// Editor picks requested per customer interaction.
    pub editor_picks_per_request: usize,
    /// Distinct picks bought (one copy each) per customer interaction.
    pub purchases_per_interaction: usize,
    /// The store under load.
    pub store: Arc<dyn InventoryStore>,
}

impl InteractionProfile {
    /// Build a profile from a validated config and a store handle.
    #[must_use]
    pub fn from_config(config: &BenchConfig, store: Arc<dyn InventoryStore>) -> Self {
        Self {
            rare_percent: config.rare_percent,
            frequent_percent: config.frequent_percent,
            warmup_runs: config.warmup_runs,
            measured_runs: config.measured_runs,
            acquisition_batch: config.acquisition_batch,
            replenish_batch: config.replenish_batch,
            copies_per_replenish: config.copies_per_replenish,
            editor_picks_per_request: config.editor_picks_per_request,
            purchases_per_interaction: config.purchases_per_interaction,
            store,
        }
    }

    /// The customer share of the mix, in percent.
    #[must_use]
    pub fn customer_percent(&self) -> f32 {
        100.0 - self.rare_percent - self.frequent_percent
    }
}
