//! Run configuration.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI flags
//! 2. Config file (`--config`, YAML)
//! 3. Defaults
//!
//! The file is optional. When given it must exist and parse; a partial file
//! is fine, missing keys fall back to the defaults below.

use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default worker thread count.
const DEFAULT_WORKERS: usize = 10;
/// Default warm-up interactions per worker.
const DEFAULT_WARMUP_RUNS: u32 = 100;
/// Default measured interactions per worker.
const DEFAULT_MEASURED_RUNS: u32 = 500;

/// Complete parameter set for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Number of worker threads.
    pub workers: usize,
    /// Interactions per worker before the timer starts.
    pub warmup_runs: u32,
    /// Interactions per worker that count toward the report.
    pub measured_runs: u32,
    /// Share of interactions that acquire new records, in percent.
    pub rare_percent: f32,
    /// Share of interactions that replenish low stock, in percent.
    pub frequent_percent: f32,
    /// Records generated per acquisition interaction.
    pub acquisition_batch: usize,
    /// Lowest-stock records touched per replenishment interaction.
    pub replenish_batch: usize,
    /// Copies added to each record during replenishment.
    pub copies_per_replenish: u32,
    /// Editor picks fetched as purchase candidates.
    pub editor_picks_per_request: usize,
    /// Distinct records bought per customer interaction.
    pub purchases_per_interaction: usize,
    /// Base RNG seed; worker `i` derives its own seed from it. Random when
    /// unset.
    pub base_seed: Option<u64>,
    /// Report file destination. Defaults to the working directory under a
    /// name derived from the worker count.
    pub report_path: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            warmup_runs: DEFAULT_WARMUP_RUNS,
            measured_runs: DEFAULT_MEASURED_RUNS,
            rare_percent: 10.0,
            frequent_percent: 30.0,
            acquisition_batch: 5,
            replenish_batch: 5,
            copies_per_replenish: 10,
            editor_picks_per_request: 3,
            purchases_per_interaction: 2,
            base_seed: None,
            report_path: None,
        }
    }
}

impl BenchConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            HarnessError::with_context(format!("failed to read config file {}", path.display()), e)
        })?;
        let config: Self = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the effective configuration from an optional file plus CLI
    /// overrides, then validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or the merged
    /// configuration is invalid.
    pub fn resolve(file: Option<&Path>, cli: &CliOverrides) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides on top of this configuration.
    pub fn apply_overrides(&mut self, cli: &CliOverrides) {
        if let Some(workers) = cli.workers {
            self.workers = workers;
        }
        if let Some(warmup_runs) = cli.warmup_runs {
            self.warmup_runs = warmup_runs;
        }
        if let Some(measured_runs) = cli.measured_runs {
            self.measured_runs = measured_runs;
        }
        if let Some(rare_percent) = cli.rare_percent {
            self.rare_percent = rare_percent;
        }
        if let Some(frequent_percent) = cli.frequent_percent {
            self.frequent_percent = frequent_percent;
        }
        if let Some(acquisition_batch) = cli.acquisition_batch {
            self.acquisition_batch = acquisition_batch;
        }
        if let Some(replenish_batch) = cli.replenish_batch {
            self.replenish_batch = replenish_batch;
        }
        if let Some(copies_per_replenish) = cli.copies_per_replenish {
            self.copies_per_replenish = copies_per_replenish;
        }
        if let Some(editor_picks_per_request) = cli.editor_picks_per_request {
            self.editor_picks_per_request = editor_picks_per_request;
        }
        if let Some(purchases_per_interaction) = cli.purchases_per_interaction {
            self.purchases_per_interaction = purchases_per_interaction;
        }
        if let Some(base_seed) = cli.base_seed {
            self.base_seed = Some(base_seed);
        }
        if let Some(report_path) = &cli.report_path {
            self.report_path = Some(report_path.clone());
        }
    }

    /// Check the configuration for values no run can work with.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Config` naming the first offending value.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(HarnessError::Config("workers must be at least 1".into()));
        }
        if self.measured_runs == 0 {
            return Err(HarnessError::Config(
                "measured_runs must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("rare_percent", self.rare_percent),
            ("frequent_percent", self.frequent_percent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(HarnessError::Config(format!(
                    "{name} must be a non-negative percentage, got {value}"
                )));
            }
        }
        if self.rare_percent + self.frequent_percent > 100.0 {
            return Err(HarnessError::Config(format!(
                "rare_percent + frequent_percent must not exceed 100, got {}",
                self.rare_percent + self.frequent_percent
            )));
        }
        for (name, value) in [
            ("acquisition_batch", self.acquisition_batch),
            ("replenish_batch", self.replenish_batch),
            ("editor_picks_per_request", self.editor_picks_per_request),
            ("purchases_per_interaction", self.purchases_per_interaction),
        ] {
            if value == 0 {
                return Err(HarnessError::Config(format!("{name} must be at least 1")));
            }
        }
        if self.copies_per_replenish == 0 {
            return Err(HarnessError::Config(
                "copies_per_replenish must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// CLI overrides for config resolution. `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub workers: Option<usize>,
    pub warmup_runs: Option<u32>,
    pub measured_runs: Option<u32>,
    pub rare_percent: Option<f32>,
    pub frequent_percent: Option<f32>,
    pub acquisition_batch: Option<usize>,
    pub replenish_batch: Option<usize>,
    pub copies_per_replenish: Option<u32>,
    pub editor_picks_per_request: Option<usize>,
    pub purchases_per_interaction: Option<usize>,
    pub base_seed: Option<u64>,
    pub report_path: Option<PathBuf>,
}
