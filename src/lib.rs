//! `stockbench`: a concurrent workload generator for a shared in-memory
//! inventory store.
//!
//! A run seeds the store with a fixed catalog, releases a pool of worker
//! threads through a barrier, and lets each worker play a randomized mix of
//! inventory interactions: rare catalog acquisitions, frequent low-stock
//! replenishments, and a hot path of customer purchases. Workers warm up
//! untimed, then measure a fixed number of interactions; per-worker results
//! are health-checked before any aggregate metric is reported.
//!
//! The library is organized around [`store::InventoryStore`], the seam a
//! different store implementation would plug into. Everything above it
//! ([`worker`], [`orchestrator`], [`report`]) only sees that trait.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod profile;
pub mod report;
pub mod sampler;
pub mod store;
pub mod util;
pub mod validation;
pub mod worker;

pub use error::{HarnessError, Result, StructuredError};
pub use orchestrator::{BenchOutcome, MetricsReport, run_benchmark};
