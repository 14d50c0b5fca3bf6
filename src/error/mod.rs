//! Error types and handling for `stockbench`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Supports `anyhow` integration for context-carrying I/O paths
//! - Provides recovery hints for user-facing errors
//! - Provides structured JSON output for non-interactive callers
//!
//! Errors split into two tiers. Store and sampling errors are
//! interaction-scoped: a worker logs them, counts the iteration as failed,
//! and keeps running. Everything else (config, I/O, a panicked worker) is
//! run-scoped and aborts the benchmark.

mod structured;

pub use structured::{ErrorCode, StructuredError};

use crate::store::StoreError;
use crate::validation::HealthIssue;
use thiserror::Error;

/// Primary error type for `stockbench` operations.
#[derive(Error, Debug)]
pub enum HarnessError {
    // === Sampling Errors ===
    /// A unique sample was requested that the candidate pool cannot cover.
    #[error("Sample of {requested} exceeds candidate pool of {available}")]
    SampleTooLarge { requested: usize, available: usize },

    /// A sampler operation was asked for zero items.
    #[error("{what} requires a non-zero count")]
    ZeroCount { what: &'static str },

    /// The store returned no editor picks for a customer interaction.
    #[error("No editor picks available to purchase")]
    NoEditorPicks,

    // === Store Errors ===
    /// An inventory store call failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // === Harness Errors ===
    /// A worker thread panicked instead of returning a result.
    #[error("Worker {worker} panicked before reporting a result")]
    WorkerPanicked { worker: usize },

    /// One or more per-worker results failed the health check.
    #[error("Run health check failed: {issues:?}")]
    Validation { issues: Vec<HealthIssue> },

    // === Configuration Errors ===
    /// Configuration file or parameter error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // === Wrapped errors ===
    /// Error with additional context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Wrapped anyhow error from context-annotated call sites.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HarnessError {
    /// Attach a textual context to some other error.
    #[must_use]
    pub fn with_context(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::SampleTooLarge { .. } => {
                Some("Request at most as many ids as the candidate pool holds")
            }
            Self::ZeroCount { .. } => Some("Counts must be at least 1"),
            Self::NoEditorPicks => Some("Seed the store with at least one editor pick"),
            Self::Store(StoreError::InsufficientStock { .. }) => {
                Some("Raise the replenishment rate or lower the purchase batch")
            }
            Self::Validation { .. } => {
                Some("Check the interaction mix and store capacity for this run")
            }
            Self::WorkerPanicked { .. } => Some("Check stderr for the worker's panic message"),
            _ => None,
        }
    }
}

/// Result type using `HarnessError`.
pub type Result<T> = std::result::Result<T, HarnessError>;
