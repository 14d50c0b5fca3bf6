//! Run health validation for `stockbench`.
//!
//! After every worker has been joined, each per-worker result is checked
//! against two thresholds before any metric is computed:
//!
//! - at least 99% of measured interactions must have succeeded, and
//! - customer interactions must account for 55% to 65% of the successes.
//!
//! A result outside either bound almost always means the harness or the
//! store misbehaved (a saturated store, a broken mix, a worker erroring on
//! every call), so metrics computed from it would be garbage. The run still
//! completes and reports the issues; it just refuses to publish numbers.

use crate::worker::RunResult;
use std::fmt;

/// Minimum fraction of measured interactions that must succeed.
pub const MIN_SUCCESS_RATE: f64 = 0.99;

/// Inclusive band the customer share of successful interactions must fall in.
pub const MIN_CUSTOMER_SHARE: f64 = 0.55;
pub const MAX_CUSTOMER_SHARE: f64 = 0.65;

/// A single health-check finding for one worker's result.
#[derive(Debug, Clone, PartialEq)]
pub enum HealthIssue {
    /// More than 1% of measured interactions failed.
    ExcessFailures {
        worker: usize,
        successful: u64,
        total: u64,
    },
    /// Customer successes fall outside the expected share of all successes.
    SkewedCustomerShare { worker: usize, share: f64 },
}

impl fmt::Display for HealthIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExcessFailures {
                worker,
                successful,
                total,
            } => write!(
                f,
                "worker {worker}: only {successful} of {total} interactions succeeded (floor is {:.0}%)",
                MIN_SUCCESS_RATE * 100.0
            ),
            Self::SkewedCustomerShare { worker, share } => write!(
                f,
                "worker {worker}: customer share {share:.3} outside [{MIN_CUSTOMER_SHARE}, {MAX_CUSTOMER_SHARE}]"
            ),
        }
    }
}

/// Validates per-worker results against the health thresholds.
pub struct HealthValidator;

impl HealthValidator {
    /// Validate one result and return all findings.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<HealthIssue>` if the result breaches any threshold.
    pub fn validate(result: &RunResult) -> Result<(), Vec<HealthIssue>> {
        let mut issues = Vec::new();

        if result.total_runs > 0 && result.success_rate() < MIN_SUCCESS_RATE {
            issues.push(HealthIssue::ExcessFailures {
                worker: result.worker,
                successful: result.successful,
                total: result.total_runs,
            });
        }

        // The share is undefined with zero successes; the failure floor
        // above has already flagged that case for any non-empty run.
        if let Some(share) = result.customer_share() {
            if !(MIN_CUSTOMER_SHARE..=MAX_CUSTOMER_SHARE).contains(&share) {
                issues.push(HealthIssue::SkewedCustomerShare {
                    worker: result.worker,
                    share,
                });
            }
        }

        if issues.is_empty() { Ok(()) } else { Err(issues) }
    }

    /// Validate every result, collecting all findings across workers.
    #[must_use]
    pub fn validate_all(results: &[RunResult]) -> Vec<HealthIssue> {
        let mut issues = Vec::new();
        for result in results {
            if let Err(mut found) = Self::validate(result) {
                issues.append(&mut found);
            }
        }
        issues
    }
}
