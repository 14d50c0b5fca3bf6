//! Structured error output for non-interactive callers.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Retryability flags
//! - Context for debugging
//!
//! Benchmark runs are often driven by scripts and CI jobs, so errors leaving
//! the process carry a stable code and a JSON rendering alongside the
//! human-readable one.

use crate::error::HarnessError;
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: `SCREAMING_SNAKE_CASE` for easy parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Harness Errors (exit code 2) ===
    /// A worker thread panicked
    WorkerPanicked,

    // === Store Errors (exit code 3) ===
    /// Record id already exists
    DuplicateId,
    /// Record not found
    RecordNotFound,
    /// Not enough copies to cover a purchase
    InsufficientStock,
    /// Zero-copy request
    InvalidQuantity,
    /// Malformed record rejected by the store
    InvalidRecord,
    /// Store unreachable or unavailable
    StoreUnavailable,

    // === Argument Errors (exit code 4) ===
    /// Unique sample larger than the candidate pool
    SampleTooLarge,
    /// Zero count passed to a sampler operation
    ZeroCount,
    /// No editor picks available
    NoEditorPicks,

    // === Health Errors (exit code 5) ===
    /// One or more run results failed the health check
    HealthCheckFailed,

    // === Config Errors (exit code 6) ===
    /// Configuration error
    ConfigError,

    // === I/O Errors (exit code 7) ===
    /// File I/O error
    IoError,
    /// JSON serialization error
    JsonError,
    /// YAML parsing error
    YamlError,

    // === Internal Errors (exit code 1) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WorkerPanicked => "WORKER_PANICKED",
            Self::DuplicateId => "DUPLICATE_ID",
            Self::RecordNotFound => "RECORD_NOT_FOUND",
            Self::InsufficientStock => "INSUFFICIENT_STOCK",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::InvalidRecord => "INVALID_RECORD",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::SampleTooLarge => "SAMPLE_TOO_LARGE",
            Self::ZeroCount => "ZERO_COUNT",
            Self::NoEditorPicks => "NO_EDITOR_PICKS",
            Self::HealthCheckFailed => "HEALTH_CHECK_FAILED",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::YamlError => "YAML_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is potentially retryable.
    ///
    /// Retryable means the caller might succeed if it waits (a racing
    /// purchase, an unreachable store) or fixes the input and retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientStock
                | Self::StoreUnavailable
                | Self::SampleTooLarge
                | Self::ZeroCount
                | Self::NoEditorPicks
                | Self::InvalidQuantity
                | Self::InvalidRecord
        )
    }

    /// Get the exit code for this error category.
    ///
    /// Exit codes are grouped by error category:
    /// - 1: Internal/unknown errors
    /// - 2: Harness errors (worker lifecycle)
    /// - 3: Store errors
    /// - 4: Argument errors
    /// - 5: Health-check failures
    /// - 6: Config errors
    /// - 7: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::WorkerPanicked => 2,
            Self::DuplicateId
            | Self::RecordNotFound
            | Self::InsufficientStock
            | Self::InvalidQuantity
            | Self::InvalidRecord
            | Self::StoreUnavailable => 3,
            Self::SampleTooLarge | Self::ZeroCount | Self::NoEditorPicks => 4,
            Self::HealthCheckFailed => 5,
            Self::ConfigError => 6,
            Self::IoError | Self::JsonError | Self::YamlError => 7,
            Self::InternalError => 1,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the operation can be retried
    pub retryable: bool,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `HarnessError`.
    #[must_use]
    pub fn from_error(err: &HarnessError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);
        let hint = Self::generate_hint(err);

        Self {
            code,
            message: err.to_string(),
            hint,
            retryable: code.is_retryable(),
            context,
        }
    }

    /// Serialize to JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }

    /// Extract error code and context from a `HarnessError`.
    fn extract_code_and_context(err: &HarnessError) -> (ErrorCode, Option<Value>) {
        match err {
            HarnessError::SampleTooLarge {
                requested,
                available,
            } => (
                ErrorCode::SampleTooLarge,
                Some(json!({"requested": requested, "available": available})),
            ),
            HarnessError::ZeroCount { what } => {
                (ErrorCode::ZeroCount, Some(json!({"operation": what})))
            }
            HarnessError::NoEditorPicks => (ErrorCode::NoEditorPicks, None),
            HarnessError::Store(store_err) => Self::store_code_and_context(store_err),
            HarnessError::WorkerPanicked { worker } => (
                ErrorCode::WorkerPanicked,
                Some(json!({"worker": worker})),
            ),
            HarnessError::Validation { issues } => (
                ErrorCode::HealthCheckFailed,
                Some(json!({
                    "issues": issues.iter().map(ToString::to_string).collect::<Vec<_>>()
                })),
            ),
            HarnessError::Config(_) => (ErrorCode::ConfigError, None),
            HarnessError::Io(_) => (ErrorCode::IoError, None),
            HarnessError::Json(_) => (ErrorCode::JsonError, None),
            HarnessError::Yaml(_) => (ErrorCode::YamlError, None),
            HarnessError::WithContext { context, .. } => {
                (ErrorCode::InternalError, Some(json!({"context": context})))
            }
            HarnessError::Other(_) => (ErrorCode::InternalError, None),
        }
    }

    fn store_code_and_context(err: &StoreError) -> (ErrorCode, Option<Value>) {
        match err {
            StoreError::DuplicateId { id } => (ErrorCode::DuplicateId, Some(json!({"id": id}))),
            StoreError::NotFound { id } => (ErrorCode::RecordNotFound, Some(json!({"id": id}))),
            StoreError::InsufficientStock {
                id,
                requested,
                available,
            } => (
                ErrorCode::InsufficientStock,
                Some(json!({"id": id, "requested": requested, "available": available})),
            ),
            StoreError::InvalidQuantity { id } => {
                (ErrorCode::InvalidQuantity, Some(json!({"id": id})))
            }
            StoreError::InvalidRecord { id, reason } => (
                ErrorCode::InvalidRecord,
                Some(json!({"id": id, "reason": reason})),
            ),
            StoreError::Unavailable { reason } => (
                ErrorCode::StoreUnavailable,
                Some(json!({"reason": reason})),
            ),
        }
    }

    /// Generate a hint from the error's own suggestion, with fallbacks for
    /// cases where the generic suggestion needs numbers filled in.
    fn generate_hint(err: &HarnessError) -> Option<String> {
        if let Some(suggestion) = err.suggestion() {
            return Some(suggestion.to_string());
        }

        match err {
            HarnessError::Store(StoreError::NotFound { id }) => Some(format!(
                "Record {id} is not in the store; another worker may have raced the snapshot."
            )),
            HarnessError::Config(_) => {
                Some("Check the config file against 'stockbench run --help'.".to_string())
            }
            _ => None,
        }
    }
}
