//! Logging setup.
//!
//! Diagnostics go to stderr so stdout stays clean for JSON consumers.
//! `RUST_LOG` overrides the flag-derived level when set, including per-module
//! directives like `stockbench::worker=trace`.

use crate::error::{HarnessError, Result};
use std::env;
use std::io;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TEST_INIT: Once = Once::new();

fn level_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level_directive(verbose, quiet))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| HarnessError::Config(format!("failed to initialize logging: {e}")))?;

    Ok(())
}

/// Install a capturing subscriber for tests. Safe to call from every test;
/// only the first call in the process takes effect.
pub fn init_test_logging() {
    TEST_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();
    });
}
