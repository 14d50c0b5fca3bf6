#![allow(dead_code)]

use std::sync::Once;
use std::time::Instant;
use stockbench::store::InMemoryStore;
use stockbench::store::seed::seed_catalog;
use tracing::info;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        stockbench::logging::init_test_logging();
    });
}

pub struct TestLogGuard {
    name: String,
    start: Instant,
}

impl TestLogGuard {
    fn new(name: &str) -> Self {
        init_test_logging();
        info!("{name}: starting");
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }
}

impl Drop for TestLogGuard {
    fn drop(&mut self) {
        info!(
            "{}: assertions passed (elapsed {:?})",
            self.name,
            self.start.elapsed()
        );
    }
}

pub fn test_log(name: &str) -> TestLogGuard {
    TestLogGuard::new(name)
}

/// Store pre-loaded with the standard 12-record catalog.
pub fn seeded_store() -> InMemoryStore {
    init_test_logging();
    InMemoryStore::with_records(seed_catalog()).expect("seed catalog is valid")
}
