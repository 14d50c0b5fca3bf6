//! Core data types for `stockbench`.
//!
//! This module defines the types shared by the store and the harness:
//! - `StockRecord` - A catalog entry with live stock and telemetry counters
//! - `CopyRequest` - An (id, copies) pair for purchases and replenishment
//! - `RecordId` - The 32-bit record identifier space

use serde::{Deserialize, Serialize};
use std::fmt;

/// Record identifiers are unsigned 32-bit values. `0` is valid; uniqueness is
/// the store's concern, not the type's.
pub type RecordId = u32;

/// A single catalog entry as the store tracks it.
///
/// `available_copies` can never go negative: the type forbids it and the
/// store refuses purchases that would underflow it. The three counters are
/// telemetry maintained by the store: `copies_sold` on successful purchases,
/// `sale_misses` on purchases refused for insufficient stock, `restocks` on
/// replenishments applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: RecordId,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub available_copies: u32,
    pub copies_sold: u64,
    pub sale_misses: u64,
    pub restocks: u64,
    pub editor_pick: bool,
}

impl StockRecord {
    /// A fresh record with zeroed telemetry, as the sampler synthesizes them.
    #[must_use]
    pub fn new(
        id: RecordId,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f64,
        available_copies: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            price,
            available_copies,
            copies_sold: 0,
            sale_misses: 0,
            restocks: 0,
            editor_pick: false,
        }
    }

    #[must_use]
    pub fn with_editor_pick(mut self, pick: bool) -> Self {
        self.editor_pick = pick;
        self
    }

    /// Internal consistency check used by the store before accepting a
    /// record: finite non-negative price and a non-empty title.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.price.is_finite() && self.price >= 0.0 && !self.title.is_empty()
    }
}

impl fmt::Display for StockRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {:?} ({} copies, {:.2})",
            self.id, self.title, self.available_copies, self.price
        )
    }
}

/// A request to move `copies` of record `id`, used by both `purchase` and
/// `add_copies`. The store rejects `copies == 0` outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyRequest {
    pub id: RecordId,
    pub copies: u32,
}

impl CopyRequest {
    #[must_use]
    pub const fn new(id: RecordId, copies: u32) -> Self {
        Self { id, copies }
    }
}

impl fmt::Display for CopyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x#{}", self.copies, self.id)
    }
}
