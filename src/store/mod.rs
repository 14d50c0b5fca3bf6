//! The inventory store the harness drives.
//!
//! The harness only ever talks to the [`InventoryStore`] trait; the shipped
//! implementation is the in-process [`InMemoryStore`]. Remote stores can plug
//! in behind the same trait, which is why every method returns a `Result`:
//! transport failures surface as [`StoreError::Unavailable`] instead of a
//! separate channel.

mod memory;
pub mod seed;

pub use memory::InMemoryStore;

use crate::model::{CopyRequest, RecordId, StockRecord};
use thiserror::Error;

/// Errors signalled by a store implementation.
///
/// From the harness's point of view these are per-interaction failures: a
/// worker logs them, counts the iteration as unsuccessful, and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record {id} already exists")]
    DuplicateId { id: RecordId },

    #[error("record {id} not found")]
    NotFound { id: RecordId },

    #[error("record {id}: requested {requested} copies, {available} available")]
    InsufficientStock {
        id: RecordId,
        requested: u32,
        available: u32,
    },

    #[error("record {id}: copy count must be positive")]
    InvalidQuantity { id: RecordId },

    #[error("record {id} is malformed: {reason}")]
    InvalidRecord { id: RecordId, reason: String },

    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },
}

/// What `add_copies` actually did: how many requests landed and which ids
/// were no longer present when the batch was applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplenishOutcome {
    pub applied: usize,
    pub missing: Vec<RecordId>,
}

/// The store contract the harness exercises.
///
/// Mutations are all-or-nothing per call except `add_copies`, where an id
/// that has vanished is skipped and reported rather than failing the batch.
/// Implementations must be safe to share across worker threads.
pub trait InventoryStore: Send + Sync + std::fmt::Debug {
    /// Insert a batch of new records. Rejects the whole batch, mutating
    /// nothing, if any record's id already exists (in the store or earlier
    /// in the batch) or any record is malformed.
    ///
    /// # Errors
    ///
    /// `DuplicateId` or `InvalidRecord` for the first offending record;
    /// `Unavailable` if the store cannot be reached.
    fn bulk_insert(&self, records: &[StockRecord]) -> Result<(), StoreError>;

    /// Add copies to existing records. Ids not found are skipped and listed
    /// in the outcome. A zero-copy request rejects the whole call.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` if any request carries zero copies; `Unavailable`
    /// if the store cannot be reached.
    fn add_copies(&self, requests: &[CopyRequest]) -> Result<ReplenishOutcome, StoreError>;

    /// Snapshot of every record, ordered by id.
    ///
    /// # Errors
    ///
    /// `Unavailable` if the store cannot be reached.
    fn list_all(&self) -> Result<Vec<StockRecord>, StoreError>;

    /// Up to `count` records currently flagged as editor picks, id order.
    ///
    /// # Errors
    ///
    /// `Unavailable` if the store cannot be reached.
    fn editor_picks(&self, count: usize) -> Result<Vec<StockRecord>, StoreError>;

    /// Purchase copies atomically across the batch: if any request names a
    /// missing record or exceeds its available copies, nothing is decremented
    /// and the first offense is returned. Insufficient stock additionally
    /// bumps `sale_misses` on every record that could not cover its request.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity`, `NotFound`, or `InsufficientStock` for the first
    /// request the batch cannot honor; `Unavailable` if the store cannot be
    /// reached.
    fn purchase(&self, requests: &[CopyRequest]) -> Result<(), StoreError>;
}
