//! In-process reference store.
//!
//! A `RwLock` around a `BTreeMap` keyed by record id. Every mutating call
//! validates the whole batch before touching the map, so a call either
//! applies completely or leaves the map untouched. That guard-scoped
//! validate-then-apply step is what workers race against; the harness
//! measures those races instead of preventing them.

use super::{InventoryStore, ReplenishOutcome, StoreError};
use crate::model::{CopyRequest, RecordId, StockRecord};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type RecordMap = BTreeMap<RecordId, StockRecord>;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<RecordMap>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-loaded with `records`, applying the same batch
    /// validation as [`InventoryStore::bulk_insert`].
    ///
    /// # Errors
    ///
    /// Whatever `bulk_insert` rejects: duplicate ids or malformed records.
    pub fn with_records(
        records: impl IntoIterator<Item = StockRecord>,
    ) -> Result<Self, StoreError> {
        let store = Self::new();
        let batch: Vec<StockRecord> = records.into_iter().collect();
        store.bulk_insert(&batch)?;
        Ok(store)
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }

    // A poisoned lock means some thread panicked while holding the guard.
    // The map is still structurally sound because every mutation validates
    // before applying, so recovering the inner value is safe here.
    fn read_guard(&self) -> RwLockReadGuard<'_, RecordMap> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, RecordMap> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InventoryStore for InMemoryStore {
    fn bulk_insert(&self, records: &[StockRecord]) -> Result<(), StoreError> {
        let mut map = self.write_guard();

        let mut batch_ids = std::collections::BTreeSet::new();
        for record in records {
            if !record.is_well_formed() {
                return Err(StoreError::InvalidRecord {
                    id: record.id,
                    reason: "price must be finite and non-negative, title non-empty".into(),
                });
            }
            if map.contains_key(&record.id) || !batch_ids.insert(record.id) {
                return Err(StoreError::DuplicateId { id: record.id });
            }
        }

        for record in records {
            map.insert(record.id, record.clone());
        }
        Ok(())
    }

    fn add_copies(&self, requests: &[CopyRequest]) -> Result<ReplenishOutcome, StoreError> {
        for request in requests {
            if request.copies == 0 {
                return Err(StoreError::InvalidQuantity { id: request.id });
            }
        }

        let mut map = self.write_guard();
        let mut outcome = ReplenishOutcome::default();
        for request in requests {
            match map.get_mut(&request.id) {
                Some(record) => {
                    record.available_copies =
                        record.available_copies.saturating_add(request.copies);
                    record.restocks += 1;
                    outcome.applied += 1;
                }
                None => outcome.missing.push(request.id),
            }
        }
        Ok(outcome)
    }

    fn list_all(&self) -> Result<Vec<StockRecord>, StoreError> {
        Ok(self.read_guard().values().cloned().collect())
    }

    fn editor_picks(&self, count: usize) -> Result<Vec<StockRecord>, StoreError> {
        Ok(self
            .read_guard()
            .values()
            .filter(|record| record.editor_pick)
            .take(count)
            .cloned()
            .collect())
    }

    fn purchase(&self, requests: &[CopyRequest]) -> Result<(), StoreError> {
        for request in requests {
            if request.copies == 0 {
                return Err(StoreError::InvalidQuantity { id: request.id });
            }
        }

        // Sum per id so a batch naming the same record twice is checked
        // against the combined demand, keeping the call all-or-nothing.
        let mut wanted: BTreeMap<RecordId, u32> = BTreeMap::new();
        for request in requests {
            let entry = wanted.entry(request.id).or_insert(0);
            *entry = entry.saturating_add(request.copies);
        }

        let mut map = self.write_guard();

        for id in wanted.keys() {
            if !map.contains_key(id) {
                return Err(StoreError::NotFound { id: *id });
            }
        }

        let mut shorts: Vec<(RecordId, u32, u32)> = Vec::new();
        for (id, copies) in &wanted {
            if let Some(record) = map.get(id) {
                if record.available_copies < *copies {
                    shorts.push((*id, *copies, record.available_copies));
                }
            }
        }
        if let Some(&(id, requested, available)) = shorts.first() {
            // Telemetry on refusal: every record that could not cover its
            // request gets a sale miss, then nothing is decremented.
            for (short_id, _, _) in &shorts {
                if let Some(record) = map.get_mut(short_id) {
                    record.sale_misses += 1;
                }
            }
            return Err(StoreError::InsufficientStock {
                id,
                requested,
                available,
            });
        }

        for (id, copies) in &wanted {
            if let Some(record) = map.get_mut(id) {
                record.available_copies -= copies;
                record.copies_sold += u64::from(*copies);
            }
        }
        Ok(())
    }
}
