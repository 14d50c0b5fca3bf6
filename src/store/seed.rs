//! The deterministic catalog every benchmark run starts from.
//!
//! Twelve records with a fixed spread of stock levels (from a single copy up
//! to 300) and five editor picks. Replenishment and purchase behavior in the
//! first measured seconds depends on this spread, so the values are fixed
//! rather than sampled.

use crate::model::{RecordId, StockRecord};

#[allow(clippy::too_many_arguments)]
fn entry(
    id: RecordId,
    title: &str,
    author: &str,
    price: f64,
    available_copies: u32,
    copies_sold: u64,
    sale_misses: u64,
    restocks: u64,
    editor_pick: bool,
) -> StockRecord {
    StockRecord {
        id,
        title: title.to_string(),
        author: author.to_string(),
        price,
        available_copies,
        copies_sold,
        sale_misses,
        restocks,
        editor_pick,
    }
}

/// The initial catalog, in no particular order; the store keys by id.
#[must_use]
pub fn seed_catalog() -> Vec<StockRecord> {
    vec![
        entry(123_456, "The Pallet Jack Manual", "R. Holt", 7.0, 10, 0, 0, 0, false),
        entry(654_321, "Warehouse Nocturnes", "I. Strand", 1.0, 300, 5, 0, 0, false),
        entry(491_283, "Field Notes on Cold Chains", "P. Engel", 10.0, 100, 1, 0, 0, true),
        entry(123_457, "The Silver Ledger", "M. Okafor", 7.0, 10, 3, 8, 3, false),
        entry(123_458, "Bets Against the Backlog", "G. Verde", 1.0, 79, 0, 34, 3, false),
        entry(123_459, "An Unlovely Swan", "H. Aldren", 10.0, 100, 4, 29, 10, true),
        entry(123_410, "Harbor Drafts", "T. Quist", 7.0, 10, 0, 2, 1, false),
        entry(123_411, "How Not to Understock", "B. Braun", 1.0, 198, 0, 60, 10, true),
        entry(123_412, "The Dockside Census", "A. Stern", 10.0, 50, 0, 3, 7, true),
        entry(123_413, "Counting in Yellow", "E. Kline", 7.0, 56, 0, 1, 10, true),
        entry(123_414, "Shelf Geometry", "D. Jorgensen", 1.0, 1, 17, 12, 8, false),
        entry(123_415, "Red Tag Clearance", "N. Macrae", 10.0, 10, 10, 10, 10, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_twelve_records_and_five_picks() {
        let catalog = seed_catalog();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.iter().filter(|r| r.editor_pick).count(), 5);
    }

    #[test]
    fn catalog_ids_are_unique_and_records_well_formed() {
        let catalog = seed_catalog();
        let mut ids: Vec<RecordId> = catalog.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
        assert!(catalog.iter().all(StockRecord::is_well_formed));
    }

    #[test]
    fn catalog_includes_a_single_copy_record() {
        // 123414 starts at one copy so low-stock handling is exercised from
        // the first replenishment pass.
        let catalog = seed_catalog();
        let scarce = catalog.iter().find(|r| r.id == 123_414).unwrap();
        assert_eq!(scarce.available_copies, 1);
    }
}
