//! # Ledger State
//!
//! The single owner of the in-memory ledger for the life of the process.
//!
//! ```text
//! load at startup ──► LedgerState { ledger, path, unsaved } ──► save on request
//!                          ▲
//!                          └── append() bumps `unsaved`; save() clears it
//! ```
//!
//! Single-threaded: the controller borrows it mutably, so there is no lock.

use std::path::{Path, PathBuf};

use stockscan_core::InventoryRecord;
use stockscan_ledger::{Ledger, LedgerResult};
use tracing::info;

#[derive(Debug)]
pub struct LedgerState {
    ledger: Ledger,
    path: PathBuf,
    unsaved: usize,
}

impl LedgerState {
    /// Loads the ledger at `path` (missing file = empty ledger).
    pub fn open(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let path = path.into();
        let ledger = Ledger::load(&path)?;
        Ok(LedgerState::new(ledger, path))
    }

    pub fn new(ledger: Ledger, path: impl Into<PathBuf>) -> Self {
        LedgerState {
            ledger,
            path: path.into(),
            unsaved: 0,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records appended since the last successful save.
    pub fn unsaved(&self) -> usize {
        self.unsaved
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved > 0
    }

    /// Appends to the in-memory table; nothing is written.
    pub fn append(&mut self, record: InventoryRecord) -> LedgerResult<()> {
        self.ledger.append(record)?;
        self.unsaved += 1;
        Ok(())
    }

    /// Rewrites the ledger file. The unsaved counter survives a failure.
    pub fn save(&mut self) -> LedgerResult<()> {
        self.ledger.save(&self.path)?;
        info!(path = ?self.path, saved = self.unsaved, "Unsaved changes written");
        self.unsaved = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockscan_core::{Money, NewItem};

    fn pen(barcode: &str) -> InventoryRecord {
        InventoryRecord::register(
            barcode,
            NewItem {
                description: "Pen".to_string(),
                code: "P1".to_string(),
                purchase_price: Money::from_cents(100),
                selling_price: Money::from_cents(200),
                inventory_count: 10,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_unsaved_counter() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = LedgerState::open(dir.path().join("ledger.csv")).unwrap();
        assert!(!state.has_unsaved_changes());

        state.append(pen("1")).unwrap();
        state.append(pen("2")).unwrap();
        assert!(state.append(pen("1")).is_err());
        assert_eq!(state.unsaved(), 2);

        state.save().unwrap();
        assert_eq!(state.unsaved(), 0);
        assert_eq!(Ledger::load(state.path()).unwrap().len(), 2);
    }

    #[test]
    fn test_failed_save_keeps_counter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        std::fs::create_dir(&path).unwrap();

        let mut state = LedgerState::new(Ledger::new(), &path);
        state.append(pen("1")).unwrap();

        assert!(state.save().is_err());
        assert_eq!(state.unsaved(), 1);
        assert_eq!(state.ledger().len(), 1);
    }
}
