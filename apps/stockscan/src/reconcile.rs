//! # Reconciliation Controller
//!
//! Turns a decoded barcode into either a detail view or a new ledger record.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reconcile(barcode) ── invalid barcode ──► Err(ValidationError)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lookup ── hit ──► display detail lines ──────────────────► Found       │
//! │       │                                                                 │
//! │      miss                                                               │
//! │       ▼                                                                 │
//! │  "Item not found" ──► prompt_fields(NEW_ITEM_FIELDS)                    │
//! │       │                    │ abandoned ─────────────────────► Abandoned │
//! │       │                    │ invalid ──► display error, prompt again    │
//! │       ▼                    ▼                                            │
//! │  register_new ──► append ──► "New item added"                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  confirm("Save changes?") ── yes ──► persist ──► Registered{saved:true} │
//! │                           └─ no ───────────────► Registered{saved:false}│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is written unless the operator confirms. A failed save leaves the
//! in-memory ledger as it was, so the operator can retry from the menu.

use stockscan_core::{validation, InventoryRecord, NewItem, UserInterface, NEW_ITEM_FIELDS};
use tracing::{debug, info, warn};

use crate::error::{AppError, ErrorCode};
use crate::state::LedgerState;

/// Shown on a lookup miss.
pub const NOT_FOUND_MESSAGE: &str = "Item not found in ledger. Please enter the item details.";

/// Save prompt after a registration.
pub const SAVE_PROMPT: &str = "Save changes?";

/// How a reconciliation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The barcode was already in the ledger.
    Found(InventoryRecord),
    /// A new record was appended; `saved` says whether it reached disk.
    Registered { record: InventoryRecord, saved: bool },
    /// The operator abandoned the new-item form.
    Abandoned,
}

/// Lookup/register logic over the process ledger.
pub struct ReconciliationController<'a> {
    ledger: &'a mut LedgerState,
}

impl<'a> ReconciliationController<'a> {
    pub fn new(ledger: &'a mut LedgerState) -> Self {
        ReconciliationController { ledger }
    }

    /// Exact-match lookup.
    pub fn lookup(&self, barcode: &str) -> Option<InventoryRecord> {
        self.ledger.ledger().query(barcode).cloned()
    }

    /// Builds (but does not append) a record for `barcode`.
    pub fn register_new(&self, barcode: &str, item: NewItem) -> Result<InventoryRecord, AppError> {
        Ok(InventoryRecord::register(barcode, item)?)
    }

    /// Appends to the in-memory ledger.
    pub fn append(&mut self, record: InventoryRecord) -> Result<(), AppError> {
        let barcode = record.barcode.clone();
        self.ledger.append(record)?;
        info!(%barcode, unsaved = self.ledger.unsaved(), "Item added to ledger");
        Ok(())
    }

    /// Writes the whole ledger to disk.
    pub fn persist(&mut self) -> Result<(), AppError> {
        self.ledger.save()?;
        Ok(())
    }

    /// Runs the full lookup-or-register flow for one barcode.
    ///
    /// A barcode that could never be registered is rejected before the
    /// lookup, without opening the form.
    pub fn reconcile<U>(&mut self, barcode: &str, ui: &mut U) -> Result<Reconciliation, AppError>
    where
        U: UserInterface + ?Sized,
    {
        let barcode = barcode.trim();
        validation::validate_barcode(barcode)
            .map_err(|err| AppError::validation(format!("Invalid barcode: {}", err)))?;

        if let Some(record) = self.lookup(barcode) {
            debug!(%barcode, "Lookup hit");
            ui.display("Item Details:");
            for line in record.detail_lines() {
                ui.display(&line);
            }
            return Ok(Reconciliation::Found(record));
        }

        debug!(%barcode, "Lookup miss");
        ui.display(NOT_FOUND_MESSAGE);

        let record = loop {
            let Some(values) = ui.prompt_fields(&NEW_ITEM_FIELDS) else {
                info!(%barcode, "New item form abandoned");
                ui.display("Registration cancelled.");
                return Ok(Reconciliation::Abandoned);
            };

            let built = NewItem::from_fields(&values)
                .map_err(AppError::from)
                .and_then(|item| self.register_new(barcode, item));

            match built {
                Ok(record) => break record,
                Err(err) if err.code == ErrorCode::ValidationError => {
                    ui.display(&format!("Invalid input: {}", err));
                }
                Err(err) => return Err(err),
            }
        };

        self.append(record.clone())?;
        ui.display("New item added successfully!");

        let saved = if ui.confirm(SAVE_PROMPT) {
            match self.persist() {
                Ok(()) => {
                    ui.display("Ledger saved successfully!");
                    true
                }
                Err(err) => {
                    warn!(error = %err, "Save after registration failed");
                    ui.display(&format!("Save failed: {}", err));
                    false
                }
            }
        } else {
            ui.display("Changes kept in memory. Use 'w' to save.");
            false
        };

        Ok(Reconciliation::Registered { record, saved })
    }
}
