//! # stockscan-ledger: Inventory Ledger for StockScan
//!
//! The ledger is a table of [`InventoryRecord`]s keyed by barcode, held in
//! memory for the life of the process and backed by a flat CSV file.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ledger Lifecycle                                 │
//! │                                                                         │
//! │  Process start                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ledger::load(path) ── file missing? ──► empty table ("first run")      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                In-memory table (this crate)                     │   │
//! │  │   query(barcode) ──► Option<&InventoryRecord>                   │   │
//! │  │   append(record) ──► DuplicateKey if barcode present            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼  (only when the operator says so)                               │
//! │  Ledger::save(path) ── full rewrite via temp file + rename              │
//! │                                                                         │
//! │  Unsaved appends are dropped on exit. There is no autosave.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`ledger`] - The in-memory table and its load/save operations
//! - [`row`] - CSV row mapping and the file header
//! - [`error`] - Ledger error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stockscan_ledger::Ledger;
//!
//! let ledger = Ledger::load("inventory_dataset.csv")?;
//! if let Some(record) = ledger.query("5449000000996") {
//!     println!("{} in stock", record.remaining_balance);
//! }
//! # Ok::<(), stockscan_ledger::LedgerError>(())
//! ```
//!
//! [`InventoryRecord`]: stockscan_core::InventoryRecord

pub mod error;
pub mod ledger;
pub mod row;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, LedgerSummary};
pub use row::LEDGER_HEADER;
