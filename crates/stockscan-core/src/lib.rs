//! # stockscan-core: Pure Domain Logic for StockScan
//!
//! Everything the scan station knows about inventory, expressed as pure
//! functions and plain data. No file, camera or terminal access happens here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockScan Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/stockscan (terminal station)               │   │
//! │  │     scan ──► reconcile ──► display / register ──► save          │   │
//! │  └───────────────┬───────────────────────────────┬─────────────────┘   │
//! │                  │                               │                      │
//! │  ┌───────────────▼───────────────┐   ┌───────────▼─────────────────┐   │
//! │  │   stockscan-scan              │   │   stockscan-ledger          │   │
//! │  │   frames, decoder, scan loop  │   │   CSV ledger file           │   │
//! │  └───────────────┬───────────────┘   └───────────┬─────────────────┘   │
//! │                  │                               │                      │
//! │  ┌───────────────▼───────────────────────────────▼─────────────────┐   │
//! │  │               ★ stockscan-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐ ┌───────────┐ ┌────────────┐ ┌────────────┐  │   │
//! │  │   │   types     │ │   money   │ │ validation │ │     ui     │  │   │
//! │  │   │ Inventory-  │ │   Money   │ │   rules    │ │ UserInter- │  │   │
//! │  │   │ Record      │ │           │ │            │ │ face       │  │   │
//! │  │   └─────────────┘ └───────────┘ └────────────┘ └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CAMERA • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Inventory records and the new-item form schema
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//! - [`ui`] - The operator-facing capability consumed by the scan loop and
//!   the reconciliation controller
//!
//! ## Example Usage
//!
//! ```rust
//! use stockscan_core::{InventoryRecord, Money, NewItem};
//!
//! let item = NewItem {
//!     description: "Pen".to_string(),
//!     code: "P1".to_string(),
//!     purchase_price: Money::from_cents(100),
//!     selling_price: Money::from_cents(200),
//!     inventory_count: 10,
//! };
//!
//! let record = InventoryRecord::register("123", item).unwrap();
//! assert_eq!(record.remaining_balance, 10);
//! assert!(record.income.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod ui;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
pub use ui::{NoOpDisplay, StatusDisplay, UserInterface};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum barcode payload length accepted as a ledger key.
///
/// Code 128 and QR payloads can be long, but anything past this is almost
/// certainly a mis-read or a pasted paragraph.
pub const MAX_BARCODE_LEN: usize = 128;

/// Maximum description length.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Maximum length of the free-form item code (SKU).
pub const MAX_CODE_LEN: usize = 50;
