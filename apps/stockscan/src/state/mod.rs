//! # State Module
//!
//! Application state, one focused type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐   │
//! │  │    AppConfig     │  │   LedgerState    │  │     CancelFlag       │   │
//! │  │                  │  │                  │  │  (stockscan-scan)    │   │
//! │  │  ledger path     │  │  Ledger          │  │                      │   │
//! │  │  cancel key      │  │  file path       │  │  tripped by the      │   │
//! │  │  sound, snapshots│  │  unsaved count   │  │  wedge source        │   │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘   │
//! │                                                                         │
//! │  Read-only after startup   Mutated by append/save   Reset per session   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod ledger;

pub use config::{AppConfig, ConfigError, LedgerSettings, ScanSettings};
pub use ledger::LedgerState;
