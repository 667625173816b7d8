//! # Ledger Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / csv::Error                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LedgerError (this module) ← Adds path / row context                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in the app) ← DUPLICATE_KEY / PERSISTENCE_ERROR              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Operator sees a one-line message; in-memory table is unchanged         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Ledger operation errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A record with this barcode is already in the table.
    ///
    /// ## When This Occurs
    /// - Appending a record registered twice (retry after an unclear result)
    /// - Two rows of the ledger file share a barcode (reported as `Corrupt`)
    #[error("Barcode '{barcode}' already exists in the ledger")]
    DuplicateKey { barcode: String },

    /// The ledger file could not be read or written.
    ///
    /// ## When This Occurs
    /// - Permission denied, disk full, directory missing and not creatable
    /// - The file is locked by a spreadsheet application
    #[error("Ledger file {} could not be {action}: {reason}", path.display())]
    Persistence {
        path: PathBuf,
        action: &'static str,
        reason: String,
    },

    /// A row of the ledger file does not describe a valid record.
    ///
    /// `row` is 1-based and counts the header as row 1, matching what a
    /// spreadsheet shows.
    #[error("Ledger row {row} is invalid: {reason}")]
    Corrupt { row: usize, reason: String },

    /// I/O failure on a reader or writer not tied to a path.
    #[error("Ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding failure.
    #[error("Ledger CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LedgerError {
    /// Creates a DuplicateKey error.
    pub fn duplicate(barcode: impl Into<String>) -> Self {
        LedgerError::DuplicateKey {
            barcode: barcode.into(),
        }
    }

    /// Attaches a file path to a reader/writer level failure.
    ///
    /// `Corrupt` and `DuplicateKey` already say what is wrong and pass
    /// through unchanged.
    pub(crate) fn at_path(self, path: impl Into<PathBuf>, action: &'static str) -> Self {
        match self {
            LedgerError::Io(err) => LedgerError::Persistence {
                path: path.into(),
                action,
                reason: err.to_string(),
            },
            LedgerError::Csv(err) => LedgerError::Persistence {
                path: path.into(),
                action,
                reason: err.to_string(),
            },
            other => other,
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
