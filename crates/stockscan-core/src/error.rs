//! # Error Types
//!
//! Domain-specific error types for stockscan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockscan-core errors (this file)                                      │
//! │  ├── CoreError        - Record-level rule violations                    │
//! │  └── ValidationError  - Operator input failures                         │
//! │                                                                         │
//! │  stockscan-ledger errors                                                │
//! │  └── LedgerError      - Duplicate keys, file I/O, corrupt rows          │
//! │                                                                         │
//! │  stockscan-scan errors                                                  │
//! │  └── ScanError        - Frame source unavailable                        │
//! │                                                                         │
//! │  App errors                                                             │
//! │  └── AppError         - What the operator sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → terminal message        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Record-level business rule failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record violates one of the ledger invariants.
    ///
    /// ## When This Occurs
    /// - A ledger row carries a negative inventory or remaining balance
    /// - A ledger row carries a negative price
    #[error("Record {barcode} is invalid: {reason}")]
    InvalidRecord { barcode: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while parsing and checking the fields an operator types into the
/// new-item form. Nothing is created when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is below zero.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value could not be parsed.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
