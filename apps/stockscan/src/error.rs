//! # Application Error Type
//!
//! Unified error type for every operator-facing operation.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in StockScan                              │
//! │                                                                         │
//! │  ValidationError ──────┐                                                │
//! │  CoreError ────────────┤                                                │
//! │  LedgerError ──────────┼──► AppError { code, message } ──► display()    │
//! │  ScanError ────────────┤                                                │
//! │  ConfigError ──────────┘                                                │
//! │                                                                         │
//! │  Handled at the boundary nearest the origin. Only startup failures      │
//! │  (config, unreadable ledger) end the process.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `--output json` prints errors in the same shape:
//! ```json
//! { "code": "DUPLICATE_KEY", "message": "Barcode '123' already exists in the ledger" }
//! ```

use serde::Serialize;
use stockscan_core::{CoreError, ValidationError};
use stockscan_ledger::LedgerError;
use stockscan_scan::ScanError;

use crate::state::ConfigError;

/// Error returned from application operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for the operator
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Barcode not in the ledger (non-interactive lookup only)
    NotFound,

    /// New-item fields failed validation
    ValidationError,

    /// Barcode already present on append
    DuplicateKey,

    /// Ledger file could not be read or written
    PersistenceError,

    /// Frame source could not be acquired or failed
    ScanUnavailable,

    /// Configuration file or override is invalid
    Config,

    /// Anything else
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(barcode: &str) -> Self {
        AppError::new(
            ErrorCode::NotFound,
            format!("Item not found in ledger: {}", barcode),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => AppError::from(e),
            CoreError::InvalidRecord { .. } => AppError::validation(err.to_string()),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::DuplicateKey { .. } => {
                AppError::new(ErrorCode::DuplicateKey, err.to_string())
            }
            LedgerError::Persistence { .. }
            | LedgerError::Corrupt { .. }
            | LedgerError::Io(_)
            | LedgerError::Csv(_) => {
                tracing::error!(error = %err, "Ledger persistence failed");
                AppError::new(ErrorCode::PersistenceError, err.to_string())
            }
        }
    }
}

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        AppError::new(ErrorCode::ScanUnavailable, err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::Config, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("JSON output failed: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(format!("Console I/O failed: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_codes() {
        let dup = AppError::from(LedgerError::duplicate("123"));
        assert_eq!(dup.code, ErrorCode::DuplicateKey);

        let corrupt = AppError::from(LedgerError::Corrupt {
            row: 2,
            reason: "bad".to_string(),
        });
        assert_eq!(corrupt.code, ErrorCode::PersistenceError);
    }

    #[test]
    fn test_validation_error_keeps_message() {
        let err = AppError::from(ValidationError::MustBeNonNegative {
            field: "Inventory".to_string(),
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "Inventory must not be negative");
    }

    #[test]
    fn test_scan_error_is_scan_unavailable() {
        let err = AppError::from(ScanError::SourceUnavailable {
            reason: "no camera".to_string(),
        });
        assert_eq!(err.code, ErrorCode::ScanUnavailable);
    }

    #[test]
    fn test_serializes_screaming_snake_code() {
        let json = serde_json::to_string(&AppError::not_found("42")).unwrap();
        assert_eq!(
            json,
            r#"{"code":"NOT_FOUND","message":"Item not found in ledger: 42"}"#
        );
    }
}
