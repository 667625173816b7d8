//! Scan error types.
//!
//! Only [`ScanError`] leaves a session. Source and decode errors are handled
//! inside the loop: a decode error counts as "no detection" for that frame,
//! a source error ends the session as `Failed`.

use thiserror::Error;

/// Frame source failures.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The device could not be opened or stopped delivering frames.
    #[error("Frame source unavailable: {reason}")]
    Unavailable { reason: String },

    /// The source has no more frames.
    #[error("Frame source reached end of stream")]
    EndOfStream,

    /// A frame arrived with the wrong buffer size.
    #[error("Malformed frame: expected {expected} bytes, got {actual}")]
    MalformedFrame { expected: usize, actual: usize },

    #[error("Frame source I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        SourceError::Unavailable {
            reason: reason.into(),
        }
    }
}

/// A single frame could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Frame could not be decoded: {reason}")]
pub struct DecodeError {
    pub reason: String,
}

impl DecodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        DecodeError {
            reason: reason.into(),
        }
    }
}

/// Session-level failure reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The frame source could not be acquired or failed mid-session.
    ///
    /// Fatal to the session only; the operator may start another scan.
    #[error("Scan unavailable: {reason}")]
    SourceUnavailable { reason: String },
}

impl From<SourceError> for ScanError {
    fn from(err: SourceError) -> Self {
        ScanError::SourceUnavailable {
            reason: err.to_string(),
        }
    }
}

/// Result type for scan sessions.
pub type ScanResult<T> = Result<T, ScanError>;
