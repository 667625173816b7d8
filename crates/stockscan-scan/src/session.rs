//! Scan session state.

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::error::{ScanError, ScanResult};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// Source not yet acquired.
    Idle,
    /// Pulling and inspecting frames.
    Capturing,
    /// A barcode was found.
    Detected,
    /// The operator cancelled.
    Cancelled,
    /// The source could not be acquired or failed.
    Failed,
}

impl ScanStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScanStatus::Detected | ScanStatus::Cancelled | ScanStatus::Failed
        )
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanStatus::Idle => write!(f, "idle"),
            ScanStatus::Capturing => write!(f, "capturing"),
            ScanStatus::Detected => write!(f, "detected"),
            ScanStatus::Cancelled => write!(f, "cancelled"),
            ScanStatus::Failed => write!(f, "failed"),
        }
    }
}

/// State of one acquisition attempt.
///
/// Owns the most recent frame until the session ends. `result_barcode` is
/// only ever set together with the `Detected` status.
#[derive(Debug)]
pub struct ScanSession<F> {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    status: ScanStatus,
    last_frame: Option<F>,
    result_barcode: Option<String>,
    frames_inspected: u64,
    failure: Option<String>,
}

impl<F> ScanSession<F> {
    pub fn new() -> Self {
        ScanSession {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            status: ScanStatus::Idle,
            last_frame: None,
            result_barcode: None,
            frames_inspected: 0,
            failure: None,
        }
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn result_barcode(&self) -> Option<&str> {
        self.result_barcode.as_deref()
    }

    pub fn frames_inspected(&self) -> u64 {
        self.frames_inspected
    }

    pub fn last_frame(&self) -> Option<&F> {
        self.last_frame.as_ref()
    }

    /// Idle → Capturing.
    pub fn begin_capture(&mut self) {
        if self.transition(ScanStatus::Idle, ScanStatus::Capturing) {
            self.started_at = Utc::now();
        }
    }

    /// Stores `frame` as the current frame, replacing the previous one.
    pub fn record_frame(&mut self, frame: F) -> &mut F {
        self.frames_inspected += 1;
        self.last_frame.insert(frame)
    }

    /// Capturing → Detected.
    pub fn detect(&mut self, barcode: String) {
        if self.transition(ScanStatus::Capturing, ScanStatus::Detected) {
            self.result_barcode = Some(barcode);
        }
    }

    /// Capturing → Cancelled.
    pub fn cancel(&mut self) {
        self.transition(ScanStatus::Capturing, ScanStatus::Cancelled);
    }

    /// Idle or Capturing → Failed.
    pub fn fail(&mut self, reason: impl Into<String>) {
        let from = if self.status == ScanStatus::Idle {
            ScanStatus::Idle
        } else {
            ScanStatus::Capturing
        };
        if self.transition(from, ScanStatus::Failed) {
            self.failure = Some(reason.into());
        }
    }

    /// Ends the session, dropping the last frame.
    pub fn finish(self) -> ScanOutcome {
        ScanOutcome {
            session_id: self.id,
            started_at: self.started_at,
            status: self.status,
            barcode: self.result_barcode,
            frames_inspected: self.frames_inspected,
            failure: self.failure,
        }
    }

    fn transition(&mut self, from: ScanStatus, to: ScanStatus) -> bool {
        if self.status != from {
            warn!(
                session_id = %self.id,
                current = %self.status,
                requested = %to,
                "Ignored scan state transition"
            );
            return false;
        }
        self.status = to;
        true
    }
}

impl<F> Default for ScanSession<F> {
    fn default() -> Self {
        ScanSession::new()
    }
}

/// What a finished session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub status: ScanStatus,
    pub barcode: Option<String>,
    pub frames_inspected: u64,
    /// Why the session failed, when `status` is `Failed`.
    pub failure: Option<String>,
}

impl ScanOutcome {
    /// `Ok(Some)` when detected, `Ok(None)` when cancelled,
    /// `Err(SourceUnavailable)` when the source failed.
    pub fn into_result(self) -> ScanResult<Option<String>> {
        match self.status {
            ScanStatus::Failed => Err(ScanError::SourceUnavailable {
                reason: self
                    .failure
                    .unwrap_or_else(|| "frame source failed".to_string()),
            }),
            _ => Ok(self.barcode),
        }
    }
}
