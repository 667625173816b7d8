//! # Frame Sources
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AcquireSource (device, not yet opened)                                 │
//! │       │ acquire()          Err ──► session Failed ("scan unavailable")  │
//! │       ▼                                                                 │
//! │  FrameSource (owned by one session)                                     │
//! │       │ next_frame()  ──► Ok(Some(frame)) | Ok(None) end | Err          │
//! │       ▼                                                                 │
//! │  release()  called exactly once when the session ends                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The keyboard-wedge source reads one line per frame. Wedge readers type
//! the symbol and press Enter, so a line is as close as a terminal gets to a
//! camera frame.

use std::io::BufRead;

use tracing::debug;

use crate::cancel::CancelFlag;
use crate::error::SourceError;
use crate::frame::{Frame, KeystrokeFrame};

/// An acquired, exclusively owned stream of frames.
pub trait FrameSource {
    type Frame: Frame;

    /// Blocks until the next frame. `Ok(None)` means the stream has ended.
    fn next_frame(&mut self) -> Result<Option<Self::Frame>, SourceError>;

    /// Gives the device back. Called once per session, on every exit path.
    fn release(&mut self);
}

/// A device that can be opened for one session.
pub trait AcquireSource {
    type Source: FrameSource;

    fn acquire(self) -> Result<Self::Source, SourceError>;
}

// =============================================================================
// Keyboard-Wedge Source
// =============================================================================

/// Keyboard-wedge input waiting to be acquired.
#[derive(Debug)]
pub struct KeystrokeInput<'a, R: BufRead> {
    reader: &'a mut R,
    cancel_key: String,
    cancel: CancelFlag,
}

impl<'a, R: BufRead> KeystrokeInput<'a, R> {
    /// `cancel_key` typed on its own line trips `cancel`.
    pub fn new(reader: &'a mut R, cancel_key: impl Into<String>, cancel: CancelFlag) -> Self {
        KeystrokeInput {
            reader,
            cancel_key: cancel_key.into(),
            cancel,
        }
    }
}

impl<'a, R: BufRead> AcquireSource for KeystrokeInput<'a, R> {
    type Source = KeystrokeSource<'a, R>;

    fn acquire(self) -> Result<Self::Source, SourceError> {
        if self.cancel_key.trim().is_empty() {
            return Err(SourceError::unavailable("cancel key is not configured"));
        }
        debug!(cancel_key = %self.cancel_key, "Keyboard-wedge source acquired");
        Ok(KeystrokeSource {
            reader: self.reader,
            cancel_key: self.cancel_key,
            cancel: self.cancel,
            line: String::new(),
            released: false,
        })
    }
}

/// Acquired keyboard-wedge source.
#[derive(Debug)]
pub struct KeystrokeSource<'a, R: BufRead> {
    reader: &'a mut R,
    cancel_key: String,
    cancel: CancelFlag,
    line: String,
    released: bool,
}

impl<'a, R: BufRead> KeystrokeSource<'a, R> {
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl<'a, R: BufRead> FrameSource for KeystrokeSource<'a, R> {
    type Frame = KeystrokeFrame;

    fn next_frame(&mut self) -> Result<Option<KeystrokeFrame>, SourceError> {
        if self.released {
            return Err(SourceError::unavailable("source already released"));
        }

        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }

        let text = self.line.trim();
        if text.eq_ignore_ascii_case(self.cancel_key.trim()) {
            self.cancel.trigger();
            return Ok(Some(KeystrokeFrame::default()));
        }

        Ok(Some(KeystrokeFrame::new(text)))
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            debug!("Keyboard-wedge source released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelSignal;
    use std::io::Cursor;

    #[test]
    fn test_lines_become_frames() {
        let mut input = Cursor::new("123\n\n");
        let flag = CancelFlag::new();
        let mut source = KeystrokeInput::new(&mut input, "q", flag.clone())
            .acquire()
            .unwrap();

        assert_eq!(source.next_frame().unwrap().unwrap().text(), "123");
        assert_eq!(source.next_frame().unwrap().unwrap().text(), "");
        assert!(source.next_frame().unwrap().is_none());
        assert!(!flag.is_cancelled());
    }

    #[test]
    fn test_cancel_key_trips_flag() {
        let mut input = Cursor::new("Q\n123\n");
        let flag = CancelFlag::new();
        let mut source = KeystrokeInput::new(&mut input, "q", flag.clone())
            .acquire()
            .unwrap();

        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!(frame.text(), "");
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_blank_cancel_key_is_unavailable() {
        let mut input = Cursor::new("");
        let err = KeystrokeInput::new(&mut input, " ", CancelFlag::new())
            .acquire()
            .unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));
    }

    #[test]
    fn test_released_source_yields_error() {
        let mut input = Cursor::new("123\n");
        let mut source = KeystrokeInput::new(&mut input, "q", CancelFlag::new())
            .acquire()
            .unwrap();
        source.release();
        assert!(source.is_released());
        assert!(source.next_frame().is_err());
    }
}
