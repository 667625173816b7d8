//! # stockscan-scan: Barcode Acquisition Loop
//!
//! One scan session = acquire a frame source, inspect frames until a barcode
//! shows up or the operator cancels, then release the source.
//!
//! ## Session State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────┐  acquire ok   ┌───────────┐  first non-empty   ┌──────────┐  │
//! │   │ Idle │──────────────►│ Capturing │───────payload─────►│ Detected │  │
//! │   └──┬───┘               └─────┬─────┘                    └──────────┘  │
//! │      │                    ▲    │  │                                     │
//! │      │ acquire err        │    │  │ cancel polled         ┌───────────┐ │
//! │      │                    └────┘  └──────────────────────►│ Cancelled │ │
//! │      │              no payload /                          └───────────┘ │
//! │      │              decode error       source error /                   │
//! │      │                                 end of stream      ┌──────────┐  │
//! │      └───────────────────────────────────────────────────►│  Failed  │  │
//! │                                                           └──────────┘  │
//! │                                                                         │
//! │  Every terminal state releases the source exactly once.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`frame`] - `Frame` trait, camera (`RgbFrame`) and wedge (`KeystrokeFrame`) frames
//! - [`source`] - `FrameSource` / `AcquireSource` and the keyboard-wedge source
//! - [`decoder`] - `Decoder` capability
//! - [`feedback`] - audio cue and snapshot sinks
//! - [`cancel`] - operator cancel signal
//! - [`session`] - `ScanSession` state and `ScanOutcome`
//! - [`scan_loop`] - the loop itself
//! - [`error`] - scan error types

pub mod cancel;
pub mod decoder;
pub mod error;
pub mod feedback;
pub mod frame;
pub mod scan_loop;
pub mod session;
pub mod source;

pub use cancel::{CancelFlag, CancelSignal};
pub use decoder::{Decoder, KeystrokeDecoder};
pub use error::{DecodeError, ScanError, ScanResult, SourceError};
pub use feedback::{AudioCue, FileSnapshot, SilentCue, SnapshotSink, TerminalBell};
pub use frame::{Frame, KeystrokeFrame, RgbFrame};
pub use scan_loop::{ScanLoop, NO_DETECTION_MESSAGE};
pub use session::{ScanOutcome, ScanSession, ScanStatus};
pub use source::{AcquireSource, FrameSource, KeystrokeInput, KeystrokeSource};
