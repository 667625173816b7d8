//! # Scan Loop
//!
//! Runs one [`ScanSession`] to a terminal state.
//!
//! ## Iteration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  loop {                                                                 │
//! │    cancelled?            ──► Cancelled                                  │
//! │    next_frame()          ──► Err / end of stream ──► Failed             │
//! │    cancelled?            ──► Cancelled (frame discarded)                │
//! │    mirror_horizontal()                                                  │
//! │    decode()              ──► Err ──► treated as no payloads             │
//! │    first non-empty payload?                                             │
//! │       none ──► display "No barcode detected", next iteration            │
//! │       some ──► overlay, cue, snapshot, display ──► Detected             │
//! │  }                                                                      │
//! │  SourceGuard dropped ──► release()                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Feedback fires on the detecting frame only. Frames without a payload have
//! no side effect other than the status line.

use stockscan_core::StatusDisplay;
use tracing::{debug, info, warn};

use crate::cancel::CancelSignal;
use crate::decoder::Decoder;
use crate::error::{ScanResult, SourceError};
use crate::feedback::{AudioCue, SnapshotSink};
use crate::frame::Frame;
use crate::session::{ScanOutcome, ScanSession};
use crate::source::{AcquireSource, FrameSource};

/// Status line shown for a frame without a barcode.
pub const NO_DETECTION_MESSAGE: &str = "No barcode detected";

/// The acquisition loop with its injected capabilities.
///
/// ## Type Parameters
/// * `D` - decoder
/// * `A` - audio cue
/// * `K` - snapshot sink
/// * `C` - cancel signal
pub struct ScanLoop<D, A, K, C> {
    decoder: D,
    cue: A,
    snapshots: K,
    cancel: C,
}

impl<D, A, K, C> ScanLoop<D, A, K, C>
where
    A: AudioCue,
    K: SnapshotSink,
    C: CancelSignal,
{
    pub fn new(decoder: D, cue: A, snapshots: K, cancel: C) -> Self {
        ScanLoop {
            decoder,
            cue,
            snapshots,
            cancel,
        }
    }

    /// Runs a session and reduces it to the barcode.
    ///
    /// ## Returns
    /// * `Ok(Some(barcode))` - detected
    /// * `Ok(None)` - operator cancelled
    /// * `Err(ScanError::SourceUnavailable)` - source missing or failed
    pub fn run<P>(
        &mut self,
        provider: P,
        status: &mut dyn StatusDisplay,
    ) -> ScanResult<Option<String>>
    where
        P: AcquireSource,
        D: Decoder<<P::Source as FrameSource>::Frame>,
    {
        self.run_session(provider, status).into_result()
    }

    /// Runs a session and returns everything it produced.
    pub fn run_session<P>(&mut self, provider: P, status: &mut dyn StatusDisplay) -> ScanOutcome
    where
        P: AcquireSource,
        D: Decoder<<P::Source as FrameSource>::Frame>,
    {
        let mut session = ScanSession::new();
        info!(session_id = %session.id, "Scan session started");

        let source = match provider.acquire() {
            Ok(source) => source,
            Err(err) => {
                warn!(session_id = %session.id, error = %err, "Frame source unavailable");
                session.fail(err.to_string());
                return session.finish();
            }
        };

        let mut guard = SourceGuard { source };
        session.begin_capture();
        self.capture(&mut session, &mut guard, status);
        drop(guard);

        let outcome = session.finish();
        info!(
            session_id = %outcome.session_id,
            status = %outcome.status,
            frames = outcome.frames_inspected,
            barcode = outcome.barcode.as_deref().unwrap_or(""),
            "Scan session finished"
        );
        outcome
    }

    fn capture<S>(
        &mut self,
        session: &mut ScanSession<S::Frame>,
        guard: &mut SourceGuard<S>,
        status: &mut dyn StatusDisplay,
    ) where
        S: FrameSource,
        D: Decoder<S::Frame>,
    {
        loop {
            if self.cancel.is_cancelled() {
                session.cancel();
                return;
            }

            let frame = match guard.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    warn!(session_id = %session.id, "Frame source ended mid-session");
                    session.fail(SourceError::EndOfStream.to_string());
                    return;
                }
                Err(err) => {
                    warn!(session_id = %session.id, error = %err, "Frame source failed");
                    session.fail(err.to_string());
                    return;
                }
            };

            if self.cancel.is_cancelled() {
                session.cancel();
                return;
            }

            let frame = session.record_frame(frame);
            frame.mirror_horizontal();

            let payloads = match self.decoder.decode(frame) {
                Ok(payloads) => payloads,
                Err(err) => {
                    debug!(error = %err, "Decode failed, treating frame as empty");
                    Vec::new()
                }
            };

            let Some(barcode) = first_payload(&payloads) else {
                status.display(NO_DETECTION_MESSAGE);
                continue;
            };
            let barcode = barcode.to_string();

            frame.overlay_text(&barcode);
            self.cue.play();
            if let Err(err) = self.snapshots.save(&*frame) {
                warn!(error = %err, "Snapshot not saved");
            }
            status.display(&format!("Detected barcode: {}", barcode));

            debug!(session_id = %session.id, barcode = %barcode, "Barcode detected");
            session.detect(barcode);
            return;
        }
    }
}

/// First payload with visible content, in decoder order.
fn first_payload(payloads: &[String]) -> Option<&str> {
    payloads.iter().map(|p| p.trim()).find(|p| !p.is_empty())
}

/// Releases the source when the session scope ends, whichever way it ends.
struct SourceGuard<S: FrameSource> {
    source: S,
}

impl<S: FrameSource> Drop for SourceGuard<S> {
    fn drop(&mut self) {
        self.source.release();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelFlag;
    use crate::decoder::KeystrokeDecoder;
    use crate::error::{DecodeError, ScanError};
    use crate::feedback::TerminalBell;
    use crate::frame::{KeystrokeFrame, RgbFrame};
    use crate::session::ScanStatus;
    use crate::source::KeystrokeInput;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::io::{self, Cursor};
    use std::rc::Rc;

    // -------------------------------------------------------------------------
    // Fakes
    // -------------------------------------------------------------------------

    #[derive(Default)]
    struct RecordingDisplay(Vec<String>);

    impl StatusDisplay for RecordingDisplay {
        fn display(&mut self, text: &str) {
            self.0.push(text.to_string());
        }
    }

    #[derive(Default)]
    struct CountingCue(u32);

    impl AudioCue for CountingCue {
        fn play(&mut self) {
            self.0 += 1;
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        saved: Vec<Vec<u8>>,
        fail: bool,
    }

    impl SnapshotSink for RecordingSink {
        fn save(&mut self, frame: &dyn Frame) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            let mut out = Vec::new();
            frame.write_snapshot(&mut out)?;
            self.saved.push(out);
            Ok(())
        }
    }

    /// Replays a script of frame results and counts releases.
    struct ScriptedSource<F> {
        script: VecDeque<Result<Option<F>, SourceError>>,
        released: Rc<Cell<u32>>,
        cancel_after: Option<(usize, CancelFlag)>,
        served: usize,
    }

    impl<F: Frame> FrameSource for ScriptedSource<F> {
        type Frame = F;

        fn next_frame(&mut self) -> Result<Option<F>, SourceError> {
            self.served += 1;
            if let Some((after, flag)) = &self.cancel_after {
                if self.served >= *after {
                    flag.trigger();
                }
            }
            self.script.pop_front().unwrap_or(Ok(None))
        }

        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    struct ScriptedDevice<F> {
        source: Option<ScriptedSource<F>>,
    }

    impl<F: Frame> AcquireSource for ScriptedDevice<F> {
        type Source = ScriptedSource<F>;

        fn acquire(self) -> Result<ScriptedSource<F>, SourceError> {
            self.source
                .ok_or_else(|| SourceError::unavailable("no camera attached"))
        }
    }

    fn device<F>(
        frames: Vec<Result<Option<F>, SourceError>>,
    ) -> (ScriptedDevice<F>, Rc<Cell<u32>>) {
        let released = Rc::new(Cell::new(0));
        let source = ScriptedSource {
            script: frames.into(),
            released: released.clone(),
            cancel_after: None,
            served: 0,
        };
        (
            ScriptedDevice {
                source: Some(source),
            },
            released,
        )
    }

    fn wedge(lines: &[&str]) -> Vec<Result<Option<KeystrokeFrame>, SourceError>> {
        lines
            .iter()
            .map(|line| Ok(Some(KeystrokeFrame::new(*line))))
            .collect()
    }

    /// Splits on ',' and keeps empty pieces; "!" fails to decode.
    struct CommaDecoder;

    impl Decoder<KeystrokeFrame> for CommaDecoder {
        fn decode(&self, frame: &KeystrokeFrame) -> Result<Vec<String>, DecodeError> {
            match frame.text() {
                "!" => Err(DecodeError::new("blurred")),
                "" => Ok(Vec::new()),
                text => Ok(text.split(',').map(str::to_string).collect()),
            }
        }
    }

    /// Reports the colour of the top-left pixel when it is non-black.
    struct CornerDecoder;

    impl Decoder<RgbFrame> for CornerDecoder {
        fn decode(&self, frame: &RgbFrame) -> Result<Vec<String>, DecodeError> {
            match frame.pixel(0, 0) {
                Some([0, 0, 0]) | None => Ok(Vec::new()),
                Some([r, g, b]) => Ok(vec![format!("{}-{}-{}", r, g, b)]),
            }
        }
    }

    // -------------------------------------------------------------------------
    // Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_no_detection_frames_have_no_side_effects() {
        let (device, released) = device(wedge(&["", "", "!", ""]));
        let mut cue = CountingCue::default();
        let mut sink = RecordingSink::default();
        let mut display = RecordingDisplay::default();

        let outcome = ScanLoop::new(CommaDecoder, &mut cue, &mut sink, CancelFlag::new())
            .run_session(device, &mut display);

        // Script runs out: end of stream ends the session.
        assert_eq!(outcome.status, ScanStatus::Failed);
        assert_eq!(outcome.frames_inspected, 4);
        assert_eq!(cue.0, 0);
        assert!(sink.saved.is_empty());
        assert_eq!(display.0, vec![NO_DETECTION_MESSAGE; 4]);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_detects_exactly_once_and_stops() {
        let (device, released) = device(wedge(&["", "123", "456"]));
        let mut cue = CountingCue::default();
        let mut sink = RecordingSink::default();
        let mut display = RecordingDisplay::default();

        let result = ScanLoop::new(CommaDecoder, &mut cue, &mut sink, CancelFlag::new())
            .run(device, &mut display);

        assert_eq!(result, Ok(Some("123".to_string())));
        assert_eq!(cue.0, 1);
        assert_eq!(sink.saved.len(), 1);
        assert_eq!(
            String::from_utf8(sink.saved[0].clone()).unwrap(),
            "input: 123\nbarcode: 123\n"
        );
        assert_eq!(
            display.0,
            vec![NO_DETECTION_MESSAGE, "Detected barcode: 123"]
        );
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_first_non_empty_payload_wins() {
        let (device, _) = device(wedge(&[" ,,789,123"]));
        let mut display = RecordingDisplay::default();

        let outcome = ScanLoop::new(
            CommaDecoder,
            CountingCue::default(),
            RecordingSink::default(),
            CancelFlag::new(),
        )
        .run_session(device, &mut display);

        assert_eq!(outcome.status, ScanStatus::Detected);
        assert_eq!(outcome.barcode.as_deref(), Some("789"));
        assert_eq!(outcome.frames_inspected, 1);
    }

    #[test]
    fn test_decode_error_is_not_fatal() {
        let (device, _) = device(wedge(&["!", "!", "42"]));
        let mut display = RecordingDisplay::default();

        let result = ScanLoop::new(
            CommaDecoder,
            CountingCue::default(),
            RecordingSink::default(),
            CancelFlag::new(),
        )
        .run(device, &mut display);

        assert_eq!(result, Ok(Some("42".to_string())));
        assert_eq!(display.0.len(), 3);
    }

    #[test]
    fn test_snapshot_failure_keeps_detection() {
        let (device, released) = device(wedge(&["77"]));
        let mut cue = CountingCue::default();
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let mut display = RecordingDisplay::default();

        let result = ScanLoop::new(CommaDecoder, &mut cue, &mut sink, CancelFlag::new())
            .run(device, &mut display);

        assert_eq!(result, Ok(Some("77".to_string())));
        assert_eq!(cue.0, 1);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_source_error_mid_session_fails_and_releases() {
        let frames = vec![
            Ok(Some(KeystrokeFrame::new(""))),
            Err(SourceError::unavailable("usb unplugged")),
            Ok(Some(KeystrokeFrame::new("123"))),
        ];
        let (device, released) = device(frames);
        let mut cue = CountingCue::default();
        let mut display = RecordingDisplay::default();

        let result = ScanLoop::new(
            CommaDecoder,
            &mut cue,
            RecordingSink::default(),
            CancelFlag::new(),
        )
        .run(device, &mut display);

        match result {
            Err(ScanError::SourceUnavailable { reason }) => {
                assert!(reason.contains("usb unplugged"), "{}", reason)
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(cue.0, 0);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_acquire_failure_is_scan_unavailable() {
        let unplugged: ScriptedDevice<KeystrokeFrame> = ScriptedDevice { source: None };
        let mut display = RecordingDisplay::default();

        let outcome = ScanLoop::new(
            CommaDecoder,
            CountingCue::default(),
            RecordingSink::default(),
            CancelFlag::new(),
        )
        .run_session(unplugged, &mut display);

        assert_eq!(outcome.status, ScanStatus::Failed);
        assert_eq!(outcome.frames_inspected, 0);
        assert!(display.0.is_empty());
        assert!(outcome.into_result().is_err());
    }

    #[test]
    fn test_cancel_before_first_frame() {
        let (device, released) = device(wedge(&["123"]));
        let flag = CancelFlag::new();
        flag.trigger();
        let mut display = RecordingDisplay::default();

        let outcome = ScanLoop::new(
            CommaDecoder,
            CountingCue::default(),
            RecordingSink::default(),
            flag,
        )
        .run_session(device, &mut display);

        assert_eq!(outcome.status, ScanStatus::Cancelled);
        assert_eq!(outcome.frames_inspected, 0);
        assert!(outcome.barcode.is_none());
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_cancel_while_frame_in_flight_discards_frame() {
        let (mut device, released) = device(wedge(&["", "", "123"]));
        let flag = CancelFlag::new();
        if let Some(source) = device.source.as_mut() {
            source.cancel_after = Some((3, flag.clone()));
        }
        let mut cue = CountingCue::default();
        let mut display = RecordingDisplay::default();

        let result = ScanLoop::new(CommaDecoder, &mut cue, RecordingSink::default(), &flag)
            .run(device, &mut display);

        // The third frame carries a barcode but arrives after the cancel.
        assert_eq!(result, Ok(None));
        assert_eq!(cue.0, 0);
        assert_eq!(display.0.len(), 2);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_camera_frames_are_mirrored_before_decode() {
        let mut frame = RgbFrame::blank(3, 1);
        frame.set_pixel(2, 0, [9, 8, 7]);
        let (device, _) = device(vec![Ok(Some(frame))]);
        let mut sink = RecordingSink::default();
        let mut display = RecordingDisplay::default();

        let result = ScanLoop::new(
            CornerDecoder,
            CountingCue::default(),
            &mut sink,
            CancelFlag::new(),
        )
        .run(device, &mut display);

        assert_eq!(result, Ok(Some("9-8-7".to_string())));
        assert!(sink.saved[0].starts_with(b"P6\n# 9-8-7\n3 1\n255\n"));
    }

    #[test]
    fn test_keystroke_wedge_session() {
        let mut input = Cursor::new("\n5449000000996\nq\n");
        let flag = CancelFlag::new();
        let mut bell = Vec::new();
        let mut display = RecordingDisplay::default();

        let result = ScanLoop::new(
            KeystrokeDecoder,
            TerminalBell::new(&mut bell),
            RecordingSink::default(),
            &flag,
        )
        .run(KeystrokeInput::new(&mut input, "q", flag.clone()), &mut display);

        assert_eq!(result, Ok(Some("5449000000996".to_string())));
        assert_eq!(bell, b"\x07");
        assert!(!flag.is_cancelled());
    }

    #[test]
    fn test_keystroke_wedge_cancel() {
        let mut input = Cursor::new("\nq\n123\n");
        let flag = CancelFlag::new();
        let mut display = RecordingDisplay::default();

        let result = ScanLoop::new(
            KeystrokeDecoder,
            CountingCue::default(),
            RecordingSink::default(),
            &flag,
        )
        .run(KeystrokeInput::new(&mut input, "q", flag.clone()), &mut display);

        assert_eq!(result, Ok(None));
        assert_eq!(display.0, vec![NO_DETECTION_MESSAGE]);

        let mut rest = String::new();
        io::BufRead::read_line(&mut input, &mut rest).unwrap();
        assert_eq!(rest, "123\n");
    }

    #[test]
    fn test_first_payload_helper() {
        let payloads = vec![String::new(), "  ".to_string(), " 5 ".to_string()];
        assert_eq!(first_payload(&payloads), Some("5"));
        assert_eq!(first_payload(&[]), None);
    }
}
