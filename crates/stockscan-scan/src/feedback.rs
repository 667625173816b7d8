//! # Detection Feedback
//!
//! Side effects fired once, on the frame that produced a detection:
//!
//! ```text
//! detected ──► AudioCue::play()          bell / silent
//!          └─► SnapshotSink::save(frame)  last_scan.<ext>, overwritten each time
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::frame::Frame;

// =============================================================================
// Audio Cue
// =============================================================================

pub trait AudioCue {
    fn play(&mut self);
}

impl<T: AudioCue + ?Sized> AudioCue for &mut T {
    fn play(&mut self) {
        (**self).play();
    }
}

/// Rings the terminal bell (`BEL`) on the wrapped writer.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalBell::new(io::stdout())
    }
}

impl<W: Write> AudioCue for TerminalBell<W> {
    fn play(&mut self) {
        let result = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        if let Err(err) = result {
            warn!(error = %err, "Audio cue failed");
        }
    }
}

/// Cue used when sound is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play(&mut self) {}
}

// =============================================================================
// Snapshot Sink
// =============================================================================

pub trait SnapshotSink {
    fn save(&mut self, frame: &dyn Frame) -> io::Result<()>;
}

impl<T: SnapshotSink + ?Sized> SnapshotSink for &mut T {
    fn save(&mut self, frame: &dyn Frame) -> io::Result<()> {
        (**self).save(frame)
    }
}

/// Single-slot snapshot file: each detection replaces the previous one.
#[derive(Debug, Clone)]
pub struct FileSnapshot {
    dir: PathBuf,
    stem: String,
}

impl FileSnapshot {
    /// Default file stem.
    pub const DEFAULT_STEM: &'static str = "last_scan";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSnapshot {
            dir: dir.into(),
            stem: Self::DEFAULT_STEM.to_string(),
        }
    }

    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = stem.into();
        self
    }

    /// Where a snapshot with this extension lands.
    pub fn path_for(&self, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", self.stem, extension))
    }

    fn write_atomic(frame: &dyn Frame, path: &Path, tmp: &Path) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(tmp)?);
        frame.write_snapshot(&mut out)?;
        out.flush()?;
        fs::rename(tmp, path)
    }
}

impl SnapshotSink for FileSnapshot {
    fn save(&mut self, frame: &dyn Frame) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let extension = frame.snapshot_extension();
        let path = self.path_for(extension);
        let tmp = self.dir.join(format!(".{}.{}.tmp", self.stem, extension));

        if let Err(err) = Self::write_atomic(frame, &path, &tmp) {
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }

        debug!(?path, "Snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::KeystrokeFrame;

    #[test]
    fn test_terminal_bell_writes_bel() {
        let mut out = Vec::new();
        TerminalBell::new(&mut out).play();
        assert_eq!(out, b"\x07");
    }

    #[test]
    fn test_file_snapshot_overwrites_single_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSnapshot::new(dir.path().join("snaps"));

        let mut first = KeystrokeFrame::new("111");
        first.overlay_text("111");
        sink.save(&first).unwrap();

        let mut second = KeystrokeFrame::new("222");
        second.overlay_text("222");
        sink.save(&second).unwrap();

        let path = sink.path_for("txt");
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("222"));
        assert!(!text.contains("111"));

        let entries = fs::read_dir(dir.path().join("snaps")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_with_stem() {
        let sink = FileSnapshot::new("/tmp").with_stem("code");
        assert_eq!(sink.path_for("ppm"), PathBuf::from("/tmp/code.ppm"));
    }
}
