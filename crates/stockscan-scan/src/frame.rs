//! # Frames
//!
//! A frame is whatever the source produced for one loop iteration. The loop
//! only needs to mirror it, caption it and write it out as a snapshot.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Frame            Source                 Mirror        Snapshot         │
//! │  ───────────────  ─────────────────────  ────────────  ───────────────  │
//! │  RgbFrame         camera, 8-bit RGB      swap columns  PPM (P6), .ppm   │
//! │  KeystrokeFrame   keyboard-wedge reader  identity      text, .txt       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, Write};

use crate::error::SourceError;

/// Rows painted by [`RgbFrame::overlay_text`].
pub const OVERLAY_BAND_ROWS: usize = 12;

/// Highlight colour of the overlay band.
const OVERLAY_COLOUR: [u8; 3] = [0, 200, 0];

/// Operations the scan loop performs on a frame.
pub trait Frame {
    /// Flips the frame left to right so the operator sees a mirror image.
    fn mirror_horizontal(&mut self);

    /// Marks the frame with the decoded text for operator confirmation.
    fn overlay_text(&mut self, text: &str);

    /// Serialises the frame as a snapshot artifact.
    fn write_snapshot(&self, out: &mut dyn Write) -> io::Result<()>;

    /// File extension of the snapshot format, without the dot.
    fn snapshot_extension(&self) -> &'static str;
}

// =============================================================================
// Camera Frame
// =============================================================================

/// Packed 8-bit RGB image, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbFrame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    caption: Option<String>,
}

impl RgbFrame {
    /// Wraps a raw buffer of `width * height * 3` bytes.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, SourceError> {
        let expected = width.saturating_mul(height).saturating_mul(3);
        if pixels.len() != expected {
            return Err(SourceError::MalformedFrame {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(RgbFrame {
            width,
            height,
            pixels,
            caption: None,
        })
    }

    /// All-black frame.
    pub fn blank(width: usize, height: usize) -> Self {
        RgbFrame {
            width,
            height,
            pixels: vec![0; width * height * 3],
            caption: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y * self.width + x) * 3;
        Some([self.pixels[at], self.pixels[at + 1], self.pixels[at + 2]])
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        if x < self.width && y < self.height {
            let at = (y * self.width + x) * 3;
            self.pixels[at..at + 3].copy_from_slice(&rgb);
        }
    }

    /// Text set by the last overlay, if any.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}

impl Frame for RgbFrame {
    fn mirror_horizontal(&mut self) {
        if self.width < 2 {
            return;
        }
        let width = self.width;
        for row in self.pixels.chunks_exact_mut(width * 3) {
            for x in 0..width / 2 {
                let (left, right) = (x * 3, (width - 1 - x) * 3);
                for channel in 0..3 {
                    row.swap(left + channel, right + channel);
                }
            }
        }
    }

    fn overlay_text(&mut self, text: &str) {
        let band = OVERLAY_BAND_ROWS.min(self.height) * self.width * 3;
        for pixel in self.pixels[..band].chunks_exact_mut(3) {
            pixel.copy_from_slice(&OVERLAY_COLOUR);
        }
        self.caption = Some(text.to_string());
    }

    fn write_snapshot(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "P6")?;
        if let Some(caption) = &self.caption {
            writeln!(out, "# {}", single_line(caption))?;
        }
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;
        out.write_all(&self.pixels)
    }

    fn snapshot_extension(&self) -> &'static str {
        "ppm"
    }
}

// =============================================================================
// Keyboard-Wedge Frame
// =============================================================================

/// One line typed by a keyboard-wedge barcode reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeystrokeFrame {
    text: String,
    caption: Option<String>,
}

impl KeystrokeFrame {
    pub fn new(text: impl Into<String>) -> Self {
        KeystrokeFrame {
            text: text.into(),
            caption: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}

impl Frame for KeystrokeFrame {
    // A line has no horizontal axis.
    fn mirror_horizontal(&mut self) {}

    fn overlay_text(&mut self, text: &str) {
        self.caption = Some(text.to_string());
    }

    fn write_snapshot(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "input: {}", single_line(&self.text))?;
        if let Some(caption) = &self.caption {
            writeln!(out, "barcode: {}", single_line(caption))?;
        }
        Ok(())
    }

    fn snapshot_extension(&self) -> &'static str {
        "txt"
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
