//! # Decoder Capability
//!
//! Maps one frame to the barcode payloads found in it, in the order the
//! decoding backend reports them. Symbology handling lives entirely behind
//! this trait.
//!
//! Implementations hold no per-session state: decoding the same frame twice
//! gives the same answer.

use crate::error::DecodeError;
use crate::frame::KeystrokeFrame;

pub trait Decoder<F: ?Sized> {
    /// Returns every payload in the frame. An empty list is "no detection",
    /// not an error.
    fn decode(&self, frame: &F) -> Result<Vec<String>, DecodeError>;
}

impl<F: ?Sized, D: Decoder<F> + ?Sized> Decoder<F> for &D {
    fn decode(&self, frame: &F) -> Result<Vec<String>, DecodeError> {
        (**self).decode(frame)
    }
}

/// Decoder for keyboard-wedge input.
///
/// The reader has already decoded the symbol; each whitespace-separated
/// token on the line is a payload. A blank line (operator just hit Enter)
/// decodes to nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeystrokeDecoder;

impl Decoder<KeystrokeFrame> for KeystrokeDecoder {
    fn decode(&self, frame: &KeystrokeFrame) -> Result<Vec<String>, DecodeError> {
        if frame.text().chars().any(|c| c.is_control() && !c.is_whitespace()) {
            return Err(DecodeError::new("input contains control characters"));
        }
        Ok(frame.text().split_whitespace().map(str::to_string).collect())
    }
}
