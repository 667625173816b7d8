//! # Scan Commands
//!
//! Wires the configured capabilities into a [`ScanLoop`] and hands the
//! result to the reconciliation controller.
//!
//! ```text
//! TerminalUi ──parts()──► (&mut input, &mut console)
//!                              │            │
//!                              ▼            ▼
//!                     KeystrokeInput   StatusDisplay
//!                              │            │
//!                              └─► ScanLoop ◄┘ ──► Some(barcode) ──► reconcile
//! ```

use std::io::{BufRead, Write};

use stockscan_scan::{
    AudioCue, FileSnapshot, KeystrokeDecoder, KeystrokeInput, ScanLoop, SilentCue, TerminalBell,
};
use tracing::info;

use crate::error::AppError;
use crate::reconcile::Reconciliation;
use crate::terminal::TerminalUi;
use crate::App;

/// Runs one scan session on the terminal input.
///
/// ## Returns
/// * `Ok(Some(barcode))` - detected
/// * `Ok(None)` - operator typed the cancel key
/// * `Err(ScanUnavailable)` - input closed or source failed
pub fn scan_barcode<R: BufRead, W: Write>(
    app: &App,
    ui: &mut TerminalUi<R, W>,
) -> Result<Option<String>, AppError> {
    let settings = &app.config.scan;
    let cancel = app.cancel_flag().clone();
    cancel.reset();

    let mut bell;
    let mut silent = SilentCue;
    let cue: &mut dyn AudioCue = if settings.sound_enabled {
        bell = TerminalBell::stdout();
        &mut bell
    } else {
        &mut silent
    };

    let (input, console) = ui.parts();
    console.line(&format!(
        "Scan an item (type {} and Enter to cancel)...",
        settings.cancel_key
    ));

    let mut scan_loop = ScanLoop::new(
        KeystrokeDecoder,
        cue,
        FileSnapshot::new(&settings.snapshot_dir),
        cancel.clone(),
    );
    let source = KeystrokeInput::new(input, settings.cancel_key.clone(), cancel);

    Ok(scan_loop.run(source, console)?)
}

/// Scans, then reconciles the detected barcode.
///
/// `Ok(None)` when the scan was cancelled.
pub fn scan_and_reconcile<R: BufRead, W: Write>(
    app: &mut App,
    ui: &mut TerminalUi<R, W>,
) -> Result<Option<Reconciliation>, AppError> {
    match scan_barcode(app, ui)? {
        Some(barcode) => Ok(Some(app.controller().reconcile(&barcode, ui)?)),
        None => {
            info!("Scan cancelled by operator");
            ui.console().line("Scan cancelled.");
            Ok(None)
        }
    }
}
