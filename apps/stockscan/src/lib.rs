//! # StockScan Application Library
//!
//! Everything the `stockscan` binary does, in a library so the end-to-end
//! tests can drive it over in-memory buffers.
//!
//! ## Module Organization
//! ```text
//! stockscan_app/
//! ├── lib.rs          ◄─── You are here (App, startup, interactive menu)
//! ├── cli.rs          ◄─── clap arguments
//! ├── terminal.rs     ◄─── TerminalUi: UserInterface over BufRead/Write
//! ├── reconcile.rs    ◄─── ReconciliationController
//! ├── state/
//! │   ├── config.rs   ◄─── AppConfig (defaults → TOML → env)
//! │   └── ledger.rs   ◄─── LedgerState (ledger + path + unsaved count)
//! ├── commands/
//! │   ├── scan.rs     ◄─── Scan session + reconcile
//! │   ├── item.rs     ◄─── Manual entry, lookup
//! │   └── ledger.rs   ◄─── Save, summary
//! └── error.rs        ◄─── AppError
//! ```
//!
//! ## Interactive Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [s] scan  [m] enter barcode  [w] save  [l] summary  [q] quit           │
//! │                                                                         │
//! │   s ──► scan ──► reconcile ──► "Scan another barcode?" ── yes ──► scan  │
//! │                                                          └─ no ──► menu │
//! │   q ──► unsaved items? ──► warn, then exit WITHOUT saving               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod reconcile;
pub mod state;
pub mod terminal;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use stockscan_core::UserInterface;
use stockscan_scan::CancelFlag;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::OutputFormat;
use error::AppError;
use reconcile::ReconciliationController;
use state::{AppConfig, LedgerState};
use terminal::TerminalUi;

/// Menu shown between operations.
pub const MENU: &str = "[s] scan  [m] enter barcode  [w] save  [l] summary  [q] quit";

/// Asked after every scan-driven reconciliation.
pub const SCAN_AGAIN_PROMPT: &str = "Scan another barcode?";

/// Process-wide application state.
#[derive(Debug)]
pub struct App {
    pub config: AppConfig,
    pub ledger: LedgerState,
    cancel: CancelFlag,
}

impl App {
    pub fn new(config: AppConfig, ledger: LedgerState) -> Self {
        App {
            config,
            ledger,
            cancel: CancelFlag::new(),
        }
    }

    /// Loads the ledger named by `config`.
    pub fn open(config: AppConfig) -> Result<Self, AppError> {
        let ledger = LedgerState::open(&config.ledger.path)?;
        Ok(App::new(config, ledger))
    }

    /// Cancel flag shared with the running scan session.
    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    pub fn controller(&mut self) -> ReconciliationController<'_> {
        ReconciliationController::new(&mut self.ledger)
    }
}

/// Runs the command selected on the command line.
///
/// ## Startup Sequence
/// 1. Load config (defaults → file → env), then apply `--ledger`
/// 2. Load the ledger (missing file = empty ledger)
/// 3. Dispatch: interactive session, `lookup` or `summary`
pub fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let mut config = AppConfig::load(cli.config)?;
    if let Some(path) = cli.ledger {
        config.ledger.path = path;
    }

    info!(ledger = ?config.ledger.path, "Starting StockScan");
    let mut app = App::open(config)?;
    let mut stdout = io::stdout();

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let stdin = io::stdin();
            let mut ui = TerminalUi::new(stdin.lock(), stdout);
            interactive(&mut app, &mut ui);
        }
        Command::Lookup { barcode } => {
            let record = commands::item::lookup(&app, &barcode)?;
            writeln!(stdout, "{}", commands::item::render_item(&record, cli.output)?)?;
        }
        Command::Summary => {
            let summary = commands::ledger::summary(&app);
            writeln!(
                stdout,
                "{}",
                commands::ledger::render_summary(&summary, cli.output)?
            )?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Runs the menu loop until the operator quits or input ends.
///
/// Unsaved appends are discarded on exit, with a warning.
pub fn interactive<R: BufRead, W: Write>(app: &mut App, ui: &mut TerminalUi<R, W>) {
    ui.console().line(&format!(
        "StockScan: {} items in {}",
        app.ledger.ledger().len(),
        app.ledger.path().display()
    ));

    loop {
        ui.console().line(MENU);
        let Some(choice) = ui.read_line("> ") else {
            break;
        };

        match choice.trim().to_ascii_lowercase().as_str() {
            "s" => scan_until_done(app, ui),
            "m" => {
                if let Err(err) = commands::item::enter_barcode(app, ui) {
                    ui.console().line(&err.to_string());
                }
            }
            "w" => match commands::ledger::save(app) {
                Ok(saved) => ui
                    .console()
                    .line(&format!("Ledger saved ({} new items written).", saved)),
                Err(err) => ui.console().line(&format!("Save failed: {}", err)),
            },
            "l" => {
                let summary = commands::ledger::summary(app);
                match commands::ledger::render_summary(&summary, OutputFormat::Table) {
                    Ok(text) => ui.console().line(&text),
                    Err(err) => ui.console().line(&err.to_string()),
                }
            }
            "q" => break,
            "" => {}
            other => ui.console().line(&format!("Unknown option '{}'", other)),
        }
    }

    if app.ledger.has_unsaved_changes() {
        let unsaved = app.ledger.unsaved();
        warn!(unsaved, "Exiting with unsaved ledger changes");
        ui.console().line(&format!(
            "Warning: {} unsaved item(s) were not written to {}.",
            unsaved,
            app.ledger.path().display()
        ));
    }
    info!("Session ended");
}

/// Scan, reconcile, and repeat while the operator says so.
fn scan_until_done<R: BufRead, W: Write>(app: &mut App, ui: &mut TerminalUi<R, W>) {
    loop {
        match commands::scan::scan_and_reconcile(app, ui) {
            Ok(Some(_)) => {}
            Ok(None) => return,
            Err(err) => {
                ui.console().line(&err.to_string());
                return;
            }
        }

        if !ui.confirm(SCAN_AGAIN_PROMPT) {
            return;
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with prompts on stdout.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockscan_scan=trace` - Trace one crate
/// - Default: `info,stockscan_app=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockscan_app=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
