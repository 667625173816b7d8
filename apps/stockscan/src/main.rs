//! # StockScan Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments (clap)
//! 2. Initialize tracing (stderr)
//! 3. Hand over to [`stockscan_app::run`]
//!
//! Errors reaching this point are startup failures (bad config, unreadable
//! ledger) or a failed non-interactive command; they exit with status 1.

use std::process::ExitCode;

use clap::Parser;
use stockscan_app::cli::Cli;
use stockscan_app::commands::OutputFormat;

fn main() -> ExitCode {
    let cli = Cli::parse();
    stockscan_app::init_tracing();

    let output = cli.output;
    match stockscan_app::run(cli) {
        Ok(code) => code,
        Err(err) => {
            match output {
                OutputFormat::Json => match serde_json::to_string(&err) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("error: {}", err),
                },
                OutputFormat::Table => eprintln!("error: {}", err),
            }
            ExitCode::FAILURE
        }
    }
}
