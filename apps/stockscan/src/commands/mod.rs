//! # Commands Module
//!
//! Operations behind the menu entries and CLI subcommands.
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports, output format)
//! ├── scan.rs     ◄─── Scan session + reconciliation
//! ├── item.rs     ◄─── Manual barcode entry, lookup, item DTO
//! └── ledger.rs   ◄─── Save, summary
//! ```
//!
//! Every command returns `Result<T, AppError>`; the menu shows the error and
//! carries on, the CLI prints it and exits non-zero.

pub mod item;
pub mod ledger;
pub mod scan;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::AppError;

/// How non-interactive commands print their result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `Label: value` lines
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Renders `value` as JSON, or as the given table lines.
pub fn render<T: Serialize>(
    value: &T,
    lines: impl FnOnce(&T) -> Vec<String>,
    format: OutputFormat,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Table => Ok(lines(value).join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
    }
}
