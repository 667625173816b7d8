//! # Item Commands
//!
//! Manual barcode entry (for damaged labels) and the non-interactive
//! `lookup` subcommand.

use std::io::{BufRead, Write};

use serde::Serialize;
use stockscan_core::{validation, InventoryRecord};
use tracing::debug;

use crate::commands::{render, OutputFormat};
use crate::error::AppError;
use crate::reconcile::Reconciliation;
use crate::terminal::TerminalUi;
use crate::App;

/// Item as printed by `--output json`.
///
/// Money is rendered as decimal strings so consumers never see cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub barcode: String,
    pub description: String,
    pub code: String,
    pub purchase_price: String,
    pub selling_price: String,
    pub margin: String,
    pub inventory: i64,
    pub remaining_balance: i64,
    pub income: String,
}

impl From<&InventoryRecord> for ItemDto {
    fn from(r: &InventoryRecord) -> Self {
        ItemDto {
            barcode: r.barcode.clone(),
            description: r.description.clone(),
            code: r.code.clone(),
            purchase_price: r.purchase_price.to_decimal_string(),
            selling_price: r.selling_price.to_decimal_string(),
            margin: r.margin().to_decimal_string(),
            inventory: r.inventory_count,
            remaining_balance: r.remaining_balance,
            income: r.income.to_decimal_string(),
        }
    }
}

/// Exact lookup for the CLI; a miss is `NotFound`.
pub fn lookup(app: &App, barcode: &str) -> Result<InventoryRecord, AppError> {
    validation::validate_barcode(barcode.trim())?;
    app.ledger
        .ledger()
        .query(barcode)
        .cloned()
        .ok_or_else(|| AppError::not_found(barcode.trim()))
}

/// Renders a record for the CLI.
pub fn render_item(record: &InventoryRecord, format: OutputFormat) -> Result<String, AppError> {
    render(&ItemDto::from(record), |_| record.detail_lines(), format)
}

/// Reads a barcode typed by the operator and reconciles it.
///
/// `Ok(None)` when the input is blank or closed.
pub fn enter_barcode<R: BufRead, W: Write>(
    app: &mut App,
    ui: &mut TerminalUi<R, W>,
) -> Result<Option<Reconciliation>, AppError> {
    let Some(raw) = ui.read_line("Barcode: ") else {
        return Ok(None);
    };
    let barcode = raw.trim();
    if barcode.is_empty() {
        return Ok(None);
    }

    debug!(%barcode, "Manual barcode entry");
    Ok(Some(app.controller().reconcile(barcode, ui)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockscan_core::{Money, NewItem};

    fn notebook() -> InventoryRecord {
        InventoryRecord::register(
            "999",
            NewItem {
                description: "Notebook".to_string(),
                code: "N7".to_string(),
                purchase_price: Money::from_cents(150),
                selling_price: Money::from_cents(300),
                inventory_count: 12,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_item_dto_json() {
        let json = render_item(&notebook(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["barcode"], "999");
        assert_eq!(value["purchasePrice"], "1.50");
        assert_eq!(value["margin"], "1.50");
        assert_eq!(value["remainingBalance"], 12);
    }

    #[test]
    fn test_item_table() {
        let table = render_item(&notebook(), OutputFormat::Table).unwrap();
        assert!(table.starts_with("Barcode: 999\nDescription: Notebook"));
    }
}
