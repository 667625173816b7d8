//! # Ledger Commands
//!
//! Explicit save and the ledger summary.

use serde::Serialize;
use stockscan_ledger::LedgerSummary;

use crate::commands::{render, OutputFormat};
use crate::error::AppError;
use crate::App;

/// Summary as printed by `--output json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub path: String,
    pub items: usize,
    pub units_on_hand: i64,
    pub stock_value: String,
    pub income: String,
    pub unsaved: usize,
}

impl SummaryDto {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Ledger: {}", self.path),
            format!("Items: {}", self.items),
            format!("Units on hand: {}", self.units_on_hand),
            format!("Stock value: ${}", self.stock_value),
            format!("Income: ${}", self.income),
        ];
        if self.unsaved > 0 {
            lines.push(format!("Unsaved items: {}", self.unsaved));
        }
        lines
    }
}

/// Writes the ledger. Returns how many appended items were saved.
pub fn save(app: &mut App) -> Result<usize, AppError> {
    let pending = app.ledger.unsaved();
    app.controller().persist()?;
    Ok(pending)
}

pub fn summary(app: &App) -> SummaryDto {
    let LedgerSummary {
        items,
        units_on_hand,
        stock_value,
        income,
    } = app.ledger.ledger().summary();

    SummaryDto {
        path: app.ledger.path().display().to_string(),
        items,
        units_on_hand,
        stock_value: stock_value.to_decimal_string(),
        income: income.to_decimal_string(),
        unsaved: app.ledger.unsaved(),
    }
}

pub fn render_summary(summary: &SummaryDto, format: OutputFormat) -> Result<String, AppError> {
    render(summary, SummaryDto::lines, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(unsaved: usize) -> SummaryDto {
        SummaryDto {
            path: "inventory_dataset.csv".to_string(),
            items: 2,
            units_on_hand: 6,
            stock_value: "9.00".to_string(),
            income: "0.00".to_string(),
            unsaved,
        }
    }

    #[test]
    fn test_summary_table() {
        let table = render_summary(&dto(0), OutputFormat::Table).unwrap();
        assert_eq!(
            table,
            "Ledger: inventory_dataset.csv\nItems: 2\nUnits on hand: 6\nStock value: $9.00\nIncome: $0.00"
        );
        let table = render_summary(&dto(1), OutputFormat::Table).unwrap();
        assert!(table.ends_with("Unsaved items: 1"));
    }

    #[test]
    fn test_summary_json() {
        let json = render_summary(&dto(0), OutputFormat::Json).unwrap();
        assert!(json.contains("\"unitsOnHand\": 6"));
    }
}
