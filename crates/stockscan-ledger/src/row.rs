//! # Ledger Row Mapping
//!
//! Maps [`InventoryRecord`] to and from one CSV row.
//!
//! ## File Layout
//! ```text
//! Barcode,Description,Code,Purchase Price,Selling Price,Inventory,Remaining Balance,Income
//! 123,Pen,P1,1.00,2.00,10,10,0.00
//! ```
//!
//! Every column is read as text first and converted here, so that a bad cell
//! produces a message naming the column instead of a serde type error.
//! Files written by older tools store prices as `1.0` and counts as `10.0`;
//! both are accepted.

use serde::{Deserialize, Serialize};
use stockscan_core::validation::parse_whole_number;
use stockscan_core::{InventoryRecord, Money};

/// Column names, in file order.
pub const LEDGER_HEADER: [&str; 8] = [
    "Barcode",
    "Description",
    "Code",
    "Purchase Price",
    "Selling Price",
    "Inventory",
    "Remaining Balance",
    "Income",
];

/// Raw CSV row. Field order matches [`LEDGER_HEADER`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LedgerRow {
    #[serde(rename = "Barcode")]
    barcode: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Purchase Price")]
    purchase_price: String,
    #[serde(rename = "Selling Price")]
    selling_price: String,
    #[serde(rename = "Inventory")]
    inventory: String,
    #[serde(rename = "Remaining Balance")]
    remaining_balance: String,
    #[serde(rename = "Income")]
    income: String,
}

impl LedgerRow {
    /// Converts the row into a record, or explains which cell is wrong.
    pub(crate) fn into_record(self) -> Result<InventoryRecord, String> {
        let record = InventoryRecord {
            purchase_price: money_cell("Purchase Price", &self.purchase_price)?,
            selling_price: money_cell("Selling Price", &self.selling_price)?,
            inventory_count: count_cell("Inventory", &self.inventory)?,
            remaining_balance: count_cell("Remaining Balance", &self.remaining_balance)?,
            income: money_cell("Income", &self.income)?,
            barcode: self.barcode,
            description: self.description,
            code: self.code,
        };

        record.check_invariants().map_err(|err| err.to_string())?;
        Ok(record)
    }
}

impl From<&InventoryRecord> for LedgerRow {
    fn from(record: &InventoryRecord) -> Self {
        LedgerRow {
            barcode: record.barcode.clone(),
            description: record.description.clone(),
            code: record.code.clone(),
            purchase_price: record.purchase_price.to_decimal_string(),
            selling_price: record.selling_price.to_decimal_string(),
            inventory: record.inventory_count.to_string(),
            remaining_balance: record.remaining_balance.to_string(),
            income: record.income.to_decimal_string(),
        }
    }
}

fn money_cell(column: &str, raw: &str) -> Result<Money, String> {
    // An empty income cell shows up when a spreadsheet user clears it.
    if raw.trim().is_empty() && column == "Income" {
        return Ok(Money::zero());
    }
    Money::parse_decimal(raw).map_err(|err| format!("{}: {}", column, err))
}

fn count_cell(column: &str, raw: &str) -> Result<i64, String> {
    parse_whole_number(raw).ok_or_else(|| format!("{}: '{}' is not a whole number", column, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(inventory: &str, income: &str) -> LedgerRow {
        LedgerRow {
            barcode: "123".to_string(),
            description: "Pen".to_string(),
            code: "P1".to_string(),
            purchase_price: "1.0".to_string(),
            selling_price: "2".to_string(),
            inventory: inventory.to_string(),
            remaining_balance: inventory.to_string(),
            income: income.to_string(),
        }
    }

    #[test]
    fn test_into_record_accepts_float_formats() {
        let record = row("10.0", "0.0").into_record().unwrap();
        assert_eq!(record.inventory_count, 10);
        assert_eq!(record.remaining_balance, 10);
        assert_eq!(record.purchase_price.cents(), 100);
        assert_eq!(record.selling_price.cents(), 200);
        assert!(record.income.is_zero());
    }

    #[test]
    fn test_into_record_blank_income_is_zero() {
        let record = row("3", "").into_record().unwrap();
        assert!(record.income.is_zero());
    }

    #[test]
    fn test_into_record_names_bad_column() {
        let err = row("lots", "0").into_record().unwrap_err();
        assert!(err.starts_with("Inventory:"), "{}", err);

        let err = row("-1", "0").into_record().unwrap_err();
        assert!(err.contains("negative"), "{}", err);
    }

    #[test]
    fn test_from_record_uses_two_decimals() {
        let record = row("5", "12.5").into_record().unwrap();
        let out = LedgerRow::from(&record);
        assert_eq!(out.purchase_price, "1.00");
        assert_eq!(out.income, "12.50");
        assert_eq!(out.inventory, "5");
    }
}
