//! # Domain Types
//!
//! Core domain types used throughout StockScan.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │  InventoryRecord    │   │    NewItem      │   │   FieldSpec     │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  barcode (key)      │◄──│  description    │◄──│  key / label    │   │
//! │  │  description, code  │   │  code           │   │  kind           │   │
//! │  │  purchase/selling   │   │  prices         │   └─────────────────┘   │
//! │  │  inventory_count    │   │  inventory      │            │            │
//! │  │  remaining_balance  │   └─────────────────┘            ▼            │
//! │  │  income             │                         ┌─────────────────┐   │
//! │  └─────────────────────┘                         │  FieldValues    │   │
//! │                                                  │  (raw strings)  │   │
//! │                                                  └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Record Lifecycle
//! A record is created in memory only after a lookup miss and an operator
//! submitting the new-item form. It reaches the ledger file only when the
//! operator explicitly saves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{self, ValidationResult};

// =============================================================================
// Inventory Record
// =============================================================================

/// One row of the inventory ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Decoded barcode payload. Unique across the ledger.
    pub barcode: String,

    /// Human-readable item description.
    pub description: String,

    /// Free-form item code (SKU).
    pub code: String,

    /// Unit purchase price.
    pub purchase_price: Money,

    /// Unit selling price.
    pub selling_price: Money,

    /// Units in stock when the item was registered.
    pub inventory_count: i64,

    /// Units not yet sold.
    pub remaining_balance: i64,

    /// Accumulated revenue.
    pub income: Money,
}

impl InventoryRecord {
    /// Builds a brand-new record from a decoded barcode and the operator's
    /// form input.
    ///
    /// ## Defaults
    /// - `remaining_balance = inventory_count` (nothing sold yet)
    /// - `income = 0`
    ///
    /// The record is NOT persisted; the caller appends it to the ledger.
    pub fn register(barcode: impl Into<String>, item: NewItem) -> CoreResult<InventoryRecord> {
        let barcode = barcode.into().trim().to_string();
        validation::validate_barcode(&barcode)?;
        validation::validate_new_item(&item)?;

        Ok(InventoryRecord {
            barcode,
            description: item.description.trim().to_string(),
            code: item.code.trim().to_string(),
            purchase_price: item.purchase_price,
            selling_price: item.selling_price,
            inventory_count: item.inventory_count,
            remaining_balance: item.inventory_count,
            income: Money::zero(),
        })
    }

    /// Checks the ledger invariants on a record that did not come through
    /// [`InventoryRecord::register`] (e.g. a row read from disk).
    pub fn check_invariants(&self) -> CoreResult<()> {
        let invalid = |reason: &str| CoreError::InvalidRecord {
            barcode: self.barcode.clone(),
            reason: reason.to_string(),
        };

        validation::validate_barcode(&self.barcode)?;
        if self.inventory_count < 0 {
            return Err(invalid("inventory is negative"));
        }
        if self.remaining_balance < 0 {
            return Err(invalid("remaining balance is negative"));
        }
        if self.purchase_price.is_negative() {
            return Err(invalid("purchase price is negative"));
        }
        if self.selling_price.is_negative() {
            return Err(invalid("selling price is negative"));
        }
        Ok(())
    }

    /// Per-unit margin (selling price minus purchase price).
    #[inline]
    pub fn margin(&self) -> Money {
        self.selling_price - self.purchase_price
    }

    /// Value of the unsold stock at purchase price.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.purchase_price.multiply_quantity(self.remaining_balance)
    }

    /// The "Item Details" view, one `label: value` line per field.
    pub fn detail_lines(&self) -> Vec<String> {
        vec![
            format!("Barcode: {}", self.barcode),
            format!("Description: {}", self.description),
            format!("Code: {}", self.code),
            format!("Purchase Price: {}", self.purchase_price),
            format!("Selling Price: {}", self.selling_price),
            format!("Margin: {}", self.margin()),
            format!("Inventory: {}", self.inventory_count),
            format!("Remaining Balance: {}", self.remaining_balance),
            format!("Income: {}", self.income),
        ]
    }
}

// =============================================================================
// New Item
// =============================================================================

/// Operator-entered fields for a record that is not in the ledger yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub description: String,
    pub code: String,
    pub purchase_price: Money,
    pub selling_price: Money,
    pub inventory_count: i64,
}

impl NewItem {
    /// Parses the raw strings returned by the new-item form.
    ///
    /// Missing description or code is treated as empty. Missing numbers are
    /// a `Required` error.
    pub fn from_fields(values: &FieldValues) -> ValidationResult<NewItem> {
        let text = |key: &str| values.get(key).unwrap_or_default().trim().to_string();
        let price = |key: &str| validation::parse_price(key, values.get(key));

        Ok(NewItem {
            description: text(FIELD_DESCRIPTION),
            code: text(FIELD_CODE),
            purchase_price: price(FIELD_PURCHASE_PRICE)?,
            selling_price: price(FIELD_SELLING_PRICE)?,
            inventory_count: validation::parse_count(FIELD_INVENTORY, values.get(FIELD_INVENTORY))?,
        })
    }
}

// =============================================================================
// Form Schema
// =============================================================================

pub const FIELD_DESCRIPTION: &str = "Description";
pub const FIELD_CODE: &str = "Code";
pub const FIELD_PURCHASE_PRICE: &str = "Purchase Price";
pub const FIELD_SELLING_PRICE: &str = "Selling Price";
pub const FIELD_INVENTORY: &str = "Inventory";

/// What kind of value a form field holds. Drives prompting hints only;
/// parsing happens in [`NewItem::from_fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Non-negative decimal with two places.
    Decimal,
    /// Non-negative whole number.
    Count,
}

/// One field of a form presented through [`crate::UserInterface::prompt_fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key under which the value is returned. Doubles as the label.
    pub key: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Short input hint shown next to the label.
    pub fn hint(&self) -> &'static str {
        match self.kind {
            FieldKind::Text => "text",
            FieldKind::Decimal => "0.00",
            FieldKind::Count => "0",
        }
    }
}

/// Schema of the new-item form, in display order.
pub const NEW_ITEM_FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        key: FIELD_DESCRIPTION,
        kind: FieldKind::Text,
    },
    FieldSpec {
        key: FIELD_CODE,
        kind: FieldKind::Text,
    },
    FieldSpec {
        key: FIELD_PURCHASE_PRICE,
        kind: FieldKind::Decimal,
    },
    FieldSpec {
        key: FIELD_SELLING_PRICE,
        kind: FieldKind::Decimal,
    },
    FieldSpec {
        key: FIELD_INVENTORY,
        kind: FieldKind::Count,
    },
];

/// Raw values submitted for a form, keyed by [`FieldSpec::key`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
    pub fn new() -> Self {
        FieldValues::default()
    }

    /// Sets a value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`FieldValues::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn pen(count: i64) -> NewItem {
        NewItem {
            description: "Pen".to_string(),
            code: "P1".to_string(),
            purchase_price: Money::from_cents(100),
            selling_price: Money::from_cents(200),
            inventory_count: count,
        }
    }

    #[test]
    fn test_register_sets_defaults() {
        let record = InventoryRecord::register("123", pen(5)).unwrap();
        assert_eq!(record.barcode, "123");
        assert_eq!(record.inventory_count, 5);
        assert_eq!(record.remaining_balance, 5);
        assert_eq!(record.income, Money::zero());
    }

    #[test]
    fn test_register_trims_barcode() {
        let record = InventoryRecord::register("  0042 \n", pen(1)).unwrap();
        assert_eq!(record.barcode, "0042");
    }

    #[test]
    fn test_register_rejects_negative_fields() {
        let mut item = pen(5);
        item.selling_price = Money::from_cents(-1);
        let err = InventoryRecord::register("123", item).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::MustBeNonNegative { .. })));

        let err = InventoryRecord::register("123", pen(-1)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_register_rejects_empty_barcode() {
        assert!(InventoryRecord::register("   ", pen(1)).is_err());
    }

    #[test]
    fn test_new_item_from_fields() {
        let values = FieldValues::new()
            .with(FIELD_DESCRIPTION, "Pen")
            .with(FIELD_CODE, "P1")
            .with(FIELD_PURCHASE_PRICE, "1.0")
            .with(FIELD_SELLING_PRICE, "2")
            .with(FIELD_INVENTORY, "10");

        let item = NewItem::from_fields(&values).unwrap();
        assert_eq!(item.description, "Pen");
        assert_eq!(item.purchase_price.cents(), 100);
        assert_eq!(item.selling_price.cents(), 200);
        assert_eq!(item.inventory_count, 10);
    }

    #[test]
    fn test_new_item_from_fields_missing_number() {
        let values = FieldValues::new()
            .with(FIELD_PURCHASE_PRICE, "1.0")
            .with(FIELD_SELLING_PRICE, "2");

        let err = NewItem::from_fields(&values).unwrap_err();
        assert_eq!(err.field(), FIELD_INVENTORY);
    }

    #[test]
    fn test_check_invariants() {
        let mut record = InventoryRecord::register("123", pen(3)).unwrap();
        assert!(record.check_invariants().is_ok());

        record.remaining_balance = -1;
        assert!(matches!(
            record.check_invariants(),
            Err(CoreError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_margin_and_stock_value() {
        let record = InventoryRecord::register("123", pen(4)).unwrap();
        assert_eq!(record.margin().cents(), 100);
        assert_eq!(record.stock_value().cents(), 400);
    }

    #[test]
    fn test_detail_lines_order() {
        let record = InventoryRecord::register("999", pen(2)).unwrap();
        let lines = record.detail_lines();
        assert_eq!(lines[1], "Description: Pen");
        assert_eq!(lines[3], "Purchase Price: $1.00");
        assert_eq!(lines.last().unwrap(), "Income: $0.00");
    }

    #[test]
    fn test_record_json_shape() {
        let record = InventoryRecord::register("123", pen(1)).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["barcode"], "123");
        assert_eq!(json["purchase_price"], 100);
    }
}
