//! # Validation Module
//!
//! Input validation for barcodes and the new-item form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal form                                                 │
//! │  └── Raw strings, no checks                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── parse_price / parse_count (string → typed)                         │
//! │  └── validate_* (business rules: non-negative, lengths)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledger                                                        │
//! │  └── Barcode uniqueness (DuplicateKey)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockscan_core::validation::{parse_count, validate_barcode};
//!
//! validate_barcode("5449000000996").unwrap();
//! assert_eq!(parse_count("Inventory", Some("10")).unwrap(), 10);
//! ```

use crate::error::ValidationError;
use crate::money::{Money, MoneyParseError};
use crate::types::{
    NewItem, FIELD_CODE, FIELD_DESCRIPTION, FIELD_INVENTORY, FIELD_PURCHASE_PRICE,
    FIELD_SELLING_PRICE,
};
use crate::{MAX_BARCODE_LEN, MAX_CODE_LEN, MAX_DESCRIPTION_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a barcode used as a ledger key.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_BARCODE_LEN`] characters
/// - No control characters (a wedge reader's stray CR/TAB would otherwise
///   become part of the key)
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "Barcode".to_string(),
        });
    }

    if barcode.chars().count() > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: "Barcode".to_string(),
            max: MAX_BARCODE_LEN,
        });
    }

    if barcode.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "Barcode".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(())
}

/// Validates an item description. Empty is allowed.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: FIELD_DESCRIPTION.to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

/// Validates the free-form item code. Empty is allowed.
pub fn validate_code(code: &str) -> ValidationResult<()> {
    if code.trim().chars().count() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: FIELD_CODE.to_string(),
            max: MAX_CODE_LEN,
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price. Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use stockscan_core::validation::validate_price;
/// use stockscan_core::Money;
///
/// assert!(validate_price("Selling Price", Money::from_cents(0)).is_ok());
/// assert!(validate_price("Selling Price", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a stock count. Zero is allowed.
pub fn validate_inventory_count(count: i64) -> ValidationResult<()> {
    if count < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: FIELD_INVENTORY.to_string(),
        });
    }
    Ok(())
}

/// Runs every field rule of the new-item form.
pub fn validate_new_item(item: &NewItem) -> ValidationResult<()> {
    validate_description(&item.description)?;
    validate_code(&item.code)?;
    validate_price(FIELD_PURCHASE_PRICE, item.purchase_price)?;
    validate_price(FIELD_SELLING_PRICE, item.selling_price)?;
    validate_inventory_count(item.inventory_count)?;
    Ok(())
}

// =============================================================================
// Parsers
// =============================================================================

/// Parses a price field. Does not check the sign; see [`validate_price`].
pub fn parse_price(field: &str, raw: Option<&str>) -> ValidationResult<Money> {
    let raw = required(field, raw)?;
    Money::parse_decimal(raw).map_err(|err| match err {
        MoneyParseError::Empty => ValidationError::Required {
            field: field.to_string(),
        },
        other => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: other.to_string(),
        },
    })
}

/// Parses a whole-number field.
///
/// `"10"` and `"10.0"` are both accepted (spreadsheets and pandas like to
/// write counts as floats); `"10.5"` is not.
pub fn parse_count(field: &str, raw: Option<&str>) -> ValidationResult<i64> {
    let raw = required(field, raw)?;
    parse_whole_number(raw).ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a whole number", raw),
    })
}

/// Parses `"10"`, `"-3"` or `"10.000"` into an integer.
pub fn parse_whole_number(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let whole = match raw.split_once('.') {
        Some((whole, fraction))
            if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') =>
        {
            whole
        }
        Some(_) => return None,
        None => raw,
    };
    whole.parse().ok()
}

fn required<'a>(field: &str, raw: Option<&'a str>) -> ValidationResult<&'a str> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("123").is_ok());
        assert!(validate_barcode("5449000000996").is_ok());
        assert!(validate_barcode("https://example.com/item/42").is_ok());

        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("   ").is_err());
        assert!(validate_barcode("12\t3").is_err());
        assert!(validate_barcode(&"9".repeat(MAX_BARCODE_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_description_and_code() {
        assert!(validate_description("").is_ok());
        assert!(validate_description("Ballpoint pen, blue").is_ok());
        assert!(validate_description(&"A".repeat(MAX_DESCRIPTION_LEN + 1)).is_err());

        assert!(validate_code("P1").is_ok());
        assert!(validate_code(&"C".repeat(MAX_CODE_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_inventory_count() {
        assert!(validate_inventory_count(0).is_ok());
        assert!(validate_inventory_count(10).is_ok());
        assert!(validate_inventory_count(-1).is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("Purchase Price", Some("1.0")).unwrap().cents(), 100);
        assert_eq!(
            parse_price("Purchase Price", None),
            Err(ValidationError::Required {
                field: "Purchase Price".to_string()
            })
        );
        assert_eq!(
            parse_price("Purchase Price", Some("  ")),
            Err(ValidationError::Required {
                field: "Purchase Price".to_string()
            })
        );
        assert!(matches!(
            parse_price("Purchase Price", Some("one")),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("Inventory", Some("10")).unwrap(), 10);
        assert_eq!(parse_count("Inventory", Some("10.0")).unwrap(), 10);
        assert_eq!(parse_count("Inventory", Some("-2")).unwrap(), -2);
        assert!(parse_count("Inventory", Some("10.5")).is_err());
        assert!(parse_count("Inventory", Some("10.")).is_err());
        assert!(parse_count("Inventory", Some("ten")).is_err());
        assert!(parse_count("Inventory", None).is_err());
    }

    #[test]
    fn test_validate_new_item() {
        let mut item = NewItem {
            description: "Pen".to_string(),
            code: "P1".to_string(),
            purchase_price: Money::from_cents(100),
            selling_price: Money::from_cents(200),
            inventory_count: 10,
        };
        assert!(validate_new_item(&item).is_ok());

        item.purchase_price = Money::from_cents(-100);
        assert_eq!(
            validate_new_item(&item),
            Err(ValidationError::MustBeNonNegative {
                field: FIELD_PURCHASE_PRICE.to_string()
            })
        );
    }
}
