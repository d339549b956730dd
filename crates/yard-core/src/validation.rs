//! # Validation Module
//!
//! Input parsing and business rule checks for Yard Ticket.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Keypad / text input                                          │
//! │  └── Raw strings: "100", "4.70", ""                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── parse_weight / parse_unit_price (reject, never coerce to 0)       │
//! │  ├── validate_material_name, validate_weight, ...                      │
//! │  └── resolve_unit_price (price adjustment policy + catalog bounds)     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use yard_core::validation::{parse_unit_price, parse_weight};
//!
//! let gross = parse_weight("gross", "100.5").unwrap();
//! assert_eq!(gross.hundredths(), 10_050);
//!
//! let price = parse_unit_price("4.70").unwrap();
//! assert_eq!(price.mills(), 4_700);
//!
//! // Blank input is an error, not zero
//! assert!(parse_weight("tare", "").is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::UnitPrice;
use crate::types::Material;
use crate::weight::Weight;
use crate::MAX_DRAFT_LINES;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest material name accepted on a line.
const MAX_MATERIAL_NAME_LEN: usize = 100;

/// Integer digits accepted by the fixed-point parser.
const MAX_INTEGER_DIGITS: usize = 9;

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Parses a non-negative decimal string into a fixed-point integer with
/// `decimals` implied fractional digits.
///
/// ## Rules
/// - Blank input is `Required` (no silent zero)
/// - A leading minus sign is `Negative`
/// - Digits with at most one `.`; at most `decimals` fractional digits
///
/// ## Example
/// ```rust
/// use yard_core::validation::parse_fixed;
///
/// assert_eq!(parse_fixed("gross", "12.5", 2).unwrap(), 1_250);
/// assert_eq!(parse_fixed("gross", ".75", 2).unwrap(), 75);
/// assert!(parse_fixed("gross", "12.555", 2).is_err());
/// ```
pub fn parse_fixed(field: &str, input: &str, decimals: u32) -> ValidationResult<i64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if input.starts_with('-') {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    let invalid = |reason: String| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason,
    };

    let (whole, frac) = match input.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (input, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("must be a number".to_string()));
    }

    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("must be a number".to_string()));
    }

    if frac.len() > decimals as usize {
        return Err(invalid(format!(
            "at most {} decimal places allowed",
            decimals
        )));
    }

    if whole.trim_start_matches('0').len() > MAX_INTEGER_DIGITS {
        return Err(invalid("value is too large".to_string()));
    }

    let scale = 10_i64.pow(decimals);
    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| invalid("must be a number".to_string()))?
    };

    // Right-pad the fraction: "5" with 2 decimals is 50 hundredths.
    let frac_value: i64 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = decimals as usize);
        padded
            .parse()
            .map_err(|_| invalid("must be a number".to_string()))?
    };

    Ok(whole_value * scale + frac_value)
}

/// Parses a scale reading in pounds (up to 2 decimals).
pub fn parse_weight(field: &str, input: &str) -> ValidationResult<Weight> {
    parse_fixed(field, input, 2).map(Weight::from_hundredths)
}

/// Parses a price in dollars per pound (up to 3 decimals).
pub fn parse_unit_price(input: &str) -> ValidationResult<UnitPrice> {
    parse_fixed("unit_price", input, 3).map(UnitPrice::from_mills)
}

/// Parses a report date in `YYYY-MM-DD` form.
pub fn parse_report_date(field: &str, input: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a material name on a ticket line.
///
/// ## Rules
/// - Must not be blank
/// - At most 100 characters
pub fn validate_material_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "material_name".to_string(),
        });
    }

    if name.chars().count() > MAX_MATERIAL_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "material_name".to_string(),
            max: MAX_MATERIAL_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a weight (gross or tare).
///
/// Zero is allowed: an empty tare is common for loose material dumped
/// straight on the platform.
pub fn validate_weight(field: &str, weight: Weight) -> ValidationResult<()> {
    if weight.hundredths() < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (material taken for free).
pub fn validate_unit_price(price: UnitPrice) -> ValidationResult<()> {
    if price.mills() < 0 {
        return Err(ValidationError::Negative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates that one more line fits on the draft.
pub fn validate_draft_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_DRAFT_LINES {
        return Err(ValidationError::OutOfRange {
            field: "draft lines".to_string(),
            min: 0,
            max: MAX_DRAFT_LINES as i64,
        });
    }

    Ok(())
}

/// Validates a client display name.
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Price Policy
// =============================================================================

/// Picks the unit price for a new line.
///
/// ## Rules
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  override?  ── no ──► catalog price                                    │
/// │      │                                                                  │
/// │     yes                                                                 │
/// │      │                                                                  │
/// │  equals catalog price? ── yes ──► catalog price                         │
/// │      │                                                                  │
/// │      no                                                                 │
/// │      │                                                                  │
/// │  adjustment permitted? ── no ──► PriceAdjustmentNotPermitted            │
/// │      │                                                                  │
/// │     yes                                                                 │
/// │      │                                                                  │
/// │  within [min, max]? ── no ──► PriceOutOfBounds   (max = 0: unbounded)   │
/// │      │                                                                  │
/// │     yes ──► override                                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn resolve_unit_price(
    material: &Material,
    price_override: Option<UnitPrice>,
    adjustment_permitted: bool,
) -> ValidationResult<UnitPrice> {
    let price = match price_override {
        None => return Ok(material.unit_price),
        Some(price) if price == material.unit_price => return Ok(price),
        Some(price) => price,
    };

    validate_unit_price(price)?;

    if !adjustment_permitted {
        return Err(ValidationError::PriceAdjustmentNotPermitted {
            material: material.name.clone(),
        });
    }

    let below_min = price < material.min_unit_price;
    let above_max = !material.max_unit_price.is_zero() && price > material.max_unit_price;

    if below_min || above_max {
        return Err(ValidationError::PriceOutOfBounds {
            material: material.name.clone(),
            price: price.to_string(),
            min: material.min_unit_price.to_string(),
            max: material.max_unit_price.to_string(),
        });
    }

    Ok(price)
}

// =============================================================================
// Unit Tests
// =============================================================================
