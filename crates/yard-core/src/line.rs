//! # Line Formula
//!
//! The one place net weight and line total are derived.
//!
//! ```text
//!   net   = max(0, gross - tare)
//!   total = round(net × unit_price, 2)
//! ```
//!
//! Draft lines call it on every edit; committed lines call it again when a
//! ticket is re-weighed from the detail view. Neither stores `net` or
//! `total` independently of the inputs it was computed from.
//!
//! A line total is capped at [`MAX_LINE_TOTAL`] so that a full draft of
//! [`MAX_DRAFT_LINES`] lines still sums without overflow.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{Money, UnitPrice};
use crate::validation::ValidationResult;
use crate::weight::Weight;
use crate::MAX_DRAFT_LINES;

/// Largest total a single line may carry.
pub const MAX_LINE_TOTAL: Money = Money::from_cents(i64::MAX / MAX_DRAFT_LINES as i64);

/// Derived amounts for one weighed material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineAmounts {
    pub net: Weight,
    pub total: Money,
}

/// Computes net weight and total price for a line.
///
/// ## Errors
/// `ValidationError::OutOfRange` when the total would exceed
/// [`MAX_LINE_TOTAL`].
///
/// ## Example
/// ```rust
/// use yard_core::line::calculate_line;
/// use yard_core::{UnitPrice, Weight};
///
/// let amounts = calculate_line(
///     UnitPrice::from_mills(750),
///     Weight::from_pounds(50),
///     Weight::from_pounds(5),
/// )
/// .unwrap();
/// assert_eq!(amounts.net, Weight::from_pounds(45));
/// assert_eq!(amounts.total.cents(), 3_375);
/// ```
pub fn calculate_line(
    unit_price: UnitPrice,
    gross: Weight,
    tare: Weight,
) -> ValidationResult<LineAmounts> {
    let net = gross.net_of(tare);
    let total = unit_price
        .extend(net)
        .filter(|total| *total <= MAX_LINE_TOTAL)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "line total (cents)".to_string(),
            min: 0,
            max: MAX_LINE_TOTAL.cents(),
        })?;

    Ok(LineAmounts { net, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copper_line() {
        let amounts = calculate_line(
            UnitPrice::from_mills(4_700),
            Weight::from_pounds(100),
            Weight::from_pounds(10),
        )
        .unwrap();
        assert_eq!(amounts.net, Weight::from_pounds(90));
        assert_eq!(amounts.total, Money::from_cents(42_300));
    }

    #[test]
    fn test_tare_heavier_than_gross() {
        let amounts = calculate_line(
            UnitPrice::from_mills(4_700),
            Weight::from_pounds(10),
            Weight::from_pounds(100),
        )
        .unwrap();
        assert_eq!(amounts.net, Weight::zero());
        assert_eq!(amounts.total, Money::zero());
    }

    #[test]
    fn test_net_never_negative_over_a_range() {
        for gross in (0..=2_000).step_by(137) {
            for tare in (0..=2_000).step_by(211) {
                let amounts = calculate_line(
                    UnitPrice::from_mills(1_000),
                    Weight::from_hundredths(gross),
                    Weight::from_hundredths(tare),
                )
                .unwrap();
                assert!(amounts.net.hundredths() >= 0);
                assert_eq!(amounts.net.hundredths(), (gross - tare).max(0));
            }
        }
    }

    #[test]
    fn test_fractional_weight_rounds_to_cent() {
        // 33.33 lb × $0.333 = $11.09889 → $11.10
        let amounts = calculate_line(
            UnitPrice::from_mills(333),
            Weight::from_hundredths(3_333),
            Weight::zero(),
        )
        .unwrap();
        assert_eq!(amounts.total.cents(), 1_110);
    }

    #[test]
    fn test_total_at_the_parser_limits_is_rejected() {
        // 999,999,999.99 lb at $999,999,999.999/lb
        let err = calculate_line(
            UnitPrice::from_mills(999_999_999_999),
            Weight::from_hundredths(99_999_999_999),
            Weight::zero(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));

        // 10,000,000 lb at the same price fits in i64 but not under the cap
        assert!(calculate_line(
            UnitPrice::from_mills(999_999_999_999),
            Weight::from_hundredths(1_000_000_000),
            Weight::zero(),
        )
        .is_err());
    }

    #[test]
    fn test_largest_weight_at_board_price_fits() {
        let amounts = calculate_line(
            UnitPrice::from_mills(4_700),
            Weight::from_hundredths(99_999_999_999),
            Weight::zero(),
        )
        .unwrap();
        assert!(amounts.total <= MAX_LINE_TOTAL);
    }
}
