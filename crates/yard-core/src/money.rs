//! # Money Module
//!
//! Provides `Money` (amounts in cents) and `UnitPrice` (dollars per pound
//! in mills) for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    The Floating Point Problem                           │
//! │                                                                         │
//! │  90 lb × $4.70/lb in f64 = 422.99999999999994                           │
//! │  round(…, 2)             = 423.00   (only by luck of the rounding)      │
//! │                                                                         │
//! │  9000 (0.01 lb) × 4700 (mills) / 1000 = 42300 cents, exactly.          │
//! │                                                                         │
//! │  All amounts stay integers until they are displayed.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use yard_core::money::{Money, UnitPrice};
//! use yard_core::weight::Weight;
//!
//! let price = UnitPrice::from_mills(750);   // $0.750/lb
//! let net = Weight::from_hundredths(4_500); // 45 lb
//! assert_eq!(price.extend(net), Some(Money::from_cents(3_375)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::weight::Weight;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  UnitPrice × net Weight ──► line total ──► subtotal ──► rounding_amount │
/// │                                                 │                       │
/// │                                                 └──► period summaries   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use yard_core::money::Money;
    ///
    /// let total = Money::from_cents(42_300); // $423.00
    /// assert_eq!(total.cents(), 42_300);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

/// Shows the amount as `$423.00` (debugging and CLI output).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Price
// =============================================================================

/// Price per pound in mills (thousandths of a dollar).
///
/// Yard price boards quote three decimals (`$0.185/Lb` for heavy iron),
/// so cents are not fine enough here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct UnitPrice(i64);

impl UnitPrice {
    /// Creates a unit price from mills per pound.
    #[inline]
    pub const fn from_mills(mills: i64) -> Self {
        UnitPrice(mills)
    }

    /// Returns the price in mills per pound.
    #[inline]
    pub const fn mills(&self) -> i64 {
        self.0
    }

    /// Zero price (material taken for free).
    #[inline]
    pub const fn zero() -> Self {
        UnitPrice(0)
    }

    /// Checks if price is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Prices a net weight, rounding half up to the cent.
    ///
    /// ## Implementation
    /// hundredths-of-a-pound × mills gives hundred-thousandths of a dollar;
    /// dividing by 1000 lands on cents. The +500 provides rounding
    /// (500/1000 = 0.5 cent). Only non-negative inputs reach this method,
    /// so half-up and half-away-from-zero agree.
    ///
    /// Returns `None` when the amount does not fit in `Money`.
    ///
    /// ## Example
    /// ```rust
    /// use yard_core::money::UnitPrice;
    /// use yard_core::weight::Weight;
    ///
    /// // 12.35 lb at $0.185/lb = $2.28475 → $2.28
    /// let total = UnitPrice::from_mills(185).extend(Weight::from_hundredths(1_235));
    /// assert_eq!(total.map(|t| t.cents()), Some(228));
    /// ```
    pub fn extend(&self, net: Weight) -> Option<Money> {
        let cents = (net.hundredths() as i128 * self.0 as i128 + 500) / 1000;
        i64::try_from(cents).ok().map(Money::from_cents)
    }
}

/// Shows the price as `$4.700`.
impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}${}.{:03}", sign, abs / 1000, abs % 1000)
    }
}

impl Default for UnitPrice {
    fn default() -> Self {
        UnitPrice::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
