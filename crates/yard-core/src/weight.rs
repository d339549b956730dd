//! # Weight Module
//!
//! Scale readings in hundredths of a pound.
//!
//! The yard scale reports to 0.01 lb; gross, tare and net are all stored at
//! that resolution so that `gross - tare` is exact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

/// A weight in hundredths of a pound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct Weight(i64);

impl Weight {
    /// Creates a weight from hundredths of a pound.
    ///
    /// ## Example
    /// ```rust
    /// use yard_core::weight::Weight;
    ///
    /// let gross = Weight::from_hundredths(10_050); // 100.50 lb
    /// assert_eq!(gross.whole_pounds(), 100);
    /// ```
    #[inline]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Weight(hundredths)
    }

    /// Creates a weight from whole pounds.
    #[inline]
    pub const fn from_pounds(pounds: i64) -> Self {
        Weight(pounds * 100)
    }

    /// Returns the weight in hundredths of a pound.
    #[inline]
    pub const fn hundredths(&self) -> i64 {
        self.0
    }

    /// Returns the whole-pound portion (what the paper ticket prints).
    #[inline]
    pub const fn whole_pounds(&self) -> i64 {
        self.0 / 100
    }

    #[inline]
    pub const fn zero() -> Self {
        Weight(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtracts `tare` from `self`, flooring at zero.
    ///
    /// A tare heavier than the gross reading (operator swapped the two, or
    /// the truck left fuel behind) yields a zero net, never a negative one.
    ///
    /// ## Example
    /// ```rust
    /// use yard_core::weight::Weight;
    ///
    /// let gross = Weight::from_pounds(50);
    /// let tare = Weight::from_pounds(60);
    /// assert_eq!(gross.net_of(tare), Weight::zero());
    /// ```
    #[inline]
    pub fn net_of(&self, tare: Weight) -> Weight {
        Weight((self.0 - tare.0).max(0))
    }
}

/// Shows the weight as `100.50`.
impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Default for Weight {
    fn default() -> Self {
        Weight::zero()
    }
}

impl Add for Weight {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Weight(self.0 + other.0)
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Self {
        iter.fold(Weight::zero(), Add::add)
    }
}
