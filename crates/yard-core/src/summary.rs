//! # Period Summaries
//!
//! Rows behind the daily, monthly and annual report screens.
//!
//! ```text
//!   issue_time  "2026-03-14 09:30:00"
//!                ^^^^                  year   (4)
//!                ^^^^^^^               month  (7)
//!                ^^^^^^^^^^            day    (10)
//! ```
//!
//! The store groups non-voided receipts on those prefixes; this module
//! names the granularities and adds the grand-total row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::weight::Weight;

/// Label of the synthetic row that sums every period.
pub const GRAND_TOTAL_LABEL: &str = "Total";

// =============================================================================
// Granularity
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl Granularity {
    /// Length of the `issue_time` prefix that identifies a period.
    pub const fn prefix_len(&self) -> usize {
        match self {
            Granularity::Day => 10,
            Granularity::Month => 7,
            Granularity::Year => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "month" | "monthly" => Ok(Granularity::Month),
            "year" | "annual" | "yearly" => Ok(Granularity::Year),
            _ => Err(ValidationError::NotAllowed {
                field: "granularity".to_string(),
                allowed: vec!["day".to_string(), "month".to_string(), "year".to_string()],
            }),
        }
    }
}

// =============================================================================
// Period Summary
// =============================================================================

/// Totals for one period (or the grand total).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PeriodSummary {
    /// `YYYY-MM-DD`, `YYYY-MM`, `YYYY` or `"Total"`.
    pub period: String,
    pub receipt_count: i64,
    /// Invoiced quantity: sum of line net weights.
    pub net_weight: Weight,
    pub subtotal: Money,
    /// Sum of `rounding_amount`.
    pub total_amount: Money,
}

impl PeriodSummary {
    /// A zeroed row for `period`.
    pub fn empty(period: impl Into<String>) -> Self {
        PeriodSummary {
            period: period.into(),
            receipt_count: 0,
            net_weight: Weight::zero(),
            subtotal: Money::zero(),
            total_amount: Money::zero(),
        }
    }

    pub fn is_grand_total(&self) -> bool {
        self.period == GRAND_TOTAL_LABEL
    }

    /// Period label as the report screens print it.
    ///
    /// Months read `MM/YYYY`; days and years are shown as stored.
    ///
    /// ## Example
    /// ```rust
    /// use yard_core::{Granularity, PeriodSummary};
    ///
    /// let row = PeriodSummary::empty("2026-03");
    /// assert_eq!(row.display_label(Granularity::Month), "03/2026");
    /// ```
    pub fn display_label(&self, granularity: Granularity) -> String {
        if self.is_grand_total() {
            return self.period.clone();
        }

        match granularity {
            Granularity::Month => match self.period.split_once('-') {
                Some((year, month)) => format!("{}/{}", month, year),
                None => self.period.clone(),
            },
            Granularity::Day | Granularity::Year => self.period.clone(),
        }
    }
}

/// Prepends the grand-total row to per-period rows.
///
/// Always returns at least one row: with no receipts the result is a
/// single zeroed `"Total"` row.
pub fn summarize_with_grand_total(rows: Vec<PeriodSummary>) -> Vec<PeriodSummary> {
    let mut total = PeriodSummary::empty(GRAND_TOTAL_LABEL);

    for row in &rows {
        total.receipt_count += row.receipt_count;
        total.net_weight = total.net_weight + row.net_weight;
        total.subtotal += row.subtotal;
        total.total_amount += row.total_amount;
    }

    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(total);
    out.extend(rows);
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(period: &str, count: i64, cents: i64) -> PeriodSummary {
        PeriodSummary {
            period: period.to_string(),
            receipt_count: count,
            net_weight: Weight::from_pounds(count * 10),
            subtotal: Money::from_cents(cents),
            total_amount: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_granularity_parse() {
        assert_eq!("day".parse::<Granularity>().unwrap(), Granularity::Day);
        assert_eq!("Month".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!("annual".parse::<Granularity>().unwrap(), Granularity::Year);
        assert!("week".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_prefix_len() {
        let stamp = "2026-03-14 09:30:00";
        assert_eq!(&stamp[..Granularity::Day.prefix_len()], "2026-03-14");
        assert_eq!(&stamp[..Granularity::Month.prefix_len()], "2026-03");
        assert_eq!(&stamp[..Granularity::Year.prefix_len()], "2026");
    }

    #[test]
    fn test_grand_total_prepended() {
        let rows = vec![row("2026-03", 2, 45_675), row("2026-02", 1, 42_300)];
        let out = summarize_with_grand_total(rows);

        assert_eq!(out.len(), 3);
        assert!(out[0].is_grand_total());
        assert_eq!(out[0].receipt_count, 3);
        assert_eq!(out[0].total_amount, Money::from_cents(87_975));
        assert_eq!(out[0].net_weight, Weight::from_pounds(30));
        assert_eq!(out[1].period, "2026-03");
    }

    #[test]
    fn test_grand_total_of_nothing() {
        let out = summarize_with_grand_total(Vec::new());
        assert_eq!(out, vec![PeriodSummary::empty(GRAND_TOTAL_LABEL)]);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(
            row("2026-03", 1, 0).display_label(Granularity::Month),
            "03/2026"
        );
        assert_eq!(
            row("2026-03-14", 1, 0).display_label(Granularity::Day),
            "2026-03-14"
        );
        assert_eq!(
            PeriodSummary::empty(GRAND_TOTAL_LABEL).display_label(Granularity::Month),
            "Total"
        );
    }
}
