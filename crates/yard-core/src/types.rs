//! # Domain Types
//!
//! Core domain types used throughout Yard Ticket.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Receipt      │   │  ReceiptLine    │   │ ReceiptDetail   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │◄──│  receipt_id FK  │   │  receipt        │       │
//! │  │  withdraw_code  │   │  material_name  │   │  lines (order)  │       │
//! │  │  client snapshot│   │  gross / tare   │   └─────────────────┘       │
//! │  │  subtotal       │   │  net / total    │                              │
//! │  │  voided         │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Reference data (read-only here)                                        │
//! │  ┌──────────┐  ┌──────────┐  ┌──────────────────┐  ┌──────────┐        │
//! │  │  Client  │  │ Operator │  │ MaterialCategory │──│ Material │        │
//! │  └──────────┘  └──────────┘  └──────────────────┘  └──────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A receipt copies the client code/name and the operator's display name at
//! commit time. Renaming a client later never rewrites old tickets.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::line::calculate_line;
use crate::money::{Money, UnitPrice};
use crate::validation::ValidationResult;
use crate::weight::Weight;

// =============================================================================
// Receipt Status
// =============================================================================

/// Lifecycle of a committed receipt: `Open → Voided`, no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Open,
    Voided,
}

impl ReceiptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptStatus::Open => "open",
            ReceiptStatus::Voided => "voided",
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A committed receipt header.
///
/// `issue_time` is yard-local wall-clock time; daily and monthly reports
/// group on its textual prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Receipt {
    /// Ticket number, assigned by the store.
    pub id: i64,
    #[ts(as = "String")]
    pub issue_time: NaiveDateTime,
    /// Operator display name at commit time.
    pub issued_by: String,
    pub ticketing_method: String,
    /// Six-digit label printed on the ticket. Not unique.
    pub withdraw_code: String,
    pub client_code: String,
    pub client_name: String,
    pub subtotal: Money,
    pub rounding_amount: Money,
    pub voided: bool,
    /// Stored and displayed only.
    pub withdrawn: bool,
}

impl Receipt {
    pub fn status(&self) -> ReceiptStatus {
        if self.voided {
            ReceiptStatus::Voided
        } else {
            ReceiptStatus::Open
        }
    }

    /// Fails with [`CoreError::ReceiptVoided`] once the receipt is voided.
    pub fn ensure_editable(&self) -> CoreResult<()> {
        match self.status() {
            ReceiptStatus::Open => Ok(()),
            ReceiptStatus::Voided => Err(CoreError::ReceiptVoided {
                receipt_id: self.id,
            }),
        }
    }
}

// =============================================================================
// Receipt Line
// =============================================================================

/// A weighed material on a committed receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ReceiptLine {
    pub id: i64,
    pub receipt_id: i64,
    pub material_name: String,
    pub unit_price: UnitPrice,
    pub gross: Weight,
    pub tare: Weight,
    pub net: Weight,
    pub total: Money,
}

impl ReceiptLine {
    /// Replaces the scale readings and recomputes `net` and `total`.
    ///
    /// The unit price stays what it was at commit time. On error the line
    /// is unchanged.
    pub fn reweigh(&mut self, gross: Weight, tare: Weight) -> ValidationResult<()> {
        let amounts = calculate_line(self.unit_price, gross, tare)?;
        self.gross = gross;
        self.tare = tare;
        self.net = amounts.net;
        self.total = amounts.total;
        Ok(())
    }
}

/// Header plus lines in insertion order.
///
/// This is everything a ticket renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptDetail {
    pub receipt: Receipt,
    pub lines: Vec<ReceiptLine>,
}

impl ReceiptDetail {
    /// Sum of the line net weights.
    pub fn total_net(&self) -> Weight {
        self.lines.iter().map(|l| l.net).sum()
    }
}

/// New scale readings for one committed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineEdit {
    pub line_id: i64,
    pub gross: Weight,
    pub tare: Weight,
}

// =============================================================================
// Listing Filter
// =============================================================================

/// Inclusive issue-date range for receipt listings. Open ends are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DateRange {
    #[ts(as = "Option<String>")]
    pub from: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn all() -> Self {
        DateRange::default()
    }

    /// A single calendar day.
    pub fn day(date: NaiveDate) -> Self {
        DateRange {
            from: Some(date),
            to: Some(date),
        }
    }
}

// =============================================================================
// Reference Data
// =============================================================================

/// A seller known to the yard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Client {
    pub id: i64,
    /// Six-digit client code.
    pub code: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Driver licence or other ID document number.
    pub id_number: Option<String>,
    pub deleted: bool,
}

impl Client {
    pub fn snapshot(&self) -> ClientSnapshot {
        ClientSnapshot {
            code: self.code.clone(),
            name: self.name.clone(),
        }
    }
}

/// A staff member who issues tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Operator {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub deleted: bool,
}

impl Operator {
    pub fn snapshot(&self) -> OperatorSnapshot {
        OperatorSnapshot {
            email: self.email.clone(),
            display_name: self.name.clone(),
        }
    }
}

/// Grouping shown as a tab on the material picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MaterialCategory {
    pub id: i64,
    pub name: String,
    pub sort_order: i64,
}

/// A priced catalog material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Material {
    pub id: i64,
    pub category_id: i64,
    pub item_code: String,
    pub name: String,
    /// Pricing unit, `LB` for everything the yard buys today.
    pub unit: String,
    pub unit_price: UnitPrice,
    pub min_unit_price: UnitPrice,
    /// Zero means no upper bound.
    pub max_unit_price: UnitPrice,
    pub deleted: bool,
}

// =============================================================================
// Commit Snapshots
// =============================================================================

/// Client fields frozen into a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientSnapshot {
    pub code: String,
    pub name: String,
}

/// Operator fields frozen into a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OperatorSnapshot {
    pub email: String,
    pub display_name: String,
}

impl OperatorSnapshot {
    /// The name printed as "issued by": the display name, or the email when
    /// no name was set up.
    pub fn issued_by(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.email
        } else {
            &self.display_name
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(voided: bool) -> Receipt {
        Receipt {
            id: 7,
            issue_time: NaiveDate::from_ymd_opt(2026, 3, 14)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            issued_by: "Dana".to_string(),
            ticketing_method: "Print".to_string(),
            withdraw_code: "123456".to_string(),
            client_code: "000001".to_string(),
            client_name: "Walk-in".to_string(),
            subtotal: Money::from_cents(42_300),
            rounding_amount: Money::from_cents(42_300),
            voided,
            withdrawn: false,
        }
    }

    #[test]
    fn test_receipt_status() {
        assert_eq!(receipt(false).status(), ReceiptStatus::Open);
        assert_eq!(receipt(true).status(), ReceiptStatus::Voided);
        assert_eq!(ReceiptStatus::Voided.as_str(), "voided");
    }

    #[test]
    fn test_ensure_editable() {
        assert!(receipt(false).ensure_editable().is_ok());
        assert!(matches!(
            receipt(true).ensure_editable(),
            Err(CoreError::ReceiptVoided { receipt_id: 7 })
        ));
    }

    #[test]
    fn test_reweigh_recomputes_derived_fields() {
        let mut line = ReceiptLine {
            id: 1,
            receipt_id: 7,
            material_name: "Copper".to_string(),
            unit_price: UnitPrice::from_mills(4_700),
            gross: Weight::from_pounds(100),
            tare: Weight::from_pounds(10),
            net: Weight::from_pounds(90),
            total: Money::from_cents(42_300),
        };

        line.reweigh(Weight::from_pounds(120), Weight::from_pounds(10))
            .unwrap();
        assert_eq!(line.net, Weight::from_pounds(110));
        assert_eq!(line.total, Money::from_cents(51_700));

        line.reweigh(Weight::from_pounds(5), Weight::from_pounds(10))
            .unwrap();
        assert_eq!(line.net, Weight::zero());
        assert!(line.total.is_zero());

        let before = line.clone();
        assert!(line
            .reweigh(Weight::from_hundredths(i64::MAX), Weight::zero())
            .is_err());
        assert_eq!(line, before);
    }

    #[test]
    fn test_issued_by_falls_back_to_email() {
        let named = OperatorSnapshot {
            email: "dana@yard.test".to_string(),
            display_name: "Dana".to_string(),
        };
        assert_eq!(named.issued_by(), "Dana");

        let unnamed = OperatorSnapshot {
            email: "dana@yard.test".to_string(),
            display_name: "  ".to_string(),
        };
        assert_eq!(unnamed.issued_by(), "dana@yard.test");
    }
}
