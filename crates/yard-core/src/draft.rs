//! # Draft Receipt
//!
//! The in-progress ticket an operator builds at the counter.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Draft Lifecycle                                   │
//! │                                                                         │
//! │  DraftReceipt::new()  (empty, session start)                           │
//! │        │                                                                │
//! │        ├── add_line()     ──► lines.push(...)                          │
//! │        ├── update_line(i) ──► recompute net/total of line i            │
//! │        ├── remove_line(i) ──► lines.remove(i), order kept              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  commit(client, operator, time) ──► ReceiptCommit   (draft untouched)  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  store persists the commit ──► caller calls clear()                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A draft has no identity and is never written to disk. `commit` only
//! computes what to persist; the caller clears the draft once the store
//! has accepted it, so a storage failure leaves the operator's lines intact.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::line::calculate_line;
use crate::money::{Money, UnitPrice};
use crate::types::{ClientSnapshot, Material, OperatorSnapshot};
use crate::validation::{
    validate_draft_size, validate_material_name, validate_unit_price, validate_weight,
};
use crate::weight::Weight;
use crate::DEFAULT_TICKETING_METHOD;

// =============================================================================
// Draft Line
// =============================================================================

/// One weighed material on the draft.
///
/// Fields are private: `net` and `total` only change together with the
/// inputs they are derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DraftLine {
    /// Catalog material the line was picked from, if any
    material_id: Option<i64>,
    material_name: String,
    unit_price: UnitPrice,
    gross: Weight,
    tare: Weight,
    net: Weight,
    total: Money,
}

impl DraftLine {
    fn new(
        material_id: Option<i64>,
        material_name: String,
        unit_price: UnitPrice,
        gross: Weight,
        tare: Weight,
    ) -> CoreResult<Self> {
        let amounts = calculate_line(unit_price, gross, tare)?;
        Ok(DraftLine {
            material_id,
            material_name,
            unit_price,
            gross,
            tare,
            net: amounts.net,
            total: amounts.total,
        })
    }

    pub fn material_id(&self) -> Option<i64> {
        self.material_id
    }

    pub fn material_name(&self) -> &str {
        &self.material_name
    }

    pub fn unit_price(&self) -> UnitPrice {
        self.unit_price
    }

    pub fn gross(&self) -> Weight {
        self.gross
    }

    pub fn tare(&self) -> Weight {
        self.tare
    }

    pub fn net(&self) -> Weight {
        self.net
    }

    pub fn total(&self) -> Money {
        self.total
    }
}

/// Partial edit of a draft line. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineUpdate {
    pub unit_price: Option<UnitPrice>,
    pub gross: Option<Weight>,
    pub tare: Option<Weight>,
}

// =============================================================================
// Receipt Commit
// =============================================================================

/// Everything the store needs to persist a receipt, minus its identity.
///
/// The store assigns `id` and `withdraw_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ReceiptCommit {
    #[ts(as = "String")]
    pub issue_time: NaiveDateTime,
    pub issued_by: String,
    pub ticketing_method: String,
    pub client_code: String,
    pub client_name: String,
    pub lines: Vec<DraftLine>,
    pub subtotal: Money,
    pub rounding_amount: Money,
}

// =============================================================================
// Draft Receipt
// =============================================================================

/// The ordered working set of unsaved lines for one operator session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DraftReceipt {
    lines: Vec<DraftLine>,
}

impl DraftReceipt {
    /// Creates an empty draft.
    pub fn new() -> Self {
        DraftReceipt { lines: Vec::new() }
    }

    /// Appends a line and returns it with `net` and `total` filled in.
    ///
    /// ## Errors
    /// - `ValidationError::Required` for a blank material name
    /// - `ValidationError::Negative` for a negative price or weight
    /// - `ValidationError::OutOfRange` when the draft is full or the line
    ///   total is too large to price
    ///
    /// On error the draft is unchanged.
    pub fn add_line(
        &mut self,
        material_name: impl Into<String>,
        unit_price: UnitPrice,
        gross: Weight,
        tare: Weight,
    ) -> CoreResult<DraftLine> {
        self.push_line(None, material_name.into(), unit_price, gross, tare)
    }

    /// Appends a line for a catalog material, remembering its id so later
    /// price edits can be checked against the material's bounds.
    ///
    /// `unit_price` is the price already resolved for the material.
    pub fn add_catalog_line(
        &mut self,
        material: &Material,
        unit_price: UnitPrice,
        gross: Weight,
        tare: Weight,
    ) -> CoreResult<DraftLine> {
        self.push_line(
            Some(material.id),
            material.name.clone(),
            unit_price,
            gross,
            tare,
        )
    }

    fn push_line(
        &mut self,
        material_id: Option<i64>,
        material_name: String,
        unit_price: UnitPrice,
        gross: Weight,
        tare: Weight,
    ) -> CoreResult<DraftLine> {
        validate_draft_size(self.lines.len())?;
        validate_material_name(&material_name)?;
        validate_unit_price(unit_price)?;
        validate_weight("gross", gross)?;
        validate_weight("tare", tare)?;

        let line = DraftLine::new(
            material_id,
            material_name.trim().to_string(),
            unit_price,
            gross,
            tare,
        )?;
        self.lines.push(line.clone());
        Ok(line)
    }

    /// Edits the inputs of line `index` and recomputes its derived fields.
    pub fn update_line(&mut self, index: usize, update: LineUpdate) -> CoreResult<DraftLine> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CoreError::LineIndexOutOfRange { index, len })?;

        let unit_price = update.unit_price.unwrap_or(line.unit_price);
        let gross = update.gross.unwrap_or(line.gross);
        let tare = update.tare.unwrap_or(line.tare);

        // Build the replacement first; on error the line is untouched.
        validate_unit_price(unit_price)?;
        validate_weight("gross", gross)?;
        validate_weight("tare", tare)?;
        let updated = DraftLine::new(
            line.material_id,
            line.material_name.clone(),
            unit_price,
            gross,
            tare,
        )?;

        *line = updated.clone();
        Ok(updated)
    }

    /// Removes line `index`; later lines shift down by one.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<DraftLine> {
        if index >= self.lines.len() {
            return Err(CoreError::LineIndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    /// Sum of line totals; zero for an empty draft.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.total).sum()
    }

    /// Sum of line net weights.
    pub fn total_net(&self) -> Weight {
        self.lines.iter().map(|l| l.net).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Materializes the draft for the store. Does not modify `self`.
    ///
    /// `rounding_amount` equals the subtotal: the yard applies no cash
    /// rounding rule.
    ///
    /// ## Errors
    /// `CoreError::EmptyReceipt` when there are no lines.
    pub fn commit(
        &self,
        client: &ClientSnapshot,
        operator: &OperatorSnapshot,
        issue_time: NaiveDateTime,
    ) -> CoreResult<ReceiptCommit> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyReceipt);
        }

        let subtotal = self.subtotal();

        Ok(ReceiptCommit {
            issue_time,
            issued_by: operator.issued_by().to_string(),
            ticketing_method: DEFAULT_TICKETING_METHOD.to_string(),
            client_code: client.code.clone(),
            client_name: client.name.clone(),
            lines: self.lines.clone(),
            subtotal,
            rounding_amount: subtotal,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
