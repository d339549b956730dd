//! # Ticketing Commands
//!
//! Commands for building and committing a ticket at the counter.
//!
//! ## Ticket Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ticket Lifecycle                                     │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐     ┌──────────┐   │
//! │  │  Empty   │────►│  Draft   │────►│ commit_      │────►│ Receipt  │   │
//! │  │  Draft   │     │  Lines   │     │ receipt      │     │ (stored) │   │
//! │  └──────────┘     └──────────┘     └──────────────┘     └──────────┘   │
//! │       ▲                │                  │                            │
//! │       │           add_line                │ success: draft cleared     │
//! │       │           update_line             │ failure: draft kept        │
//! │       │           remove_line             │                            │
//! │       │                │                  │                            │
//! │       └── clear_draft ─┘◄─────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keypad input arrives as text and is parsed here; a bad entry rejects the
//! one operation and leaves the draft as it was.

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{DbState, SessionState, TicketSession};
use yard_core::validation::{parse_unit_price, parse_weight, resolve_unit_price};
use yard_core::{
    Client, DraftLine, LineUpdate, Money, Operator, ReceiptDetail, UnitPrice, ValidationError,
    Weight,
};

/// Draft response: the lines plus running totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub client_code: String,
    pub operator_email: Option<String>,
    pub lines: Vec<DraftLine>,
    pub line_count: usize,
    pub total_net: Weight,
    pub subtotal: Money,
}

impl From<&TicketSession> for DraftResponse {
    fn from(session: &TicketSession) -> Self {
        DraftResponse {
            client_code: session.client_code.clone(),
            operator_email: session.operator_email.clone(),
            lines: session.draft.lines().to_vec(),
            line_count: session.draft.len(),
            total_net: session.draft.total_net(),
            subtotal: session.draft.subtotal(),
        }
    }
}

/// A new line as keyed in at the scale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineRequest {
    /// Material picked from the price board
    pub material_id: i64,

    /// Price typed over the catalog price, if any
    pub unit_price: Option<String>,

    pub gross: String,
    pub tare: String,
}

/// Fields to change on a draft line; `None` keeps the current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLineRequest {
    pub unit_price: Option<String>,
    pub gross: Option<String>,
    pub tare: Option<String>,
}

/// Gets the current draft and selections.
pub fn get_draft(session: &SessionState) -> DraftResponse {
    debug!("get_draft command");
    session.with_session(|s| DraftResponse::from(s))
}

/// Selects the client the ticket will be issued to.
pub async fn select_client(
    db: &DbState,
    session: &SessionState,
    code: String,
) -> Result<Client, ApiError> {
    debug!(code = %code, "select_client command");

    let client = db
        .inner()
        .clients()
        .get_by_code(code.trim())
        .await?
        .ok_or_else(|| ApiError::not_found("Client", &code))?;

    session.with_session_mut(|s| s.client_code = client.code.clone());
    Ok(client)
}

/// Selects the operator who issues the ticket.
pub async fn select_operator(
    db: &DbState,
    session: &SessionState,
    email: String,
) -> Result<Operator, ApiError> {
    debug!(email = %email, "select_operator command");

    let operator = db
        .inner()
        .operators()
        .get_by_email(email.trim())
        .await?
        .ok_or_else(|| ApiError::not_found("Operator", &email))?;

    session.with_session_mut(|s| s.operator_email = Some(operator.email.clone()));
    Ok(operator)
}

/// Adds a weighed material to the draft.
///
/// ## Flow
/// ```text
/// material_id ──► catalog lookup ──► price policy ──► parse gross/tare
///                                                          │
///                                     draft.add_line ◄─────┘
/// ```
///
/// The catalog price is used unless the operator typed a different one, in
/// which case the yard's price adjustment switch and the material's price
/// bounds apply.
pub async fn add_line(
    db: &DbState,
    session: &SessionState,
    request: AddLineRequest,
) -> Result<DraftResponse, ApiError> {
    debug!(material_id = request.material_id, "add_line command");

    let material = db
        .inner()
        .materials()
        .get_by_id(request.material_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Material", &request.material_id.to_string()))?;

    let price_override = parse_optional(request.unit_price.as_deref(), parse_unit_price)?;
    let gross = parse_weight("gross", &request.gross)?;
    let tare = parse_weight("tare", &request.tare)?;

    let permitted = match price_override {
        Some(_) => db.inner().settings().unit_price_adjustment_permitted().await?,
        None => false,
    };
    let unit_price = resolve_unit_price(&material, price_override, permitted)?;

    session.with_session_mut(|s| {
        s.draft.add_catalog_line(&material, unit_price, gross, tare)?;
        Ok::<_, ApiError>(DraftResponse::from(&*s))
    })
}

/// Edits the price or readings of a draft line.
///
/// A price change goes through the same policy as a typed price on
/// `add_line`: the adjustment switch and the material's price bounds.
pub async fn update_line(
    db: &DbState,
    session: &SessionState,
    index: usize,
    request: UpdateLineRequest,
) -> Result<DraftResponse, ApiError> {
    debug!(index, "update_line command");

    let update = LineUpdate {
        unit_price: parse_optional(request.unit_price.as_deref(), parse_unit_price)?,
        gross: parse_optional(request.gross.as_deref(), |s| parse_weight("gross", s))?,
        tare: parse_optional(request.tare.as_deref(), |s| parse_weight("tare", s))?,
    };

    if let Some(price) = update.unit_price {
        let current = session.with_session(|s| {
            s.draft.lines().get(index).map(|line| {
                (
                    line.unit_price(),
                    line.material_id(),
                    line.material_name().to_string(),
                )
            })
        });
        if let Some((current_price, material_id, material_name)) = current {
            if price != current_price {
                check_price_change(db, material_id, material_name, price).await?;
            }
        }
    }

    session.with_session_mut(|s| {
        s.draft.update_line(index, update)?;
        Ok::<_, ApiError>(DraftResponse::from(&*s))
    })
}

/// Removes a line from the draft.
pub fn remove_line(session: &SessionState, index: usize) -> Result<DraftResponse, ApiError> {
    debug!(index, "remove_line command");

    session.with_session_mut(|s| {
        s.draft.remove_line(index)?;
        Ok::<_, ApiError>(DraftResponse::from(&*s))
    })
}

/// Discards every line of the draft. Selections are kept.
pub fn clear_draft(session: &SessionState) -> DraftResponse {
    debug!("clear_draft command");

    session.with_session_mut(|s| {
        s.draft.clear();
        DraftResponse::from(&*s)
    })
}

/// Commits the draft as a receipt.
///
/// ## Steps
/// 1. Copy the draft and selections out of the session
/// 2. Resolve client and operator snapshots
/// 3. `DraftReceipt::commit` (rejects an empty draft)
/// 4. Persist in one transaction
/// 5. Clear the draft, unless it was edited while the receipt was stored
///
/// Any failure leaves the draft untouched so the operator can retry.
pub async fn commit_receipt(
    db: &DbState,
    session: &SessionState,
) -> Result<ReceiptDetail, ApiError> {
    debug!("commit_receipt command");

    let snapshot = session.snapshot();
    if snapshot.draft.is_empty() {
        return Err(yard_core::CoreError::EmptyReceipt.into());
    }

    let client = db
        .inner()
        .clients()
        .get_by_code(&snapshot.client_code)
        .await?
        .ok_or_else(|| ApiError::not_found("Client", &snapshot.client_code))?;

    let operator = match &snapshot.operator_email {
        Some(email) => db
            .inner()
            .operators()
            .get_by_email(email)
            .await?
            .ok_or_else(|| ApiError::not_found("Operator", email))?,
        None => db
            .inner()
            .operators()
            .first_active()
            .await?
            .ok_or_else(|| ApiError::validation("No operator is set up"))?,
    };

    let issue_time = Local::now().naive_local();
    let issue_time = issue_time.with_nanosecond(0).unwrap_or(issue_time);

    let commit = snapshot
        .draft
        .commit(&client.snapshot(), &operator.snapshot(), issue_time)?;

    let detail = db.inner().receipts().create_receipt(&commit).await?;

    let cleared = session.with_session_mut(|s| {
        if s.draft == snapshot.draft {
            s.draft.clear();
            true
        } else {
            false
        }
    });
    if !cleared {
        warn!(
            receipt_id = detail.receipt.id,
            "Draft changed during commit; kept for review"
        );
    }

    info!(
        receipt_id = detail.receipt.id,
        lines = detail.lines.len(),
        subtotal = %detail.receipt.subtotal,
        "Receipt issued"
    );

    Ok(detail)
}

/// Applies the price policy to a changed price on an existing line.
async fn check_price_change(
    db: &DbState,
    material_id: Option<i64>,
    material_name: String,
    price: UnitPrice,
) -> Result<(), ApiError> {
    let permitted = db.inner().settings().unit_price_adjustment_permitted().await?;

    match material_id {
        Some(id) => {
            let material = db
                .inner()
                .materials()
                .get_by_id(id)
                .await?
                .ok_or_else(|| ApiError::not_found("Material", &id.to_string()))?;
            resolve_unit_price(&material, Some(price), permitted)?;
        }
        None if !permitted => {
            return Err(ValidationError::PriceAdjustmentNotPermitted {
                material: material_name,
            }
            .into());
        }
        None => {}
    }

    Ok(())
}

/// Parses an optional keypad field; blank counts as absent.
fn parse_optional<T>(
    input: Option<&str>,
    parse: impl Fn(&str) -> Result<T, ValidationError>,
) -> Result<Option<T>, ValidationError> {
    match input {
        Some(text) if !text.trim().is_empty() => parse(text).map(Some),
        _ => Ok(None),
    }
}
