//! # Management Commands
//!
//! Back-office commands over stored receipts: browse, void, re-weigh and
//! report.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Receipts                                    From [2024-03-01] To [   ] │
//! │  ───────────────────────────────────────────────────────────────────── │
//! │  #1042  2024-03-14 09:12  Walk-in        $423.00          [Void] [Edit] │
//! │  #1041  2024-03-14 08:55  Ray's Hauling  $1,210.45  VOID                │
//! │  ───────────────────────────────────────────────────────────────────── │
//! │  Summary: [Day] [Month] [Year]                                          │
//! │  Total     2 tickets     1,345.00 LB     $1,633.45                      │
//! │  03/2024   2 tickets     1,345.00 LB     $1,633.45                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use yard_core::validation::{parse_report_date, parse_weight};
use yard_core::{
    DateRange, Granularity, LineEdit, Money, PeriodSummary, Receipt, ReceiptDetail, Weight,
};

/// Filters for the receipt list; dates are `YYYY-MM-DD`, both inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptFilter {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub include_voided: bool,
}

/// New scale readings for one stored line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEditRequest {
    pub line_id: i64,
    pub gross: String,
    pub tare: String,
}

/// Result of a void request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidResponse {
    pub receipt_id: i64,
    /// `false` when the receipt was already voided
    pub changed: bool,
}

/// One row of the summary table, with its display label and the amounts
/// formatted for the screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub label: String,
    pub period: String,
    pub receipt_count: i64,
    pub net_weight: Weight,
    pub subtotal: Money,
    pub total_amount: Money,
    /// e.g. `1,345.00 LB`
    pub net_weight_text: String,
    /// e.g. `$1,633.45`
    pub total_amount_text: String,
}

impl SummaryRow {
    fn new(row: PeriodSummary, granularity: Granularity, config: &ConfigState) -> Self {
        SummaryRow {
            label: row.display_label(granularity),
            net_weight_text: config.format_weight(row.net_weight),
            total_amount_text: config.format_currency(row.total_amount),
            period: row.period,
            receipt_count: row.receipt_count,
            net_weight: row.net_weight,
            subtotal: row.subtotal,
            total_amount: row.total_amount,
        }
    }
}

/// Lists receipts newest first.
pub async fn list_receipts(db: &DbState, filter: ReceiptFilter) -> Result<Vec<Receipt>, ApiError> {
    debug!(?filter, "list_receipts command");

    let range = parse_range(filter.from.as_deref(), filter.to.as_deref())?;
    let receipts = db
        .inner()
        .receipts()
        .list_receipts(range, filter.include_voided)
        .await?;

    Ok(receipts)
}

/// Gets a receipt with its lines.
pub async fn get_receipt(db: &DbState, receipt_id: i64) -> Result<ReceiptDetail, ApiError> {
    debug!(receipt_id, "get_receipt command");
    Ok(db.inner().receipts().get_receipt(receipt_id).await?)
}

/// Voids a receipt. Voiding twice is not an error.
pub async fn void_receipt(db: &DbState, receipt_id: i64) -> Result<VoidResponse, ApiError> {
    debug!(receipt_id, "void_receipt command");

    let changed = db.inner().receipts().void_receipt(receipt_id).await?;
    if changed {
        info!(receipt_id, "Receipt voided from management screen");
    }

    Ok(VoidResponse {
        receipt_id,
        changed,
    })
}

/// Re-weighs lines of a stored receipt and returns the updated receipt.
///
/// Every reading is parsed before anything is written, so one bad entry
/// rejects the whole edit.
pub async fn update_receipt_lines(
    db: &DbState,
    receipt_id: i64,
    edits: Vec<LineEditRequest>,
) -> Result<ReceiptDetail, ApiError> {
    debug!(receipt_id, edits = edits.len(), "update_receipt_lines command");

    let edits = edits
        .iter()
        .map(|edit| {
            Ok::<_, ApiError>(LineEdit {
                line_id: edit.line_id,
                gross: parse_weight("gross", &edit.gross)?,
                tare: parse_weight("tare", &edit.tare)?,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    let detail = db
        .inner()
        .receipts()
        .update_receipt_lines(receipt_id, &edits)
        .await?;

    Ok(detail)
}

/// Totals per day, month or year, Total row first.
///
/// `granularity` accepts `day`, `month` or `year` (and the report names
/// `daily`, `monthly`, `annual`).
pub async fn summary(
    db: &DbState,
    config: &ConfigState,
    granularity: &str,
    from: Option<String>,
    to: Option<String>,
) -> Result<Vec<SummaryRow>, ApiError> {
    debug!(granularity, "summary command");

    let granularity: Granularity = granularity.parse()?;
    let range = parse_range(from.as_deref(), to.as_deref())?;

    let rows = db.inner().receipts().aggregate_in(granularity, range).await?;

    Ok(rows
        .into_iter()
        .map(|row| SummaryRow::new(row, granularity, config))
        .collect())
}

fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<DateRange, ApiError> {
    let parse = |field: &str, input: Option<&str>| match input {
        Some(text) if !text.trim().is_empty() => parse_report_date(field, text).map(Some),
        _ => Ok(None),
    };

    let range = DateRange {
        from: parse("from", from)?,
        to: parse("to", to)?,
    };

    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(ApiError::validation("from date is after to date"));
        }
    }

    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use yard_core::{
        ClientSnapshot, DraftReceipt, OperatorSnapshot, UnitPrice, GRAND_TOTAL_LABEL,
    };
    use yard_db::{Database, DbConfig};

    async fn setup() -> DbState {
        DbState::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    async fn issue(db: &DbState, date: (i32, u32, u32), lines: &[(i64, i64)]) -> ReceiptDetail {
        let mut draft = DraftReceipt::new();
        for (gross, tare) in lines {
            draft
                .add_line(
                    "Bare Bright",
                    UnitPrice::from_mills(4_700),
                    Weight::from_pounds(*gross),
                    Weight::from_pounds(*tare),
                )
                .unwrap();
        }
        let issue_time = NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let commit = draft
            .commit(
                &ClientSnapshot {
                    code: "000001".to_string(),
                    name: "Walk-in".to_string(),
                },
                &OperatorSnapshot {
                    email: "counter@yard.local".to_string(),
                    display_name: "Counter".to_string(),
                },
                issue_time,
            )
            .unwrap();
        db.inner().receipts().create_receipt(&commit).await.unwrap()
    }

    #[tokio::test]
    async fn test_list_and_filter() {
        let db = setup().await;
        issue(&db, (2024, 3, 1), &[(100, 10)]).await;
        let second = issue(&db, (2024, 3, 2), &[(50, 0)]).await;

        let all = list_receipts(&db, ReceiptFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.receipt.id);

        let day = list_receipts(
            &db,
            ReceiptFilter {
                from: Some("2024-03-02".to_string()),
                to: Some("2024-03-02".to_string()),
                include_voided: false,
            },
        )
        .await
        .unwrap();
        assert_eq!(day.len(), 1);

        let err = list_receipts(
            &db,
            ReceiptFilter {
                from: Some("03/02/2024".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = list_receipts(
            &db,
            ReceiptFilter {
                from: Some("2024-03-05".to_string()),
                to: Some("2024-03-01".to_string()),
                include_voided: false,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_void_is_idempotent() {
        let db = setup().await;
        let detail = issue(&db, (2024, 3, 1), &[(100, 10)]).await;
        let id = detail.receipt.id;

        assert!(void_receipt(&db, id).await.unwrap().changed);
        assert!(!void_receipt(&db, id).await.unwrap().changed);
        assert!(!void_receipt(&db, 9_999).await.unwrap().changed);

        assert!(list_receipts(&db, ReceiptFilter::default()).await.unwrap().is_empty());
        let with_voided = list_receipts(
            &db,
            ReceiptFilter {
                include_voided: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(with_voided.len(), 1);
        assert!(with_voided[0].voided);
    }

    #[tokio::test]
    async fn test_reweigh_stored_line() {
        let db = setup().await;
        let detail = issue(&db, (2024, 3, 1), &[(100, 10), (20, 0)]).await;
        let line_id = detail.lines[0].id;

        let updated = update_receipt_lines(
            &db,
            detail.receipt.id,
            vec![LineEditRequest {
                line_id,
                gross: "110".to_string(),
                tare: "10".to_string(),
            }],
        )
        .await
        .unwrap();

        assert_eq!(updated.lines[0].net, Weight::from_pounds(100));
        assert_eq!(updated.lines[0].total, Money::from_cents(47_000));
        assert_eq!(updated.receipt.subtotal, Money::from_cents(47_000 + 9_400));
    }

    #[tokio::test]
    async fn test_reweigh_rejects_bad_input_and_voided() {
        let db = setup().await;
        let detail = issue(&db, (2024, 3, 1), &[(100, 10)]).await;
        let id = detail.receipt.id;
        let line_id = detail.lines[0].id;

        let err = update_receipt_lines(
            &db,
            id,
            vec![LineEditRequest {
                line_id,
                gross: "-5".to_string(),
                tare: "0".to_string(),
            }],
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_receipt(&db, id).await.unwrap(), detail);

        void_receipt(&db, id).await.unwrap();
        let err = update_receipt_lines(
            &db,
            id,
            vec![LineEditRequest {
                line_id,
                gross: "120".to_string(),
                tare: "10".to_string(),
            }],
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
    }

    #[tokio::test]
    async fn test_summary_rows() {
        let db = setup().await;
        let config = ConfigState::default();
        issue(&db, (2024, 3, 1), &[(100, 10)]).await;
        issue(&db, (2024, 3, 20), &[(50, 0)]).await;
        issue(&db, (2024, 4, 2), &[(20, 0)]).await;

        let rows = summary(&db, &config, "month", None, None).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, GRAND_TOTAL_LABEL);
        assert_eq!(rows[0].receipt_count, 3);
        assert_eq!(rows[0].net_weight, Weight::from_pounds(160));
        assert_eq!(rows[0].net_weight_text, "160.00 LB");
        // 160 lb × $4.70
        assert_eq!(rows[0].total_amount_text, "$752.00");
        assert_eq!(rows[1].label, "04/2024");
        assert_eq!(rows[2].label, "03/2024");
        assert_eq!(rows[2].receipt_count, 2);

        let march = summary(
            &db,
            &config,
            "daily",
            Some("2024-03-01".to_string()),
            Some("2024-03-31".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(march.len(), 3);
        assert_eq!(march[0].receipt_count, 2);

        let err = summary(&db, &config, "weekly", None, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_summary_empty_store() {
        let db = setup().await;
        let config = ConfigState::default();
        let rows = summary(&db, &config, "year", None, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].receipt_count, 0);
        assert_eq!(rows[0].total_amount, Money::zero());
        assert_eq!(rows[0].total_amount_text, "$0.00");
    }
}
