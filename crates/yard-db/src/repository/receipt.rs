//! # Receipt Repository
//!
//! Database operations for committed receipts and their lines.
//!
//! ## Receipt Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Receipt Lifecycle                                 │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── create_receipt(commit) → header + N lines, one transaction     │
//! │         id from AUTOINCREMENT, random 6-digit withdraw code            │
//! │                                                                         │
//! │  2. (OPTIONAL) RE-WEIGH                                                │
//! │     └── update_receipt_lines(id, edits) → lines + subtotal together    │
//! │         rejected once voided                                           │
//! │                                                                         │
//! │  3. (OPTIONAL) VOID                                                    │
//! │     └── void_receipt(id) → voided = 1 (idempotent, terminal)           │
//! │                                                                         │
//! │  Rows are never deleted.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Timelike;
use rand::Rng;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use yard_core::validation::validate_weight;
use yard_core::{
    summarize_with_grand_total, DateRange, Granularity, LineEdit, Money, PeriodSummary,
    Receipt, ReceiptCommit, ReceiptDetail, ReceiptLine,
};

/// Most rows a receipt listing returns.
pub const LIST_LIMIT: i64 = 500;

const RECEIPT_COLUMNS: &str = "id, issue_time, issued_by, ticketing_method, withdraw_code, \
     client_code, client_name, subtotal, rounding_amount, voided, withdrawn";

const LINE_COLUMNS: &str = "id, receipt_id, material_name, unit_price, gross, tare, net, total";

/// Generates the six-digit label printed on a ticket.
///
/// Collisions are allowed: the code is never used as a key.
pub fn generate_withdraw_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Repository for receipt database operations.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Persists a committed draft and assigns its ticket number.
    ///
    /// Header and lines are written in one transaction: readers see the
    /// whole receipt or nothing.
    pub async fn create_receipt(&self, commit: &ReceiptCommit) -> DbResult<ReceiptDetail> {
        if commit.lines.is_empty() {
            return Err(DbError::EmptyReceipt);
        }

        // Stored text has whole seconds; keep the returned value identical.
        let issue_time = commit
            .issue_time
            .with_nanosecond(0)
            .unwrap_or(commit.issue_time);
        let withdraw_code = generate_withdraw_code();

        let mut tx = self.pool.begin().await?;

        let receipt_id = sqlx::query(
            r#"
            INSERT INTO receipts (
                issue_time, issued_by, ticketing_method, withdraw_code,
                client_code, client_name, subtotal, rounding_amount, voided, withdrawn
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, 0)
            "#,
        )
        .bind(issue_time)
        .bind(&commit.issued_by)
        .bind(&commit.ticketing_method)
        .bind(&withdraw_code)
        .bind(&commit.client_code)
        .bind(&commit.client_name)
        .bind(commit.subtotal)
        .bind(commit.rounding_amount)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let mut lines = Vec::with_capacity(commit.lines.len());
        for line in &commit.lines {
            let line_id = sqlx::query(
                r#"
                INSERT INTO receipt_lines (
                    receipt_id, material_name, unit_price, gross, tare, net, total
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(receipt_id)
            .bind(line.material_name())
            .bind(line.unit_price())
            .bind(line.gross())
            .bind(line.tare())
            .bind(line.net())
            .bind(line.total())
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

            lines.push(ReceiptLine {
                id: line_id,
                receipt_id,
                material_name: line.material_name().to_string(),
                unit_price: line.unit_price(),
                gross: line.gross(),
                tare: line.tare(),
                net: line.net(),
                total: line.total(),
            });
        }

        tx.commit().await?;

        info!(
            receipt_id,
            lines = lines.len(),
            subtotal = %commit.subtotal,
            client = %commit.client_code,
            "Receipt created"
        );

        // Built from what was written rather than re-read: once the
        // transaction commits, the caller must see success.
        Ok(ReceiptDetail {
            receipt: Receipt {
                id: receipt_id,
                issue_time,
                issued_by: commit.issued_by.clone(),
                ticketing_method: commit.ticketing_method.clone(),
                withdraw_code,
                client_code: commit.client_code.clone(),
                client_name: commit.client_name.clone(),
                subtotal: commit.subtotal,
                rounding_amount: commit.rounding_amount,
                voided: false,
                withdrawn: false,
            },
            lines,
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets a receipt header by ID.
    pub async fn get_header(&self, id: i64) -> DbResult<Option<Receipt>> {
        let sql = format!("SELECT {} FROM receipts WHERE id = ?1", RECEIPT_COLUMNS);
        let receipt = sqlx::query_as::<_, Receipt>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(receipt)
    }

    /// Gets a receipt with its lines in insertion order.
    ///
    /// Voided receipts are returned too, with `voided = true`.
    pub async fn get_receipt(&self, id: i64) -> DbResult<ReceiptDetail> {
        debug!(receipt_id = id, "Loading receipt");

        let receipt = self
            .get_header(id)
            .await?
            .ok_or_else(|| DbError::not_found("Receipt", id))?;
        let lines = self.get_lines(id).await?;

        Ok(ReceiptDetail { receipt, lines })
    }

    /// Gets the lines of a receipt ordered by line id.
    pub async fn get_lines(&self, receipt_id: i64) -> DbResult<Vec<ReceiptLine>> {
        let sql = format!(
            "SELECT {} FROM receipt_lines WHERE receipt_id = ?1 ORDER BY id",
            LINE_COLUMNS
        );
        let lines = sqlx::query_as::<_, ReceiptLine>(&sql)
            .bind(receipt_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(lines)
    }

    /// Lists receipts issued within `range`, newest first.
    ///
    /// Capped at [`LIST_LIMIT`] rows.
    pub async fn list_receipts(
        &self,
        range: DateRange,
        include_voided: bool,
    ) -> DbResult<Vec<Receipt>> {
        debug!(?range, include_voided, "Listing receipts");

        let sql = format!(
            r#"
            SELECT {}
            FROM receipts
            WHERE (?1 IS NULL OR substr(issue_time, 1, 10) >= ?1)
              AND (?2 IS NULL OR substr(issue_time, 1, 10) <= ?2)
              AND (?3 OR voided = 0)
            ORDER BY id DESC
            LIMIT ?4
            "#,
            RECEIPT_COLUMNS
        );

        let receipts = sqlx::query_as::<_, Receipt>(&sql)
            .bind(range.from)
            .bind(range.to)
            .bind(include_voided)
            .bind(LIST_LIMIT)
            .fetch_all(&self.pool)
            .await?;

        Ok(receipts)
    }

    /// Counts the line rows of a receipt.
    pub async fn count_lines(&self, receipt_id: i64) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM receipt_lines WHERE receipt_id = ?1")
                .bind(receipt_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Counts all receipt rows, voided included.
    pub async fn count_receipts(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Voids a receipt.
    ///
    /// Idempotent: voiding twice, or voiding an unknown id, is a no-op.
    /// Returns whether this call changed anything.
    pub async fn void_receipt(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("UPDATE receipts SET voided = 1 WHERE id = ?1 AND voided = 0")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let changed = result.rows_affected() == 1;
        if changed {
            info!(receipt_id = id, "Receipt voided");
        } else {
            debug!(receipt_id = id, "Void was a no-op");
        }

        Ok(changed)
    }

    /// Re-weighs lines of an open receipt.
    ///
    /// Recomputes net/total of each edited line and the receipt subtotal;
    /// `rounding_amount` is left as it was. Everything commits together.
    ///
    /// ## Errors
    /// - `NotFound` if the receipt or any line id (on this receipt) is missing
    /// - `InvalidState` if the receipt is voided, including a void that
    ///   commits while this edit is in flight
    /// - `Validation` for negative weights or a total too large to price
    pub async fn update_receipt_lines(
        &self,
        id: i64,
        edits: &[LineEdit],
    ) -> DbResult<ReceiptDetail> {
        for edit in edits {
            validate_weight("gross", edit.gross)?;
            validate_weight("tare", edit.tare)?;
        }

        let mut tx = self.pool.begin().await?;

        let header_sql = format!("SELECT {} FROM receipts WHERE id = ?1", RECEIPT_COLUMNS);
        let mut receipt = sqlx::query_as::<_, Receipt>(&header_sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Receipt", id))?;

        receipt.ensure_editable()?;

        let lines_sql = format!(
            "SELECT {} FROM receipt_lines WHERE receipt_id = ?1 ORDER BY id",
            LINE_COLUMNS
        );
        let mut lines = sqlx::query_as::<_, ReceiptLine>(&lines_sql)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        for edit in edits {
            let line = lines
                .iter_mut()
                .find(|l| l.id == edit.line_id)
                .ok_or_else(|| DbError::not_found("ReceiptLine", edit.line_id))?;

            line.reweigh(edit.gross, edit.tare)?;

            sqlx::query(
                r#"
                UPDATE receipt_lines
                SET gross = ?1, tare = ?2, net = ?3, total = ?4
                WHERE id = ?5 AND receipt_id = ?6
                "#,
            )
            .bind(line.gross)
            .bind(line.tare)
            .bind(line.net)
            .bind(line.total)
            .bind(line.id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let subtotal = lines
            .iter()
            .try_fold(Money::zero(), |acc, l| acc.checked_add(l.total))
            .ok_or_else(|| DbError::Validation("receipt subtotal is too large".to_string()))?;

        let updated = sqlx::query("UPDATE receipts SET subtotal = ?1 WHERE id = ?2 AND voided = 0")
            .bind(subtotal)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls back the line updates.
            warn!(receipt_id = id, "Receipt voided during line edit");
            return Err(DbError::receipt_voided(id));
        }

        tx.commit().await?;

        receipt.subtotal = subtotal;
        info!(
            receipt_id = id,
            edited = edits.len(),
            subtotal = %subtotal,
            "Receipt lines updated"
        );

        Ok(ReceiptDetail { receipt, lines })
    }

    // =========================================================================
    // Aggregation
    // =========================================================================

    /// Per-period totals of non-voided receipts, newest period first, with
    /// the grand-total row prepended.
    pub async fn aggregate(&self, granularity: Granularity) -> DbResult<Vec<PeriodSummary>> {
        self.aggregate_in(granularity, DateRange::all()).await
    }

    /// Like [`aggregate`](Self::aggregate), restricted to issue dates in `range`.
    pub async fn aggregate_in(
        &self,
        granularity: Granularity,
        range: DateRange,
    ) -> DbResult<Vec<PeriodSummary>> {
        debug!(%granularity, ?range, "Aggregating receipts");

        let rows = sqlx::query_as::<_, PeriodSummary>(
            r#"
            SELECT
                substr(r.issue_time, 1, ?1) AS period,
                COUNT(*) AS receipt_count,
                COALESCE(SUM((
                    SELECT COALESCE(SUM(l.net), 0)
                    FROM receipt_lines l
                    WHERE l.receipt_id = r.id
                )), 0) AS net_weight,
                COALESCE(SUM(r.subtotal), 0) AS subtotal,
                COALESCE(SUM(r.rounding_amount), 0) AS total_amount
            FROM receipts r
            WHERE r.voided = 0
              AND (?2 IS NULL OR substr(r.issue_time, 1, 10) >= ?2)
              AND (?3 IS NULL OR substr(r.issue_time, 1, 10) <= ?3)
            GROUP BY period
            ORDER BY period DESC
            "#,
        )
        .bind(granularity.prefix_len() as i64)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await?;

        Ok(summarize_with_grand_total(rows))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{NaiveDate, NaiveDateTime};
    use yard_core::{ClientSnapshot, DraftReceipt, OperatorSnapshot, UnitPrice, Weight};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap()
    }

    fn client() -> ClientSnapshot {
        ClientSnapshot {
            code: "000001".to_string(),
            name: "Walk-in".to_string(),
        }
    }

    fn operator() -> OperatorSnapshot {
        OperatorSnapshot {
            email: "counter@yard.local".to_string(),
            display_name: "Counter".to_string(),
        }
    }

    fn copper_draft() -> DraftReceipt {
        let mut draft = DraftReceipt::new();
        draft
            .add_line(
                "Copper",
                UnitPrice::from_mills(4_700),
                Weight::from_pounds(100),
                Weight::from_pounds(10),
            )
            .unwrap();
        draft
    }

    fn two_line_draft() -> DraftReceipt {
        let mut draft = copper_draft();
        draft
            .add_line(
                "Alum Clean",
                UnitPrice::from_mills(750),
                Weight::from_pounds(50),
                Weight::from_pounds(5),
            )
            .unwrap();
        draft
    }

    async fn setup() -> ReceiptRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.receipts()
    }

    async fn commit(
        repo: &ReceiptRepository,
        draft: &DraftReceipt,
        when: NaiveDateTime,
    ) -> ReceiptDetail {
        let commit = draft.commit(&client(), &operator(), when).unwrap();
        repo.create_receipt(&commit).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_single_line_receipt() {
        let repo = setup().await;
        let created = commit(&repo, &copper_draft(), at(2026, 3, 14)).await;

        assert_eq!(created.receipt.subtotal, Money::from_cents(42_300));
        assert_eq!(created.receipt.rounding_amount, Money::from_cents(42_300));
        assert_eq!(created.lines[0].net, Weight::from_pounds(90));
        assert_eq!(created.receipt.withdraw_code.len(), 6);
        assert!(created.receipt.withdraw_code.chars().all(|c| c.is_ascii_digit()));

        let loaded = repo.get_receipt(created.receipt.id).await.unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_create_writes_header_and_all_lines() {
        let repo = setup().await;
        let created = commit(&repo, &two_line_draft(), at(2026, 3, 14)).await;

        assert_eq!(repo.count_receipts().await.unwrap(), 1);
        assert_eq!(repo.count_lines(created.receipt.id).await.unwrap(), 2);
        assert_eq!(created.receipt.subtotal, Money::from_cents(45_675));

        let names: Vec<String> = repo
            .get_lines(created.receipt.id)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.material_name)
            .collect();
        assert_eq!(names, vec!["Copper", "Alum Clean"]);
    }

    #[tokio::test]
    async fn test_empty_commit_writes_nothing() {
        let repo = setup().await;
        let mut commit = copper_draft()
            .commit(&client(), &operator(), at(2026, 3, 14))
            .unwrap();
        commit.lines.clear();

        let err = repo.create_receipt(&commit).await.unwrap_err();
        assert!(matches!(err, DbError::EmptyReceipt));
        assert_eq!(repo.count_receipts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let repo = setup().await;
        let a = commit(&repo, &copper_draft(), at(2026, 3, 14)).await;
        let b = commit(&repo, &copper_draft(), at(2026, 3, 14)).await;
        assert!(b.receipt.id > a.receipt.id);
    }

    #[tokio::test]
    async fn test_get_missing_receipt() {
        let repo = setup().await;
        assert!(matches!(
            repo.get_receipt(404).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_void_is_idempotent() {
        let repo = setup().await;
        let created = commit(&repo, &copper_draft(), at(2026, 3, 14)).await;
        let id = created.receipt.id;

        assert!(repo.void_receipt(id).await.unwrap());
        let once = repo.get_receipt(id).await.unwrap();

        assert!(!repo.void_receipt(id).await.unwrap());
        let twice = repo.get_receipt(id).await.unwrap();

        assert_eq!(once, twice);
        assert!(twice.receipt.voided);

        // Unknown id is a no-op too.
        assert!(!repo.void_receipt(9_999).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_excludes_voided_by_default() {
        let repo = setup().await;
        let kept = commit(&repo, &copper_draft(), at(2026, 3, 14)).await;
        let voided = commit(&repo, &copper_draft(), at(2026, 3, 14)).await;
        repo.void_receipt(voided.receipt.id).await.unwrap();

        let active = repo.list_receipts(DateRange::all(), false).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, kept.receipt.id);

        let all = repo.list_receipts(DateRange::all(), true).await.unwrap();
        assert_eq!(all.len(), 2);
        // Newest first
        assert_eq!(all[0].id, voided.receipt.id);

        let still_there = repo.get_receipt(voided.receipt.id).await.unwrap();
        assert!(still_there.receipt.voided);
    }

    #[tokio::test]
    async fn test_list_date_range() {
        let repo = setup().await;
        commit(&repo, &copper_draft(), at(2026, 2, 28)).await;
        let march = commit(&repo, &copper_draft(), at(2026, 3, 1)).await;
        commit(&repo, &copper_draft(), at(2026, 3, 2)).await;

        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let listed = repo.list_receipts(DateRange::day(day), false).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, march.receipt.id);

        let from_march = DateRange {
            from: Some(day),
            to: None,
        };
        assert_eq!(repo.list_receipts(from_march, false).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_lines_recomputes_subtotal() {
        let repo = setup().await;
        let created = commit(&repo, &two_line_draft(), at(2026, 3, 14)).await;
        let copper = &created.lines[0];
        let alum = created.lines[1].clone();

        let edit = LineEdit {
            line_id: copper.id,
            gross: Weight::from_pounds(120),
            tare: copper.tare,
        };
        let updated = repo
            .update_receipt_lines(created.receipt.id, &[edit])
            .await
            .unwrap();

        // 110 lb × $4.70 = $517.00
        assert_eq!(updated.lines[0].net, Weight::from_pounds(110));
        assert_eq!(updated.lines[0].total, Money::from_cents(51_700));
        assert_eq!(updated.lines[1], alum);
        assert_eq!(updated.receipt.subtotal, Money::from_cents(55_075));
        // Rounding amount keeps its commit-time value.
        assert_eq!(updated.receipt.rounding_amount, Money::from_cents(45_675));

        let loaded = repo.get_receipt(created.receipt.id).await.unwrap();
        assert_eq!(loaded, updated);
    }

    #[tokio::test]
    async fn test_update_lines_rejects_voided_receipt() {
        let repo = setup().await;
        let created = commit(&repo, &copper_draft(), at(2026, 3, 14)).await;
        repo.void_receipt(created.receipt.id).await.unwrap();

        let edit = LineEdit {
            line_id: created.lines[0].id,
            gross: Weight::from_pounds(120),
            tare: Weight::zero(),
        };
        let err = repo
            .update_receipt_lines(created.receipt.id, &[edit])
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidState { .. }));

        let loaded = repo.get_receipt(created.receipt.id).await.unwrap();
        assert_eq!(loaded.lines, created.lines);
    }

    #[tokio::test]
    async fn test_update_lines_not_found() {
        let repo = setup().await;
        let first = commit(&repo, &copper_draft(), at(2026, 3, 14)).await;
        let second = commit(&repo, &copper_draft(), at(2026, 3, 14)).await;

        // A line of another receipt
        let edit = LineEdit {
            line_id: second.lines[0].id,
            gross: Weight::from_pounds(1),
            tare: Weight::zero(),
        };
        assert!(matches!(
            repo.update_receipt_lines(first.receipt.id, &[edit]).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.update_receipt_lines(9_999, &[edit]).await,
            Err(DbError::NotFound { .. })
        ));

        // Nothing changed on either receipt.
        assert_eq!(repo.get_receipt(second.receipt.id).await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_update_lines_rejects_negative_weight() {
        let repo = setup().await;
        let created = commit(&repo, &copper_draft(), at(2026, 3, 14)).await;
        let edit = LineEdit {
            line_id: created.lines[0].id,
            gross: Weight::from_hundredths(-100),
            tare: Weight::zero(),
        };
        assert!(matches!(
            repo.update_receipt_lines(created.receipt.id, &[edit]).await,
            Err(DbError::Validation(_))
        ));
    }

    /// Makes SQLite abort any statement matching `when` on `receipt_lines`.
    async fn reject_lines(repo: &ReceiptRepository, event: &str, when: &str) {
        let sql = format!(
            "CREATE TRIGGER reject_line BEFORE {} ON receipt_lines WHEN {} \
             BEGIN SELECT RAISE(ABORT, 'line rejected'); END",
            event, when
        );
        sqlx::query(&sql).execute(&repo.pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_line_insert_leaves_no_receipt() {
        let repo = setup().await;
        reject_lines(&repo, "INSERT", "NEW.material_name = 'Alum Clean'").await;

        // Header and the copper line are written before the alum line fails.
        let ticket = two_line_draft()
            .commit(&client(), &operator(), at(2026, 3, 14))
            .unwrap();
        let err = repo.create_receipt(&ticket).await.unwrap_err();
        assert!(err.is_storage());

        assert_eq!(repo.count_receipts().await.unwrap(), 0);
        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipt_lines")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(orphans, 0);

        // The store still accepts the next ticket.
        let created = commit(&repo, &copper_draft(), at(2026, 3, 15)).await;
        assert_eq!(repo.count_lines(created.receipt.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_line_update_changes_nothing() {
        let repo = setup().await;
        let created = commit(&repo, &two_line_draft(), at(2026, 3, 14)).await;
        reject_lines(&repo, "UPDATE", "NEW.material_name = 'Alum Clean'").await;

        // The copper line is rewritten before the alum line fails.
        let edits = [
            LineEdit {
                line_id: created.lines[0].id,
                gross: Weight::from_pounds(120),
                tare: Weight::zero(),
            },
            LineEdit {
                line_id: created.lines[1].id,
                gross: Weight::from_pounds(60),
                tare: Weight::zero(),
            },
        ];
        let err = repo
            .update_receipt_lines(created.receipt.id, &edits)
            .await
            .unwrap_err();
        assert!(err.is_storage());

        let loaded = repo.get_receipt(created.receipt.id).await.unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.receipt.subtotal, Money::from_cents(45_675));
    }

    #[tokio::test]
    async fn test_update_lines_rejects_unpriceable_weight() {
        let repo = setup().await;
        let created = commit(&repo, &copper_draft(), at(2026, 3, 14)).await;
        let edit = LineEdit {
            line_id: created.lines[0].id,
            gross: Weight::from_hundredths(i64::MAX),
            tare: Weight::zero(),
        };
        assert!(matches!(
            repo.update_receipt_lines(created.receipt.id, &[edit]).await,
            Err(DbError::Validation(_))
        ));
        assert_eq!(repo.get_receipt(created.receipt.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_aggregate_month_excludes_voided() {
        let repo = setup().await;
        commit(&repo, &copper_draft(), at(2026, 3, 1)).await;
        commit(&repo, &two_line_draft(), at(2026, 3, 20)).await;
        commit(&repo, &copper_draft(), at(2026, 2, 10)).await;
        let voided = commit(&repo, &two_line_draft(), at(2026, 3, 21)).await;
        repo.void_receipt(voided.receipt.id).await.unwrap();

        let rows = repo.aggregate(Granularity::Month).await.unwrap();
        assert_eq!(rows.len(), 3);

        let total = &rows[0];
        assert!(total.is_grand_total());
        assert_eq!(total.receipt_count, 3);
        assert_eq!(total.total_amount, Money::from_cents(42_300 + 45_675 + 42_300));

        assert_eq!(rows[1].period, "2026-03");
        assert_eq!(rows[1].receipt_count, 2);
        assert_eq!(rows[1].net_weight, Weight::from_pounds(90 + 90 + 45));
        assert_eq!(rows[1].total_amount, Money::from_cents(87_975));

        assert_eq!(rows[2].period, "2026-02");
        assert_eq!(rows[2].receipt_count, 1);
    }

    #[tokio::test]
    async fn test_aggregate_day_and_year() {
        let repo = setup().await;
        commit(&repo, &copper_draft(), at(2025, 12, 31)).await;
        commit(&repo, &copper_draft(), at(2026, 1, 1)).await;
        commit(&repo, &copper_draft(), at(2026, 1, 1)).await;

        let days = repo.aggregate(Granularity::Day).await.unwrap();
        assert_eq!(days[1].period, "2026-01-01");
        assert_eq!(days[1].receipt_count, 2);
        assert_eq!(days[2].period, "2025-12-31");

        let years = repo.aggregate(Granularity::Year).await.unwrap();
        let periods: Vec<&str> = years.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, vec!["Total", "2026", "2025"]);
    }

    #[tokio::test]
    async fn test_aggregate_empty_store() {
        let repo = setup().await;
        let rows = repo.aggregate(Granularity::Month).await.unwrap();
        assert_eq!(rows, vec![PeriodSummary::empty("Total")]);
    }

    #[tokio::test]
    async fn test_aggregate_in_range() {
        let repo = setup().await;
        commit(&repo, &copper_draft(), at(2026, 3, 1)).await;
        commit(&repo, &copper_draft(), at(2026, 3, 2)).await;

        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let rows = repo
            .aggregate_in(Granularity::Day, DateRange::day(day))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].receipt_count, 1);
    }

    #[test]
    fn test_withdraw_code_shape() {
        for _ in 0..100 {
            let code = generate_withdraw_code();
            assert_eq!(code.len(), 6);
            assert!(!code.starts_with('0'));
        }
    }
}
