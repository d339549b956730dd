//! # Operator Repository
//!
//! Staff who issue tickets. Read-only here: operators are set up by hand.

use sqlx::SqlitePool;

use crate::error::DbResult;
use yard_core::Operator;

const OPERATOR_COLUMNS: &str = "id, email, name, deleted";

/// Repository for operator lookups.
#[derive(Debug, Clone)]
pub struct OperatorRepository {
    pool: SqlitePool,
}

impl OperatorRepository {
    /// Creates a new OperatorRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OperatorRepository { pool }
    }

    /// Gets an active operator by email.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<Operator>> {
        let sql = format!(
            "SELECT {} FROM operators WHERE email = ?1 AND deleted = 0",
            OPERATOR_COLUMNS
        );
        let operator = sqlx::query_as::<_, Operator>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(operator)
    }

    /// The operator a new session starts with: the first one set up.
    pub async fn first_active(&self) -> DbResult<Option<Operator>> {
        let sql = format!(
            "SELECT {} FROM operators WHERE deleted = 0 ORDER BY id LIMIT 1",
            OPERATOR_COLUMNS
        );
        let operator = sqlx::query_as::<_, Operator>(&sql)
            .fetch_optional(&self.pool)
            .await?;

        Ok(operator)
    }

    /// Lists active operators, newest first.
    pub async fn list_active(&self) -> DbResult<Vec<Operator>> {
        let sql = format!(
            "SELECT {} FROM operators WHERE deleted = 0 ORDER BY id DESC",
            OPERATOR_COLUMNS
        );
        let operators = sqlx::query_as::<_, Operator>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(operators)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_seeded_operator() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.operators();

        let first = repo.first_active().await.unwrap().unwrap();
        assert_eq!(first.email, "counter@yard.local");

        let by_email = repo.get_by_email("counter@yard.local").await.unwrap();
        assert_eq!(by_email, Some(first));

        assert!(repo.get_by_email("nobody@yard.local").await.unwrap().is_none());
        assert_eq!(repo.list_active().await.unwrap().len(), 1);
    }
}
