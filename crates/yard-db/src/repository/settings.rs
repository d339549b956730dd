//! # Settings Repository
//!
//! Key/value switches stored in the database (shared by every terminal
//! that opens the same file), as opposed to per-process `YARD_*` config.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Whether operators may change a catalog price on a ticket line.
pub const UNIT_PRICE_ADJUSTMENT_PERMITTED: &str = "unit_price_adjustment_permitted";

/// Repository for yard settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Reads a raw setting.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Writes a raw setting, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        info!(key, value, "Setting updated");
        Ok(())
    }

    /// `true` unless the switch is stored as anything but `Yes`.
    pub async fn unit_price_adjustment_permitted(&self) -> DbResult<bool> {
        let value = self.get(UNIT_PRICE_ADJUSTMENT_PERMITTED).await?;
        Ok(value.map_or(true, |v| v == "Yes"))
    }

    pub async fn set_unit_price_adjustment_permitted(&self, permitted: bool) -> DbResult<()> {
        let value = if permitted { "Yes" } else { "No" };
        self.set(UNIT_PRICE_ADJUSTMENT_PERMITTED, value).await
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_price_adjustment_switch() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.settings();

        assert!(repo.unit_price_adjustment_permitted().await.unwrap());

        repo.set_unit_price_adjustment_permitted(false).await.unwrap();
        assert!(!repo.unit_price_adjustment_permitted().await.unwrap());
        assert_eq!(
            repo.get("unit_price_adjustment_permitted").await.unwrap().as_deref(),
            Some("No")
        );

        repo.set_unit_price_adjustment_permitted(true).await.unwrap();
        assert!(repo.unit_price_adjustment_permitted().await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_setting() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.settings().get("printer_name").await.unwrap().is_none());
    }
}
