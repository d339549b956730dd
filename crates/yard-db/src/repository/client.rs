//! # Client Repository
//!
//! Sellers the counter can pick for a ticket.
//!
//! Receipts copy a client's code and name at commit time, so nothing here
//! ever touches the `receipts` table.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use yard_core::validation::validate_client_name;
use yard_core::Client;

/// Random attempts before falling back to `MAX(code) + 1`.
const CODE_ATTEMPTS: usize = 200;

const CLIENT_COLUMNS: &str = "id, code, name, phone, email, id_number, deleted";

/// Input for registering a new client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub id_number: Option<String>,
}

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Gets an active client by its six-digit code.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Client>> {
        let sql = format!(
            "SELECT {} FROM clients WHERE code = ?1 AND deleted = 0",
            CLIENT_COLUMNS
        );
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    /// Lists active clients, most recently registered first.
    pub async fn list_active(&self) -> DbResult<Vec<Client>> {
        let sql = format!(
            "SELECT {} FROM clients WHERE deleted = 0 ORDER BY id DESC",
            CLIENT_COLUMNS
        );
        let clients = sqlx::query_as::<_, Client>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = clients.len(), "Listed clients");
        Ok(clients)
    }

    /// Registers a client under a freshly generated code.
    pub async fn create(&self, new: &NewClient) -> DbResult<Client> {
        validate_client_name(&new.name)?;

        let code = self.generate_code().await?;

        let id = sqlx::query(
            r#"
            INSERT INTO clients (code, name, phone, email, id_number)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&code)
        .bind(new.name.trim())
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.id_number)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, code.clone()),
            other => other,
        })?
        .last_insert_rowid();

        info!(client_id = id, code = %code, "Client created");

        Ok(Client {
            id,
            code,
            name: new.name.trim().to_string(),
            phone: new.phone.clone(),
            email: new.email.clone(),
            id_number: new.id_number.clone(),
            deleted: false,
        })
    }

    /// Picks an unused six-digit code.
    ///
    /// Random first; after [`CODE_ATTEMPTS`] collisions, one past the
    /// largest numeric code (wrapping at a million).
    async fn generate_code(&self) -> DbResult<String> {
        for _ in 0..CODE_ATTEMPTS {
            let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
            let taken: Option<i64> = sqlx::query_scalar("SELECT 1 FROM clients WHERE code = ?1")
                .bind(&code)
                .fetch_optional(&self.pool)
                .await?;
            if taken.is_none() {
                return Ok(code);
            }
        }

        let max: Option<i64> = sqlx::query_scalar("SELECT MAX(CAST(code AS INTEGER)) FROM clients")
            .fetch_one(&self.pool)
            .await?;

        Ok(format!("{:06}", (max.unwrap_or(0) + 1) % 1_000_000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn setup() -> ClientRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.clients()
    }

    #[tokio::test]
    async fn test_walk_in_client_seeded() {
        let repo = setup().await;
        let walk_in = repo.get_by_code("000001").await.unwrap().unwrap();
        assert_eq!(walk_in.name, "Walk-in");
        assert!(repo.get_by_code("999999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_client() {
        let repo = setup().await;
        let created = repo
            .create(&NewClient {
                name: "  Ray Salvage ".to_string(),
                phone: Some("555-0100".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Ray Salvage");
        assert_eq!(created.code.len(), 6);
        assert!(created.code.chars().all(|c| c.is_ascii_digit()));

        let loaded = repo.get_by_code(&created.code).await.unwrap().unwrap();
        assert_eq!(loaded, created);

        let all = repo.list_active().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, created.id);
    }

    #[tokio::test]
    async fn test_create_client_requires_name() {
        let repo = setup().await;
        let err = repo.create(&NewClient::default()).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }
}
