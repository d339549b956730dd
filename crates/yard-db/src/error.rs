//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)        CoreError (yard-core)               │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  DbError (this module) ← storage class  |  domain class                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (yard-terminal) ← Serialized for the counter screen          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Classes
//! - Domain: `NotFound`, `InvalidState`, `EmptyReceipt`, `Validation`.
//!   The request was wrong; nothing was written.
//! - Storage: everything else. The operation was aborted and its
//!   transaction rolled back. Nothing here retries: re-submitting a ticket
//!   blindly could pay a seller twice.

use thiserror::Error;
use yard_core::{CoreError, ValidationError};

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - Receipt id doesn't exist
    /// - Line id doesn't belong to the receipt being edited
    /// - Client code or material id is unknown
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Operation not allowed in the entity's current state.
    ///
    /// ## When This Occurs
    /// - Editing lines of a voided receipt
    /// - A void landed between reading and writing a line edit
    #[error("{entity} {id} is {state}, cannot perform operation")]
    InvalidState {
        entity: String,
        id: String,
        state: String,
    },

    /// A receipt with no lines was submitted.
    #[error("Receipt is empty")]
    EmptyReceipt,

    /// Input rejected before anything was written.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Duplicate client code
    /// - Duplicate operator email
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Line rows referencing a receipt that doesn't exist
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an InvalidState error for a voided receipt.
    pub fn receipt_voided(receipt_id: i64) -> Self {
        DbError::InvalidState {
            entity: "Receipt".to_string(),
            id: receipt_id.to_string(),
            state: "voided".to_string(),
        }
    }

    /// True for failures of the storage engine itself, as opposed to a
    /// request the domain rejected.
    pub fn is_storage(&self) -> bool {
        !matches!(
            self,
            DbError::NotFound { .. }
                | DbError::InvalidState { .. }
                | DbError::EmptyReceipt
                | DbError::Validation(_)
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // UNIQUE constraint: "UNIQUE constraint failed: <table>.<column>"
                // FK constraint: "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<ValidationError> for DbError {
    fn from(err: ValidationError) -> Self {
        DbError::Validation(err.to_string())
    }
}

/// Domain errors raised while the store works on a receipt.
impl From<CoreError> for DbError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyReceipt => DbError::EmptyReceipt,
            CoreError::ReceiptVoided { receipt_id } => DbError::receipt_voided(receipt_id),
            CoreError::Validation(e) => DbError::Validation(e.to_string()),
            other @ CoreError::LineIndexOutOfRange { .. } => DbError::Validation(other.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_classification() {
        assert!(!DbError::not_found("Receipt", 9).is_storage());
        assert!(!DbError::receipt_voided(9).is_storage());
        assert!(!DbError::Validation("bad".to_string()).is_storage());
        assert!(!DbError::EmptyReceipt.is_storage());
        assert!(DbError::duplicate("clients.code", "000042").is_storage());
        assert!(DbError::PoolExhausted.is_storage());
        assert!(DbError::QueryFailed("disk I/O error".to_string()).is_storage());
    }

    #[test]
    fn test_core_error_conversion() {
        let err: DbError = CoreError::ReceiptVoided { receipt_id: 4 }.into();
        assert_eq!(err.to_string(), "Receipt 4 is voided, cannot perform operation");

        let err: DbError = CoreError::EmptyReceipt.into();
        assert!(matches!(err, DbError::EmptyReceipt));
    }
}
