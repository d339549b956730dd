//! # API Error Type
//!
//! Unified error type for terminal commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Yard Ticket                            │
//! │                                                                         │
//! │  Command Function: Result<T, ApiError>                                 │
//! │         │                                                               │
//! │         ├── ValidationError ("gross is required") ──┐                  │
//! │         ├── CoreError (EmptyReceipt, voided, ...) ──┤                  │
//! │         ├── DbError (NotFound / storage) ───────────┴──► ApiError      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Operator sees { "code": "EMPTY_RECEIPT", "message": "..." }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation and state errors reject one operation and leave the draft or
//! receipt as it was. Storage errors are logged in full and reported with a
//! generic message; the operator decides whether to try again.

use serde::Serialize;
use yard_core::{CoreError, ValidationError};
use yard_db::DbError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Receipt not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Receipt, line, client or material not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Commit of a draft with no lines
    EmptyReceipt,

    /// Draft line index out of range
    LineOutOfRange,

    /// Operation not allowed in the receipt's state (voided)
    InvalidState,

    /// Storage failed; nothing was written
    DatabaseError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            err @ DbError::InvalidState { .. } => {
                ApiError::new(ErrorCode::InvalidState, err.to_string())
            }
            err @ DbError::EmptyReceipt => {
                ApiError::new(ErrorCode::EmptyReceipt, err.to_string())
            }
            DbError::Validation(message) => ApiError::validation(message),
            DbError::UniqueViolation { field, value } => {
                tracing::error!("Unique constraint violated: {} '{}'", field, value);
                ApiError::new(
                    ErrorCode::DatabaseError,
                    format!("{} '{}' already exists", field, value),
                )
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::DatabaseError, "Invalid reference")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyReceipt => ApiError::new(ErrorCode::EmptyReceipt, err.to_string()),
            CoreError::LineIndexOutOfRange { .. } => {
                ApiError::new(ErrorCode::LineOutOfRange, err.to_string())
            }
            CoreError::ReceiptVoided { .. } => {
                ApiError::new(ErrorCode::InvalidState, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
