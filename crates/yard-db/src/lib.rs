//! # yard-db: Database Layer for Yard Ticket
//!
//! This crate provides database access for the yard ticketing system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Yard Ticket Data Flow                            │
//! │                                                                         │
//! │  Terminal command (commit_receipt)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     yard-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ReceiptRepo   │    │ 001_schema   │  │   │
//! │  │   │ SqlitePool    │◄───│ ClientRepo    │    │ 002_seed     │  │   │
//! │  │   │ Connection    │    │ MaterialRepo  │    │              │  │   │
//! │  │   │ Management    │    │ ...           │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (yard.db)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use yard_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/yard.db")).await?;
//!
//! let detail = db.receipts().create_receipt(&commit).await?;
//! let months = db.receipts().aggregate(Granularity::Month).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::client::{ClientRepository, NewClient};
pub use repository::material::MaterialRepository;
pub use repository::operator::OperatorRepository;
pub use repository::receipt::{ReceiptRepository, LIST_LIMIT};
pub use repository::settings::SettingsRepository;
