//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! The `Database` from `yard-db` holds a `SqlitePool`, so commands can run
//! queries concurrently without extra locking.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! async fn list_receipts(db: &DbState, ...) -> Result<Vec<Receipt>, ApiError> {
//!     let receipts = db.inner().receipts().list_receipts(range, false).await?;
//!     Ok(receipts)
//! }
//! ```

use yard_db::Database;

/// Wrapper around `Database` for command state.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
