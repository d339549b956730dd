//! # Commands Module
//!
//! Every operation the counter and back office can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (exports)
//! ├── ticketing.rs    ◄─── Draft lines, client/operator selection, commit
//! ├── management.rs   ◄─── Receipt list, void, re-weigh, summaries
//! └── catalog.rs      ◄─── Clients, price board, settings, config
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs database
//! async fn list_receipts(db: &DbState, ...)
//!
//! // Only needs the session
//! fn get_draft(session: &SessionState)
//!
//! // Needs both
//! async fn add_line(db: &DbState, session: &SessionState, ...)
//! ```
//!
//! Commands return `Result<T, ApiError>` where `T` serializes to JSON.

pub mod catalog;
pub mod management;
pub mod ticketing;
