//! # State Module
//!
//! Application state for the counter terminal.
//!
//! Separate state types instead of one `AppState`: each command declares
//! exactly the state it needs, and independent states don't block each
//! other.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │   DbState    │  │  SessionState    │  │   ConfigState    │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  Database    │  │  Arc<Mutex<      │  │  yard_name       │          │
//! │  │  (SQLite     │  │   TicketSession  │  │  currency        │          │
//! │  │   pool)      │  │  >>              │  │  weight unit     │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • SessionState: draft + selections behind one Mutex                   │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod session;

pub use config::ConfigState;
pub use db::DbState;
pub use session::{SessionState, TicketSession};
