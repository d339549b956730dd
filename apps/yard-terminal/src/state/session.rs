//! # Session State
//!
//! The ticket being built at the counter, plus the client and operator it
//! will be issued for.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Access Pattern                               │
//! │                                                                         │
//! │  Command A (add_line)        Command B (get_draft)                      │
//! │       │                           │                                     │
//! │       ▼                           │                                     │
//! │  session.lock() ◄─── Acquired     │                                     │
//! │       │                           ▼                                     │
//! │  Modify draft               session.lock() ◄─── Waits...                │
//! │       │                           │                                     │
//! │  drop(lock)  ────────────────────►│ ◄─── Now acquired                   │
//! │                                   ▼                                     │
//! │                              Read draft                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is never held across an `.await`: commands copy what they need
//! out of the session, talk to the database, then lock again to apply.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use yard_core::DraftReceipt;

/// Everything the counter has selected for the next ticket.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSession {
    /// Lines entered so far
    pub draft: DraftReceipt,

    /// Code of the selected client
    pub client_code: String,

    /// Email of the selected operator; `None` falls back to the first
    /// active operator at commit time
    pub operator_email: Option<String>,
}

/// Thread-safe wrapper around the ticket session.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<TicketSession>>,
}

impl SessionState {
    /// Creates a session with an empty draft for the given client.
    pub fn new(client_code: impl Into<String>, operator_email: Option<String>) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(TicketSession {
                draft: DraftReceipt::new(),
                client_code: client_code.into(),
                operator_email,
            })),
        }
    }

    /// Executes a closure with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TicketSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a closure with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TicketSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }

    /// Returns a copy of the current session.
    pub fn snapshot(&self) -> TicketSession {
        self.with_session(TicketSession::clone)
    }
}
