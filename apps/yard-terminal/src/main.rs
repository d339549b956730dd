//! # Yard Terminal Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Yard Ticket Terminal                             │
//! │                                                                         │
//! │  main.rs ────► Sets up logging, hands arguments to lib.rs               │
//! │                                                                         │
//! │  lib.rs ─────► Database path, state objects, command dispatch           │
//! │                                                                         │
//! │  commands/ ──► add_line, commit_receipt, void_receipt, summary          │
//! │                                                                         │
//! │  state/ ─────► DbState, SessionState, ConfigState                       │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                    yard.db (SQLite, WAL mode)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    yard_terminal::init_tracing();

    // The actual setup is in lib.rs for better testability
    match yard_terminal::run(std::env::args().skip(1).collect()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
