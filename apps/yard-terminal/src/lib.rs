//! # Yard Terminal Library
//!
//! Counter terminal and back-office commands for Yard Ticket.
//!
//! ## Module Organization
//! ```text
//! yard_terminal/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── Argument parsing
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── session.rs  ◄─── Draft ticket + selections
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs        ◄─── Command exports
//! │   ├── ticketing.rs  ◄─── Draft and commit commands
//! │   ├── management.rs ◄─── Receipt list/void/edit/summary
//! │   └── catalog.rs    ◄─── Clients, materials, settings
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use directories::ProjectDirs;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Command, USAGE};
use commands::{catalog, management, ticketing};
use error::ApiError;
use state::{ConfigState, DbState, SessionState};
use yard_db::{Database, DbConfig};

/// Runs one command line against the yard database.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Terminal Startup                                  │
/// │                                                                         │
/// │  1. Parse arguments ──────────────────────────────────────────────────► │
/// │     • Unknown command: usage error, database untouched                  │
/// │                                                                         │
/// │  2. Determine Database Path ──────────────────────────────────────────► │
/// │     • YARD_DB_PATH, else the platform data directory                    │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode                                              │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • DbState, SessionState, ConfigState                                │
/// │                                                                         │
/// │  5. Dispatch to a command, print JSON ────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let command = cli::parse_args(&args).map_err(|e| format!("{}\n\n{}", e, USAGE))?;
    if matches!(command, Command::Help) {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = ConfigState::from_env();

    let db_path = get_database_path()?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    let db_state = DbState::new(db);
    let session = SessionState::new(
        config.default_client_code.clone(),
        config.default_operator_email.clone(),
    );

    let result = execute(command, &db_state, &session, &config).await;
    db_state.inner().close().await;

    match result {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", serde_json::to_string_pretty(&err)?);
            Err(err.into())
        }
    }
}

/// Dispatches a parsed command and renders its result as JSON.
pub async fn execute(
    command: Command,
    db: &DbState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<String, ApiError> {
    match command {
        Command::Summary {
            granularity,
            from,
            to,
        } => to_json(&management::summary(db, config, &granularity, from, to).await?),
        Command::List {
            include_voided,
            from,
            to,
        } => {
            let filter = management::ReceiptFilter {
                from,
                to,
                include_voided,
            };
            to_json(&management::list_receipts(db, filter).await?)
        }
        Command::Show { receipt_id } => to_json(&management::get_receipt(db, receipt_id).await?),
        Command::Void { receipt_id } => to_json(&management::void_receipt(db, receipt_id).await?),
        Command::Edit { receipt_id, edits } => {
            to_json(&management::update_receipt_lines(db, receipt_id, edits).await?)
        }
        Command::Ticket {
            client_code,
            operator_email,
            lines,
        } => {
            if let Some(code) = client_code {
                ticketing::select_client(db, session, code).await?;
            }
            if let Some(email) = operator_email {
                ticketing::select_operator(db, session, email).await?;
            }
            for line in lines {
                ticketing::add_line(db, session, line).await?;
            }
            to_json(&ticketing::commit_receipt(db, session).await?)
        }
        Command::Clients => to_json(&catalog::list_clients(db).await?),
        Command::Catalog => {
            let mut board = Vec::new();
            for category in catalog::list_categories(db).await? {
                let materials = catalog::list_materials(db, category.id).await?;
                board.push(serde_json::json!({
                    "category": category,
                    "materials": materials,
                }));
            }
            to_json(&board)
        }
        Command::Settings { permitted } => match permitted {
            Some(permitted) => to_json(&catalog::set_unit_price_adjustment(db, permitted).await?),
            None => to_json(&serde_json::json!({
                "settings": catalog::get_settings(db).await?,
                "config": catalog::get_config(config),
            })),
        },
        Command::Help => Ok(USAGE.to_string()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only command output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=yard=trace` - Show trace for yard crates only
/// - Default: `info,yard=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,yard=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.yard.ticket/yard.db`
/// - **Windows**: `%APPDATA%\yard\ticket\data\yard.db`
/// - **Linux**: `~/.local/share/ticket/yard.db`
///
/// ## Development Override
/// Set `YARD_DB_PATH` environment variable to use a custom path.
pub fn get_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Check for override
    if let Ok(path) = std::env::var("YARD_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "yard", "ticket")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("yard.db"))
}
