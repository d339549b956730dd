//! # Repository Module
//!
//! Database repository implementations for Yard Ticket.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Terminal command                                                      │
//! │       │                                                                 │
//! │       │  db.receipts().void_receipt(42)                                │
//! │       ▼                                                                 │
//! │  ReceiptRepository                                                     │
//! │  ├── create_receipt(&self, commit)                                     │
//! │  ├── get_receipt(&self, id)                                            │
//! │  ├── void_receipt(&self, id)                                           │
//! │  ├── update_receipt_lines(&self, id, edits)                            │
//! │  ├── list_receipts(&self, range, include_voided)                       │
//! │  └── aggregate(&self, granularity)                                     │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ReceiptRepository`](receipt::ReceiptRepository) - Receipts, lines, reports
//! - [`ClientRepository`](client::ClientRepository) - Sellers
//! - [`OperatorRepository`](operator::OperatorRepository) - Staff
//! - [`MaterialRepository`](material::MaterialRepository) - Price board
//! - [`SettingsRepository`](settings::SettingsRepository) - Yard switches

pub mod client;
pub mod material;
pub mod operator;
pub mod receipt;
pub mod settings;
