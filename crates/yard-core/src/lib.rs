//! # yard-core: Pure Business Logic for Yard Ticket
//!
//! Everything that can be computed without touching a disk, a socket or a
//! scale lives here: fixed-point weights and prices, the line formula, the
//! draft receipt an operator builds at the counter, and the committed
//! receipt model the database layer persists.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Yard Ticket Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 yard-terminal (state + commands)                │   │
//! │  │    add_line, update_line, commit_receipt, void_receipt, ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ yard-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   line    │  │   draft   │  │  summary  │  │   │
//! │  │   │  Money    │  │ net/total │  │  Draft-   │  │  Period-  │  │   │
//! │  │   │ UnitPrice │  │  formula  │  │  Receipt  │  │  Summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                     yard-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` (cents) and `UnitPrice` (mills per pound)
//! - [`weight`] - `Weight` (hundredths of a pound)
//! - [`line`] - The net/total formula shared by drafts and committed lines
//! - [`draft`] - The in-progress receipt
//! - [`types`] - Receipts, reference data, snapshots
//! - [`summary`] - Day/month/year aggregation rows
//! - [`validation`] - Input parsing and business rule checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use yard_core::{DraftReceipt, UnitPrice, Weight};
//!
//! let mut draft = DraftReceipt::new();
//! let line = draft
//!     .add_line(
//!         "Copper",
//!         UnitPrice::from_mills(4_700),    // $4.700/lb
//!         Weight::from_hundredths(10_000), // 100 lb gross
//!         Weight::from_hundredths(1_000),  // 10 lb tare
//!     )
//!     .unwrap();
//!
//! assert_eq!(line.net(), Weight::from_hundredths(9_000));
//! assert_eq!(line.total().cents(), 42_300);
//! assert_eq!(draft.subtotal().cents(), 42_300);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod line;
pub mod money;
pub mod summary;
pub mod types;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::{DraftLine, DraftReceipt, LineUpdate, ReceiptCommit};
pub use error::{CoreError, CoreResult, ValidationError};
pub use line::{calculate_line, LineAmounts, MAX_LINE_TOTAL};
pub use money::{Money, UnitPrice};
pub use summary::{summarize_with_grand_total, Granularity, PeriodSummary, GRAND_TOTAL_LABEL};
pub use types::*;
pub use weight::Weight;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of lines on a single ticket.
///
/// A yard ticket rarely carries more than a dozen materials; the cap stops
/// a stuck Enter key from filling the draft.
pub const MAX_DRAFT_LINES: usize = 100;

/// Client code of the walk-in seller selected when a session starts.
pub const WALK_IN_CLIENT_CODE: &str = "000001";

/// Ticketing method recorded on receipts issued at the counter.
pub const DEFAULT_TICKETING_METHOD: &str = "Print";
