//! # Error Types
//!
//! Domain-specific error types for yard-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  yard-core errors (this file)                                          │
//! │  ├── CoreError        - Draft / receipt state errors                   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  yard-db errors (separate crate)                                       │
//! │  └── DbError          - NotFound, InvalidState, storage failures       │
//! │                                                                         │
//! │  yard-terminal errors                                                  │
//! │  └── ApiError         - What the operator sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Operator     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are transient: a rejected operation leaves the draft or
//! the stored receipt exactly as it was.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by draft and receipt operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Commit was attempted on a draft with zero lines.
    #[error("Receipt is empty")]
    EmptyReceipt,

    /// A draft line index does not address an existing line.
    #[error("Line {index} does not exist (draft has {len} lines)")]
    LineIndexOutOfRange { index: usize, len: usize },

    /// The receipt has been voided and can no longer be edited.
    ///
    /// ## When This Occurs
    /// - Re-weighing lines of a voided ticket from the detail view
    /// - A void committed between loading a ticket and saving its edits
    #[error("Receipt {receipt_id} is voided, cannot perform operation")]
    ReceiptVoided { receipt_id: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Weight or price below zero.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (non-numeric weight, too many decimals, bad date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Unit price override while the yard has price adjustment switched off.
    #[error("unit price adjustment is not permitted for {material}")]
    PriceAdjustmentNotPermitted { material: String },

    /// Unit price override outside the catalog bounds of the material.
    #[error("unit price {price} for {material} must be between {min} and {max}")]
    PriceOutOfBounds {
        material: String,
        price: String,
        min: String,
        max: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineIndexOutOfRange { index: 3, len: 2 };
        assert_eq!(err.to_string(), "Line 3 does not exist (draft has 2 lines)");

        let err = CoreError::ReceiptVoided { receipt_id: 42 };
        assert_eq!(
            err.to_string(),
            "Receipt 42 is voided, cannot perform operation"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "material_name".to_string(),
        };
        assert_eq!(err.to_string(), "material_name is required");

        let err = ValidationError::Negative {
            field: "tare".to_string(),
        };
        assert_eq!(err.to_string(), "tare cannot be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "gross".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
