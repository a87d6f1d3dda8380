//! # Error Types
//!
//! Domain-specific error types for fleet-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fleet-core errors (this file)                                         │
//! │  ├── CoreError        - Domain rule violations / illegal transitions   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  fleet-store errors (separate crate)                                   │
//! │  ├── StoreError       - File persistence failures                      │
//! │  └── ServiceError     - What service callers see                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → Presentation       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations raised by the entity model itself.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A rental period ends before it starts.
    #[error("End date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Completing a rental that is already completed.
    ///
    /// ## When This Occurs
    /// - Double-click on "Return vehicle" in the UI
    /// - Replaying a completion after reload
    #[error("Rental {0} is already completed")]
    RentalAlreadyCompleted(String),

    /// A cost computation does not fit in the money representation.
    #[error("Rental cost is too large to represent")]
    CostOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any store is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value exceeds an upper bound.
    #[error("{field} cannot exceed {max}")]
    TooLarge { field: String, max: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., malformed amount or date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
