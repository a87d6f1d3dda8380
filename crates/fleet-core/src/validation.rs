//! # Validation Module
//!
//! Input validation for the fleet rental engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (external)                                      │
//! │  └── Field-level feedback, confirmation dialogs                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Services (fleet-store)                                       │
//! │  └── THIS MODULE: required fields, positive rates, ranges              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Entity setters (fleet-core types)                            │
//! │  └── Invariants that must hold no matter who calls                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fleet_core::validation::{validate_required, validate_daily_rate};
//! use fleet_core::Money;
//!
//! assert!(validate_required("make", "Toyota").is_ok());
//! assert!(validate_required("make", "   ").is_err());
//! assert!(validate_daily_rate(Money::from_cents(0)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_DAILY_RATE, MAX_PASSENGER_CAPACITY, MIN_PASSENGER_CAPACITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Rejects empty or whitespace-only values.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates an asset or rental identifier.
///
/// ## Rules
/// - Must not be blank
/// - Must not contain the column separator (`,`) or a line break, since the
///   flat files have no quoting
pub fn validate_identifier(field: &str, value: &str) -> ValidationResult<()> {
    validate_required(field, value)?;
    validate_storable_text(field, value)
}

/// Rejects text the flat-file format cannot represent.
pub fn validate_storable_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.contains(',') || value.contains('\n') || value.contains('\r') {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not contain commas or line breaks".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a daily rate offered to customers.
///
/// ## Rules
/// - Must be strictly positive: a zero rate would produce a zero-cost rental
/// - At most [`MAX_DAILY_RATE`]
pub fn validate_daily_rate(rate: Money) -> ValidationResult<()> {
    if !rate.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "daily_rate".to_string(),
        });
    }
    if rate > MAX_DAILY_RATE {
        return Err(ValidationError::TooLarge {
            field: "daily_rate".to_string(),
            max: MAX_DAILY_RATE.to_string(),
        });
    }
    Ok(())
}

/// Validates any stored amount that may be zero but never negative.
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a motorcycle engine displacement in cc.
pub fn validate_engine_cc(engine_cc: u32) -> ValidationResult<()> {
    if engine_cc == 0 {
        return Err(ValidationError::MustBePositive {
            field: "engine_cc".to_string(),
        });
    }
    Ok(())
}

/// Validates a motorcycle passenger capacity.
///
/// ## Rules
/// - Between MIN_PASSENGER_CAPACITY (1) and MAX_PASSENGER_CAPACITY (3)
pub fn validate_passenger_capacity(capacity: u8) -> ValidationResult<()> {
    if !(MIN_PASSENGER_CAPACITY..=MAX_PASSENGER_CAPACITY).contains(&capacity) {
        return Err(ValidationError::OutOfRange {
            field: "passenger_capacity".to_string(),
            min: MIN_PASSENGER_CAPACITY as i64,
            max: MAX_PASSENGER_CAPACITY as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("make", "Honda").is_ok());
        assert!(validate_required("make", "").is_err());
        assert!(validate_required("make", " \t ").is_err());
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("id", "V001").is_ok());
        assert!(validate_identifier("id", "").is_err());
        assert!(validate_identifier("id", "V0,01").is_err());
        assert!(validate_identifier("id", "V001\n").is_err());
    }

    #[test]
    fn test_validate_daily_rate() {
        assert!(validate_daily_rate(Money::from_cents(1)).is_ok());
        assert!(validate_daily_rate(Money::zero()).is_err());
        assert!(validate_daily_rate(Money::from_cents(-100)).is_err());

        assert!(validate_daily_rate(MAX_DAILY_RATE).is_ok());
        let err = validate_daily_rate(Money::from_cents(100_000_001)).unwrap_err();
        assert_eq!(err.to_string(), "daily_rate cannot exceed $1000000.00");
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("total_cost", Money::zero()).is_ok());
        assert!(validate_non_negative("total_cost", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_engine_cc() {
        assert!(validate_engine_cc(125).is_ok());
        assert!(validate_engine_cc(0).is_err());
    }

    #[test]
    fn test_validate_passenger_capacity() {
        assert!(validate_passenger_capacity(1).is_ok());
        assert!(validate_passenger_capacity(3).is_ok());
        assert!(validate_passenger_capacity(0).is_err());
        assert!(validate_passenger_capacity(4).is_err());
    }
}
