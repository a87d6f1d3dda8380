//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A 3-day rental at 33.10/day:                                           │
//! │    33.1 * 3 = 99.30000000000001  ❌ cost drifts on every reload          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3310 cents * 3 = 9930 cents  → persisted as "99.30", reloaded exact  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fleet_core::money::Money;
//!
//! let rate: Money = "50.00".parse().unwrap();
//! let cost = rate.checked_multiply_days(3).unwrap();
//! assert_eq!(cost.to_decimal_string(), "150.00");
//! assert_eq!(cost.to_string(), "$150.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: parsing accepts a sign so that validation, not the
///   parser, decides whether a negative rate is acceptable
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// Asset.daily_rate ──► × duration_days ──► Rental.total_cost
///                                               │
///                                               └──► revenue reports
/// MotorcycleSpec::insurance_rate() ──► per-day insurance quote
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use fleet_core::money::Money;
    ///
    /// let rate = Money::from_cents(4550); // Represents $45.50
    /// assert_eq!(rate.cents(), 4550);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a daily amount by a number of billable days.
    ///
    /// Returns `None` when the product does not fit in i64 cents.
    ///
    /// ## Example
    /// ```rust
    /// use fleet_core::money::Money;
    ///
    /// let rate = Money::from_cents(5000); // $50.00/day
    /// assert_eq!(rate.checked_multiply_days(3), Some(Money::from_cents(15000)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_days(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_days(&self, days: i64) -> Option<Self> {
        match self.0.checked_mul(days) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats the amount with exactly two decimals and no currency symbol.
    ///
    /// This is the persisted representation (`"150.00"`, `"-5.50"`).
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal amount with at most two fractional digits.
///
/// ## Accepted
/// `"50"`, `"50.5"`, `"50.00"`, `"-5.50"`, `" 12.30 "`
///
/// ## Rejected
/// `""`, `"50."`, `"50.123"`, `"1e3"`, `"abc"`
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("'{}' {}", s.trim(), reason),
        };

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major, minor) = match digits.split_once('.') {
            Some((major, minor)) if minor.is_empty() => {
                return Err(invalid(&format!("has no digits after '.' ({})", major)));
            }
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("is not a decimal number"));
        }
        if minor.len() > 2 || !minor.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("must have at most two decimal places"));
        }

        let major: i64 = major.parse().map_err(|_| invalid("is too large"))?;
        let minor_cents: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("is not a decimal number"))? * 10,
            _ => minor.parse().map_err(|_| invalid("is not a decimal number"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor_cents))
            .ok_or_else(|| invalid("is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturates at the i64 bounds instead of wrapping. Use
/// [`Money::checked_add`] where an overflow must be reported.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
