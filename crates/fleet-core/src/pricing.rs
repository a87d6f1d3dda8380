//! # Pricing
//!
//! Billable-day and cost rules for rentals.
//!
//! ## Billing Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  duration_days = max(1, end_date − start_date)                          │
//! │  total_cost    = daily_rate × duration_days                             │
//! │                                                                         │
//! │  2024-01-10 → 2024-01-13   = 3 days                                     │
//! │  2024-01-10 → 2024-01-10   = 1 day   (same-day rental still bills)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Number of billable days between two dates (minimum 1).
///
/// Callers are expected to have checked `end >= start`; a reversed range
/// still yields the one-day minimum.
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(1)
}

/// Cost of renting at `daily_rate` from `start` to `end`.
///
/// ## Errors
/// - [`CoreError::InvalidDateRange`] if `end` is before `start`
/// - [`CoreError::CostOverflow`] if the product does not fit in i64 cents
pub fn rental_cost(daily_rate: Money, start: NaiveDate, end: NaiveDate) -> CoreResult<Money> {
    if end < start {
        return Err(CoreError::InvalidDateRange { start, end });
    }
    daily_rate
        .checked_multiply_days(duration_days(start, end))
        .ok_or(CoreError::CostOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duration_days() {
        assert_eq!(duration_days(date(2024, 1, 10), date(2024, 1, 13)), 3);
        assert_eq!(duration_days(date(2024, 1, 10), date(2024, 1, 10)), 1);
        assert_eq!(duration_days(date(2024, 2, 28), date(2024, 3, 1)), 2); // leap year
    }

    #[test]
    fn test_rental_cost_multiplies_rate_by_days() {
        let rate = Money::from_cents(5000);
        assert_eq!(
            rental_cost(rate, date(2024, 1, 10), date(2024, 1, 13)).unwrap(),
            Money::from_cents(15000)
        );
        assert_eq!(
            rental_cost(rate, date(2024, 1, 10), date(2024, 1, 10)).unwrap(),
            Money::from_cents(5000)
        );
    }

    #[test]
    fn test_rental_cost_rejects_reversed_range() {
        let err = rental_cost(Money::from_cents(5000), date(2024, 1, 13), date(2024, 1, 10));
        assert!(matches!(err, Err(CoreError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_rental_cost_reports_overflow() {
        let rate: Money = "90000000000000000.00".parse().unwrap();
        let err = rental_cost(rate, date(2024, 1, 10), date(2024, 1, 13));
        assert_eq!(err, Err(CoreError::CostOverflow));

        // The largest rate the inventory accepts never overflows.
        let span = rental_cost(crate::MAX_DAILY_RATE, date(1, 1, 1), date(9999, 12, 31));
        assert!(span.is_ok());
    }

    #[test]
    fn test_rental_cost_holds_across_many_ranges() {
        let rate = Money::from_cents(3310);
        let start = date(2024, 6, 1);
        for span in 0..60 {
            let end = start + chrono::Duration::days(span);
            let expected = Money::from_cents(3310 * span.max(1));
            assert_eq!(rental_cost(rate, start, end).unwrap(), expected);
        }
    }
}
