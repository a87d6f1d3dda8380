//! # Clock
//!
//! Every "is this in the past?" decision (rental start dates, overdue
//! reports, inferring activity for legacy rental rows) asks a [`Clock`]
//! instead of reading system time, so the rules stay deterministic.
//!
//! The system-time implementation lives in `fleet-store`; this crate only
//! ships [`FixedClock`] for tests and replays.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt::Debug;
use std::sync::atomic::{AtomicI32, Ordering};

/// Source of the current calendar date.
pub trait Clock: Send + Sync + Debug {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
}

/// A clock pinned to a given date that can be moved by hand.
#[derive(Debug)]
pub struct FixedClock {
    days_from_ce: AtomicI32,
}

impl FixedClock {
    /// Creates a clock that always reports `today`.
    pub fn new(today: NaiveDate) -> Self {
        FixedClock {
            days_from_ce: AtomicI32::new(today.num_days_from_ce()),
        }
    }

    /// Moves the clock to `date`.
    pub fn set(&self, date: NaiveDate) {
        self.days_from_ce
            .store(date.num_days_from_ce(), Ordering::SeqCst);
    }

    /// Moves the clock forward (or backward, for negative values) by `days`.
    pub fn advance(&self, days: i64) {
        let next = self.today() + Duration::days(days);
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        let days = self.days_from_ce.load(Ordering::SeqCst);
        // Only ever stored from a valid NaiveDate.
        NaiveDate::from_num_days_from_ce_opt(days).unwrap_or(NaiveDate::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_reports_and_advances() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.today(), start);

        clock.advance(5);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        clock.advance(-15);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }
}
