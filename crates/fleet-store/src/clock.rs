//! Wall-clock implementation of [`Clock`].

use chrono::{Local, NaiveDate};

use fleet_core::Clock;

/// Reads today's date from the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
