//! # Repository Module
//!
//! Row codecs that let domain types live in a [`FlatFileStore`].
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Record Implementations                               │
//! │                                                                         │
//! │  InventoryService ──► FlatFileStore<Asset>  ──► vehicles.csv           │
//! │                          │                                              │
//! │                          └── impl Record for Asset   (asset.rs)        │
//! │                                                                         │
//! │  RentalService    ──► FlatFileStore<Rental> ──► rentals.csv            │
//! │                          │                                              │
//! │                          └── impl Record for Rental  (rental.rs)       │
//! │                                                                         │
//! │  Columns are split on ',' and trimmed. There is no quoting, so the     │
//! │  services refuse text containing commas or line breaks.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`FlatFileStore`]: crate::store::FlatFileStore

pub mod asset;
pub mod rental;

use chrono::NaiveDate;
use std::str::FromStr;

use fleet_core::Money;

use crate::store::LineError;

/// Date format used in every file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Splits a row into trimmed columns.
pub(crate) fn columns(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Lenient boolean: `true` in any case is true, everything else false.
pub(crate) fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

pub(crate) fn parse_money(column: &'static str, value: &str) -> Result<Money, LineError> {
    Money::from_str(value).map_err(|e| LineError::invalid(column, value, e))
}

pub(crate) fn parse_date(column: &'static str, value: &str) -> Result<NaiveDate, LineError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| LineError::invalid(column, value, e))
}

pub(crate) fn parse_number<N>(column: &'static str, value: &str) -> Result<N, LineError>
where
    N: FromStr,
    N::Err: std::fmt::Display,
{
    value
        .parse::<N>()
        .map_err(|e| LineError::invalid(column, value, e))
}

pub(crate) fn require<'a>(column: &'static str, value: &'a str) -> Result<&'a str, LineError> {
    if value.is_empty() {
        return Err(LineError::invalid(column, value, "must not be empty"));
    }
    Ok(value)
}
