//! # Rental Rows
//!
//! ```text
//! ID,VehicleID,CustomerName,CustomerPhone,StartDate,EndDate,TotalCost,IsActive
//! R001,A1,Jane Doe,555-0100,2024-01-10,2024-01-13,150.00,true
//! ```
//!
//! Older files lack the `IsActive` column. For those seven-column rows the
//! rental counts as active while its end date has not passed.

use chrono::NaiveDate;

use fleet_core::{Rental, RentalStatus};

use super::{columns, parse_bool, parse_date, parse_money, require, DATE_FORMAT};
use crate::store::{LineError, Record};

const LEGACY_COLUMNS: usize = 7;
const COLUMNS: usize = 8;

impl Record for Rental {
    const ENTITY: &'static str = "Rental";
    const HEADER: &'static str =
        "ID,VehicleID,CustomerName,CustomerPhone,StartDate,EndDate,TotalCost,IsActive";

    fn id(&self) -> &str {
        Rental::id(self)
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.id(),
            self.asset_id(),
            self.customer_name(),
            self.customer_phone(),
            self.start_date().format(DATE_FORMAT),
            self.end_date().format(DATE_FORMAT),
            self.total_cost().to_decimal_string(),
            self.is_active()
        )
    }

    fn parse_line(line: &str, today: NaiveDate) -> Result<Self, LineError> {
        let cols = columns(line);
        if cols.len() != LEGACY_COLUMNS && cols.len() != COLUMNS {
            return Err(LineError::ColumnCount {
                expected: "7 or 8",
                found: cols.len(),
            });
        }

        let id = require("ID", cols[0])?;
        let asset_id = require("VehicleID", cols[1])?;
        let start = parse_date("StartDate", cols[4])?;
        let end = parse_date("EndDate", cols[5])?;
        let total_cost = parse_money("TotalCost", cols[6])?;

        let active = match cols.get(7) {
            Some(flag) => parse_bool(flag),
            None => end >= today,
        };

        Rental::restore(
            id,
            asset_id,
            cols[2],
            cols[3],
            start,
            end,
            total_cost,
            RentalStatus::from_active_flag(active),
        )
        .map_err(|e| LineError::invalid("rental", line, e))
    }
}
