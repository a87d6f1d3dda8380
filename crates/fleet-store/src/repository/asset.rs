//! # Asset Rows
//!
//! ```text
//! ID,Make,Model,DailyRate,IsAvailable,EngineCC,Category,HasLuggage,PassengerCapacity,HasSidecar
//! A1,Toyota,Corolla,50.00,true
//! M1,Ducati,Panigale V4,120.00,false,1103,Sport,false,1,false
//! ```
//!
//! Five columns is a standard asset, ten is a motorcycle. Anything else is
//! rejected.

use chrono::NaiveDate;

use fleet_core::{Asset, AssetKind, MotorcycleSpec};

use super::{columns, parse_bool, parse_money, parse_number, require};
use crate::store::{LineError, Record};

const STANDARD_COLUMNS: usize = 5;
const MOTORCYCLE_COLUMNS: usize = 10;

impl Record for Asset {
    const ENTITY: &'static str = "Asset";
    const HEADER: &'static str =
        "ID,Make,Model,DailyRate,IsAvailable,EngineCC,Category,HasLuggage,PassengerCapacity,HasSidecar";

    fn id(&self) -> &str {
        Asset::id(self)
    }

    fn to_line(&self) -> String {
        let base = format!(
            "{},{},{},{},{}",
            self.id(),
            self.make(),
            self.model(),
            self.daily_rate().to_decimal_string(),
            self.is_available()
        );

        match self.kind() {
            AssetKind::Standard => base,
            AssetKind::Motorcycle(spec) => format!(
                "{},{},{},{},{},{}",
                base,
                spec.engine_cc(),
                spec.category(),
                spec.has_luggage(),
                spec.passenger_capacity(),
                spec.has_sidecar()
            ),
        }
    }

    fn parse_line(line: &str, _today: NaiveDate) -> Result<Self, LineError> {
        let cols = columns(line);
        if cols.len() != STANDARD_COLUMNS && cols.len() != MOTORCYCLE_COLUMNS {
            return Err(LineError::ColumnCount {
                expected: "5 or 10",
                found: cols.len(),
            });
        }

        let id = require("ID", cols[0])?;
        let rate = parse_money("DailyRate", cols[3])?;

        let built = if cols.len() == MOTORCYCLE_COLUMNS {
            let engine_cc = parse_number::<u32>("EngineCC", cols[5])?;
            let capacity = parse_number::<u8>("PassengerCapacity", cols[8])?;
            let spec = MotorcycleSpec::from_parts(
                engine_cc,
                cols[6],
                parse_bool(cols[7]),
                capacity,
                parse_bool(cols[9]),
            )
            .map_err(|e| LineError::invalid("motorcycle", line, e))?;
            Asset::motorcycle(id, cols[1], cols[2], rate, spec)
        } else {
            Asset::new(id, cols[1], cols[2], rate)
        };

        let mut asset = built.map_err(|e| LineError::invalid("DailyRate", cols[3], e))?;
        asset.set_available(parse_bool(cols[4]));

        Ok(asset)
    }
}
