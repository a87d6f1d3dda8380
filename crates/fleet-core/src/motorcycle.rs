//! # Motorcycle Specialization
//!
//! Extra attributes and rules carried by motorcycle assets.
//!
//! A motorcycle is an ordinary [`Asset`](crate::Asset) whose `kind` is
//! [`AssetKind::Motorcycle`](crate::AssetKind) holding a [`MotorcycleSpec`].
//! Storage and services treat every asset through one code path and only
//! read the `MotorcycleSpec` when they need motorcycle-only data.
//!
//! ## Insurance Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Base                                   $10.00 / day                    │
//! │                                                                         │
//! │  Engine   >= 1000cc                     + $15.00                        │
//! │           >  600cc                      + $10.00                        │
//! │           >  300cc                      +  $5.00                        │
//! │                                                                         │
//! │  Category "Sport"                       + $20.00                        │
//! │           "Cruiser"                     +  $5.00                        │
//! │                                                                         │
//! │  e.g. 1000cc Sport  = 10 + 15 + 20 = $45.00                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::{validate_engine_cc, validate_passenger_capacity};
use crate::{DEFAULT_PASSENGER_CAPACITY, SIDECAR_PASSENGER_CAPACITY};

const BASE_INSURANCE: Money = Money::from_cents(1000);

// =============================================================================
// License Class
// =============================================================================

/// Riding licence required for a given engine displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseClass {
    /// Up to 125cc.
    A1,
    /// Up to 400cc.
    A2,
    /// Anything larger.
    A,
}

impl LicenseClass {
    /// Licence needed to ride an engine of `engine_cc`.
    pub fn for_engine(engine_cc: u32) -> Self {
        if engine_cc <= 125 {
            LicenseClass::A1
        } else if engine_cc <= 400 {
            LicenseClass::A2
        } else {
            LicenseClass::A
        }
    }
}

impl fmt::Display for LicenseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseClass::A1 => write!(f, "A1 License (Light Motorcycle)"),
            LicenseClass::A2 => write!(f, "A2 License (Medium Motorcycle)"),
            LicenseClass::A => write!(f, "A License (Full Motorcycle)"),
        }
    }
}

// =============================================================================
// Motorcycle Spec
// =============================================================================

/// Motorcycle-only attributes of an asset.
///
/// ## Sidecar Rule
/// Attaching a sidecar raises `passenger_capacity` to at least 3. Detaching
/// it leaves the capacity where it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorcycleSpec {
    engine_cc: u32,
    category: String,
    has_luggage: bool,
    passenger_capacity: u8,
    has_sidecar: bool,
}

impl MotorcycleSpec {
    /// Creates a spec with two seats, no luggage and no sidecar.
    ///
    /// ## Errors
    /// Validation error if `engine_cc` is zero.
    pub fn new(engine_cc: u32, category: impl Into<String>) -> CoreResult<Self> {
        validate_engine_cc(engine_cc)?;
        Ok(MotorcycleSpec {
            engine_cc,
            category: category.into().trim().to_string(),
            has_luggage: false,
            passenger_capacity: DEFAULT_PASSENGER_CAPACITY,
            has_sidecar: false,
        })
    }

    /// Rebuilds a spec from stored columns, applying the same rules as the
    /// setters (a sidecar row with capacity below 3 is raised to 3).
    pub fn from_parts(
        engine_cc: u32,
        category: impl Into<String>,
        has_luggage: bool,
        passenger_capacity: u8,
        has_sidecar: bool,
    ) -> CoreResult<Self> {
        let mut spec = MotorcycleSpec::new(engine_cc, category)?;
        spec.set_has_luggage(has_luggage);
        spec.set_passenger_capacity(passenger_capacity)?;
        spec.set_has_sidecar(has_sidecar);
        Ok(spec)
    }

    pub fn engine_cc(&self) -> u32 {
        self.engine_cc
    }

    pub fn set_engine_cc(&mut self, engine_cc: u32) -> CoreResult<()> {
        validate_engine_cc(engine_cc)?;
        self.engine_cc = engine_cc;
        Ok(())
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into().trim().to_string();
    }

    pub fn has_luggage(&self) -> bool {
        self.has_luggage
    }

    pub fn set_has_luggage(&mut self, has_luggage: bool) {
        self.has_luggage = has_luggage;
    }

    pub fn passenger_capacity(&self) -> u8 {
        self.passenger_capacity
    }

    /// Sets the passenger capacity.
    ///
    /// ## Errors
    /// Validation error unless `capacity` is within 1..=3.
    pub fn set_passenger_capacity(&mut self, capacity: u8) -> CoreResult<()> {
        validate_passenger_capacity(capacity)?;
        self.passenger_capacity = capacity;
        Ok(())
    }

    pub fn has_sidecar(&self) -> bool {
        self.has_sidecar
    }

    /// Attaches or detaches a sidecar.
    ///
    /// One-directional: attaching raises capacity to 3, detaching keeps it.
    pub fn set_has_sidecar(&mut self, has_sidecar: bool) {
        self.has_sidecar = has_sidecar;
        if has_sidecar && self.passenger_capacity < SIDECAR_PASSENGER_CAPACITY {
            self.passenger_capacity = SIDECAR_PASSENGER_CAPACITY;
        }
    }

    // =========================================================================
    // Business Rules
    // =========================================================================

    /// Daily insurance rate (see the table in the module docs).
    pub fn insurance_rate(&self) -> Money {
        let mut rate = BASE_INSURANCE;

        if self.engine_cc >= 1000 {
            rate += Money::from_cents(1500);
        } else if self.engine_cc > 600 {
            rate += Money::from_cents(1000);
        } else if self.engine_cc > 300 {
            rate += Money::from_cents(500);
        }

        if self.category.eq_ignore_ascii_case("sport") {
            rate += Money::from_cents(2000);
        } else if self.category.eq_ignore_ascii_case("cruiser") {
            rate += Money::from_cents(500);
        }

        rate
    }

    /// Whether the bike is fit for long-distance travel.
    pub fn is_suitable_for_touring(&self) -> bool {
        self.category.eq_ignore_ascii_case("touring")
            || (self.engine_cc >= 600 && self.has_luggage)
    }

    /// Licence class the renter must hold.
    pub fn license_requirement(&self) -> LicenseClass {
        LicenseClass::for_engine(self.engine_cc)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_new_defaults() {
        let spec = MotorcycleSpec::new(650, "Adventure").unwrap();
        assert_eq!(spec.engine_cc(), 650);
        assert_eq!(spec.category(), "Adventure");
        assert_eq!(spec.passenger_capacity(), 2);
        assert!(!spec.has_luggage());
        assert!(!spec.has_sidecar());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            MotorcycleSpec::new(0, "Sport"),
            Err(CoreError::Validation(_))
        ));

        let mut spec = MotorcycleSpec::new(650, "Sport").unwrap();
        assert!(spec.set_engine_cc(0).is_err());
        assert!(spec.set_passenger_capacity(0).is_err());
        assert!(spec.set_passenger_capacity(4).is_err());
        assert_eq!(spec.engine_cc(), 650);
        assert_eq!(spec.passenger_capacity(), 2);
    }

    #[test]
    fn test_sidecar_raises_capacity_one_way() {
        let mut spec = MotorcycleSpec::new(750, "Touring").unwrap();
        spec.set_passenger_capacity(1).unwrap();

        spec.set_has_sidecar(true);
        assert!(spec.has_sidecar());
        assert_eq!(spec.passenger_capacity(), 3);

        spec.set_has_sidecar(false);
        assert!(!spec.has_sidecar());
        assert_eq!(spec.passenger_capacity(), 3);
    }

    #[test]
    fn test_from_parts_applies_sidecar_rule() {
        let spec = MotorcycleSpec::from_parts(800, "Touring", true, 1, true).unwrap();
        assert_eq!(spec.passenger_capacity(), 3);
        assert!(MotorcycleSpec::from_parts(800, "Touring", true, 5, false).is_err());
    }

    #[test]
    fn test_insurance_rate() {
        let small_sport = MotorcycleSpec::new(300, "Sport").unwrap();
        assert_eq!(small_sport.insurance_rate(), Money::from_cents(3000)); // 10 + 20

        let big_cruiser = MotorcycleSpec::new(1800, "Cruiser").unwrap();
        assert_eq!(big_cruiser.insurance_rate(), Money::from_cents(3000)); // 10 + 15 + 5

        let big_sport = MotorcycleSpec::new(1000, "sport").unwrap();
        assert_eq!(big_sport.insurance_rate(), Money::from_cents(4500)); // 10 + 15 + 20

        let mid_naked = MotorcycleSpec::new(650, "Naked").unwrap();
        assert_eq!(mid_naked.insurance_rate(), Money::from_cents(2000)); // 10 + 10

        let commuter = MotorcycleSpec::new(400, "Standard").unwrap();
        assert_eq!(commuter.insurance_rate(), Money::from_cents(1500)); // 10 + 5
    }

    #[test]
    fn test_touring_suitability() {
        assert!(MotorcycleSpec::new(250, "touring").unwrap().is_suitable_for_touring());

        let mut adventure = MotorcycleSpec::new(650, "Adventure").unwrap();
        assert!(!adventure.is_suitable_for_touring());
        adventure.set_has_luggage(true);
        assert!(adventure.is_suitable_for_touring());

        let mut small = MotorcycleSpec::new(500, "Adventure").unwrap();
        small.set_has_luggage(true);
        assert!(!small.is_suitable_for_touring());
    }

    #[test]
    fn test_license_requirement() {
        assert_eq!(LicenseClass::for_engine(125), LicenseClass::A1);
        assert_eq!(LicenseClass::for_engine(126), LicenseClass::A2);
        assert_eq!(LicenseClass::for_engine(400), LicenseClass::A2);
        assert_eq!(LicenseClass::for_engine(401), LicenseClass::A);
        assert_eq!(
            LicenseClass::A1.to_string(),
            "A1 License (Light Motorcycle)"
        );
    }
}
