//! # Domain Types
//!
//! Entities of the fleet rental engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Asset       │   │     Rental      │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (key)       │◄──│  asset_id       │   │  name           │       │
//! │  │  make / model   │   │  customer_*     │◄──│  phone          │       │
//! │  │  daily_rate     │   │  start / end    │   └─────────────────┘       │
//! │  │  available      │   │  total_cost     │                              │
//! │  │  kind ──────┐   │   │  status         │                              │
//! │  └─────────────┼───┘   └─────────────────┘                              │
//! │                ▼                                                        │
//! │  ┌─────────────────────────┐   ┌─────────────────┐                      │
//! │  │       AssetKind         │   │  RentalStatus   │                      │
//! │  │  Standard               │   │  Active ──────► │                      │
//! │  │  Motorcycle(Spec)       │   │  Completed      │                      │
//! │  └─────────────────────────┘   └─────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Assets and rentals compare and hash by `id` alone. Two values with the
//! same id are "the same record" even if one of them is a stale copy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::motorcycle::MotorcycleSpec;
use crate::pricing;
use crate::validation::{validate_non_negative, validate_required, validate_storable_text};

// =============================================================================
// Asset Kind
// =============================================================================

/// What sort of vehicle an asset is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Any vehicle without extra attributes (cars, vans).
    #[default]
    Standard,
    /// A motorcycle with its specialization data.
    Motorcycle(MotorcycleSpec),
}

// =============================================================================
// Asset
// =============================================================================

/// A rentable vehicle.
///
/// `available` is owned by the rental workflow: it is only meant to change
/// through the rental service, which keeps it equal to "no active rental
/// references this asset".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    id: String,
    make: String,
    model: String,
    daily_rate: Money,
    available: bool,
    kind: AssetKind,
}

impl Asset {
    /// Creates an available standard asset. Id, make and model are stored
    /// trimmed, the same way they come back from the data file.
    ///
    /// ## Errors
    /// Validation error if `daily_rate` is negative.
    pub fn new(
        id: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        daily_rate: Money,
    ) -> CoreResult<Self> {
        validate_non_negative("daily_rate", daily_rate)?;
        Ok(Asset {
            id: trimmed(id),
            make: trimmed(make),
            model: trimmed(model),
            daily_rate,
            available: true,
            kind: AssetKind::Standard,
        })
    }

    /// Creates an available motorcycle.
    pub fn motorcycle(
        id: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        daily_rate: Money,
        spec: MotorcycleSpec,
    ) -> CoreResult<Self> {
        let mut asset = Asset::new(id, make, model, daily_rate)?;
        asset.kind = AssetKind::Motorcycle(spec);
        Ok(asset)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn set_make(&mut self, make: impl Into<String>) {
        self.make = trimmed(make);
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = trimmed(model);
    }

    pub fn daily_rate(&self) -> Money {
        self.daily_rate
    }

    /// Changes the daily rate. Negative rates are rejected and the asset is
    /// left untouched.
    pub fn set_daily_rate(&mut self, daily_rate: Money) -> CoreResult<()> {
        validate_non_negative("daily_rate", daily_rate)?;
        self.daily_rate = daily_rate;
        Ok(())
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Flips availability.
    ///
    /// Only the rental workflow and the file loader should call this;
    /// anything else breaks the link between assets and active rentals.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn kind(&self) -> &AssetKind {
        &self.kind
    }

    /// Motorcycle data, if this asset is a motorcycle.
    pub fn motorcycle_spec(&self) -> Option<&MotorcycleSpec> {
        match &self.kind {
            AssetKind::Motorcycle(spec) => Some(spec),
            AssetKind::Standard => None,
        }
    }

    pub fn is_motorcycle(&self) -> bool {
        matches!(self.kind, AssetKind::Motorcycle(_))
    }

    /// `"{make} {model}"`, plus the engine size for motorcycles.
    pub fn display_name(&self) -> String {
        match &self.kind {
            AssetKind::Standard => format!("{} {}", self.make, self.model),
            AssetKind::Motorcycle(spec) => {
                format!("{} {} ({}cc)", self.make, self.model, spec.engine_cc())
            }
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.available {
            "Available"
        } else {
            "Rented"
        }
    }
}

fn trimmed(value: impl Into<String>) -> String {
    value.into().trim().to_string()
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Asset {}

impl Hash for Asset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}/day - {}",
            self.id,
            self.display_name(),
            self.daily_rate,
            self.status_label()
        )
    }
}

// =============================================================================
// Customer
// =============================================================================

/// The person a rental is made out to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    name: String,
    phone: String,
}

impl Customer {
    /// Creates a customer from trimmed, non-blank name and phone.
    pub fn new(name: &str, phone: &str) -> CoreResult<Self> {
        let name = name.trim();
        let phone = phone.trim();
        validate_required("customer_name", name)?;
        validate_storable_text("customer_name", name)?;
        validate_required("customer_phone", phone)?;
        validate_storable_text("customer_phone", phone)?;
        Ok(Customer {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.phone)
    }
}

// =============================================================================
// Rental Status
// =============================================================================

/// Lifecycle of a rental. Moves from `Active` to `Completed` once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    /// Asset is out with the customer.
    #[default]
    Active,
    /// Asset has been returned.
    Completed,
}

impl RentalStatus {
    /// Maps the persisted `IsActive` flag.
    pub fn from_active_flag(active: bool) -> Self {
        if active {
            RentalStatus::Active
        } else {
            RentalStatus::Completed
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RentalStatus::Active)
    }
}

// =============================================================================
// Rental
// =============================================================================

/// A booking of one asset by one customer for a date period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rental {
    id: String,
    asset_id: String,
    customer_name: String,
    customer_phone: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_cost: Money,
    status: RentalStatus,
}

impl Rental {
    /// Creates an active rental with zero cost.
    ///
    /// ## Errors
    /// [`CoreError::InvalidDateRange`] if `end_date < start_date`.
    pub fn new(
        id: impl Into<String>,
        asset_id: impl Into<String>,
        customer: &Customer,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> CoreResult<Self> {
        if end_date < start_date {
            return Err(CoreError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Rental {
            id: id.into(),
            asset_id: asset_id.into(),
            customer_name: customer.name().to_string(),
            customer_phone: customer.phone().to_string(),
            start_date,
            end_date,
            total_cost: Money::zero(),
            status: RentalStatus::Active,
        })
    }

    /// Rebuilds a rental from stored fields.
    ///
    /// Applies the same date and cost invariants as the live API, so a
    /// record that could never have been created is refused here too.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: impl Into<String>,
        asset_id: impl Into<String>,
        customer_name: impl Into<String>,
        customer_phone: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_cost: Money,
        status: RentalStatus,
    ) -> CoreResult<Self> {
        if end_date < start_date {
            return Err(CoreError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        validate_non_negative("total_cost", total_cost)?;
        Ok(Rental {
            id: id.into(),
            asset_id: asset_id.into(),
            customer_name: customer_name.into(),
            customer_phone: customer_phone.into(),
            start_date,
            end_date,
            total_cost,
            status,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_phone(&self) -> &str {
        &self.customer_phone
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn total_cost(&self) -> Money {
        self.total_cost
    }

    pub fn status(&self) -> RentalStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Moves the start date; refused if it would land after the end date.
    pub fn set_start_date(&mut self, start_date: NaiveDate) -> CoreResult<()> {
        if self.end_date < start_date {
            return Err(CoreError::InvalidDateRange {
                start: start_date,
                end: self.end_date,
            });
        }
        self.start_date = start_date;
        Ok(())
    }

    /// Moves the end date; refused if it would land before the start date.
    pub fn set_end_date(&mut self, end_date: NaiveDate) -> CoreResult<()> {
        if end_date < self.start_date {
            return Err(CoreError::InvalidDateRange {
                start: self.start_date,
                end: end_date,
            });
        }
        self.end_date = end_date;
        Ok(())
    }

    pub fn set_total_cost(&mut self, total_cost: Money) -> CoreResult<()> {
        validate_non_negative("total_cost", total_cost)?;
        self.total_cost = total_cost;
        Ok(())
    }

    /// Marks the rental as returned.
    ///
    /// ## Errors
    /// [`CoreError::RentalAlreadyCompleted`] on a second call.
    pub fn complete(&mut self) -> CoreResult<()> {
        if !self.is_active() {
            return Err(CoreError::RentalAlreadyCompleted(self.id.clone()));
        }
        self.status = RentalStatus::Completed;
        Ok(())
    }

    /// Billable days, at least one.
    pub fn duration_days(&self) -> i64 {
        pricing::duration_days(self.start_date, self.end_date)
    }

    pub fn period_label(&self) -> String {
        format!(
            "{} to {} ({} days)",
            self.start_date,
            self.end_date,
            self.duration_days()
        )
    }

    /// Whether the rental overlaps the inclusive window `from..=to`.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date <= to && self.end_date >= from
    }

    /// Still out after its end date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_active() && self.end_date < today
    }
}

impl PartialEq for Rental {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Rental {}

impl Hash for Rental {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Rental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_active() { "Active" } else { "Completed" };
        write!(
            f,
            "{} - {} - {} {} - {} - {}",
            self.id,
            self.asset_id,
            self.customer_name,
            self.period_label(),
            self.total_cost,
            status
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn jane() -> Customer {
        Customer::new("Jane Doe", "555-0100").unwrap()
    }

    #[test]
    fn test_new_asset_is_available_standard() {
        let asset = Asset::new("A1", "Toyota", "Corolla", Money::from_cents(5000)).unwrap();
        assert!(asset.is_available());
        assert!(!asset.is_motorcycle());
        assert_eq!(asset.display_name(), "Toyota Corolla");
        assert_eq!(asset.status_label(), "Available");
    }

    #[test]
    fn test_asset_text_is_stored_trimmed() {
        let mut asset = Asset::new(" A1", " Toyota ", "Corolla\t", Money::from_cents(5000)).unwrap();
        assert_eq!(asset.id(), "A1");
        assert_eq!(asset.make(), "Toyota");
        assert_eq!(asset.model(), "Corolla");

        asset.set_make("  Honda");
        asset.set_model("Civic  ");
        assert_eq!(asset.display_name(), "Honda Civic");
    }

    #[test]
    fn test_asset_rejects_negative_rate() {
        assert!(Asset::new("A1", "Toyota", "Corolla", Money::from_cents(-1)).is_err());

        let mut asset = Asset::new("A1", "Toyota", "Corolla", Money::from_cents(5000)).unwrap();
        assert!(asset.set_daily_rate(Money::from_cents(-500)).is_err());
        assert_eq!(asset.daily_rate(), Money::from_cents(5000));
        asset.set_daily_rate(Money::zero()).unwrap();
        assert!(asset.daily_rate().is_zero());
    }

    #[test]
    fn test_motorcycle_display_and_status() {
        let spec = MotorcycleSpec::new(1200, "Touring").unwrap();
        let mut bike =
            Asset::motorcycle("M1", "BMW", "R1250RT", Money::from_cents(9500), spec).unwrap();
        assert!(bike.is_motorcycle());
        assert_eq!(bike.display_name(), "BMW R1250RT (1200cc)");

        bike.set_available(false);
        assert_eq!(bike.status_label(), "Rented");
        assert_eq!(bike.to_string(), "M1 - BMW R1250RT (1200cc) - $95.00/day - Rented");
    }

    #[test]
    fn test_asset_identity_is_id_only() {
        let a = Asset::new("A1", "Toyota", "Corolla", Money::from_cents(5000)).unwrap();
        let b = Asset::new("A1", "Honda", "Civic", Money::from_cents(7000)).unwrap();
        let c = Asset::new("A2", "Toyota", "Corolla", Money::from_cents(5000)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Asset> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_customer_trims_and_validates() {
        let customer = Customer::new("  Jane Doe ", " 555-0100 ").unwrap();
        assert_eq!(customer.name(), "Jane Doe");
        assert_eq!(customer.phone(), "555-0100");
        assert_eq!(customer.display_name(), "Jane Doe (555-0100)");

        assert!(Customer::new("", "555").is_err());
        assert!(Customer::new("Jane", "  ").is_err());
        assert!(Customer::new("Doe, Jane", "555").is_err());
    }

    #[test]
    fn test_rental_new_rejects_reversed_dates() {
        let err = Rental::new("R001", "A1", &jane(), date(2024, 1, 13), date(2024, 1, 10));
        assert!(matches!(err, Err(CoreError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_rental_duration_and_label() {
        let rental = Rental::new("R001", "A1", &jane(), date(2024, 1, 10), date(2024, 1, 13)).unwrap();
        assert!(rental.is_active());
        assert_eq!(rental.duration_days(), 3);
        assert_eq!(rental.period_label(), "2024-01-10 to 2024-01-13 (3 days)");

        let same_day =
            Rental::new("R002", "A1", &jane(), date(2024, 1, 10), date(2024, 1, 10)).unwrap();
        assert_eq!(same_day.duration_days(), 1);
    }

    #[test]
    fn test_rental_date_setters_keep_order() {
        let mut rental =
            Rental::new("R001", "A1", &jane(), date(2024, 1, 10), date(2024, 1, 13)).unwrap();

        assert!(rental.set_start_date(date(2024, 1, 14)).is_err());
        assert_eq!(rental.start_date(), date(2024, 1, 10));

        assert!(rental.set_end_date(date(2024, 1, 9)).is_err());
        assert_eq!(rental.end_date(), date(2024, 1, 13));

        rental.set_end_date(date(2024, 1, 20)).unwrap();
        rental.set_start_date(date(2024, 1, 15)).unwrap();
        assert_eq!(rental.duration_days(), 5);
    }

    #[test]
    fn test_rental_total_cost_non_negative() {
        let mut rental =
            Rental::new("R001", "A1", &jane(), date(2024, 1, 10), date(2024, 1, 13)).unwrap();
        assert!(rental.set_total_cost(Money::from_cents(-1)).is_err());
        rental.set_total_cost(Money::from_cents(15000)).unwrap();
        assert_eq!(rental.total_cost(), Money::from_cents(15000));
    }

    #[test]
    fn test_rental_completes_once() {
        let mut rental =
            Rental::new("R001", "A1", &jane(), date(2024, 1, 10), date(2024, 1, 13)).unwrap();
        rental.complete().unwrap();
        assert_eq!(rental.status(), RentalStatus::Completed);
        assert_eq!(
            rental.complete(),
            Err(CoreError::RentalAlreadyCompleted("R001".to_string()))
        );
    }

    #[test]
    fn test_rental_restore_validates() {
        let restored = Rental::restore(
            "R007",
            "A1",
            "Jane Doe",
            "555-0100",
            date(2024, 1, 10),
            date(2024, 1, 13),
            Money::from_cents(15000),
            RentalStatus::Completed,
        )
        .unwrap();
        assert!(!restored.is_active());

        assert!(Rental::restore(
            "R008",
            "A1",
            "Jane Doe",
            "555-0100",
            date(2024, 1, 10),
            date(2024, 1, 13),
            Money::from_cents(-100),
            RentalStatus::Active,
        )
        .is_err());
    }

    #[test]
    fn test_overlap_and_overdue() {
        let rental = Rental::new("R001", "A1", &jane(), date(2024, 1, 10), date(2024, 1, 13)).unwrap();
        assert!(rental.overlaps(date(2024, 1, 13), date(2024, 1, 20)));
        assert!(rental.overlaps(date(2024, 1, 1), date(2024, 1, 10)));
        assert!(!rental.overlaps(date(2024, 1, 14), date(2024, 1, 20)));

        assert!(!rental.is_overdue(date(2024, 1, 13)));
        assert!(rental.is_overdue(date(2024, 1, 14)));
    }

    #[test]
    fn test_status_from_flag() {
        assert_eq!(RentalStatus::from_active_flag(true), RentalStatus::Active);
        assert_eq!(RentalStatus::from_active_flag(false), RentalStatus::Completed);
        assert_eq!(RentalStatus::default(), RentalStatus::Active);
    }
}
