//! # Rental Service
//!
//! Creates and completes rentals and keeps asset availability in step with
//! them.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   create_rental ──► ACTIVE ──complete_rental──► COMPLETED               │
//! │                       │                            (final)              │
//! │                       └── asset.available = false                      │
//! │                                                                         │
//! │   COMPLETED never returns to ACTIVE.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Create Rental Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Validate input (blank fields, start < today, end < start)          │
//! │  2. Lock rentals, then assets                                          │
//! │  3. Asset exists and is free? cost = rate × days > 0?                  │
//! │  4. Save rental (R00n, Active)                                         │
//! │  5. Flip asset to rented                                               │
//! │       └── failed? delete the rental again                              │
//! │             └── failed too? poison the rental store                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use fleet_core::validation::validate_identifier;
use fleet_core::{pricing, Clock, Customer, Money, Rental, ValidationError};

use crate::config::RentalSettings;
use crate::error::{ServiceError, ServiceResult};
use crate::service::inventory::{mark_rented, mark_returned, InventoryService};
use crate::store::{FlatFileStore, SharedStore};

/// Rental workflows and reports.
///
/// ## Usage
/// ```rust,ignore
/// let rentals = fleet.rentals();
///
/// let rental = rentals
///     .create_rental("A1", "Jane Doe", "555-0100", start, end)
///     .await?;
/// rentals.complete_rental(rental.id()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RentalService {
    rentals: SharedStore<Rental>,
    inventory: InventoryService,
    clock: Arc<dyn Clock>,
    settings: RentalSettings,
}

impl RentalService {
    /// Creates a service over a loaded rental store and the inventory whose
    /// availability it drives.
    pub fn new(
        rentals: FlatFileStore<Rental>,
        inventory: InventoryService,
        clock: Arc<dyn Clock>,
        settings: RentalSettings,
    ) -> Self {
        RentalService {
            rentals: Arc::new(Mutex::new(rentals)),
            inventory,
            clock,
            settings,
        }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &SharedStore<Rental> {
        &self.rentals
    }

    // =========================================================================
    // Workflows
    // =========================================================================

    /// Books `asset_id` for a customer from `start` to `end`.
    ///
    /// ## Errors
    /// - [`ServiceError::Validation`] for blank id, name or phone
    /// - [`ServiceError::StartDateInPast`] / [`ServiceError::InvalidDateRange`]
    /// - [`ServiceError::AssetNotFound`] / [`ServiceError::AssetUnavailable`]
    /// - [`ServiceError::NonPositiveCost`] if the asset's rate yields no charge
    /// - [`ServiceError::CostOverflow`] if rate × days does not fit
    /// - [`ServiceError::Store`] if either file cannot be rewritten; nothing
    ///   is left half-done in that case
    pub async fn create_rental(
        &self,
        asset_id: &str,
        customer_name: &str,
        customer_phone: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Rental> {
        let asset_id = asset_id.trim();
        validate_identifier("asset_id", asset_id)?;
        let customer = Customer::new(customer_name, customer_phone)?;

        let today = self.clock.today();
        if start < today {
            return Err(ServiceError::StartDateInPast { start, today });
        }
        if end < start {
            return Err(ServiceError::InvalidDateRange { start, end });
        }

        let mut rentals = self.rentals.lock().await;
        let mut assets = self.inventory.store().lock().await;

        let asset = assets
            .find_by_id(asset_id)
            .ok_or_else(|| ServiceError::AssetNotFound(asset_id.to_string()))?;
        let already_out = rentals
            .records()
            .iter()
            .any(|r| r.is_active() && r.asset_id() == asset_id);
        if !asset.is_available() || already_out {
            return Err(ServiceError::AssetUnavailable(asset_id.to_string()));
        }

        let cost = pricing::rental_cost(asset.daily_rate(), start, end)?;
        if !cost.is_positive() {
            return Err(ServiceError::NonPositiveCost);
        }

        let id = next_id(rentals.records(), &self.settings);
        let mut rental = Rental::new(id.as_str(), asset_id, &customer, start, end)?;
        rental.set_total_cost(cost)?;

        rentals.save(rental.clone()).await?;

        if let Err(e) = mark_rented(&mut assets, asset_id).await {
            if let Err(undo) = rentals.delete_by_id(&id).await {
                error!(
                    rental_id = %id,
                    asset_id = %asset_id,
                    error = %undo,
                    "Could not remove rental after failed asset update"
                );
                rentals.poison();
            }
            return Err(e);
        }

        info!(
            rental_id = %id,
            asset_id = %asset_id,
            customer = %customer.name(),
            cost = %cost,
            "Rental created"
        );
        Ok(rental)
    }

    /// Closes an active rental and makes its asset available again, unless
    /// another active rental still holds it.
    ///
    /// ## Errors
    /// - [`ServiceError::Validation`] for a blank id
    /// - [`ServiceError::RentalNotFound`]
    /// - [`ServiceError::RentalAlreadyCompleted`]
    /// - [`ServiceError::AssetNotFound`] if the rented asset has vanished
    /// - [`ServiceError::Store`] if a rewrite fails; the rental stays active
    pub async fn complete_rental(&self, rental_id: &str) -> ServiceResult<Rental> {
        let rental_id = rental_id.trim();
        if rental_id.is_empty() {
            return Err(ValidationError::required("rental_id").into());
        }

        let mut rentals = self.rentals.lock().await;
        let mut assets = self.inventory.store().lock().await;

        let previous = rentals
            .find_by_id(rental_id)
            .ok_or_else(|| ServiceError::RentalNotFound(rental_id.to_string()))?;
        let mut rental = previous.clone();
        rental.complete()?;

        rentals.update(rental.clone()).await?;

        // Rows loaded from older files can leave two active rentals on one
        // asset; it stays rented until the last of them is closed.
        let still_held = rentals
            .records()
            .iter()
            .find(|r| r.is_active() && r.asset_id() == rental.asset_id())
            .map(|r| r.id().to_string());
        if let Some(other) = still_held {
            info!(
                rental_id = %rental_id,
                asset_id = %rental.asset_id(),
                held_by = %other,
                "Rental completed; asset still out on another rental"
            );
            return Ok(rental);
        }

        if let Err(e) = mark_returned(&mut assets, rental.asset_id()).await {
            if let Err(undo) = rentals.update(previous).await {
                error!(
                    rental_id = %rental_id,
                    asset_id = %rental.asset_id(),
                    error = %undo,
                    "Could not reactivate rental after failed asset update"
                );
                rentals.poison();
            }
            return Err(e);
        }

        info!(rental_id = %rental_id, asset_id = %rental.asset_id(), "Rental completed");
        Ok(rental)
    }

    /// Quoted price for renting `asset_id` over the period.
    ///
    /// Returns zero for an unknown asset or a reversed range instead of an
    /// error, so it can back a live price preview.
    pub async fn calculate_rental_cost(
        &self,
        asset_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Money {
        let Some(asset) = self.inventory.find_by_id(asset_id).await else {
            return Money::zero();
        };
        pricing::rental_cost(asset.daily_rate(), start, end).unwrap_or_else(|_| Money::zero())
    }

    /// The id the next created rental will receive.
    pub async fn generate_next_id(&self) -> String {
        let rentals = self.rentals.lock().await;
        next_id(rentals.records(), &self.settings)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn all_rentals(&self) -> Vec<Rental> {
        self.rentals.lock().await.find_all()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Rental> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        self.rentals.lock().await.find_by_id(id)
    }

    pub async fn active_rentals(&self) -> Vec<Rental> {
        self.filtered(|r| r.is_active()).await
    }

    /// Every rental, past and present, of one asset.
    pub async fn by_asset(&self, asset_id: &str) -> Vec<Rental> {
        let asset_id = asset_id.trim();
        self.filtered(|r| r.asset_id() == asset_id).await
    }

    pub async fn active_rental_for_asset(&self, asset_id: &str) -> Option<Rental> {
        let asset_id = asset_id.trim();
        let rentals = self.rentals.lock().await;
        rentals
            .records()
            .iter()
            .find(|r| r.is_active() && r.asset_id() == asset_id)
            .cloned()
    }

    /// Case-insensitive exact match on customer name.
    pub async fn by_customer(&self, name: &str) -> Vec<Rental> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Vec::new();
        }
        self.filtered(|r| r.customer_name().to_lowercase() == name)
            .await
    }

    /// Rentals overlapping `from..=to`. A reversed window yields nothing.
    pub async fn in_date_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<Rental> {
        if to < from {
            return Vec::new();
        }
        self.filtered(|r| r.overlaps(from, to)).await
    }

    /// Active rentals whose end date has passed.
    pub async fn overdue(&self) -> Vec<Rental> {
        let today = self.clock.today();
        self.filtered(|r| r.is_overdue(today)).await
    }

    pub async fn is_asset_rented(&self, asset_id: &str) -> bool {
        self.active_rental_for_asset(asset_id).await.is_some()
    }

    pub async fn total_count(&self) -> usize {
        self.rentals.lock().await.count()
    }

    pub async fn active_count(&self) -> usize {
        let rentals = self.rentals.lock().await;
        rentals.records().iter().filter(|r| r.is_active()).count()
    }

    /// Sum of completed rentals.
    pub async fn total_revenue(&self) -> Money {
        self.revenue(false).await
    }

    /// Sum of rentals still active.
    pub async fn potential_revenue(&self) -> Money {
        self.revenue(true).await
    }

    async fn revenue(&self, active: bool) -> Money {
        let rentals = self.rentals.lock().await;
        rentals
            .records()
            .iter()
            .filter(|r| r.is_active() == active)
            .map(Rental::total_cost)
            .sum()
    }

    async fn filtered(&self, keep: impl Fn(&Rental) -> bool) -> Vec<Rental> {
        let rentals = self.rentals.lock().await;
        rentals.records().iter().filter(|r| keep(*r)).cloned().collect()
    }
}

/// Next id after the highest existing one.
///
/// The first character of every id is treated as the prefix; an id whose
/// remainder is not a number counts as 0.
fn next_id(rentals: &[Rental], settings: &RentalSettings) -> String {
    let max = rentals
        .iter()
        .map(|r| {
            let mut chars = r.id().chars();
            chars.next();
            chars.as_str().parse::<u64>().unwrap_or(0)
        })
        .max()
        .unwrap_or(0);

    let next = max.saturating_add(1);
    debug!(next, "Generated rental id");
    format!(
        "{}{:0width$}",
        settings.id_prefix,
        next,
        width = settings.id_width
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
