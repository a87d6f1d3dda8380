//! # Inventory Service
//!
//! Asset catalogue operations and the availability flips requested by the
//! rental workflow.
//!
//! ## Availability
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add(asset)        → stored as available, whatever the caller passed   │
//! │  update(asset)     → keeps the stored availability                     │
//! │  mark_rented(id)   → available → rented     (crate-internal)           │
//! │  mark_returned(id) → * → available          (crate-internal, idempotent)│
//! │  remove(id)        → only while available                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use fleet_core::validation::{
    validate_daily_rate, validate_identifier, validate_required, validate_storable_text,
};
use fleet_core::{Asset, Money};

use crate::error::{ServiceError, ServiceResult};
use crate::store::{FlatFileStore, SharedStore};

/// Catalogue of rentable assets.
///
/// ## Usage
/// ```rust,ignore
/// let inventory = fleet.inventory();
///
/// inventory.add(Asset::new("A1", "Toyota", "Corolla", "50.00".parse()?)?).await?;
/// let cheap = inventory.by_price_range(Money::zero(), "60".parse()?).await;
/// ```
#[derive(Debug, Clone)]
pub struct InventoryService {
    assets: SharedStore<Asset>,
}

impl InventoryService {
    /// Creates a service over an already loaded asset store.
    pub fn new(assets: FlatFileStore<Asset>) -> Self {
        InventoryService {
            assets: Arc::new(Mutex::new(assets)),
        }
    }

    pub(crate) fn store(&self) -> &SharedStore<Asset> {
        &self.assets
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Every asset in file order.
    pub async fn list(&self) -> Vec<Asset> {
        self.assets.lock().await.find_all()
    }

    pub async fn list_available(&self) -> Vec<Asset> {
        self.filtered(|a| a.is_available()).await
    }

    /// Finds an asset. A blank id is never looked up.
    pub async fn find_by_id(&self, id: &str) -> Option<Asset> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        self.assets.lock().await.find_by_id(id)
    }

    /// `false` for unknown ids.
    pub async fn is_available(&self, id: &str) -> bool {
        self.find_by_id(id)
            .await
            .map(|a| a.is_available())
            .unwrap_or(false)
    }

    /// Case-insensitive exact match on make. A blank make matches nothing.
    pub async fn by_make(&self, make: &str) -> Vec<Asset> {
        let make = make.trim().to_lowercase();
        if make.is_empty() {
            return Vec::new();
        }
        self.filtered(|a| a.make().to_lowercase() == make).await
    }

    /// Assets whose daily rate lies in `min..=max`.
    ///
    /// A negative `min` or a `max` below `min` yields nothing.
    pub async fn by_price_range(&self, min: Money, max: Money) -> Vec<Asset> {
        if min.is_negative() || max < min {
            return Vec::new();
        }
        self.filtered(|a| (min..=max).contains(&a.daily_rate())).await
    }

    pub async fn total_count(&self) -> usize {
        self.assets.lock().await.count()
    }

    pub async fn available_count(&self) -> usize {
        self.count_where(|a| a.is_available()).await
    }

    pub async fn rented_count(&self) -> usize {
        self.count_where(|a| !a.is_available()).await
    }

    async fn filtered(&self, keep: impl Fn(&Asset) -> bool) -> Vec<Asset> {
        let store = self.assets.lock().await;
        store.records().iter().filter(|a| keep(*a)).cloned().collect()
    }

    async fn count_where(&self, keep: impl Fn(&Asset) -> bool) -> usize {
        let store = self.assets.lock().await;
        store.records().iter().filter(|a| keep(*a)).count()
    }

    // =========================================================================
    // Catalogue Mutations
    // =========================================================================

    /// Adds a new asset. It is stored as available.
    ///
    /// ## Errors
    /// - [`ServiceError::Validation`] for a blank id/make/model or a
    ///   non-positive rate
    /// - [`ServiceError::Store`] with
    ///   [`StoreError::Duplicate`](crate::StoreError::Duplicate) if the id exists
    pub async fn add(&self, mut asset: Asset) -> ServiceResult<()> {
        validate_asset(&asset)?;
        asset.set_available(true);

        let id = asset.id().to_string();
        self.assets.lock().await.save(asset).await?;

        info!(asset_id = %id, "Asset added");
        Ok(())
    }

    /// Replaces an asset's catalogue data. Availability cannot be changed
    /// through here.
    pub async fn update(&self, mut asset: Asset) -> ServiceResult<()> {
        validate_asset(&asset)?;

        let mut store = self.assets.lock().await;
        let stored = store
            .find_by_id(asset.id())
            .ok_or_else(|| ServiceError::AssetNotFound(asset.id().to_string()))?;
        asset.set_available(stored.is_available());

        let id = asset.id().to_string();
        store.update(asset).await?;

        info!(asset_id = %id, "Asset updated");
        Ok(())
    }

    /// Deletes an asset that is not out on a rental.
    pub async fn remove(&self, id: &str) -> ServiceResult<()> {
        let id = id.trim();
        validate_required("id", id)?;

        let mut store = self.assets.lock().await;
        let asset = store
            .find_by_id(id)
            .ok_or_else(|| ServiceError::AssetNotFound(id.to_string()))?;
        if !asset.is_available() {
            return Err(ServiceError::AssetCommitted(id.to_string()));
        }

        store.delete_by_id(id).await?;

        info!(asset_id = %id, "Asset removed");
        Ok(())
    }
}

// =============================================================================
// Availability (rental workflow only)
// =============================================================================

/// Flips an available asset to rented. The caller holds the asset lock.
pub(crate) async fn mark_rented(
    store: &mut FlatFileStore<Asset>,
    id: &str,
) -> ServiceResult<()> {
    let mut asset = store
        .find_by_id(id)
        .ok_or_else(|| ServiceError::AssetNotFound(id.to_string()))?;
    if !asset.is_available() {
        return Err(ServiceError::AssetUnavailable(id.to_string()));
    }

    asset.set_available(false);
    store.update(asset).await?;

    debug!(asset_id = %id, "Asset marked rented");
    Ok(())
}

/// Makes an asset available. The caller holds the asset lock. Already
/// available assets are left alone.
pub(crate) async fn mark_returned(
    store: &mut FlatFileStore<Asset>,
    id: &str,
) -> ServiceResult<()> {
    let mut asset = store
        .find_by_id(id)
        .ok_or_else(|| ServiceError::AssetNotFound(id.to_string()))?;
    if asset.is_available() {
        debug!(asset_id = %id, "Asset already available");
        return Ok(());
    }

    asset.set_available(true);
    store.update(asset).await?;

    debug!(asset_id = %id, "Asset marked returned");
    Ok(())
}

fn validate_asset(asset: &Asset) -> ServiceResult<()> {
    validate_identifier("id", asset.id())?;
    validate_required("make", asset.make())?;
    validate_storable_text("make", asset.make())?;
    validate_required("model", asset.model())?;
    validate_storable_text("model", asset.model())?;
    validate_daily_rate(asset.daily_rate())?;

    if let Some(spec) = asset.motorcycle_spec() {
        validate_required("category", spec.category())?;
        validate_storable_text("category", spec.category())?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use chrono::NaiveDate;
    use fleet_core::MotorcycleSpec;
    use std::path::Path;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn car(id: &str, make: &str, rate: &str) -> Asset {
        Asset::new(id, make, "Model", money(rate)).unwrap()
    }

    fn service(dir: &Path) -> InventoryService {
        InventoryService::new(FlatFileStore::empty(dir.join("vehicles.csv")))
    }

    async fn rent(inventory: &InventoryService, id: &str) -> ServiceResult<()> {
        let mut store = inventory.store().lock().await;
        mark_rented(&mut store, id).await
    }

    async fn give_back(inventory: &InventoryService, id: &str) -> ServiceResult<()> {
        let mut store = inventory.store().lock().await;
        mark_returned(&mut store, id).await
    }

    async fn reload(dir: &Path) -> FlatFileStore<Asset> {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        FlatFileStore::load(dir.join("vehicles.csv"), today).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_forces_available_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(dir.path());

        let mut asset = car("A1", "Toyota", "50.00");
        asset.set_available(false);
        inventory.add(asset).await.unwrap();

        assert!(inventory.is_available("A1").await);
        assert_eq!(reload(dir.path()).await.count(), 1);
    }

    #[tokio::test]
    async fn test_add_validates() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(dir.path());

        for bad in [
            car("", "Toyota", "50.00"),
            car("A1", "  ", "50.00"),
            Asset::new("A1", "Toyota", "", money("50")).unwrap(),
            car("A1", "Toyota", "0"),
            car("A,1", "Toyota", "50"),
            car("A1", "Toyota", "1000000.01"),
        ] {
            assert!(matches!(
                inventory.add(bad).await,
                Err(ServiceError::Validation(_))
            ));
        }
        assert_eq!(inventory.total_count().await, 0);
    }

    #[tokio::test]
    async fn test_padded_input_is_findable_and_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(dir.path());

        let mut spec = MotorcycleSpec::new(650, " Touring ").unwrap();
        spec.set_has_luggage(true);
        inventory
            .add(Asset::motorcycle(" M1", " Kawasaki ", "Versys 650 ", money("65"), spec).unwrap())
            .await
            .unwrap();
        inventory
            .add(Asset::new("A1 ", " Toyota ", " Corolla", money("50")).unwrap())
            .await
            .unwrap();

        let bike = inventory.find_by_id(" M1").await.unwrap();
        assert_eq!(bike.make(), "Kawasaki");
        assert_eq!(bike.motorcycle_spec().unwrap().category(), "Touring");
        assert_eq!(inventory.by_make("toyota").await.len(), 1);

        let in_memory = format!("{:?}", inventory.list().await);
        let reloaded = format!("{:?}", reload(dir.path()).await.find_all());
        assert_eq!(reloaded, in_memory);
    }

    #[tokio::test]
    async fn test_add_duplicate_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(dir.path());
        inventory.add(car("A1", "Toyota", "50")).await.unwrap();

        let err = inventory.add(car("A1", "Honda", "60")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_update_keeps_stored_availability() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(dir.path());
        inventory.add(car("A1", "Toyota", "50")).await.unwrap();
        rent(&inventory, "A1").await.unwrap();

        let mut edited = car("A1", "Toyota", "55.00");
        edited.set_available(true);
        inventory.update(edited).await.unwrap();

        let stored = inventory.find_by_id("A1").await.unwrap();
        assert_eq!(stored.daily_rate(), money("55"));
        assert!(!stored.is_available());

        assert!(matches!(
            inventory.update(car("A9", "Toyota", "50")).await,
            Err(ServiceError::AssetNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_only_when_available() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(dir.path());
        inventory.add(car("A1", "Toyota", "50")).await.unwrap();
        inventory.add(car("A2", "Honda", "60")).await.unwrap();
        rent(&inventory, "A2").await.unwrap();

        inventory.remove("A1").await.unwrap();
        assert!(matches!(
            inventory.remove("A2").await,
            Err(ServiceError::AssetCommitted(_))
        ));
        assert!(matches!(
            inventory.remove("A1").await,
            Err(ServiceError::AssetNotFound(_))
        ));
        assert_eq!(reload(dir.path()).await.count(), 1);
    }

    #[tokio::test]
    async fn test_mark_rented_and_returned() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(dir.path());
        inventory.add(car("A1", "Toyota", "50")).await.unwrap();

        rent(&inventory, "A1").await.unwrap();
        assert!(matches!(
            rent(&inventory, "A1").await,
            Err(ServiceError::AssetUnavailable(_))
        ));

        give_back(&inventory, "A1").await.unwrap();
        give_back(&inventory, "A1").await.unwrap();
        assert!(inventory.is_available("A1").await);

        assert!(matches!(
            give_back(&inventory, "A9").await,
            Err(ServiceError::AssetNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_queries() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(dir.path());
        inventory.add(car("A1", "Toyota", "50")).await.unwrap();
        inventory.add(car("A2", "toyota", "80")).await.unwrap();
        inventory.add(car("A3", "Honda", "65.50")).await.unwrap();
        let spec = MotorcycleSpec::new(650, "Touring").unwrap();
        inventory
            .add(Asset::motorcycle("M1", "Kawasaki", "Versys", money("70"), spec).unwrap())
            .await
            .unwrap();
        rent(&inventory, "A2").await.unwrap();

        assert_eq!(inventory.list().await.len(), 4);
        assert_eq!(inventory.list_available().await.len(), 3);
        assert_eq!(inventory.by_make(" TOYOTA ").await.len(), 2);
        assert!(inventory.by_make("  ").await.is_empty());

        let mid: Vec<String> = inventory
            .by_price_range(money("50"), money("70"))
            .await
            .iter()
            .map(|a| a.id().to_string())
            .collect();
        assert_eq!(mid, vec!["A1", "A3", "M1"]);
        assert!(inventory.by_price_range(money("-1"), money("70")).await.is_empty());
        assert!(inventory.by_price_range(money("70"), money("50")).await.is_empty());

        assert!(inventory.find_by_id("").await.is_none());
        assert!(inventory.find_by_id(" M1 ").await.unwrap().is_motorcycle());
        assert!(!inventory.is_available("nope").await);

        assert_eq!(inventory.total_count().await, 4);
        assert_eq!(inventory.available_count().await, 3);
        assert_eq!(inventory.rented_count().await, 1);
    }
}
