//! # Fleet Handle
//!
//! Opens both data files, repairs availability, and hands out services.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Fleet::open(config, clock)                         │
//! │                                                                         │
//! │  config.validate()                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load vehicles.csv ──┐                                                 │
//! │  load rentals.csv  ──┤  (bad lines logged and skipped)                 │
//! │                      ▼                                                  │
//! │  reconcile: asset.available := no active rental references it          │
//! │       │     (rentals are the source of truth; fixes are written back)  │
//! │       ▼                                                                 │
//! │  Fleet { InventoryService, RentalService }                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use fleet_core::{Asset, Clock, Rental};

use crate::config::FleetConfig;
use crate::error::StoreResult;
use crate::service::{InventoryService, RentalService};
use crate::store::FlatFileStore;

/// What happened while opening the data files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Asset lines dropped as unparseable or duplicate.
    pub assets_skipped: usize,
    /// Rental lines dropped as unparseable or duplicate.
    pub rentals_skipped: usize,
    /// Assets whose availability disagreed with the rentals and was fixed.
    pub availability_repaired: usize,
    /// Active rentals pointing at an asset that does not exist.
    pub orphaned_rentals: usize,
}

/// Main handle providing service access.
///
/// ## Usage
/// ```rust,ignore
/// let config = FleetConfig::load(None)?;
/// let fleet = Fleet::open(config, Arc::new(SystemClock)).await?;
///
/// let available = fleet.inventory().list_available().await;
/// let overdue = fleet.rentals().overdue().await;
/// ```
#[derive(Debug, Clone)]
pub struct Fleet {
    config: FleetConfig,
    inventory: InventoryService,
    rentals: RentalService,
    report: LoadReport,
}

impl Fleet {
    /// Loads both stores and reconciles asset availability.
    ///
    /// ## Errors
    /// - [`StoreError::Config`](crate::StoreError::Config) for an invalid config
    /// - [`StoreError::Io`](crate::StoreError::Io) if a file exists but cannot be
    ///   read, or a repair cannot be written
    pub async fn open(config: FleetConfig, clock: Arc<dyn Clock>) -> StoreResult<Self> {
        config.validate()?;
        let today = clock.today();

        info!(data_dir = %config.storage.data_dir.display(), %today, "Opening fleet");

        let mut assets = FlatFileStore::<Asset>::load(config.assets_path(), today).await?;
        let rentals = FlatFileStore::<Rental>::load(config.rentals_path(), today).await?;

        let mut report = LoadReport {
            assets_skipped: assets.skipped_lines(),
            rentals_skipped: rentals.skipped_lines(),
            ..LoadReport::default()
        };
        reconcile(&mut assets, &rentals, &mut report).await?;

        let inventory = InventoryService::new(assets);
        let rental_service = RentalService::new(
            rentals,
            inventory.clone(),
            clock,
            config.rentals.clone(),
        );

        info!(
            assets = inventory.total_count().await,
            rentals = rental_service.total_count().await,
            repaired = report.availability_repaired,
            "Fleet ready"
        );

        Ok(Fleet {
            config,
            inventory,
            rentals: rental_service,
            report,
        })
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    pub fn report(&self) -> LoadReport {
        self.report
    }

    /// Handle to the asset catalogue.
    pub fn inventory(&self) -> InventoryService {
        self.inventory.clone()
    }

    /// Handle to the rental workflows.
    pub fn rentals(&self) -> RentalService {
        self.rentals.clone()
    }
}

/// Makes every asset's availability agree with the active rentals.
async fn reconcile(
    assets: &mut FlatFileStore<Asset>,
    rentals: &FlatFileStore<Rental>,
    report: &mut LoadReport,
) -> StoreResult<()> {
    let mut active: HashMap<&str, Vec<&str>> = HashMap::new();
    for rental in rentals.records().iter().filter(|r| r.is_active()) {
        active.entry(rental.asset_id()).or_default().push(rental.id());
    }

    for (asset_id, rental_ids) in &active {
        if !assets.contains(asset_id) {
            warn!(asset_id = %asset_id, rentals = ?rental_ids, "Active rental for unknown asset");
            report.orphaned_rentals += rental_ids.len();
        } else if rental_ids.len() > 1 {
            warn!(asset_id = %asset_id, rentals = ?rental_ids, "Asset has several active rentals");
        }
    }

    let mismatched: Vec<Asset> = assets
        .records()
        .iter()
        .filter(|a| a.is_available() == active.contains_key(a.id()))
        .cloned()
        .collect();

    for mut asset in mismatched {
        let expected = !active.contains_key(asset.id());
        warn!(
            asset_id = %asset.id(),
            stored = asset.is_available(),
            expected,
            "Repairing asset availability"
        );
        asset.set_available(expected);
        assets.update(asset).await?;
        report.availability_repaired += 1;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
