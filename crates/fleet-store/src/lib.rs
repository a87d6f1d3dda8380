//! # fleet-store: Persistence and Services for the Fleet Rental Engine
//!
//! This crate keeps the fleet on disk as two comma-separated files and
//! exposes the inventory and rental workflows on top of them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Fleet Rental Data Flow                             │
//! │                                                                         │
//! │  Presentation (create rental, list vehicles, ...)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   fleet-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Fleet      │    │   Services    │    │ Repositories │  │   │
//! │  │   │  (fleet.rs)   │    │               │    │  (row codec) │  │   │
//! │  │   │               │    │ Inventory     │    │              │  │   │
//! │  │   │ open +        │───►│ Rental        │───►│ Asset row    │  │   │
//! │  │   │ reconcile     │    │               │    │ Rental row   │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                                │   │
//! │  │                        FlatFileStore<T> (store.rs)             │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          data_dir/vehicles.csv      data_dir/rentals.csv        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`fleet`] - Opening the data files and handing out services
//! - [`service`] - Inventory and rental workflows
//! - [`store`] - Generic flat-file store with atomic rewrites
//! - [`repository`] - Row formats for assets and rentals
//! - [`config`] - TOML configuration with env overrides
//! - [`clock`] - System clock
//! - [`error`] - Store and service error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fleet_store::{Fleet, FleetConfig, SystemClock};
//!
//! let fleet = Fleet::open(FleetConfig::load(None)?, Arc::new(SystemClock)).await?;
//!
//! let rental = fleet
//!     .rentals()
//!     .create_rental("A1", "Jane Doe", "555-0100", start, end)
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod config;
pub mod error;
pub mod fleet;
pub mod repository;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use clock::SystemClock;
pub use config::{FleetConfig, RentalSettings, StorageSettings};
pub use error::{ServiceError, ServiceResult, StoreError, StoreResult};
pub use fleet::{Fleet, LoadReport};
pub use service::{InventoryService, RentalService};
pub use store::{FlatFileStore, LineError, Record};
