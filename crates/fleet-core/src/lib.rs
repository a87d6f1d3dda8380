//! # fleet-core: Pure Domain Logic for the Fleet Rental Engine
//!
//! This crate holds the entity model and every rule that can be decided
//! without touching a disk: money arithmetic, rental periods, cost and
//! insurance rules, and input validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Fleet Rental Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (GUI / CLI, external)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ primitive scalars only                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │     fleet-store: InventoryService, RentalService, FlatFileStore │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fleet-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │  Asset    │  │   Money   │  │  days ×   │  │   rules   │  │   │
//! │  │   │  Rental   │  │           │  │  rate     │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │motorcycle │  │   clock   │                                 │   │
//! │  │   │ insurance │  │  "today"  │                                 │   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO SYSTEM TIME • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Asset, Rental, Customer
//! - [`motorcycle`] - Motorcycle specialization and its insurance/licence rules
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Billable days and rental cost
//! - [`clock`] - Injected notion of "today"
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fleet_core::{pricing, Money};
//!
//! let rate = Money::from_cents(5000); // $50.00/day
//! let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 1, 13).unwrap();
//!
//! let cost = pricing::rental_cost(rate, start, end).unwrap();
//! assert_eq!(cost.cents(), 15000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod error;
pub mod money;
pub mod motorcycle;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, FixedClock};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use motorcycle::{LicenseClass, MotorcycleSpec};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Highest daily rate the inventory accepts ($1,000,000.00). Keeps every
/// cost over a representable date range inside i64 cents.
pub const MAX_DAILY_RATE: Money = Money::from_cents(100_000_000);

/// Smallest passenger capacity a motorcycle can be configured with.
pub const MIN_PASSENGER_CAPACITY: u8 = 1;

/// Largest passenger capacity a motorcycle can be configured with.
pub const MAX_PASSENGER_CAPACITY: u8 = 3;

/// Capacity a motorcycle is raised to when a sidecar is attached.
pub const SIDECAR_PASSENGER_CAPACITY: u8 = 3;

/// Capacity given to a new motorcycle (rider plus one passenger).
pub const DEFAULT_PASSENGER_CAPACITY: u8 = 2;

/// Prefix of generated rental ids (`R001`, `R002`, ...).
pub const DEFAULT_RENTAL_ID_PREFIX: char = 'R';

/// Zero-padded width of the numeric part of generated rental ids.
pub const DEFAULT_RENTAL_ID_WIDTH: usize = 3;
