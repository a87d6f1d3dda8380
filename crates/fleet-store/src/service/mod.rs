//! # Services
//!
//! The workflows callers actually use. Each service is a cheap `Clone`
//! handle over shared stores.
//!
//! ## Ownership and Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  InventoryService ── owns asset mutation                               │
//! │       │   add / update / remove      → asset lock only                 │
//! │       │                                                                 │
//! │  RentalService ───── owns rental mutation, requests availability flips │
//! │       │   create / complete          → rental lock, THEN asset lock    │
//! │       │                                                                 │
//! │  Lock order is always rentals → assets, never the reverse.             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod inventory;
pub mod rental;

pub use inventory::InventoryService;
pub use rental::RentalService;
