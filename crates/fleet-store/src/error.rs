//! # Store and Service Error Types
//!
//! Error types for persistence and for the service layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / toml errors                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError ← Adds path / entity context                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError ← Also absorbs CoreError / ValidationError               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Presentation displays a user-facing message                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;

use fleet_core::{CoreError, ValidationError};

// =============================================================================
// Store Error
// =============================================================================

/// Flat-file persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id.
    ///
    /// ## When This Occurs
    /// - `update` on a record that was never saved or was deleted
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A record with this id already exists.
    #[error("Duplicate {entity}: '{id}' already exists")]
    Duplicate { entity: String, id: String },

    /// Reading or rewriting the backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory missing or read-only
    /// - Disk full
    /// - Rename across filesystems
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store could not restore a consistent state after a failed
    /// multi-step operation and refuses further writes.
    #[error("Store {} is poisoned; restart to reload from disk", path.display())]
    Poisoned { path: PathBuf },

    /// Configuration could not be read, written or validated.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::Duplicate {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Config(format!("invalid TOML: {}", err))
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Config(format!("could not serialize config: {}", err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Service Error
// =============================================================================

/// Errors returned by [`InventoryService`](crate::InventoryService) and
/// [`RentalService`](crate::RentalService).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Rental not found: {0}")]
    RentalNotFound(String),

    /// The asset is already out on an active rental.
    #[error("Asset {0} is not available")]
    AssetUnavailable(String),

    /// Removing an asset that an active rental still holds.
    #[error("Asset {0} is currently rented and cannot be removed")]
    AssetCommitted(String),

    #[error("Rental {0} is already completed")]
    RentalAlreadyCompleted(String),

    #[error("Start date {start} is in the past (today is {today})")]
    StartDateInPast { start: NaiveDate, today: NaiveDate },

    #[error("End date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Rate × days came out at zero or less.
    #[error("Rental cost must be positive")]
    NonPositiveCost,

    #[error("Rental cost is too large to represent")]
    CostOverflow,

    /// Persistence failed underneath the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidDateRange { start, end } => {
                ServiceError::InvalidDateRange { start, end }
            }
            CoreError::RentalAlreadyCompleted(id) => ServiceError::RentalAlreadyCompleted(id),
            CoreError::CostOverflow => ServiceError::CostOverflow,
            CoreError::Validation(v) => ServiceError::Validation(v),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_messages() {
        assert_eq!(
            StoreError::not_found("Asset", "A1").to_string(),
            "Asset not found: A1"
        );
        assert_eq!(
            StoreError::duplicate("Rental", "R001").to_string(),
            "Duplicate Rental: 'R001' already exists"
        );

        let io = StoreError::io(
            "/data/assets.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.to_string(), "I/O error on /data/assets.csv: denied");
    }

    #[test]
    fn test_core_error_maps_to_service_error() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 13).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let err: ServiceError = CoreError::InvalidDateRange { start, end }.into();
        assert!(matches!(err, ServiceError::InvalidDateRange { .. }));

        let err: ServiceError = CoreError::RentalAlreadyCompleted("R001".into()).into();
        assert!(matches!(err, ServiceError::RentalAlreadyCompleted(id) if id == "R001"));

        let err: ServiceError = CoreError::from(ValidationError::required("make")).into();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_store_error_is_transparent_in_service_error() {
        let err: ServiceError = StoreError::not_found("Asset", "A9").into();
        assert_eq!(err.to_string(), "Asset not found: A9");
    }
}
