//! # Fleet Configuration
//!
//! Where the data files live and how rental ids are minted.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FLEET_DATA_DIR=/srv/fleet                                          │
//! │     FLEET_RENTAL_ID_PREFIX=B                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/fleet-rental/fleet.toml (Linux)                          │
//! │     ~/Library/Application Support/com.fleet.rental/fleet.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     platform data dir, vehicles.csv, rentals.csv, R001...              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # fleet.toml
//! [storage]
//! data_dir = "/srv/fleet/data"
//! assets_file = "vehicles.csv"
//! rentals_file = "rentals.csv"
//!
//! [rentals]
//! id_prefix = "R"
//! id_width = 3
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use fleet_core::{DEFAULT_RENTAL_ID_PREFIX, DEFAULT_RENTAL_ID_WIDTH};

use crate::error::{StoreError, StoreResult};

/// Largest zero-padded width accepted for rental ids.
pub const MAX_RENTAL_ID_WIDTH: usize = 9;

// =============================================================================
// Storage Settings
// =============================================================================

/// Location of the flat files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding both data files. Created on first write.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// File name of the asset table inside `data_dir`.
    #[serde(default = "default_assets_file")]
    pub assets_file: String,

    /// File name of the rental table inside `data_dir`.
    #[serde(default = "default_rentals_file")]
    pub rentals_file: String,
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "fleet", "rental")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn default_assets_file() -> String {
    "vehicles.csv".to_string()
}

fn default_rentals_file() -> String {
    "rentals.csv".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_dir: default_data_dir(),
            assets_file: default_assets_file(),
            rentals_file: default_rentals_file(),
        }
    }
}

// =============================================================================
// Rental Settings
// =============================================================================

/// Rental id format: `{id_prefix}{n:0id_width}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalSettings {
    /// Single-character prefix of generated ids.
    #[serde(default = "default_id_prefix")]
    pub id_prefix: char,

    /// Zero-padded width of the numeric part (1..=9).
    #[serde(default = "default_id_width")]
    pub id_width: usize,
}

fn default_id_prefix() -> char {
    DEFAULT_RENTAL_ID_PREFIX
}

fn default_id_width() -> usize {
    DEFAULT_RENTAL_ID_WIDTH
}

impl Default for RentalSettings {
    fn default() -> Self {
        RentalSettings {
            id_prefix: default_id_prefix(),
            id_width: default_id_width(),
        }
    }
}

// =============================================================================
// Fleet Config
// =============================================================================

/// Complete configuration for opening a [`Fleet`](crate::Fleet).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub rentals: RentalSettings,
}

impl FleetConfig {
    /// Default configuration rooted at `data_dir`, ignoring file and
    /// environment. Handy for tests and tools.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.storage.data_dir = data_dir.into();
        config
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (fleet.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading fleet config from file");
                let contents =
                    std::fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load fleet config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::io(&path, e))?;

        info!(?path, "Fleet config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(StoreError::Config("data_dir must not be empty".into()));
        }

        for (key, name) in [
            ("assets_file", &self.storage.assets_file),
            ("rentals_file", &self.storage.rentals_file),
        ] {
            if name.trim().is_empty() {
                return Err(StoreError::Config(format!("{} must not be empty", key)));
            }
        }

        if self.storage.assets_file == self.storage.rentals_file {
            return Err(StoreError::Config(
                "assets_file and rentals_file must differ".into(),
            ));
        }

        let prefix = self.rentals.id_prefix;
        if prefix.is_ascii_digit() || prefix.is_whitespace() || prefix == ',' {
            return Err(StoreError::Config(format!(
                "id_prefix must be a non-digit, non-separator character, got '{}'",
                prefix
            )));
        }

        if !(1..=MAX_RENTAL_ID_WIDTH).contains(&self.rentals.id_width) {
            return Err(StoreError::Config(format!(
                "id_width must be between 1 and {}, got {}",
                MAX_RENTAL_ID_WIDTH, self.rentals.id_width
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("FLEET_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = PathBuf::from(dir);
        }

        if let Ok(name) = std::env::var("FLEET_ASSETS_FILE") {
            self.storage.assets_file = name;
        }

        if let Ok(name) = std::env::var("FLEET_RENTALS_FILE") {
            self.storage.rentals_file = name;
        }

        if let Ok(prefix) = std::env::var("FLEET_RENTAL_ID_PREFIX") {
            let mut chars = prefix.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    debug!(prefix = %c, "Overriding rental id prefix from environment");
                    self.rentals.id_prefix = c;
                }
                _ => warn!(prefix = %prefix, "Rental id prefix must be a single character"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "fleet", "rental")
            .map(|dirs| dirs.config_dir().join("fleet.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Full path of the asset file.
    pub fn assets_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.assets_file)
    }

    /// Full path of the rental file.
    pub fn rentals_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.rentals_file)
    }
}
