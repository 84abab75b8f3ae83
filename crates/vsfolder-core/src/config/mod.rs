//! Application configuration schemas.
//!
//! All configuration structs are deserialized from an optional TOML file via
//! the `config` crate, overlaid with `VSFOLDER__*` environment variables.
//! Every field has a default so an empty configuration is valid.

pub mod inventory;
pub mod logging;
pub mod state;

use serde::{Deserialize, Serialize};

use self::inventory::InventoryConfig;
use self::logging::LoggingConfig;
use self::state::StateConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Inventory client settings.
    #[serde(default)]
    pub inventory: InventoryConfig,
    /// Resource state store settings.
    #[serde(default)]
    pub state: StateConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional; environment variables prefixed with
    /// `VSFOLDER__` (e.g. `VSFOLDER__INVENTORY__SNAPSHOT_PATH`) override it.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::new(path, config::FileFormat::Toml).required(false))
            .add_source(
                config::Environment::with_prefix("VSFOLDER")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("inventory.datacenters")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
