//! Inventory client configuration.

use serde::{Deserialize, Serialize};

/// Which inventory client to construct and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Inventory client type. Only `"memory"` is built in.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// JSON snapshot file backing the in-memory inventory. When unset the
    /// inventory lives only for the lifetime of the process.
    #[serde(default)]
    pub snapshot_path: Option<String>,
    /// Datacenters created when a fresh in-memory inventory is seeded.
    #[serde(default = "default_datacenters")]
    pub datacenters: Vec<String>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            snapshot_path: None,
            datacenters: default_datacenters(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_datacenters() -> Vec<String> {
    vec!["dc1".to_string()]
}
