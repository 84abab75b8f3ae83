//! Resource state store configuration.

use serde::{Deserialize, Serialize};

/// Where the CLI host persists resource records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Path to the JSON state file.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "./data/vsfolder.state.json".to_string()
}
