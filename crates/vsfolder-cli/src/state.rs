//! JSON file store for resource records, keyed by resource name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use vsfolder_core::error::{AppError, ErrorKind};
use vsfolder_core::result::AppResult;
use vsfolder_entity::folder::ResourceData;

/// Current state file format version.
const STATE_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    version: u32,
    #[serde(default)]
    resources: BTreeMap<String, ResourceData>,
}

/// Persists `vsphere_folder` records between CLI invocations.
#[derive(Debug, Clone)]
pub struct StateStore {
    /// State file location.
    path: PathBuf,
}

impl StateStore {
    /// Creates a store backed by `path`. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// State file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records. A missing file is an empty state.
    pub async fn load(&self) -> AppResult<BTreeMap<String, ResourceData>> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Io,
                    format!("Failed to read state file: {}", self.path.display()),
                    e,
                ));
            }
        };

        let state: StateFile = serde_json::from_slice(&raw)?;
        if state.version != STATE_VERSION {
            return Err(AppError::validation(format!(
                "Unsupported state file version {} in {}",
                state.version,
                self.path.display()
            )));
        }
        debug!(path = %self.path.display(), resources = state.resources.len(), "Loaded state");
        Ok(state.resources)
    }

    /// Replace the stored records.
    pub async fn save(&self, resources: &BTreeMap<String, ResourceData>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let state = StateFile {
            version: STATE_VERSION,
            resources: resources.clone(),
        };
        fs::write(&self.path, serde_json::to_vec_pretty(&state)?)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Io,
                    format!("Failed to write state file: {}", self.path.display()),
                    e,
                )
            })?;
        debug!(path = %self.path.display(), resources = resources.len(), "Saved state");
        Ok(())
    }
}
