//! Folder spec working record.

use serde::{Deserialize, Serialize};

use vsfolder_core::error::AppError;
use vsfolder_core::result::AppResult;
use vsfolder_core::types::FolderPath;

use super::resource::ResourceData;

/// Validated folder request for one resource operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderSpec {
    /// Datacenter name. Empty selects the default datacenter.
    pub datacenter: String,
    /// Desired folder path below the VM folder. Never the VM folder itself.
    pub path: FolderPath,
    /// Longest prefix of `path` that existed before create ran.
    pub existing_path: FolderPath,
}

impl FolderSpec {
    /// Build a spec for a create: `existing_path` is not yet known and
    /// starts out equal to `path`.
    pub fn for_create(data: &ResourceData) -> AppResult<Self> {
        let path = parse_target(&data.path)?;
        Ok(Self {
            datacenter: data.datacenter.clone(),
            existing_path: path.clone(),
            path,
        })
    }

    /// Build a spec from persisted state, including the recorded
    /// `existing_path` boundary.
    ///
    /// A missing `existing_path` is treated as the VM folder.
    pub fn from_state(data: &ResourceData) -> AppResult<Self> {
        let path = parse_target(&data.path)?;
        let existing_path = match data.existing_path.as_deref() {
            Some(raw) => FolderPath::parse(raw)?,
            None => FolderPath::root(),
        };

        if !path.starts_with(&existing_path) {
            return Err(AppError::validation(format!(
                "existing_path '{existing_path}' is not a prefix of path '{path}'"
            )));
        }

        Ok(Self {
            datacenter: data.datacenter.clone(),
            path,
            existing_path,
        })
    }

    /// Number of folders this resource created, i.e. how many the pruner
    /// may remove.
    pub fn created_depth(&self) -> usize {
        self.path.depth() - self.existing_path.depth()
    }
}

fn parse_target(raw: &str) -> AppResult<FolderPath> {
    let path = FolderPath::parse(raw)?;
    if path.is_root() {
        return Err(AppError::validation("path must name at least one folder"));
    }
    Ok(path)
}
