//! Folder creation along a resolved path.

use std::sync::Arc;

use tracing::debug;

use vsfolder_core::error::{AppError, ErrorKind};
use vsfolder_core::result::AppResult;
use vsfolder_core::traits::inventory::InventoryClient;
use vsfolder_core::types::{Folder, FolderPath};

use super::resolver::Resolution;

/// Result of creating the missing part of a folder path.
#[derive(Debug, Clone)]
pub struct CreatedFolder {
    /// The leaf folder.
    pub folder: Folder,
    /// Part of the path that existed before creation.
    pub existing_path: FolderPath,
    /// Folders created, root-most first.
    pub created: Vec<Folder>,
}

/// Creates missing folders root to leaf.
#[derive(Debug, Clone)]
pub struct FolderCreator {
    /// Inventory session.
    client: Arc<dyn InventoryClient>,
}

impl FolderCreator {
    /// Creates a new folder creator.
    pub fn new(client: Arc<dyn InventoryClient>) -> Self {
        Self { client }
    }

    /// Create every folder in `resolution.missing`, parent before child.
    ///
    /// Stops at the first failure with [`ErrorKind::Create`]. Folders created
    /// before the failure are left in place.
    pub async fn create(&self, resolution: Resolution) -> AppResult<CreatedFolder> {
        let Resolution {
            ancestor,
            existing_path,
            missing,
        } = resolution;

        let mut current = ancestor;
        let mut created = Vec::with_capacity(missing.len());

        for name in missing.iter().rev() {
            debug!(parent = %current.inventory_path, name = %name, "Folder not found; creating");
            let folder = self
                .client
                .create_folder(&current, name)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Create,
                        format!("Failed to create folder at {}", current.inventory_path),
                        e,
                    )
                })?;
            created.push(folder.clone());
            current = folder;
        }

        Ok(CreatedFolder {
            folder: current,
            existing_path,
            created,
        })
    }
}
