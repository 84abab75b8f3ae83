//! Bounded pruning of empty folders.
//!
//! Deletion walks from the leaf toward the recorded existing-path boundary,
//! one level per step. A folder is destroyed only after its children list
//! comes back empty, and the boundary folder itself is never looked up,
//! inspected or destroyed.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use vsfolder_core::error::{AppError, ErrorKind};
use vsfolder_core::result::AppResult;
use vsfolder_core::traits::inventory::InventoryClient;
use vsfolder_core::types::{Folder, FolderPath, InventoryPath, ObjectRef, TaskState};

/// What a prune pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    /// Folders destroyed, leaf first.
    pub destroyed: Vec<InventoryPath>,
    /// Paths that were already gone when reached.
    pub skipped: Vec<InventoryPath>,
}

/// Deletes empty folders from a leaf up to, but excluding, a boundary.
#[derive(Debug, Clone)]
pub struct BoundedPruner {
    /// Inventory session.
    client: Arc<dyn InventoryClient>,
}

impl BoundedPruner {
    /// Creates a new pruner.
    pub fn new(client: Arc<dyn InventoryClient>) -> Self {
        Self { client }
    }

    /// Prune `path` back to `boundary`, both relative to `base`.
    ///
    /// Takes exactly `path.depth() - boundary.depth()` steps. Fails with
    /// [`ErrorKind::NonEmpty`] at the first folder that still has children;
    /// folders already destroyed stay destroyed.
    pub async fn prune(
        &self,
        base: &InventoryPath,
        path: &FolderPath,
        boundary: &FolderPath,
    ) -> AppResult<PruneReport> {
        if !path.starts_with(boundary) {
            return Err(AppError::validation(format!(
                "existing path '{boundary}' is not a prefix of '{path}'"
            )));
        }

        let mut report = PruneReport::default();
        let steps = path.depth() - boundary.depth();
        if steps == 0 {
            debug!(path = %path, "Nothing was created; skipping prune");
            return Ok(report);
        }

        info!(existing_path = %boundary, "Deleting empty sub-folders of existing path");
        let mut current = path.clone();
        let mut folder = self.lookup(base, &current).await?;

        for _ in 0..steps {
            let full = base.join_folder_path(&current);
            match folder.take() {
                Some(target) => {
                    info!(path = %current, "Deleting folder");
                    let children = self.client.children(&target).await.map_err(|e| {
                        AppError::with_source(
                            ErrorKind::Lookup,
                            format!("error listing children of {full}"),
                            e,
                        )
                    })?;
                    if !children.is_empty() {
                        return Err(AppError::non_empty(format!(
                            "Folder {current} is non-empty and will not be deleted"
                        )));
                    }
                    self.destroy(&target).await?;
                    report.destroyed.push(full);
                }
                None => {
                    warn!(path = %full, "Folder already removed; skipping");
                    report.skipped.push(full);
                }
            }

            let parent = current
                .parent()
                .ok_or_else(|| AppError::internal(format!("{current} has no parent")))?;
            debug_assert!(parent.depth() < current.depth());
            debug!(path = %current, parent = %parent, "Computed parent path");
            current = parent;

            if current != *boundary {
                folder = self.lookup(base, &current).await?;
            }
        }

        debug_assert_eq!(&current, boundary);
        Ok(report)
    }

    async fn lookup(&self, base: &InventoryPath, path: &FolderPath) -> AppResult<Option<Folder>> {
        let full = base.join_folder_path(path);
        self.client
            .find_by_inventory_path(&full)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Lookup,
                    format!("Could not locate folder {full}"),
                    e,
                )
            })?
            .map(ObjectRef::into_folder)
            .transpose()
    }

    async fn destroy(&self, folder: &Folder) -> AppResult<()> {
        let path = &folder.inventory_path;
        let task = self.client.destroy(folder).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Destroy,
                format!("Failed to destroy folder {path}"),
                e,
            )
        })?;

        let info = self.client.wait_for_task(&task).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Destroy,
                format!("Failed waiting on task {} for {path}", task.value),
                e,
            )
        })?;

        match info.state {
            TaskState::Success => Ok(()),
            state => Err(AppError::destroy(format!(
                "Destroy task {} for {path} ended in state {state:?}: {}",
                task.value,
                info.error.as_deref().unwrap_or("no fault reported")
            ))),
        }
    }
}
