//! Path resolution: find the deepest existing ancestor of a folder path.

use std::sync::Arc;

use tracing::debug;

use vsfolder_core::error::{AppError, ErrorKind};
use vsfolder_core::result::AppResult;
use vsfolder_core::traits::inventory::InventoryClient;
use vsfolder_core::types::{Folder, FolderPath, InventoryPath};

/// Outcome of resolving a folder path against the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Deepest folder along the path that already exists.
    pub ancestor: Folder,
    /// Path of `ancestor` relative to the base folder.
    pub existing_path: FolderPath,
    /// Names of the folders that do not exist yet, leaf-most first.
    pub missing: Vec<String>,
}

impl Resolution {
    /// Whether the whole path already exists.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Walks a folder path upward until an existing folder is found.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Inventory session.
    client: Arc<dyn InventoryClient>,
}

impl PathResolver {
    /// Creates a new path resolver.
    pub fn new(client: Arc<dyn InventoryClient>) -> Self {
        Self { client }
    }

    /// Resolve `path` below `base` (a datacenter VM folder).
    ///
    /// Performs at most `path.depth() + 1` lookups, from the full path up to
    /// `base` itself. Fails with [`ErrorKind::Lookup`] when `base` is absent,
    /// when a lookup fails, or when the deepest existing object is not a
    /// folder.
    pub async fn resolve(&self, base: &InventoryPath, path: &FolderPath) -> AppResult<Resolution> {
        let mut missing = Vec::new();

        for depth in (0..=path.depth()).rev() {
            let candidate = path.prefix(depth);
            let full = base.join_folder_path(&candidate);

            let found = self
                .client
                .find_by_inventory_path(&full)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Lookup, format!("error looking up {full}"), e)
                })?;

            if let Some(object) = found {
                let ancestor = object.into_folder()?;
                debug!(
                    ancestor = %ancestor.inventory_path,
                    missing = missing.len(),
                    "Resolved existing ancestor"
                );
                return Ok(Resolution {
                    ancestor,
                    existing_path: candidate,
                    missing,
                });
            }

            if let Some(name) = candidate.name() {
                missing.push(name.to_string());
            }
        }

        Err(AppError::lookup(format!("vSphere base path {base} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsfolder_inventory::providers::{InventoryOp, MemoryInventory};

    fn folder_path(raw: &str) -> FolderPath {
        FolderPath::parse(raw).unwrap()
    }

    async fn setup(existing: &[&str]) -> (Arc<MemoryInventory>, PathResolver) {
        let inventory = Arc::new(MemoryInventory::with_datacenters(["dc1"]).await.unwrap());
        for path in existing {
            inventory
                .add_folder_path(&InventoryPath::new(path))
                .await
                .unwrap();
        }
        let resolver = PathResolver::new(inventory.clone());
        (inventory, resolver)
    }

    #[tokio::test]
    async fn test_fully_existing_path_has_no_missing_segments() {
        let (_, resolver) = setup(&["/dc1/vm/a/b"]).await;
        let base = InventoryPath::new("/dc1/vm");

        let resolution = resolver.resolve(&base, &folder_path("a/b")).await.unwrap();
        assert!(resolution.is_complete());
        assert_eq!(resolution.ancestor.inventory_path.as_str(), "/dc1/vm/a/b");
        assert_eq!(resolution.existing_path, folder_path("a/b"));
    }

    #[tokio::test]
    async fn test_missing_segments_are_leaf_first() {
        let (inventory, resolver) = setup(&["/dc1/vm/a"]).await;
        let base = InventoryPath::new("/dc1/vm");

        let resolution = resolver
            .resolve(&base, &folder_path("a/b/c"))
            .await
            .unwrap();
        assert_eq!(resolution.missing, vec!["c".to_string(), "b".to_string()]);
        assert_eq!(resolution.ancestor.inventory_path.as_str(), "/dc1/vm/a");
        assert_eq!(resolution.existing_path, folder_path("a"));

        assert_eq!(
            inventory.operations().await,
            vec![
                InventoryOp::Lookup(InventoryPath::new("/dc1/vm/a/b/c")),
                InventoryOp::Lookup(InventoryPath::new("/dc1/vm/a/b")),
                InventoryOp::Lookup(InventoryPath::new("/dc1/vm/a")),
            ]
        );
    }

    #[tokio::test]
    async fn test_nothing_exists_resolves_to_base() {
        let (_, resolver) = setup(&[]).await;
        let base = InventoryPath::new("/dc1/vm");

        let resolution = resolver
            .resolve(&base, &folder_path("dev/team-a"))
            .await
            .unwrap();
        assert!(resolution.existing_path.is_root());
        assert_eq!(resolution.ancestor.inventory_path, base);
        assert_eq!(resolution.missing.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_base_is_fatal() {
        let (inventory, resolver) = setup(&[]).await;
        let base = InventoryPath::new("/dc1/vm");
        inventory.remove(&base).await.unwrap();

        let err = resolver
            .resolve(&base, &folder_path("dev/team-a"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lookup);
        assert!(err.message.contains("/dc1/vm"));
        assert_eq!(inventory.operations().await.len(), 3);
    }

    #[tokio::test]
    async fn test_non_folder_ancestor_is_lookup_error() {
        let (inventory, resolver) = setup(&[]).await;
        let base = InventoryPath::new("/dc1/vm");
        inventory.add_vm(&base, "web-01").await.unwrap();

        let err = resolver
            .resolve(&base, &folder_path("web-01/logs"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lookup);
    }

    #[tokio::test]
    async fn test_lookup_fault_is_lookup_error() {
        let (inventory, resolver) = setup(&[]).await;
        let base = InventoryPath::new("/dc1/vm");
        inventory
            .fail_lookup(&InventoryPath::new("/dc1/vm/dev"))
            .await;

        let err = resolver
            .resolve(&base, &folder_path("dev/team-a"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lookup);
        assert!(err.source.is_some());
    }
}
