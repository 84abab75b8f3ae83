//! The `vsphere_folder` resource: create, read and delete entry points
//! called by the plugin host.

use std::sync::Arc;

use tracing::info;

use vsfolder_core::error::{AppError, ErrorKind};
use vsfolder_core::result::AppResult;
use vsfolder_core::traits::inventory::InventoryClient;
use vsfolder_entity::folder::{FolderSpec, ResourceData};

use crate::datacenter::DatacenterResolver;
use crate::folder::{BoundedPruner, FolderCreator, PathResolver, PruneReport};

/// Folder resource operations over one inventory session.
#[derive(Debug, Clone)]
pub struct FolderResource {
    /// Inventory session.
    client: Arc<dyn InventoryClient>,
    /// Datacenter resolver.
    datacenters: DatacenterResolver,
    /// Path resolver.
    resolver: PathResolver,
    /// Folder creator.
    creator: FolderCreator,
    /// Bounded pruner.
    pruner: BoundedPruner,
}

impl FolderResource {
    /// Creates the resource, sharing `client` across its components.
    pub fn new(client: Arc<dyn InventoryClient>) -> Self {
        Self {
            datacenters: DatacenterResolver::new(Arc::clone(&client)),
            resolver: PathResolver::new(Arc::clone(&client)),
            creator: FolderCreator::new(Arc::clone(&client)),
            pruner: BoundedPruner::new(Arc::clone(&client)),
            client,
        }
    }

    /// Create the folder path described by `data`.
    ///
    /// On success sets `existing_path` and the identity
    /// `"<datacenter>/<path>"`, then refreshes the record with [`Self::read`].
    pub async fn create(&self, data: &mut ResourceData) -> AppResult<()> {
        let spec = FolderSpec::for_create(data)?;
        let dc = self.datacenters.resolve(&spec.datacenter).await?;

        let resolution = self
            .resolver
            .resolve(&dc.vm_folder_path(), &spec.path)
            .await?;
        let created = self.creator.create(resolution).await?;

        data.existing_path = Some(created.existing_path.to_string());
        data.set_id(format!("{}/{}", dc.name, spec.path));
        info!(
            datacenter = %dc.name,
            path = %spec.path,
            existing_path = %created.existing_path,
            created = created.created.len(),
            "Created folder"
        );

        self.read(data).await
    }

    /// Refresh `data` from the inventory.
    ///
    /// A folder that no longer exists clears the identity instead of
    /// failing, so the host knows to recreate it.
    pub async fn read(&self, data: &mut ResourceData) -> AppResult<()> {
        let spec = FolderSpec::from_state(data)?;
        let dc = self.datacenters.resolve(&spec.datacenter).await?;
        let full = dc.vm_folder_path().join_folder_path(&spec.path);

        let found = self
            .client
            .find_by_inventory_path(&full)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Lookup, format!("error looking up {full}"), e)
            })?;

        if found.is_none() {
            info!(path = %full, "Folder no longer exists; clearing identity");
            data.clear_id();
        }
        Ok(())
    }

    /// Delete the folders this resource created, leaf first, stopping at the
    /// recorded `existing_path`. Clears the identity on success.
    pub async fn delete(&self, data: &mut ResourceData) -> AppResult<PruneReport> {
        let spec = FolderSpec::from_state(data)?;
        let dc = self.datacenters.resolve(&spec.datacenter).await?;

        let report = self
            .pruner
            .prune(&dc.vm_folder_path(), &spec.path, &spec.existing_path)
            .await?;

        data.clear_id();
        info!(
            datacenter = %dc.name,
            path = %spec.path,
            destroyed = report.destroyed.len(),
            "Deleted folder"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsfolder_core::types::InventoryPath;
    use vsfolder_inventory::providers::MemoryInventory;

    async fn setup() -> (Arc<MemoryInventory>, FolderResource) {
        let inventory = Arc::new(MemoryInventory::with_datacenters(["dc1"]).await.unwrap());
        let resource = FolderResource::new(inventory.clone());
        (inventory, resource)
    }

    #[tokio::test]
    async fn test_create_records_existing_path_and_identity() {
        let (inventory, resource) = setup().await;
        inventory
            .add_folder_path(&InventoryPath::new("/dc1/vm/shared"))
            .await
            .unwrap();

        let mut data = ResourceData::new("dc1", "shared/app/");
        resource.create(&mut data).await.unwrap();

        assert_eq!(data.id.as_deref(), Some("dc1/shared/app"));
        assert_eq!(data.existing_path.as_deref(), Some("shared"));
        assert!(inventory.exists(&InventoryPath::new("/dc1/vm/shared/app")).await);
    }

    #[tokio::test]
    async fn test_create_existing_path_is_noop() {
        let (inventory, resource) = setup().await;
        inventory
            .add_folder_path(&InventoryPath::new("/dc1/vm/a/b"))
            .await
            .unwrap();

        let mut data = ResourceData::new("dc1", "a/b");
        resource.create(&mut data).await.unwrap();
        assert_eq!(data.existing_path.as_deref(), Some("a/b"));
        assert!(inventory.mutations().await.is_empty());

        resource.delete(&mut data).await.unwrap();
        assert!(inventory.mutations().await.is_empty());
        assert!(inventory.exists(&InventoryPath::new("/dc1/vm/a/b")).await);
        assert!(!data.exists());
    }

    #[tokio::test]
    async fn test_read_clears_identity_on_drift() {
        let (inventory, resource) = setup().await;
        let mut data = ResourceData::new("", "ops");
        resource.create(&mut data).await.unwrap();
        assert!(data.exists());

        inventory
            .remove(&InventoryPath::new("/dc1/vm/ops"))
            .await
            .unwrap();
        resource.read(&mut data).await.unwrap();
        assert!(!data.exists());
    }

    #[tokio::test]
    async fn test_invalid_path_is_rejected() {
        let (inventory, resource) = setup().await;
        let mut data = ResourceData::new("dc1", "a//b");
        let err = resource.create(&mut data).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(inventory.operations().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_datacenter_is_lookup_error() {
        let (_, resource) = setup().await;
        let mut data = ResourceData::new("dc9", "a");
        let err = resource.create(&mut data).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lookup);
        assert!(!data.exists());
    }
}
