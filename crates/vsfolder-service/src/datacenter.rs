//! Datacenter resolution shared by create, read and delete.

use std::sync::Arc;

use tracing::debug;

use vsfolder_core::error::{AppError, ErrorKind};
use vsfolder_core::result::AppResult;
use vsfolder_core::traits::inventory::InventoryClient;
use vsfolder_core::types::Datacenter;

/// Resolves a datacenter by name, or the default datacenter.
#[derive(Debug, Clone)]
pub struct DatacenterResolver {
    /// Inventory session.
    client: Arc<dyn InventoryClient>,
}

impl DatacenterResolver {
    /// Creates a new datacenter resolver.
    pub fn new(client: Arc<dyn InventoryClient>) -> Self {
        Self { client }
    }

    /// Resolve `name`, or the default datacenter when `name` is empty.
    ///
    /// The default datacenter is the only datacenter in the inventory; zero
    /// or several datacenters make the default ambiguous.
    pub async fn resolve(&self, name: &str) -> AppResult<Datacenter> {
        if name.is_empty() {
            return self.default_datacenter().await;
        }

        self.client
            .find_datacenter(name)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Lookup,
                    format!("error looking up datacenter '{name}'"),
                    e,
                )
            })?
            .ok_or_else(|| AppError::lookup(format!("datacenter '{name}' not found")))
    }

    async fn default_datacenter(&self) -> AppResult<Datacenter> {
        let mut datacenters = self.client.list_datacenters().await.map_err(|e| {
            AppError::with_source(ErrorKind::Lookup, "error listing datacenters", e)
        })?;

        match datacenters.len() {
            0 => Err(AppError::lookup("no default datacenter found")),
            1 => {
                let dc = datacenters.remove(0);
                debug!(datacenter = %dc.name, "Using default datacenter");
                Ok(dc)
            }
            n => Err(AppError::lookup(format!(
                "default datacenter resolves to {n} instances, please specify one"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsfolder_inventory::providers::MemoryInventory;

    #[tokio::test]
    async fn test_resolve_by_name() {
        let inventory = MemoryInventory::with_datacenters(["east", "west"]).await.unwrap();
        let resolver = DatacenterResolver::new(Arc::new(inventory));
        let dc = resolver.resolve("west").await.unwrap();
        assert_eq!(dc.name, "west");
        assert_eq!(dc.vm_folder_path().as_str(), "/west/vm");
    }

    #[tokio::test]
    async fn test_unknown_name_is_lookup_error() {
        let inventory = MemoryInventory::with_datacenters(["east"]).await.unwrap();
        let resolver = DatacenterResolver::new(Arc::new(inventory));
        let err = resolver.resolve("north").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lookup);
    }

    #[tokio::test]
    async fn test_default_requires_single_datacenter() {
        let single = MemoryInventory::with_datacenters(["only"]).await.unwrap();
        let dc = DatacenterResolver::new(Arc::new(single))
            .resolve("")
            .await
            .unwrap();
        assert_eq!(dc.name, "only");

        let none = MemoryInventory::new();
        let err = DatacenterResolver::new(Arc::new(none))
            .resolve("")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lookup);

        let many = MemoryInventory::with_datacenters(["a", "b"]).await.unwrap();
        let err = DatacenterResolver::new(Arc::new(many))
            .resolve("")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lookup);
        assert!(err.message.contains("2 instances"));
    }
}
