//! Integration tests for the folder resource lifecycle.

use std::sync::Arc;

use vsfolder_core::error::ErrorKind;
use vsfolder_core::types::InventoryPath;
use vsfolder_entity::folder::ResourceData;
use vsfolder_inventory::providers::{InventoryOp, MemoryInventory};
use vsfolder_service::FolderResource;

struct TestInventory {
    inventory: Arc<MemoryInventory>,
    resource: FolderResource,
}

impl TestInventory {
    async fn new(datacenters: &[&str]) -> Self {
        let inventory = Arc::new(
            MemoryInventory::with_datacenters(datacenters.iter().copied())
                .await
                .unwrap(),
        );
        let resource = FolderResource::new(inventory.clone());
        Self {
            inventory,
            resource,
        }
    }

    async fn folder(&self, path: &str) {
        self.inventory
            .add_folder_path(&InventoryPath::new(path))
            .await
            .unwrap();
    }

    async fn exists(&self, path: &str) -> bool {
        self.inventory.exists(&InventoryPath::new(path)).await
    }

    async fn creates(&self) -> Vec<InventoryOp> {
        self.inventory
            .mutations()
            .await
            .into_iter()
            .filter(|op| matches!(op, InventoryOp::CreateFolder { .. }))
            .collect()
    }

    async fn destroys(&self) -> Vec<InventoryOp> {
        self.inventory
            .mutations()
            .await
            .into_iter()
            .filter(|op| matches!(op, InventoryOp::Destroy(_)))
            .collect()
    }
}

fn destroy(path: &str) -> InventoryOp {
    InventoryOp::Destroy(InventoryPath::new(path))
}

#[tokio::test]
async fn test_create_then_delete_nested_path_on_default_datacenter() {
    let app = TestInventory::new(&["dc1"]).await;
    let mut data = ResourceData::new("", "dev/team-a");

    app.resource.create(&mut data).await.unwrap();
    assert_eq!(data.id.as_deref(), Some("dc1/dev/team-a"));
    assert_eq!(data.existing_path.as_deref(), Some(""));
    assert_eq!(
        app.creates().await,
        vec![
            InventoryOp::CreateFolder {
                parent: InventoryPath::new("/dc1/vm"),
                name: "dev".to_string(),
            },
            InventoryOp::CreateFolder {
                parent: InventoryPath::new("/dc1/vm/dev"),
                name: "team-a".to_string(),
            },
        ]
    );

    app.resource.read(&mut data).await.unwrap();
    assert!(data.exists());

    let report = app.resource.delete(&mut data).await.unwrap();
    assert_eq!(report.destroyed.len(), 2);
    assert_eq!(
        app.destroys().await,
        vec![destroy("/dc1/vm/dev/team-a"), destroy("/dc1/vm/dev")]
    );
    assert!(!data.exists());
    assert!(app.exists("/dc1/vm").await);
}

#[tokio::test]
async fn test_delete_leaves_pre_existing_folders() {
    let app = TestInventory::new(&["dc1"]).await;
    app.folder("/dc1/vm/a").await;

    let mut data = ResourceData::new("dc1", "a/b/c");
    app.resource.create(&mut data).await.unwrap();
    assert_eq!(data.existing_path.as_deref(), Some("a"));
    assert_eq!(app.creates().await.len(), 2);

    app.resource.delete(&mut data).await.unwrap();
    assert_eq!(
        app.destroys().await,
        vec![destroy("/dc1/vm/a/b/c"), destroy("/dc1/vm/a/b")]
    );
    assert!(app.exists("/dc1/vm/a").await);
}

#[tokio::test]
async fn test_delete_stops_at_folder_with_foreign_content() {
    let app = TestInventory::new(&["dc1"]).await;
    app.folder("/dc1/vm/a").await;

    let mut data = ResourceData::new("dc1", "a/b/c");
    app.resource.create(&mut data).await.unwrap();
    app.inventory
        .add_vm(&InventoryPath::new("/dc1/vm/a/b"), "web-01")
        .await
        .unwrap();

    let err = app.resource.delete(&mut data).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NonEmpty);
    assert_eq!(app.destroys().await, vec![destroy("/dc1/vm/a/b/c")]);
    assert!(app.exists("/dc1/vm/a/b/web-01").await);
    assert!(data.exists());
}

#[tokio::test]
async fn test_sibling_resources_share_an_ancestor() {
    let app = TestInventory::new(&["dc1"]).await;

    let mut first = ResourceData::new("dc1", "apps/web");
    app.resource.create(&mut first).await.unwrap();
    assert_eq!(first.existing_path.as_deref(), Some(""));

    let mut second = ResourceData::new("dc1", "apps/db");
    app.resource.create(&mut second).await.unwrap();
    assert_eq!(second.existing_path.as_deref(), Some("apps"));

    app.resource.delete(&mut second).await.unwrap();
    assert!(app.exists("/dc1/vm/apps/web").await);
    assert!(!app.exists("/dc1/vm/apps/db").await);

    app.resource.delete(&mut first).await.unwrap();
    assert!(!app.exists("/dc1/vm/apps").await);
}

#[tokio::test]
async fn test_recreate_after_drift() {
    let app = TestInventory::new(&["dc1"]).await;
    let mut data = ResourceData::new("dc1", "ops/batch");
    app.resource.create(&mut data).await.unwrap();

    app.inventory
        .remove(&InventoryPath::new("/dc1/vm/ops/batch"))
        .await
        .unwrap();
    app.resource.read(&mut data).await.unwrap();
    assert!(!data.exists());

    app.resource.create(&mut data).await.unwrap();
    assert!(data.exists());
    assert_eq!(data.existing_path.as_deref(), Some("ops"));
}

#[tokio::test]
async fn test_ambiguous_default_datacenter() {
    let app = TestInventory::new(&["east", "west"]).await;

    let mut data = ResourceData::new("", "dev");
    let err = app.resource.create(&mut data).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lookup);
    assert!(app.inventory.mutations().await.is_empty());

    let mut named = ResourceData::new("west", "dev");
    app.resource.create(&mut named).await.unwrap();
    assert_eq!(named.id.as_deref(), Some("west/dev"));
    assert!(app.exists("/west/vm/dev").await);
    assert!(!app.exists("/east/vm/dev").await);
}
