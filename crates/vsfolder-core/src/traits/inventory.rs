//! Inventory client trait for pluggable vSphere inventory backends.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{Datacenter, Folder, InventoryPath, ObjectRef, TaskInfo, TaskRef};

/// Trait for the inventory service behind a vSphere session.
///
/// The client carries whatever authenticated session it needs; folder
/// services receive it as an `Arc<dyn InventoryClient>` and never deal with
/// authentication themselves. Every method is a single remote call with no
/// retry and no client-imposed timeout.
#[async_trait]
pub trait InventoryClient: Send + Sync + std::fmt::Debug + 'static {
    /// Return the client type name (e.g., "memory").
    fn client_type(&self) -> &str;

    /// Check whether the inventory endpoint is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Look up an object by its full inventory path.
    ///
    /// Returns `Ok(None)` when nothing exists at `path`; errors are reserved
    /// for transport or service faults.
    async fn find_by_inventory_path(&self, path: &InventoryPath) -> AppResult<Option<ObjectRef>>;

    /// Create a child folder named `name` under `parent`.
    async fn create_folder(&self, parent: &Folder, name: &str) -> AppResult<Folder>;

    /// List the direct children of a folder.
    async fn children(&self, folder: &Folder) -> AppResult<Vec<ObjectRef>>;

    /// Start destroying a folder. The returned task must be waited on.
    async fn destroy(&self, folder: &Folder) -> AppResult<TaskRef>;

    /// Block until a task completes and return its final state.
    async fn wait_for_task(&self, task: &TaskRef) -> AppResult<TaskInfo>;

    /// Look up a datacenter by name.
    async fn find_datacenter(&self, name: &str) -> AppResult<Option<Datacenter>>;

    /// List every datacenter visible to the session.
    async fn list_datacenters(&self) -> AppResult<Vec<Datacenter>>;
}
