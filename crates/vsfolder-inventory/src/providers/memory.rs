//! In-memory inventory simulator.
//!
//! Models the parts of a vCenter inventory that folder management touches:
//! a root folder, datacenters with their `vm`/`host`/`datastore`/`network`
//! folders, nested folders, leaf entities such as virtual machines, and
//! destroy tasks. Every call made through [`InventoryClient`] is appended to
//! an operation journal so callers can observe ordering.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use vsfolder_core::error::{AppError, ErrorKind};
use vsfolder_core::result::AppResult;
use vsfolder_core::traits::inventory::InventoryClient;
use vsfolder_core::types::{
    Datacenter, Folder, InventoryPath, MAX_NAME_LEN, ManagedEntity, ManagedObjectRef, ObjectKind,
    ObjectRef, TaskInfo, TaskRef, TaskState,
};

/// Folders created under every new datacenter.
const DATACENTER_FOLDERS: [&str; 4] = ["vm", "host", "datastore", "network"];

/// One call recorded by [`MemoryInventory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryOp {
    /// `find_by_inventory_path`
    Lookup(InventoryPath),
    /// `create_folder`
    CreateFolder {
        /// Parent folder path.
        parent: InventoryPath,
        /// New folder name.
        name: String,
    },
    /// `children`
    Children(InventoryPath),
    /// `destroy`
    Destroy(InventoryPath),
    /// `wait_for_task`
    WaitForTask(String),
    /// `find_datacenter`
    FindDatacenter(String),
    /// `list_datacenters`
    ListDatacenters,
}

impl InventoryOp {
    /// Whether the call changes the inventory.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::CreateFolder { .. } | Self::Destroy(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node {
    reference: ManagedObjectRef,
    name: String,
    parent: Option<String>,
    #[serde(default)]
    children: Vec<String>,
}

/// Serializable inventory state; this is also the snapshot file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct InventoryTree {
    next_id: u64,
    root: String,
    nodes: BTreeMap<String, Node>,
    #[serde(default)]
    tasks: BTreeMap<String, TaskInfo>,
}

impl InventoryTree {
    fn new() -> Self {
        let root = ManagedObjectRef::new(ObjectKind::Folder, "group-d1");
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root.value.clone(),
            Node {
                reference: root.clone(),
                name: String::new(),
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            next_id: 2,
            root: root.value,
            nodes,
            tasks: BTreeMap::new(),
        }
    }

    fn next_value(&mut self, prefix: &str) -> String {
        let value = format!("{prefix}{}", self.next_id);
        self.next_id += 1;
        value
    }

    fn node(&self, value: &str) -> AppResult<&Node> {
        self.nodes.get(value).ok_or_else(|| {
            AppError::not_found(format!("The object '{value}' has already been deleted"))
        })
    }

    fn path_of(&self, value: &str) -> InventoryPath {
        let mut names = Vec::new();
        let mut current = self.nodes.get(value);
        while let Some(node) = current {
            if node.parent.is_none() {
                break;
            }
            names.push(node.name.as_str());
            current = node.parent.as_deref().and_then(|p| self.nodes.get(p));
        }
        names.reverse();
        InventoryPath::new(&names.join("/"))
    }

    fn child_named(&self, parent: &Node, name: &str) -> Option<&Node> {
        parent
            .children
            .iter()
            .filter_map(|c| self.nodes.get(c))
            .find(|n| n.name == name)
    }

    fn resolve(&self, path: &InventoryPath) -> Option<&Node> {
        let mut current = self.nodes.get(&self.root)?;
        for segment in path.segments() {
            current = self.child_named(current, segment)?;
        }
        Some(current)
    }

    fn object_ref(&self, node: &Node) -> ObjectRef {
        let reference = node.reference.clone();
        let inventory_path = self.path_of(&reference.value);
        match reference.kind {
            ObjectKind::Folder => ObjectRef::Folder(Folder {
                reference,
                inventory_path,
            }),
            ObjectKind::Datacenter => ObjectRef::Datacenter(Datacenter {
                reference,
                name: node.name.clone(),
                inventory_path,
            }),
            _ => ObjectRef::Entity(ManagedEntity {
                reference,
                inventory_path,
            }),
        }
    }

    fn insert(&mut self, parent: &str, kind: ObjectKind, name: &str) -> AppResult<String> {
        let parent_node = self.node(parent)?;
        if self.child_named(parent_node, name).is_some() {
            return Err(AppError::conflict(format!(
                "The name '{name}' already exists."
            )));
        }

        let prefix = match kind {
            ObjectKind::Folder => "group-v",
            ObjectKind::Datacenter => "datacenter-",
            ObjectKind::VirtualMachine => "vm-",
            ObjectKind::VirtualApp => "resgroup-v",
            ObjectKind::ResourcePool => "resgroup-",
            ObjectKind::ComputeResource => "domain-c",
            ObjectKind::Datastore => "datastore-",
            ObjectKind::Network => "network-",
        };
        let value = self.next_value(prefix);
        self.nodes.insert(
            value.clone(),
            Node {
                reference: ManagedObjectRef::new(kind, value.clone()),
                name: name.to_string(),
                parent: Some(parent.to_string()),
                children: Vec::new(),
            },
        );
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(value.clone());
        }
        Ok(value)
    }

    fn remove_subtree(&mut self, value: &str) {
        let Some(node) = self.nodes.remove(value) else {
            return;
        };
        if let Some(parent) = node.parent.as_deref().and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| c != value);
        }
        let mut pending = node.children;
        while let Some(child) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&child) {
                pending.extend(removed.children);
            }
        }
    }

    /// Whether the node is a folder that vCenter refuses to destroy: the
    /// root folder or one of a datacenter's top-level folders.
    fn is_system_folder(&self, node: &Node) -> bool {
        match node.parent.as_deref().and_then(|p| self.nodes.get(p)) {
            None => true,
            Some(parent) => parent.reference.kind == ObjectKind::Datacenter,
        }
    }

    fn datacenters(&self) -> Vec<Datacenter> {
        self.nodes
            .values()
            .filter(|n| n.reference.kind == ObjectKind::Datacenter)
            .filter_map(|n| match self.object_ref(n) {
                ObjectRef::Datacenter(dc) => Some(dc),
                _ => None,
            })
            .collect()
    }
}

/// One object as listed by [`MemoryInventory::entries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryEntry {
    /// Full inventory path.
    pub path: InventoryPath,
    /// Object name; empty for the root folder.
    pub name: String,
    /// Object type.
    pub kind: ObjectKind,
    /// Managed object id.
    pub reference: String,
    /// Depth below the listed path.
    pub depth: usize,
}

/// Injected failures, keyed by inventory path or object name.
#[derive(Debug, Default)]
struct Faults {
    lookup: HashSet<InventoryPath>,
    create: HashSet<String>,
    destroy: HashSet<String>,
}

/// In-memory [`InventoryClient`].
#[derive(Debug, Clone)]
pub struct MemoryInventory {
    /// Inventory objects and task history.
    tree: Arc<RwLock<InventoryTree>>,
    /// Injected failures.
    faults: Arc<RwLock<Faults>>,
    /// Calls made through the client trait, in order.
    journal: Arc<Mutex<Vec<InventoryOp>>>,
}

impl MemoryInventory {
    /// Create an inventory holding only the root folder.
    pub fn new() -> Self {
        Self::from_tree(InventoryTree::new())
    }

    fn from_tree(tree: InventoryTree) -> Self {
        Self {
            tree: Arc::new(RwLock::new(tree)),
            faults: Arc::new(RwLock::new(Faults::default())),
            journal: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create an inventory seeded with the named datacenters.
    pub async fn with_datacenters<I, S>(names: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let inventory = Self::new();
        for name in names {
            inventory.add_datacenter(name.as_ref()).await?;
        }
        Ok(inventory)
    }

    /// Load an inventory from a JSON snapshot file.
    pub async fn load(path: &Path) -> AppResult<Self> {
        let raw = fs::read(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Io,
                format!("Failed to read inventory snapshot: {}", path.display()),
                e,
            )
        })?;
        let tree: InventoryTree = serde_json::from_slice(&raw)?;
        debug!(path = %path.display(), objects = tree.nodes.len(), "Loaded inventory snapshot");
        Ok(Self::from_tree(tree))
    }

    /// Write the inventory to a JSON snapshot file.
    pub async fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let raw = {
            let tree = self.tree.read().await;
            serde_json::to_vec_pretty(&*tree)?
        };
        fs::write(path, raw).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Io,
                format!("Failed to write inventory snapshot: {}", path.display()),
                e,
            )
        })?;
        debug!(path = %path.display(), "Saved inventory snapshot");
        Ok(())
    }

    /// Add a datacenter under the root folder, with its standard folders.
    pub async fn add_datacenter(&self, name: &str) -> AppResult<Datacenter> {
        validate_name(name)?;
        let mut tree = self.tree.write().await;
        let root = tree.root.clone();
        let value = tree.insert(&root, ObjectKind::Datacenter, name)?;
        for folder in DATACENTER_FOLDERS {
            tree.insert(&value, ObjectKind::Folder, folder)?;
        }
        match tree.object_ref(tree.node(&value)?) {
            ObjectRef::Datacenter(dc) => Ok(dc),
            other => Err(AppError::internal(format!(
                "{} is not a datacenter",
                other.inventory_path()
            ))),
        }
    }

    /// Create every missing folder along `path`. Existing objects along
    /// the way are traversed as-is.
    pub async fn add_folder_path(&self, path: &InventoryPath) -> AppResult<Folder> {
        let mut tree = self.tree.write().await;
        let mut current = tree.root.clone();
        for segment in path.segments() {
            let existing = tree
                .child_named(tree.node(&current)?, segment)
                .map(|n| n.reference.value.clone());
            current = match existing {
                Some(value) => value,
                None => tree.insert(&current, ObjectKind::Folder, segment)?,
            };
        }
        tree.object_ref(tree.node(&current)?).into_folder()
    }

    /// Add a virtual machine to an existing folder.
    pub async fn add_vm(&self, folder: &InventoryPath, name: &str) -> AppResult<ManagedEntity> {
        validate_name(name)?;
        let mut tree = self.tree.write().await;
        let parent = tree
            .resolve(folder)
            .filter(|n| n.reference.kind == ObjectKind::Folder)
            .map(|n| n.reference.value.clone())
            .ok_or_else(|| AppError::not_found(format!("Folder {folder} not found")))?;
        let value = tree.insert(&parent, ObjectKind::VirtualMachine, name)?;
        Ok(ManagedEntity {
            reference: ManagedObjectRef::new(ObjectKind::VirtualMachine, value.clone()),
            inventory_path: tree.path_of(&value),
        })
    }

    /// Remove the object at `path` and everything below it, bypassing
    /// the client trait.
    pub async fn remove(&self, path: &InventoryPath) -> AppResult<()> {
        let mut tree = self.tree.write().await;
        let value = tree
            .resolve(path)
            .map(|n| n.reference.value.clone())
            .ok_or_else(|| AppError::not_found(format!("{path} not found")))?;
        tree.remove_subtree(&value);
        Ok(())
    }

    /// Every object below `path` (inclusive), depth first with siblings in
    /// name order.
    pub async fn entries(&self, path: &InventoryPath) -> AppResult<Vec<InventoryEntry>> {
        let tree = self.tree.read().await;
        let start = tree
            .resolve(path)
            .ok_or_else(|| AppError::not_found(format!("{path} not found")))?;

        let mut entries = Vec::new();
        let mut pending = vec![(start, 0usize)];
        while let Some((node, depth)) = pending.pop() {
            entries.push(InventoryEntry {
                path: tree.path_of(&node.reference.value),
                name: node.name.clone(),
                kind: node.reference.kind,
                reference: node.reference.value.clone(),
                depth,
            });
            let mut children: Vec<&Node> = node
                .children
                .iter()
                .filter_map(|c| tree.nodes.get(c))
                .collect();
            children.sort_by(|a, b| b.name.cmp(&a.name));
            pending.extend(children.into_iter().map(|c| (c, depth + 1)));
        }
        Ok(entries)
    }

    /// Whether an object exists at `path`.
    pub async fn exists(&self, path: &InventoryPath) -> bool {
        self.tree.read().await.resolve(path).is_some()
    }

    /// Make lookups of `path` fail with a service fault.
    pub async fn fail_lookup(&self, path: &InventoryPath) {
        self.faults.write().await.lookup.insert(path.clone());
    }

    /// Make creation of folders named `name` fail with a service fault.
    pub async fn fail_create(&self, name: &str) {
        self.faults.write().await.create.insert(name.to_string());
    }

    /// Make destroy tasks for objects named `name` end in error.
    pub async fn fail_destroy(&self, name: &str) {
        self.faults.write().await.destroy.insert(name.to_string());
    }

    /// All recorded calls, in order.
    pub async fn operations(&self) -> Vec<InventoryOp> {
        self.journal.lock().await.clone()
    }

    /// Recorded calls that changed the inventory, in order.
    pub async fn mutations(&self) -> Vec<InventoryOp> {
        self.journal
            .lock()
            .await
            .iter()
            .filter(|op| op.is_mutation())
            .cloned()
            .collect()
    }

    /// Forget all recorded calls.
    pub async fn clear_operations(&self) {
        self.journal.lock().await.clear();
    }

    async fn record(&self, op: InventoryOp) {
        self.journal.lock().await.push(op);
    }
}

impl Default for MemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.is_empty() || name.contains('/') || name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "The name '{name}' is invalid"
        )));
    }
    Ok(())
}

#[async_trait]
impl InventoryClient for MemoryInventory {
    fn client_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn find_by_inventory_path(&self, path: &InventoryPath) -> AppResult<Option<ObjectRef>> {
        self.record(InventoryOp::Lookup(path.clone())).await;
        if self.faults.read().await.lookup.contains(path) {
            return Err(AppError::external_service(format!(
                "FindByInventoryPath failed for {path}"
            )));
        }

        let tree = self.tree.read().await;
        Ok(tree.resolve(path).map(|n| tree.object_ref(n)))
    }

    async fn create_folder(&self, parent: &Folder, name: &str) -> AppResult<Folder> {
        self.record(InventoryOp::CreateFolder {
            parent: parent.inventory_path.clone(),
            name: name.to_string(),
        })
        .await;
        validate_name(name)?;
        if self.faults.read().await.create.contains(name) {
            return Err(AppError::external_service(format!(
                "CreateFolder '{name}' failed"
            )));
        }

        let mut tree = self.tree.write().await;
        let parent_node = tree.node(&parent.reference.value)?;
        if parent_node.reference.kind != ObjectKind::Folder {
            return Err(AppError::validation(format!(
                "{} cannot contain folders",
                parent.inventory_path
            )));
        }
        let value = tree.insert(&parent.reference.value, ObjectKind::Folder, name)?;
        let folder = Folder {
            reference: ManagedObjectRef::new(ObjectKind::Folder, value.clone()),
            inventory_path: tree.path_of(&value),
        };

        debug!(path = %folder.inventory_path, moref = %folder.reference, "Created folder");
        Ok(folder)
    }

    async fn children(&self, folder: &Folder) -> AppResult<Vec<ObjectRef>> {
        self.record(InventoryOp::Children(folder.inventory_path.clone()))
            .await;

        let tree = self.tree.read().await;
        let node = tree.node(&folder.reference.value)?;
        Ok(node
            .children
            .iter()
            .filter_map(|c| tree.nodes.get(c))
            .map(|n| tree.object_ref(n))
            .collect())
    }

    async fn destroy(&self, folder: &Folder) -> AppResult<TaskRef> {
        self.record(InventoryOp::Destroy(folder.inventory_path.clone()))
            .await;
        let fail = self.faults.read().await.destroy.contains(folder.name());

        let mut tree = self.tree.write().await;
        let node = tree.node(&folder.reference.value)?;
        let error = if tree.is_system_folder(node) {
            Some("The operation is not supported on the object.".to_string())
        } else if fail {
            Some(format!("Destroy of {} failed", folder.inventory_path))
        } else {
            None
        };

        let task = TaskRef {
            value: tree.next_value("task-"),
            entity: folder.reference.clone(),
        };
        let queued_at = Utc::now();
        if error.is_none() {
            tree.remove_subtree(&folder.reference.value);
        }
        let info = TaskInfo {
            task: task.clone(),
            state: if error.is_some() {
                TaskState::Error
            } else {
                TaskState::Success
            },
            error,
            queued_at,
            completed_at: Some(Utc::now()),
        };
        tree.tasks.insert(task.value.clone(), info);

        debug!(path = %folder.inventory_path, task = %task.value, "Destroy task queued");
        Ok(task)
    }

    async fn wait_for_task(&self, task: &TaskRef) -> AppResult<TaskInfo> {
        self.record(InventoryOp::WaitForTask(task.value.clone()))
            .await;

        self.tree
            .read()
            .await
            .tasks
            .get(&task.value)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Task {} not found", task.value)))
    }

    async fn find_datacenter(&self, name: &str) -> AppResult<Option<Datacenter>> {
        self.record(InventoryOp::FindDatacenter(name.to_string()))
            .await;

        Ok(self
            .tree
            .read()
            .await
            .datacenters()
            .into_iter()
            .find(|dc| dc.name == name))
    }

    async fn list_datacenters(&self) -> AppResult<Vec<Datacenter>> {
        self.record(InventoryOp::ListDatacenters).await;
        Ok(self.tree.read().await.datacenters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> InventoryPath {
        InventoryPath::new(raw)
    }

    async fn vm_folder(inventory: &MemoryInventory) -> Folder {
        inventory
            .find_by_inventory_path(&path("/dc1/vm"))
            .await
            .unwrap()
            .unwrap()
            .into_folder()
            .unwrap()
    }

    #[tokio::test]
    async fn test_entries_are_depth_first_by_name() {
        let inventory = MemoryInventory::with_datacenters(["dc1"]).await.unwrap();
        inventory
            .add_folder_path(&path("/dc1/vm/b/x"))
            .await
            .unwrap();
        inventory.add_folder_path(&path("/dc1/vm/a")).await.unwrap();

        let entries = inventory.entries(&path("/dc1/vm")).await.unwrap();
        let listed: Vec<(&str, usize)> = entries
            .iter()
            .map(|e| (e.path.as_str(), e.depth))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("/dc1/vm", 0),
                ("/dc1/vm/a", 1),
                ("/dc1/vm/b", 1),
                ("/dc1/vm/b/x", 2),
            ]
        );
        assert!(inventory.entries(&path("/dc2")).await.is_err());
        assert!(inventory.operations().await.is_empty());
    }

    #[tokio::test]
    async fn test_datacenter_layout() {
        let inventory = MemoryInventory::with_datacenters(["dc1"]).await.unwrap();
        for folder in DATACENTER_FOLDERS {
            assert!(inventory.exists(&path(&format!("/dc1/{folder}"))).await);
        }
        let dc = inventory.find_datacenter("dc1").await.unwrap().unwrap();
        assert_eq!(dc.inventory_path.as_str(), "/dc1");
        assert!(inventory.find_datacenter("dc2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_folder_and_lookup() {
        let inventory = MemoryInventory::with_datacenters(["dc1"]).await.unwrap();
        let root = vm_folder(&inventory).await;

        let dev = inventory.create_folder(&root, "dev").await.unwrap();
        assert_eq!(dev.inventory_path.as_str(), "/dc1/vm/dev");
        assert!(dev.reference.value.starts_with("group-v"));

        let found = inventory
            .find_by_inventory_path(&path("/dc1/vm/dev"))
            .await
            .unwrap();
        assert_eq!(found, Some(ObjectRef::Folder(dev)));
        assert!(inventory
            .find_by_inventory_path(&path("/dc1/vm/missing"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_folder_conflicts() {
        let inventory = MemoryInventory::with_datacenters(["dc1"]).await.unwrap();
        let root = vm_folder(&inventory).await;
        inventory.create_folder(&root, "dev").await.unwrap();
        let err = inventory.create_folder(&root, "dev").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_destroy_removes_subtree() {
        let inventory = MemoryInventory::with_datacenters(["dc1"]).await.unwrap();
        let team_a = inventory
            .add_folder_path(&path("/dc1/vm/dev/team-a"))
            .await
            .unwrap();
        inventory
            .add_vm(&team_a.inventory_path, "web-01")
            .await
            .unwrap();

        let parent = inventory
            .find_by_inventory_path(&path("/dc1/vm/dev"))
            .await
            .unwrap()
            .unwrap()
            .into_folder()
            .unwrap();
        assert_eq!(inventory.children(&parent).await.unwrap().len(), 1);

        let task = inventory.destroy(&parent).await.unwrap();
        let info = inventory.wait_for_task(&task).await.unwrap();
        assert_eq!(info.state, TaskState::Success);
        assert!(!inventory.exists(&path("/dc1/vm/dev/team-a/web-01")).await);
        assert!(!inventory.exists(&path("/dc1/vm/dev")).await);

        let err = inventory.children(&parent).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_destroy_vm_folder_is_refused() {
        let inventory = MemoryInventory::with_datacenters(["dc1"]).await.unwrap();
        let root = vm_folder(&inventory).await;
        let task = inventory.destroy(&root).await.unwrap();
        let info = inventory.wait_for_task(&task).await.unwrap();
        assert_eq!(info.state, TaskState::Error);
        assert!(inventory.exists(&path("/dc1/vm")).await);
    }

    #[tokio::test]
    async fn test_injected_faults() {
        let inventory = MemoryInventory::with_datacenters(["dc1"]).await.unwrap();
        let root = vm_folder(&inventory).await;

        inventory.fail_lookup(&path("/dc1/vm/x")).await;
        let err = inventory
            .find_by_inventory_path(&path("/dc1/vm/x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);

        inventory.fail_create("bad").await;
        assert!(inventory.create_folder(&root, "bad").await.is_err());
        assert!(!inventory.exists(&path("/dc1/vm/bad")).await);

        let keep = inventory.create_folder(&root, "keep").await.unwrap();
        inventory.fail_destroy("keep").await;
        let task = inventory.destroy(&keep).await.unwrap();
        let info = inventory.wait_for_task(&task).await.unwrap();
        assert_eq!(info.state, TaskState::Error);
        assert!(inventory.exists(&path("/dc1/vm/keep")).await);
    }

    #[tokio::test]
    async fn test_journal_records_calls_in_order() {
        let inventory = MemoryInventory::with_datacenters(["dc1"]).await.unwrap();
        let root = vm_folder(&inventory).await;
        let dev = inventory.create_folder(&root, "dev").await.unwrap();
        inventory.children(&dev).await.unwrap();

        let ops = inventory.operations().await;
        assert_eq!(
            ops,
            vec![
                InventoryOp::Lookup(path("/dc1/vm")),
                InventoryOp::CreateFolder {
                    parent: path("/dc1/vm"),
                    name: "dev".to_string(),
                },
                InventoryOp::Children(path("/dc1/vm/dev")),
            ]
        );
        assert_eq!(inventory.mutations().await.len(), 1);

        inventory.clear_operations().await;
        assert!(inventory.operations().await.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_persists_tree() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("inventory.json");

        let inventory = MemoryInventory::with_datacenters(["dc1", "dc2"]).await.unwrap();
        inventory
            .add_folder_path(&path("/dc2/vm/prod"))
            .await
            .unwrap();
        inventory.save(&file).await.unwrap();

        let loaded = MemoryInventory::load(&file).await.unwrap();
        assert!(loaded.exists(&path("/dc2/vm/prod")).await);
        assert_eq!(loaded.list_datacenters().await.unwrap().len(), 2);

        // ids keep advancing after a reload
        let root = loaded
            .find_by_inventory_path(&path("/dc1/vm"))
            .await
            .unwrap()
            .unwrap()
            .into_folder()
            .unwrap();
        let created = loaded.create_folder(&root, "new").await.unwrap();
        let prod = loaded
            .find_by_inventory_path(&path("/dc2/vm/prod"))
            .await
            .unwrap()
            .unwrap();
        assert_ne!(&created.reference, prod.reference());
    }
}
