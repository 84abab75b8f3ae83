//! Managed object references returned by inventory lookups.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::path::{InventoryPath, VM_FOLDER};
use crate::error::AppError;
use crate::result::AppResult;

/// The managed object type behind a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// `Folder`
    Folder,
    /// `Datacenter`
    Datacenter,
    /// `VirtualMachine`
    VirtualMachine,
    /// `VirtualApp`
    VirtualApp,
    /// `ResourcePool`
    ResourcePool,
    /// `ComputeResource` / `ClusterComputeResource`
    ComputeResource,
    /// `Datastore`
    Datastore,
    /// `Network`
    Network,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Folder => "Folder",
            Self::Datacenter => "Datacenter",
            Self::VirtualMachine => "VirtualMachine",
            Self::VirtualApp => "VirtualApp",
            Self::ResourcePool => "ResourcePool",
            Self::ComputeResource => "ComputeResource",
            Self::Datastore => "Datastore",
            Self::Network => "Network",
        };
        f.write_str(name)
    }
}

/// A typed managed object reference, e.g. `Folder:group-v22`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManagedObjectRef {
    /// Object type.
    pub kind: ObjectKind,
    /// Server-assigned identifier.
    pub value: String,
}

impl ManagedObjectRef {
    /// Create a new reference.
    pub fn new(kind: ObjectKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl fmt::Display for ManagedObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// Any managed entity located at an inventory path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedEntity {
    /// The object reference.
    pub reference: ManagedObjectRef,
    /// Full inventory path of the object.
    pub inventory_path: InventoryPath,
}

/// A folder in the inventory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// The object reference (always of kind [`ObjectKind::Folder`]).
    pub reference: ManagedObjectRef,
    /// Full inventory path of the folder.
    pub inventory_path: InventoryPath,
}

impl Folder {
    /// The folder's own name.
    pub fn name(&self) -> &str {
        self.inventory_path.name().unwrap_or("")
    }
}

/// A datacenter, the top-level scope of a VM folder tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datacenter {
    /// The object reference (always of kind [`ObjectKind::Datacenter`]).
    pub reference: ManagedObjectRef,
    /// Datacenter name.
    pub name: String,
    /// Full inventory path of the datacenter, e.g. `/dc1`.
    pub inventory_path: InventoryPath,
}

impl Datacenter {
    /// Inventory path of this datacenter's VM folder.
    pub fn vm_folder_path(&self) -> InventoryPath {
        self.inventory_path.join(VM_FOLDER)
    }
}

/// Result of an inventory lookup, tagged by object kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectRef {
    /// A folder.
    Folder(Folder),
    /// A datacenter.
    Datacenter(Datacenter),
    /// Any other managed entity.
    Entity(ManagedEntity),
}

impl ObjectRef {
    /// The underlying managed object reference.
    pub fn reference(&self) -> &ManagedObjectRef {
        match self {
            Self::Folder(f) => &f.reference,
            Self::Datacenter(d) => &d.reference,
            Self::Entity(e) => &e.reference,
        }
    }

    /// The object's inventory path.
    pub fn inventory_path(&self) -> &InventoryPath {
        match self {
            Self::Folder(f) => &f.inventory_path,
            Self::Datacenter(d) => &d.inventory_path,
            Self::Entity(e) => &e.inventory_path,
        }
    }

    /// The managed object type.
    pub fn kind(&self) -> ObjectKind {
        self.reference().kind
    }

    /// Convert to a [`Folder`], failing with a lookup error for any other
    /// object type.
    pub fn into_folder(self) -> AppResult<Folder> {
        match self {
            Self::Folder(folder) => Ok(folder),
            other => Err(AppError::lookup(format!(
                "{} is a {}, not a Folder",
                other.inventory_path(),
                other.kind()
            ))),
        }
    }
}
