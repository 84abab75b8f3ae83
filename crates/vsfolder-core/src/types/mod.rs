//! Core type definitions used across the vsphere-folder workspace.

pub mod path;
pub mod reference;
pub mod task;

pub use path::{FolderPath, InventoryPath, MAX_NAME_LEN, VM_FOLDER};
pub use reference::{
    Datacenter, Folder, ManagedEntity, ManagedObjectRef, ObjectKind, ObjectRef,
};
pub use task::{TaskInfo, TaskRef, TaskState};
