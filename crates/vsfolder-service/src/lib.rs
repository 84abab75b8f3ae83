//! # vsfolder-service
//!
//! Folder path reconciliation for the `vsphere_folder` resource. Each
//! service receives the inventory session as an `Arc<dyn InventoryClient>`
//! at construction time and holds no other state, so a single instance can
//! serve any number of resource operations concurrently.
//!
//! - [`folder::PathResolver`] finds the deepest existing ancestor of a path.
//! - [`folder::FolderCreator`] creates the missing suffix, root to leaf.
//! - [`folder::BoundedPruner`] removes empty folders back to a boundary.
//! - [`resource::FolderResource`] wires them into create/read/delete.

pub mod datacenter;
pub mod folder;
pub mod resource;

pub use datacenter::DatacenterResolver;
pub use folder::{BoundedPruner, FolderCreator, PathResolver, PruneReport, Resolution};
pub use resource::FolderResource;
