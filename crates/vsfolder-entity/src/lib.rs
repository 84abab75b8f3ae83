//! # vsfolder-entity
//!
//! Domain models for the `vsphere_folder` resource: the persisted
//! [`folder::ResourceData`] record exchanged with the plugin host, the
//! validated [`folder::FolderSpec`] working record, and the attribute
//! [`schema`].

pub mod folder;
pub mod schema;
