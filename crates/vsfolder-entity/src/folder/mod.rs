//! Folder resource entities.

pub mod model;
pub mod resource;

pub use model::FolderSpec;
pub use resource::ResourceData;
