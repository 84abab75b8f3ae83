//! Folder path resolution, creation and pruning.

pub mod creator;
pub mod pruner;
pub mod resolver;

pub use creator::{CreatedFolder, FolderCreator};
pub use pruner::{BoundedPruner, PruneReport};
pub use resolver::{PathResolver, Resolution};
