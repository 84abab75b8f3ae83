//! Core traits defined in `vsfolder-core` and implemented by other crates.

pub mod inventory;

pub use inventory::InventoryClient;
