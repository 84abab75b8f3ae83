//! # vsfolder-inventory
//!
//! Inventory client implementations for vsphere-folder. The built-in
//! [`providers::MemoryInventory`] simulates a vCenter inventory tree
//! (datacenters, folders, virtual machines and destroy tasks) and can be
//! persisted as a JSON snapshot.

pub mod manager;
pub mod providers;

pub use manager::InventoryManager;
