//! Inventory client implementations.

pub mod memory;

pub use memory::{InventoryEntry, InventoryOp, MemoryInventory};
