//! Inventory manager: builds the configured inventory client and persists
//! its state between runs.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use vsfolder_core::config::inventory::InventoryConfig;
use vsfolder_core::error::AppError;
use vsfolder_core::result::AppResult;
use vsfolder_core::traits::inventory::InventoryClient;

use crate::providers::MemoryInventory;

/// Owns the inventory client selected by configuration.
#[derive(Debug, Clone)]
pub struct InventoryManager {
    /// The in-memory simulator.
    memory: Arc<MemoryInventory>,
    /// Snapshot file backing the simulator, if any.
    snapshot_path: Option<PathBuf>,
}

impl InventoryManager {
    /// Build the inventory client described by `config`.
    ///
    /// For the `memory` provider an existing snapshot is loaded; otherwise a
    /// fresh inventory is seeded with the configured datacenters.
    pub async fn from_config(config: &InventoryConfig) -> AppResult<Self> {
        if config.provider != "memory" {
            return Err(AppError::configuration(format!(
                "Unsupported inventory provider '{}'",
                config.provider
            )));
        }

        let snapshot_path = config.snapshot_path.as_ref().map(PathBuf::from);
        let memory = match snapshot_path.as_deref().filter(|p| p.exists()) {
            Some(path) => {
                info!(path = %path.display(), "Loading inventory snapshot");
                MemoryInventory::load(path).await?
            }
            None => {
                debug!(datacenters = ?config.datacenters, "Seeding fresh inventory");
                MemoryInventory::with_datacenters(&config.datacenters).await?
            }
        };

        Ok(Self {
            memory: Arc::new(memory),
            snapshot_path,
        })
    }

    /// Wrap an existing simulator without snapshot persistence.
    pub fn from_memory(memory: Arc<MemoryInventory>) -> Self {
        Self {
            memory,
            snapshot_path: None,
        }
    }

    /// The inventory client, as handed to folder services.
    pub fn client(&self) -> Arc<dyn InventoryClient> {
        self.memory.clone()
    }

    /// The concrete simulator, for seeding and inspection.
    pub fn memory(&self) -> &Arc<MemoryInventory> {
        &self.memory
    }

    /// Write the inventory back to its snapshot file, if one is configured.
    pub async fn persist(&self) -> AppResult<()> {
        if let Some(path) = &self.snapshot_path {
            self.memory.save(path).await?;
        }
        Ok(())
    }
}
