//! Inventory simulator CLI commands.

use std::path::Path;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use vsfolder_core::error::AppError;
use vsfolder_core::types::{InventoryPath, ObjectKind};
use vsfolder_inventory::providers::MemoryInventory;

/// Arguments for inventory commands
#[derive(Debug, Args)]
pub struct InventoryArgs {
    /// Inventory subcommand
    #[command(subcommand)]
    pub command: InventoryCommand,
}

/// Inventory subcommands
#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    /// Write a fresh inventory snapshot
    Init {
        /// Datacenters to create (defaults to the configured list)
        #[arg(short, long)]
        datacenter: Vec<String>,
        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },
    /// Show the inventory tree
    Tree {
        /// Inventory path to start from
        #[arg(default_value = "/")]
        path: String,
    },
    /// Add a virtual machine to a folder
    AddVm {
        /// Inventory path of the folder
        #[arg(short, long)]
        folder: String,
        /// Virtual machine name
        name: String,
    },
}

/// Inventory object display row
#[derive(Debug, Serialize, Tabled)]
struct EntryRow {
    /// Path
    path: String,
    /// Type
    kind: String,
    /// Managed object id
    reference: String,
}

/// Execute inventory commands
pub async fn execute(
    args: &InventoryArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    match &args.command {
        InventoryCommand::Init { datacenter, force } => {
            let snapshot = config.inventory.snapshot_path.as_deref().ok_or_else(|| {
                AppError::configuration("inventory.snapshot_path is not configured")
            })?;
            if Path::new(snapshot).exists() && !force {
                return Err(AppError::conflict(format!(
                    "Inventory snapshot '{}' already exists; pass --force to replace it",
                    snapshot
                )));
            }

            let names = if datacenter.is_empty() {
                &config.inventory.datacenters
            } else {
                datacenter
            };
            let inventory = MemoryInventory::with_datacenters(names).await?;
            inventory.save(Path::new(snapshot)).await?;

            output::print_success(&format!(
                "Inventory '{}' initialized with datacenters: {}",
                snapshot,
                names.join(", ")
            ));
        }
        InventoryCommand::Tree { path } => {
            let session = super::open_session(&config).await?;
            let entries = session
                .inventory
                .memory()
                .entries(&InventoryPath::new(path))
                .await?;

            match format {
                OutputFormat::Json => {
                    let rows: Vec<EntryRow> = entries
                        .iter()
                        .map(|e| EntryRow {
                            path: e.path.to_string(),
                            kind: e.kind.to_string(),
                            reference: e.reference.clone(),
                        })
                        .collect();
                    output::print_list(&rows, format);
                }
                OutputFormat::Table => {
                    for entry in &entries {
                        let indent = "  ".repeat(entry.depth);
                        let name = if entry.name.is_empty() {
                            "/"
                        } else {
                            entry.name.as_str()
                        };
                        let suffix = match entry.kind {
                            ObjectKind::Folder | ObjectKind::Datacenter => "/",
                            _ => "",
                        };
                        println!("{}{}{}  ({})", indent, name, suffix, entry.kind);
                    }
                }
            }
        }
        InventoryCommand::AddVm { folder, name } => {
            let session = super::open_session(&config).await?;
            let vm = session
                .inventory
                .memory()
                .add_vm(&InventoryPath::new(folder), name)
                .await?;
            session.inventory.persist().await?;

            output::print_success(&format!(
                "Virtual machine '{}' added ({})",
                vm.inventory_path, vm.reference
            ));
        }
    }

    Ok(())
}
