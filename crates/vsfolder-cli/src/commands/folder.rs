//! Folder resource CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use tracing::warn;

use crate::output::{self, OutputFormat};
use vsfolder_core::error::AppError;
use vsfolder_entity::folder::ResourceData;

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Create a folder path and record it under a resource name
    Create {
        /// Resource name
        name: String,
        /// Folder path relative to the datacenter VM folder
        #[arg(short, long)]
        path: String,
        /// Datacenter name (omit for the default datacenter)
        #[arg(short, long, default_value = "")]
        datacenter: String,
    },
    /// Refresh a recorded folder from the inventory
    Read {
        /// Resource name
        name: String,
    },
    /// Delete the folders a resource created
    Delete {
        /// Resource name
        name: String,
    },
    /// List recorded folder resources
    List,
}

/// Folder resource display row
#[derive(Debug, Serialize, Tabled)]
struct ResourceRow {
    /// Resource name
    name: String,
    /// Identity
    id: String,
    /// Datacenter
    datacenter: String,
    /// Path
    path: String,
    /// Existing path
    existing_path: String,
}

impl ResourceRow {
    fn new(name: &str, data: &ResourceData) -> Self {
        Self {
            name: name.to_string(),
            id: data.id.clone().unwrap_or_else(|| "-".to_string()),
            datacenter: if data.datacenter.is_empty() {
                "(default)".to_string()
            } else {
                data.datacenter.clone()
            },
            path: data.path.clone(),
            existing_path: data.existing_path.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let session = super::open_session(&config).await?;
    let mut resources = session.state.load().await?;

    match &args.command {
        FolderCommand::Create {
            name,
            path,
            datacenter,
        } => {
            if resources.get(name).is_some_and(ResourceData::exists) {
                return Err(AppError::conflict(format!(
                    "Resource '{}' already exists; delete it first",
                    name
                )));
            }

            let mut data = ResourceData::new(datacenter.clone(), path.clone());
            let result = session.resource.create(&mut data).await;
            // Folders created before a failure are real; keep the inventory.
            session.inventory.persist().await?;
            result?;

            resources.insert(name.clone(), data.clone());
            session.state.save(&resources).await?;

            output::print_success(&format!(
                "Folder '{}' created (id: {})",
                name,
                data.id.as_deref().unwrap_or_default()
            ));
            output::print_record(&data, format);
        }
        FolderCommand::Read { name } => {
            let mut data = resources
                .get(name)
                .cloned()
                .ok_or_else(|| AppError::not_found(format!("Resource '{}' not found", name)))?;

            session.resource.read(&mut data).await?;
            if data.exists() {
                output::print_record(&data, format);
            } else {
                resources.remove(name);
                session.state.save(&resources).await?;
                output::print_warning(&format!(
                    "Folder '{}' no longer exists; removed from state",
                    name
                ));
            }
        }
        FolderCommand::Delete { name } => {
            let mut data = resources
                .get(name)
                .cloned()
                .ok_or_else(|| AppError::not_found(format!("Resource '{}' not found", name)))?;

            let result = session.resource.delete(&mut data).await;
            session.inventory.persist().await?;
            let report = result?;

            resources.remove(name);
            session.state.save(&resources).await?;

            for skipped in &report.skipped {
                warn!(path = %skipped, "Folder was already gone");
            }
            match format {
                OutputFormat::Json => output::print_json(&report, "{}"),
                OutputFormat::Table => {
                    output::print_success(&format!("Folder '{}' deleted", name));
                    for path in &report.destroyed {
                        output::print_kv("destroyed", path.as_str());
                    }
                }
            }
        }
        FolderCommand::List => {
            let rows: Vec<ResourceRow> = resources
                .iter()
                .map(|(name, data)| ResourceRow::new(name, data))
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
