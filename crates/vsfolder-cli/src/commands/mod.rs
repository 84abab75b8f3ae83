//! CLI command definitions and dispatch.

pub mod config;
pub mod folder;
pub mod inventory;
pub mod schema;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use crate::state::StateStore;
use vsfolder_core::config::AppConfig;
use vsfolder_core::error::AppError;
use vsfolder_inventory::InventoryManager;
use vsfolder_service::FolderResource;

/// vsfolder: manage vSphere VM folder paths
#[derive(Debug, Parser)]
#[command(name = "vsfolder", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Folder resource lifecycle
    Folder(folder::FolderArgs),
    /// Inventory simulator management
    Inventory(inventory::InventoryArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show the resource schema
    Schema,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Folder(args) => folder::execute(args, &self.config, self.format).await,
            Commands::Inventory(args) => {
                inventory::execute(args, &self.config, self.format).await
            }
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
            Commands::Schema => schema::execute(self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Inventory, resource and state store built from one configuration.
#[derive(Debug)]
pub struct Session {
    /// Configured inventory.
    pub inventory: InventoryManager,
    /// Folder resource bound to the inventory.
    pub resource: FolderResource,
    /// Resource state file.
    pub state: StateStore,
}

/// Helper: open the configured inventory and state store
pub async fn open_session(config: &AppConfig) -> Result<Session, AppError> {
    let inventory = InventoryManager::from_config(&config.inventory).await?;
    let resource = FolderResource::new(inventory.client());
    let state = StateStore::new(&config.state.path);
    Ok(Session {
        inventory,
        resource,
        state,
    })
}
