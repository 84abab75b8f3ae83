//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use vsfolder_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            match format {
                OutputFormat::Json => output::print_json(&config, "{}"),
                OutputFormat::Table => {
                    output::print_record(&config.inventory, format);
                    output::print_record(&config.state, format);
                    output::print_record(&config.logging, format);
                }
            }
        }
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                if config.inventory.provider != "memory" {
                    let e = AppError::configuration(format!(
                        "Unsupported inventory provider '{}'",
                        config.inventory.provider
                    ));
                    output::print_error(&format!("Configuration invalid: {}", e));
                    return Err(e);
                }
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                println!("  Inventory: {}", config.inventory.provider);
                println!(
                    "  Snapshot: {}",
                    config.inventory.snapshot_path.as_deref().unwrap_or("(none)")
                );
                println!("  Datacenters: {}", config.inventory.datacenters.join(", "));
                println!("  State: {}", config.state.path);
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}
