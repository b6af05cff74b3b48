//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::common::{to_json_pretty, CliError, CliResult};
use crate::config::Config;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Data directory for the cart file and order receipts
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Currency symbol for formatted amounts
    #[arg(long, value_name = "SYMBOL")]
    currency: Option<String>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?;

        if self.json {
            println!("{}", to_json_pretty(&config)?);
            return Ok(());
        }

        let data_dir = config
            .data_dir()
            .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e}")))?;

        println!("Data directory: {}", data_dir.display());
        match &config.paths.data_dir {
            Some(dir) => println!("  (configured: {})", dir.display()),
            None => println!("  (platform default)"),
        }
        println!("Currency:       {}", config.ui.currency);

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.data_dir.is_none() && self.currency.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --data-dir or --currency",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(dir) = &self.data_dir {
            config.paths.data_dir = Some(dir.clone());
        }

        if let Some(currency) = &self.currency {
            config.ui.currency = currency.clone();
        }

        config
            .save()
            .map_err(|e| CliError::validation(format!("Failed to save configuration: {e}")))?;

        println!("Configuration saved.");
        Ok(())
    }
}
