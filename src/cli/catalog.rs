//! Catalog browsing commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::cli::common::{format_currency, load_config, to_json_pretty, CliError, CliResult};

/// Catalog operations
#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    command: CatalogCommand,
}

#[derive(Debug, Subcommand)]
enum CatalogCommand {
    /// List catalog products
    List(CatalogListArgs),
}

/// List catalog products
#[derive(Debug, Clone, Args)]
pub struct CatalogListArgs {
    /// Restrict the listing to one category (e.g., "wines")
    #[arg(short, long, value_name = "KEY")]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CategoryListing<'a> {
    key: &'a str,
    name: &'a str,
    products: &'a [crate::models::Product],
}

impl CatalogArgs {
    /// Execute catalog subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            CatalogCommand::List(args) => args.execute(),
        }
    }
}

impl CatalogListArgs {
    /// Execute the catalog list command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let catalog = Catalog::load()
            .map_err(|e| CliError::io(format!("Failed to load catalog database: {e}")))?;

        let categories: Vec<&crate::catalog::CatalogCategory> = match &self.category {
            Some(key) => {
                let category = catalog.category(key).ok_or_else(|| {
                    CliError::validation(format!("Unknown catalog category: {key}"))
                })?;
                vec![category]
            }
            None => catalog.categories().iter().collect(),
        };

        if self.json {
            let listings: Vec<CategoryListing<'_>> = categories
                .iter()
                .map(|c| CategoryListing {
                    key: &c.key,
                    name: &c.name,
                    products: &c.products,
                })
                .collect();
            println!("{}", to_json_pretty(&listings)?);
            return Ok(());
        }

        for category in categories {
            println!("{} ({})", category.name, category.key);
            for product in &category.products {
                println!(
                    "  {:<12} {:<24} {}",
                    product.id,
                    product.name,
                    format_currency(product.price, &config.ui.currency)
                );
            }
            println!();
        }

        Ok(())
    }
}
