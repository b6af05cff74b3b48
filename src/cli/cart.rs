//! Cart manipulation and display commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::common::{
    format_currency, load_config, open_store, to_json_pretty, CliError, CliResult,
};
use crate::config::Config;
use crate::models::{Cart, CartLineItem};

/// Cart operations
#[derive(Debug, Args)]
pub struct CartArgs {
    #[command(subcommand)]
    command: CartCommand,
}

#[derive(Debug, Subcommand)]
enum CartCommand {
    /// Add one unit of a catalog product to the cart
    Add(CartAddArgs),
    /// Remove a line item from the cart
    Remove(CartRemoveArgs),
    /// Adjust a line item's quantity
    SetQty(CartSetQtyArgs),
    /// Remove all items from the cart
    Clear(CartClearArgs),
    /// Display the cart grouped by category
    Show(CartShowArgs),
    /// Export the cart as a segmentation sample
    Export(CartExportArgs),
}

/// Add one unit of a catalog product to the cart
#[derive(Debug, Clone, Args)]
pub struct CartAddArgs {
    /// Catalog category key (e.g., "wines")
    #[arg(short, long, value_name = "KEY")]
    pub category: String,

    /// Product id within the category (e.g., "wine-1")
    #[arg(short, long, value_name = "ID")]
    pub id: String,
}

/// Remove a line item from the cart
#[derive(Debug, Clone, Args)]
pub struct CartRemoveArgs {
    /// Product id to remove
    #[arg(short, long, value_name = "ID")]
    pub id: String,

    /// Restrict the match to one category. Without this, the first line
    /// matching the id is removed.
    #[arg(short, long, value_name = "KEY")]
    pub category: Option<String>,
}

/// Adjust a line item's quantity
#[derive(Debug, Clone, Args)]
pub struct CartSetQtyArgs {
    /// Product id to adjust
    #[arg(short, long, value_name = "ID")]
    pub id: String,

    /// Signed quantity change; a result of zero or less removes the line
    #[arg(short, long, value_name = "N", allow_hyphen_values = true)]
    pub delta: i64,
}

/// Remove all items from the cart
#[derive(Debug, Clone, Args)]
pub struct CartClearArgs {}

/// Display the cart grouped by category
#[derive(Debug, Clone, Args)]
pub struct CartShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Export the cart as a segmentation sample
#[derive(Debug, Clone, Args)]
pub struct CartExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CartView<'a> {
    items: &'a [CartLineItem],
    total: f64,
    count: u32,
    summary: String,
    spend_by_category: std::collections::BTreeMap<String, f64>,
}

impl CartArgs {
    /// Execute cart subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            CartCommand::Add(args) => args.execute(),
            CartCommand::Remove(args) => args.execute(),
            CartCommand::SetQty(args) => args.execute(),
            CartCommand::Clear(args) => args.execute(),
            CartCommand::Show(args) => args.execute(),
            CartCommand::Export(args) => args.execute(),
        }
    }
}

impl CartAddArgs {
    /// Execute the cart add command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let store = open_store(&config)?;

        // Resolve first so an unknown product is reported instead of being
        // silently swallowed by the store's no-op behavior.
        if store.catalog().resolve(&self.category, &self.id).is_none() {
            return Err(CliError::validation(format!(
                "Unknown product: {}/{}",
                self.category, self.id
            )));
        }

        let cart = store
            .add(&self.category, &self.id)
            .map_err(|e| CliError::io(format!("Failed to save cart: {e}")))?;

        print_badge(&cart);
        Ok(())
    }
}

impl CartRemoveArgs {
    /// Execute the cart remove command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let store = open_store(&config)?;

        let cart = store
            .remove(&self.id, self.category.as_deref())
            .map_err(|e| CliError::io(format!("Failed to save cart: {e}")))?;

        print_badge(&cart);
        Ok(())
    }
}

impl CartSetQtyArgs {
    /// Execute the cart set-qty command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let store = open_store(&config)?;

        let cart = store
            .set_quantity(&self.id, self.delta)
            .map_err(|e| CliError::io(format!("Failed to save cart: {e}")))?;

        print_badge(&cart);
        Ok(())
    }
}

impl CartClearArgs {
    /// Execute the cart clear command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let store = open_store(&config)?;

        store
            .clear()
            .map_err(|e| CliError::io(format!("Failed to save cart: {e}")))?;

        println!("Cart cleared.");
        Ok(())
    }
}

impl CartShowArgs {
    /// Execute the cart show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let store = open_store(&config)?;
        let cart = store.load();

        if self.json {
            let view = CartView {
                items: cart.items(),
                total: cart.total(),
                count: cart.count(),
                summary: cart.category_summary(),
                spend_by_category: cart.spend_by_category(),
            };
            println!("{}", to_json_pretty(&view)?);
            return Ok(());
        }

        print_cart(&cart, &config);
        Ok(())
    }
}

impl CartExportArgs {
    /// Execute the cart export command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let store = open_store(&config)?;
        let sample = store.load().segmentation_sample();

        let json = to_json_pretty(&sample)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &json).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {e}", path.display()))
                })?;
                println!("Sample written to {}", path.display());
            }
            None => println!("{json}"),
        }

        Ok(())
    }
}

/// Prints the post-mutation item count (the header badge).
fn print_badge(cart: &Cart) {
    println!("Cart: {} item(s)", cart.count());
}

/// Renders the grouped cart view.
fn print_cart(cart: &Cart, config: &Config) {
    if cart.is_empty() {
        println!("Cart is empty.");
        return;
    }

    println!("Categories: {}", cart.category_summary());
    println!();

    for (category, items) in cart.group_by_category() {
        println!("{category}");
        for item in items {
            println!(
                "  {:<24} {:>9} each  x {:<3} {}",
                item.name,
                format_currency(item.price, &config.ui.currency),
                item.qty,
                format_currency(item.subtotal(), &config.ui.currency)
            );
        }
    }

    println!();
    println!(
        "Total: {} ({} item(s))",
        format_currency(cart.total(), &config.ui.currency),
        cart.count()
    );
}
