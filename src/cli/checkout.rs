//! Checkout commands: order summary and confirmation.

use std::fs;

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::common::{
    format_currency, load_config, open_store, to_json_pretty, CliError, CliResult,
};
use crate::cli::segment::print_classification;
use crate::config::Config;
use crate::constants::ORDERS_DIR_NAME;
use crate::models::{Cart, Order};
use crate::segmentation::{classify_with_boost, Classification, Classifier};

/// Checkout operations
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[command(subcommand)]
    command: CheckoutCommand,
}

#[derive(Debug, Subcommand)]
enum CheckoutCommand {
    /// Display the order summary and customer segment
    Show(CheckoutShowArgs),
    /// Confirm the order: write a receipt and clear the cart
    Confirm(CheckoutConfirmArgs),
}

/// Display the order summary and customer segment
#[derive(Debug, Clone, Args)]
pub struct CheckoutShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Confirm the order: write a receipt and clear the cart
#[derive(Debug, Clone, Args)]
pub struct CheckoutConfirmArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CheckoutView<'a> {
    items: &'a [crate::models::CartLineItem],
    total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    segment: Option<&'a Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    segment_error: Option<String>,
}

impl CheckoutArgs {
    /// Execute checkout subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            CheckoutCommand::Show(args) => args.execute(),
            CheckoutCommand::Confirm(args) => args.execute(),
        }
    }
}

impl CheckoutShowArgs {
    /// Execute the checkout show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let store = open_store(&config)?;
        let cart = store.load();

        let classifier = Classifier::load()
            .map_err(|e| CliError::io(format!("Failed to load segmentation model: {e}")))?;
        let segment = classify_with_boost(&classifier, &cart.segmentation_sample());

        if self.json {
            let (segment_ref, segment_error) = match &segment {
                Ok(classification) => (Some(classification), None),
                Err(e) => (None, Some(e.to_string())),
            };
            let view = CheckoutView {
                items: cart.items(),
                total: cart.total(),
                segment: segment_ref,
                segment_error,
            };
            println!("{}", to_json_pretty(&view)?);
            return Ok(());
        }

        print_summary(&cart, &config);
        println!();
        match segment {
            Ok(classification) => print_classification(&classification, &config),
            Err(e) => println!("Segment: {e}"),
        }

        Ok(())
    }
}

impl CheckoutConfirmArgs {
    /// Execute the checkout confirm command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let store = open_store(&config)?;
        let cart = store.load();

        if cart.is_empty() {
            return Err(CliError::validation("Cannot confirm an empty cart"));
        }

        let order = Order::from_cart(&cart);
        write_receipt(&config, &order)?;

        store
            .clear()
            .map_err(|e| CliError::io(format!("Failed to clear cart: {e}")))?;

        if self.json {
            println!("{}", to_json_pretty(&order)?);
        } else {
            println!("Order confirmed! Thank you.");
            println!("Order id: {}", order.id);
            println!(
                "Total:    {}",
                format_currency(order.total, &config.ui.currency)
            );
        }

        Ok(())
    }
}

/// Writes the order receipt under `<data_dir>/orders/<uuid>.json`.
fn write_receipt(config: &Config, order: &Order) -> CliResult<()> {
    let orders_dir = config
        .data_dir()
        .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e}")))?
        .join(ORDERS_DIR_NAME);

    fs::create_dir_all(&orders_dir).map_err(|e| {
        CliError::io(format!(
            "Failed to create orders directory {}: {e}",
            orders_dir.display()
        ))
    })?;

    let path = orders_dir.join(order.file_name());
    let json = to_json_pretty(order)?;
    fs::write(&path, json)
        .map_err(|e| CliError::io(format!("Failed to write receipt {}: {e}", path.display())))?;

    Ok(())
}

/// Renders the order summary lines.
fn print_summary(cart: &Cart, config: &Config) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        println!("Total: {}", format_currency(0.0, &config.ui.currency));
        return;
    }

    println!("Order summary");
    for item in cart.items() {
        println!(
            "  {} x {:<3} {}",
            item.name,
            item.qty,
            format_currency(item.subtotal(), &config.ui.currency)
        );
    }
    println!("Total: {}", format_currency(cart.total(), &config.ui.currency));
}
