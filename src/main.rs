//! Storefront - headless storefront engine
//!
//! Catalog browsing, a persistent shopping cart, checkout, and a customer
//! segmentation badge, driven entirely from the command line.

// Module declarations
mod catalog;
mod cli;
mod config;
mod constants;
mod models;
mod segmentation;
mod store;

use clap::{Parser, Subcommand};

use cli::{CartArgs, CatalogArgs, CheckoutArgs, ConfigArgs, SegmentArgs};

/// Storefront - headless storefront engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Catalog operations (list)
    Catalog(CatalogArgs),
    /// Cart operations (add, remove, set-qty, clear, show, export)
    Cart(CartArgs),
    /// Checkout operations (show, confirm)
    Checkout(CheckoutArgs),
    /// Classify the current cart into a customer segment
    Segment(SegmentArgs),
    /// Configuration management
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Catalog(args) => args.execute(),
        Command::Cart(args) => args.execute(),
        Command::Checkout(args) => args.execute(),
        Command::Segment(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    if let Err(error) = result {
        eprintln!("Error: {error}");
        std::process::exit(error.exit_code());
    }
}
