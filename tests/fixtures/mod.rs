//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use std::path::Path;
use std::process::{Command, Output};

use storefront::models::{Cart, CartLineItem};
use tempfile::TempDir;

/// Path to the storefront binary
pub fn storefront_bin() -> String {
    std::env::var("CARGO_BIN_EXE_storefront")
        .unwrap_or_else(|_| "target/release/storefront".to_string())
}

/// An isolated environment: config and data both live in a temp dir that is
/// removed when the value drops.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    /// Creates a fresh isolated environment.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// The environment's data directory.
    pub fn data_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("data")
    }

    /// The environment's config directory.
    pub fn config_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("config")
    }

    /// Creates a Command with isolated config and data directories.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(storefront_bin());
        cmd.env("STOREFRONT_CONFIG_DIR", self.config_dir());
        cmd.env("STOREFRONT_DATA_DIR", self.data_dir());
        cmd.args(args);
        cmd
    }

    /// Runs the binary and returns its output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute command")
    }

    /// Runs the binary, asserting a zero exit code, and returns stdout.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert_eq!(
            output.status.code(),
            Some(0),
            "Command {:?} should succeed. stderr: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Writes a raw cart file into the data directory, bypassing the CLI.
    pub fn write_raw_cart(&self, contents: &str) {
        let data_dir = self.data_dir();
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(data_dir.join("cart-v1.json"), contents).unwrap();
    }

    /// Seeds the cart with the given line items.
    pub fn seed_cart(&self, items: Vec<CartLineItem>) {
        let cart = Cart::from_items(items);
        self.write_raw_cart(&serde_json::to_string(&cart).unwrap());
    }

    /// Path to the orders directory.
    pub fn orders_dir(&self) -> std::path::PathBuf {
        self.data_dir().join("orders")
    }
}

/// Builds a line item for seeding carts.
pub fn line_item(id: &str, name: &str, price: f64, category: &str, qty: u32) -> CartLineItem {
    CartLineItem::new(id, name, price, category, qty).unwrap()
}

/// Lists the files in a directory, empty if it does not exist.
pub fn dir_entries(path: &Path) -> Vec<std::path::PathBuf> {
    match std::fs::read_dir(path) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}
