//! CLI command handlers.
//!
//! This module provides headless, scriptable access to the storefront's
//! functionality for automation, testing, and shell use.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod common;
pub mod config;
pub mod segment;

// Re-export types used by main.rs and tests
pub use cart::CartArgs;
pub use catalog::CatalogArgs;
pub use checkout::CheckoutArgs;
pub use common::{CliError, CliResult};
pub use config::ConfigArgs;
pub use segment::SegmentArgs;
