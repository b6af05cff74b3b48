//! Core data models for the storefront.
//!
//! This module contains the domain types shared across the application:
//! products, cart line items, the cart itself, and order receipts.

pub mod cart;
pub mod line_item;
pub mod order;
pub mod product;

// Re-export commonly used types
pub use cart::Cart;
pub use line_item::CartLineItem;
pub use order::Order;
pub use product::Product;
