//! Storefront Engine Library
//!
//! This library provides the core functionality for the storefront CLI:
//! the product catalog, the persistent shopping cart, checkout, and the
//! nearest-centroid customer segmentation classifier.

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod segmentation;
pub mod store;
