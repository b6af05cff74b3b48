//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and persisted file names.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Storefront";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "storefront";

/// File name of the persisted cart inside the data directory.
///
/// The `v1` suffix versions the wire layout (a JSON array of line items);
/// a future layout change gets a new file name rather than a migration.
pub const CART_FILE_NAME: &str = "cart-v1.json";

/// Directory inside the data directory where order receipts are written.
pub const ORDERS_DIR_NAME: &str = "orders";
