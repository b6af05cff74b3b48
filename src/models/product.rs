//! Catalog product type.

use serde::{Deserialize, Serialize};

/// A product offered by the catalog.
///
/// Products are read-only: the catalog is the source of truth, and the cart
/// copies `name` and `price` at add-time rather than referencing back. A
/// product belongs to exactly one category; the category key is carried by
/// the catalog grouping, not by the product itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier, unique within its category (e.g., "wine-1")
    pub id: String,
    /// Display name (e.g., "Cabernet Reserva")
    pub name: String,
    /// Unit price, non-negative
    pub price: f64,
}
