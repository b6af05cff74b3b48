//! Cart line item type.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::Product;

/// One product line in the cart.
///
/// `name` and `price` are denormalized copies taken from the catalog when the
/// item is added; they are not re-synced if the catalog changes afterwards.
///
/// # Invariants
///
/// - `qty` is always positive; a line item whose quantity would reach zero is
///   removed from the cart instead of being persisted.
/// - At most one line item exists per distinct `(id, category)` pair; adding
///   the same product again increments the existing line's quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product identifier, unique within a category
    pub id: String,
    /// Display name copied from the catalog at add-time
    pub name: String,
    /// Unit price copied from the catalog at add-time
    pub price: f64,
    /// Catalog category key (e.g., "wines"). Absent on the wire means
    /// uncategorized; such lines group under "other".
    #[serde(default)]
    pub category: String,
    /// Quantity, always positive
    pub qty: u32,
}

impl CartLineItem {
    /// Creates a line item from a resolved catalog product with quantity 1.
    pub fn from_product(product: &Product, category: impl Into<String>) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            category: category.into(),
            qty: 1,
        }
    }

    /// Creates a line item with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if `qty` is zero or `price` is negative or non-finite.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        qty: u32,
    ) -> Result<Self> {
        if qty == 0 {
            anyhow::bail!("Line item quantity must be positive");
        }
        if !price.is_finite() || price < 0.0 {
            anyhow::bail!("Line item price must be a non-negative number (got {price})");
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            qty,
        })
    }

    /// Line subtotal: unit price times quantity.
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.qty)
    }

    /// Whether this line matches the given product id and category.
    pub fn matches(&self, id: &str, category: &str) -> bool {
        self.id == id && self.category == category
    }
}
