//! Product catalog database.
//!
//! This module provides access to the embedded product catalog:
//! category listing and `(category, id)` product resolution.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::Product;

/// A catalog category with its products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCategory {
    /// Category key used throughout the cart (e.g., "wines")
    pub key: String,
    /// Display name (e.g., "Wines")
    pub name: String,
    /// Products in this category
    pub products: Vec<Product>,
}

/// Database schema from catalog.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogDatabase {
    version: String,
    categories: Vec<CatalogCategory>,
}

/// Product catalog with fast `(category, id)` lookup.
///
/// The catalog is embedded in the binary at compile time. It is read-only:
/// the cart copies name and price out of it at add-time and never writes
/// back.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<CatalogCategory>,
    /// Fast lookup from (category key, product id) to indices into `categories`
    lookup: HashMap<(String, String), (usize, usize)>,
}

impl Catalog {
    /// Loads the catalog from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("catalog.json");
        let db: CatalogDatabase =
            serde_json::from_str(json_data).context("Failed to parse embedded catalog.json")?;

        Ok(Self::from_categories(db.categories))
    }

    /// Builds a catalog from explicit categories (used by tests).
    pub fn from_categories(categories: Vec<CatalogCategory>) -> Self {
        let mut lookup = HashMap::new();

        for (cat_idx, category) in categories.iter().enumerate() {
            for (prod_idx, product) in category.products.iter().enumerate() {
                lookup.insert(
                    (category.key.clone(), product.id.clone()),
                    (cat_idx, prod_idx),
                );
            }
        }

        Self { categories, lookup }
    }

    /// All categories in catalog order.
    pub fn categories(&self) -> &[CatalogCategory] {
        &self.categories
    }

    /// Finds a category by key.
    pub fn category(&self, key: &str) -> Option<&CatalogCategory> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Resolves a product by category key and product id.
    ///
    /// Returns `None` for unknown categories or ids; the cart treats an
    /// unresolved add as a no-op.
    pub fn resolve(&self, category: &str, id: &str) -> Option<&Product> {
        let (cat_idx, prod_idx) = self
            .lookup
            .get(&(category.to_string(), id.to_string()))
            .copied()?;
        Some(&self.categories[cat_idx].products[prod_idx])
    }
}
