//! Cart persistence layer.
//!
//! [`CartStore`] is the sole owner of the persisted cart value: every read
//! and write funnels through it. It holds a [`StorageBackend`] and the
//! catalog it resolves adds against, so tests can run any number of
//! independent stores over in-memory backends.

pub mod backend;

use anyhow::Result;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};

use crate::catalog::Catalog;
use crate::models::Cart;

/// Persistent cart store over a pluggable storage backend.
///
/// Mutating operations are read-modify-write against the single stored
/// value and return the new cart state. The returned state is the change
/// notification: callers re-render from it instead of the store reaching
/// into any display layer.
///
/// Concurrent processes sharing a backend are not coordinated;
/// last-writer-wins is the accepted consistency model.
pub struct CartStore<B: StorageBackend> {
    backend: B,
    catalog: Catalog,
}

impl<B: StorageBackend> CartStore<B> {
    /// Creates a store over the given backend and catalog.
    pub fn new(backend: B, catalog: Catalog) -> Self {
        Self { backend, catalog }
    }

    /// The catalog this store resolves adds against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Loads the current cart. Never fails.
    ///
    /// Fail-soft: a missing value, an unreadable backend, or malformed JSON
    /// all normalize to an empty cart rather than surfacing an error. Lines
    /// violating the `qty > 0` invariant are dropped.
    pub fn load(&self) -> Cart {
        let Ok(Some(raw)) = self.backend.read() else {
            return Cart::new();
        };

        serde_json::from_str::<Cart>(&raw)
            .map(|cart| cart.sanitized())
            .unwrap_or_default()
    }

    /// Persists `cart` as the new canonical value, fully replacing the
    /// prior one, and returns the persisted state.
    pub fn save(&self, cart: Cart) -> Result<Cart> {
        let serialized = serde_json::to_string(&cart)?;
        self.backend.write(&serialized)?;
        Ok(cart)
    }

    /// Adds one unit of a catalog product to the cart.
    ///
    /// Unknown `(category, id)` pairs are a no-op: the current cart is
    /// returned unchanged and nothing is written.
    pub fn add(&self, category: &str, id: &str) -> Result<Cart> {
        let Some(product) = self.catalog.resolve(category, id) else {
            return Ok(self.load());
        };
        let product = product.clone();

        let mut cart = self.load();
        cart.add_product(&product, category);
        self.save(cart)
    }

    /// Removes a line item by id, optionally scoped to a category.
    pub fn remove(&self, id: &str, category: Option<&str>) -> Result<Cart> {
        let mut cart = self.load();
        cart.remove(id, category);
        self.save(cart)
    }

    /// Adjusts a line item's quantity by `delta`, removing the line when the
    /// result would drop to zero or below. Unknown ids are a no-op.
    pub fn set_quantity(&self, id: &str, delta: i64) -> Result<Cart> {
        let mut cart = self.load();
        cart.apply_qty_delta(id, delta);
        self.save(cart)
    }

    /// Persists an empty cart.
    pub fn clear(&self) -> Result<Cart> {
        self.save(Cart::new())
    }
}
