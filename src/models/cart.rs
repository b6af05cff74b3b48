//! Cart model: an ordered sequence of line items with derived views.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{CartLineItem, Product};
use crate::segmentation::SampleItem;

/// Category key used for grouping when a line item carries no category.
const FALLBACK_CATEGORY: &str = "other";

/// The shopping cart: an ordered sequence of [`CartLineItem`]s.
///
/// Insertion order is kept for stable display; totals do not depend on it.
/// The persisted layout is a bare JSON array of line items (the type is
/// `#[serde(transparent)]`), so the wire shape is
/// `[{id, name, price, category, qty}, ...]`.
///
/// All mutation here is pure, in-memory state transition; persistence lives
/// in [`crate::store::CartStore`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cart from existing line items without invariant checks.
    ///
    /// Intended for tests and fixtures; data read from storage goes through
    /// [`Cart::sanitized`] instead.
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        Self { items }
    }

    /// Returns a copy with invariant-violating lines dropped.
    ///
    /// Persisted data that parsed as valid JSON may still carry lines with
    /// `qty == 0` (e.g., written by an older build or edited by hand); those
    /// are dropped rather than rejected wholesale.
    pub fn sanitized(&self) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.qty > 0)
                .cloned()
                .collect(),
        }
    }

    /// The line items in cart order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart holds no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds a resolved catalog product to the cart.
    ///
    /// If a line item with the same `(id, category)` already exists its
    /// quantity is incremented by 1; otherwise a new line is appended with
    /// quantity 1, copying name and price from the product.
    pub fn add_product(&mut self, product: &Product, category: &str) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.matches(&product.id, category))
        {
            existing.qty += 1;
        } else {
            self.items.push(CartLineItem::from_product(product, category));
        }
    }

    /// Removes a line item by product id.
    ///
    /// With a category the match is exact on `(id, category)`. Without one,
    /// the first line matching `id` is removed; if the same id exists in two
    /// categories (the catalog does not do this, but nothing prevents it)
    /// whichever line appears first wins.
    ///
    /// Returns `true` if a line was removed.
    pub fn remove(&mut self, id: &str, category: Option<&str>) -> bool {
        let position = self.items.iter().position(|item| match category {
            Some(cat) => item.matches(id, cat),
            None => item.id == id,
        });

        match position {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Adjusts the quantity of the first line matching `id` by `delta`.
    ///
    /// If the resulting quantity would be zero or negative the line is
    /// removed entirely, keeping the `qty > 0` invariant. Unknown ids are a
    /// no-op.
    ///
    /// Returns `true` if the cart changed.
    pub fn apply_qty_delta(&mut self, id: &str, delta: i64) -> bool {
        let Some(idx) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };

        // Saturate rather than wrap on absurd deltas
        let new_qty = i64::from(self.items[idx].qty).saturating_add(delta);
        if new_qty <= 0 {
            self.items.remove(idx);
        } else {
            self.items[idx].qty = u32::try_from(new_qty).unwrap_or(u32::MAX);
        }

        true
    }

    /// Removes all line items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * qty` across all line items.
    ///
    /// Accumulated in cart order with no intermediate rounding; callers
    /// format for display (two decimal places).
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartLineItem::subtotal).sum()
    }

    /// Sum of quantities across all line items (the header badge count).
    ///
    /// Saturates at `u32::MAX` instead of overflowing.
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.qty))
    }

    /// Groups line items by category.
    ///
    /// Keys iterate in lexicographic order; within a group, items keep cart
    /// order. Lines without a category group under `"other"`.
    pub fn group_by_category(&self) -> BTreeMap<&str, Vec<&CartLineItem>> {
        let mut grouped: BTreeMap<&str, Vec<&CartLineItem>> = BTreeMap::new();

        for item in &self.items {
            let category = if item.category.is_empty() {
                FALLBACK_CATEGORY
            } else {
                item.category.as_str()
            };
            grouped.entry(category).or_default().push(item);
        }

        grouped
    }

    /// One-line summary of categories and quantities, e.g. `"fish(1) • wines(3)"`.
    ///
    /// Categories appear in lexicographic order. Returns `"none"` for an
    /// empty cart.
    pub fn category_summary(&self) -> String {
        if self.items.is_empty() {
            return "none".to_string();
        }

        self.group_by_category()
            .iter()
            .map(|(category, items)| {
                let qty: u32 = items.iter().map(|item| item.qty).sum();
                format!("{category}({qty})")
            })
            .collect::<Vec<_>>()
            .join(" • ")
    }

    /// Total spend per category, keyed lexicographically.
    pub fn spend_by_category(&self) -> BTreeMap<String, f64> {
        let mut spend: BTreeMap<String, f64> = BTreeMap::new();

        for item in &self.items {
            let category = if item.category.is_empty() {
                FALLBACK_CATEGORY.to_string()
            } else {
                item.category.clone()
            };
            *spend.entry(category).or_insert(0.0) += item.subtotal();
        }

        spend
    }

    /// Projects the cart into the minimal shape the segmentation classifier
    /// consumes: `{category, price, qty}` per line, with `id` and `name`
    /// stripped.
    pub fn segmentation_sample(&self) -> Vec<SampleItem> {
        self.items
            .iter()
            .map(|item| SampleItem {
                category: item.category.clone(),
                price: item.price,
                qty: item.qty,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn test_add_product_appends_then_increments() {
        let mut cart = Cart::new();
        let wine = product("wine-1", "Cabernet Reserva", 29.9);

        cart.add_product(&wine, "wines");
        cart.add_product(&wine, "wines");

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].qty, 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_add_same_id_different_category_keeps_separate_lines() {
        let mut cart = Cart::new();
        let item = product("special-1", "Special", 5.0);

        cart.add_product(&item, "fish");
        cart.add_product(&item, "fruits");

        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_uniqueness_invariant_under_repeated_adds() {
        let mut cart = Cart::new();
        let wine = product("wine-3", "Chardonnay Classic", 22.5);

        for _ in 0..5 {
            cart.add_product(&wine, "wines");
        }

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].qty, 5);
    }

    #[test]
    fn test_remove_by_id_only() {
        let mut cart = Cart::new();
        cart.add_product(&product("wine-1", "Cabernet Reserva", 29.9), "wines");

        assert!(cart.remove("wine-1", None));
        assert!(cart.is_empty());
        assert!((cart.total() - 0.0).abs() < f64::EPSILON);
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_remove_with_category_is_exact() {
        let mut cart = Cart::new();
        let item = product("special-1", "Special", 5.0);
        cart.add_product(&item, "fish");
        cart.add_product(&item, "fruits");

        assert!(cart.remove("special-1", Some("fruits")));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].category, "fish");
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add_product(&product("fish-1", "Salmon Fillet", 12.5), "fish");

        assert!(!cart.remove("fish-9", None));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_qty_delta_to_zero_removes_line() {
        let mut cart = Cart::new();
        let wine = product("wine-1", "Cabernet Reserva", 29.9);
        cart.add_product(&wine, "wines");
        cart.add_product(&wine, "wines");

        assert!(cart.apply_qty_delta("wine-1", -2));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_qty_delta_below_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_product(&product("fish-2", "Tuna Steak", 15.0), "fish");

        assert!(cart.apply_qty_delta("fish-2", -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_qty_invariant_after_mutations() {
        let mut cart = Cart::new();
        cart.add_product(&product("fruit-1", "Apples (6-pack)", 3.6), "fruits");
        cart.add_product(&product("fruit-2", "Bananas (1kg)", 2.4), "fruits");
        cart.apply_qty_delta("fruit-1", 2);
        cart.apply_qty_delta("fruit-2", -1);

        assert!(cart.items().iter().all(|item| item.qty > 0));
    }

    #[test]
    fn test_qty_delta_unknown_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.apply_qty_delta("nothing", 1));
    }

    #[test]
    fn test_qty_delta_saturates_on_huge_positive_delta() {
        let mut cart = Cart::new();
        cart.add_product(&product("wine-1", "Cabernet Reserva", 29.9), "wines");

        assert!(cart.apply_qty_delta("wine-1", i64::MAX));
        assert_eq!(cart.items()[0].qty, u32::MAX);
    }

    #[test]
    fn test_qty_delta_huge_negative_delta_removes_line() {
        let mut cart = Cart::new();
        cart.add_product(&product("wine-1", "Cabernet Reserva", 29.9), "wines");

        assert!(cart.apply_qty_delta("wine-1", i64::MIN));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_count_saturates_instead_of_overflowing() {
        let mut cart = Cart::new();
        cart.add_product(&product("wine-1", "Cabernet Reserva", 29.9), "wines");
        cart.apply_qty_delta("wine-1", i64::MAX);
        cart.add_product(&product("fish-1", "Salmon Fillet", 12.5), "fish");

        assert_eq!(cart.count(), u32::MAX);
    }

    #[test]
    fn test_total_matches_sum_of_subtotals() {
        let mut cart = Cart::new();
        let wine = product("wine-1", "Cabernet Reserva", 29.9);
        cart.add_product(&wine, "wines");
        cart.add_product(&wine, "wines");
        cart.add_product(&product("fish-3", "Cod Loin", 10.25), "fish");

        let expected = 29.9 * 2.0 + 10.25;
        assert!((cart.total() - expected).abs() < 1e-9);
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_group_by_category_lexicographic_with_fallback() {
        let cart = Cart::from_items(vec![
            CartLineItem::new("wine-1", "Cabernet Reserva", 29.9, "wines", 1).unwrap(),
            CartLineItem {
                id: "x-1".to_string(),
                name: "Unfiled".to_string(),
                price: 1.0,
                category: String::new(),
                qty: 1,
            },
            CartLineItem::new("fish-1", "Salmon Fillet", 12.5, "fish", 1).unwrap(),
        ]);

        let grouped = cart.group_by_category();
        let keys: Vec<&str> = grouped.keys().copied().collect();
        assert_eq!(keys, vec!["fish", "other", "wines"]);
    }

    #[test]
    fn test_group_preserves_cart_order_within_category() {
        let cart = Cart::from_items(vec![
            CartLineItem::new("wine-2", "Pinot Noir Estate", 34.0, "wines", 1).unwrap(),
            CartLineItem::new("wine-1", "Cabernet Reserva", 29.9, "wines", 1).unwrap(),
        ]);

        let grouped = cart.group_by_category();
        let wines = &grouped["wines"];
        assert_eq!(wines[0].id, "wine-2");
        assert_eq!(wines[1].id, "wine-1");
    }

    #[test]
    fn test_category_summary() {
        let mut cart = Cart::new();
        let wine = product("wine-1", "Cabernet Reserva", 29.9);
        cart.add_product(&wine, "wines");
        cart.add_product(&wine, "wines");
        cart.add_product(&wine, "wines");
        cart.add_product(&product("fish-1", "Salmon Fillet", 12.5), "fish");

        assert_eq!(cart.category_summary(), "fish(1) • wines(3)");
    }

    #[test]
    fn test_category_summary_empty() {
        assert_eq!(Cart::new().category_summary(), "none");
    }

    #[test]
    fn test_spend_by_category() {
        let mut cart = Cart::new();
        let wine = product("wine-1", "Cabernet Reserva", 30.0);
        cart.add_product(&wine, "wines");
        cart.add_product(&wine, "wines");
        cart.add_product(&product("fish-3", "Cod Loin", 10.0), "fish");

        let spend = cart.spend_by_category();
        assert!((spend["wines"] - 60.0).abs() < 1e-9);
        assert!((spend["fish"] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_segmentation_sample_strips_identity() {
        let mut cart = Cart::new();
        cart.add_product(&product("wine-1", "Cabernet Reserva", 29.9), "wines");

        let sample = cart.segmentation_sample();
        assert_eq!(sample.len(), 1);
        assert_eq!(sample[0].category, "wines");
        assert!((sample[0].price - 29.9).abs() < f64::EPSILON);
        assert_eq!(sample[0].qty, 1);
    }

    #[test]
    fn test_sanitized_drops_zero_qty_lines() {
        let cart = Cart::from_items(vec![
            CartLineItem::new("wine-1", "Cabernet Reserva", 29.9, "wines", 2).unwrap(),
            CartLineItem {
                id: "fish-1".to_string(),
                name: "Salmon Fillet".to_string(),
                price: 12.5,
                category: "fish".to_string(),
                qty: 0,
            },
        ]);

        let clean = cart.sanitized();
        assert_eq!(clean.items().len(), 1);
        assert_eq!(clean.items()[0].id, "wine-1");
    }

    #[test]
    fn test_serde_round_trip_preserves_order() {
        let cart = Cart::from_items(vec![
            CartLineItem::new("wine-2", "Pinot Noir Estate", 34.0, "wines", 1).unwrap(),
            CartLineItem::new("fish-1", "Salmon Fillet", 12.5, "fish", 3).unwrap(),
        ]);

        let json = serde_json::to_string(&cart).unwrap();
        // Wire layout is a bare array of line items
        assert!(json.starts_with('['));

        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
