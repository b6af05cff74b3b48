//! Feature derivation for the segmentation classifier.
//!
//! Turns a cart snapshot plus optional behavioral inputs into the fixed
//! 9-dimensional feature vector the model was trained on.

use serde::{Deserialize, Serialize};

use crate::segmentation::model::FEATURE_DIMENSIONS;

/// Guard against division by zero when the tracked spend is 0.
const SHARE_EPSILON: f64 = 1e-9;

/// One cart line in the minimal shape the classifier consumes.
///
/// Identity fields (`id`, `name`) are intentionally absent: the model only
/// needs category, unit price, and quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleItem {
    /// Catalog category key
    pub category: String,
    /// Unit price
    pub price: f64,
    /// Quantity
    pub qty: u32,
}

/// Spend aggregated over the four tracked categories.
///
/// Categories outside wines/fruits/fish/sweets contribute nothing to the
/// model; matching on the category key is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategorySpend {
    /// Spend on wines
    pub wines: f64,
    /// Spend on fruits
    pub fruits: f64,
    /// Spend on fish
    pub fish: f64,
    /// Spend on sweets
    pub sweets: f64,
}

impl CategorySpend {
    /// Aggregates `price * qty` per tracked category across the sample.
    pub fn aggregate(items: &[SampleItem]) -> Self {
        let mut spend = Self::default();

        for item in items {
            let amount = item.price * f64::from(item.qty);
            match item.category.to_lowercase().as_str() {
                "wines" => spend.wines += amount,
                "fruits" => spend.fruits += amount,
                "fish" => spend.fish += amount,
                "sweets" => spend.sweets += amount,
                _ => {}
            }
        }

        spend
    }

    /// Sum across the four tracked categories (`total4` / `spend4`).
    pub fn total(&self) -> f64 {
        self.wines + self.fruits + self.fish + self.sweets
    }

    /// Per-category shares of the tracked total.
    pub fn shares(&self) -> CategoryShares {
        let denom = self.total() + SHARE_EPSILON;
        CategoryShares {
            wines: self.wines / denom,
            fruits: self.fruits / denom,
            fish: self.fish / denom,
            sweets: self.sweets / denom,
        }
    }
}

/// Per-category spend shares, named to match the model's feature columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryShares {
    /// Wines share of tracked spend
    #[serde(rename = "Wines_share")]
    pub wines: f64,
    /// Fruits share of tracked spend
    #[serde(rename = "Fruits_share")]
    pub fruits: f64,
    /// Fish share of tracked spend
    #[serde(rename = "Fish_share")]
    pub fish: f64,
    /// Sweets share of tracked spend
    #[serde(rename = "Sweets_share")]
    pub sweets: f64,
}

/// Behavioral feature inputs.
///
/// All fields default to 0; when a caller supplies values, non-finite
/// entries are also normalized to 0 rather than poisoning the distance
/// computation. Field names on the wire match the model's feature columns.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Behavior {
    /// Web purchase count
    #[serde(rename = "NumWebPurchases", default)]
    pub web_purchases: f64,
    /// Web visits in the last month
    #[serde(rename = "NumWebVisitsMonth", default)]
    pub web_visits: f64,
    /// Share of purchases made on the web
    #[serde(rename = "web_share", default)]
    pub web_share: f64,
    /// Deal purchase count
    #[serde(rename = "NumDealsPurchases", default)]
    pub deal_purchases: f64,
}

impl Behavior {
    /// Returns a copy with non-finite values replaced by 0.
    pub fn sanitized(&self) -> Self {
        let clean = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            web_purchases: clean(self.web_purchases),
            web_visits: clean(self.web_visits),
            web_share: clean(self.web_share),
            deal_purchases: clean(self.deal_purchases),
        }
    }
}

/// The assembled feature row in model column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// `ln(1 + spend4)`
    pub spend_intensity: f64,
    /// Category spend shares
    #[serde(flatten)]
    pub shares: CategoryShares,
    /// Behavioral features
    #[serde(flatten)]
    pub behavior: Behavior,
}

impl FeatureRow {
    /// Assembles the feature row from a cart sample and sanitized behavior.
    pub fn assemble(spend: &CategorySpend, behavior: &Behavior) -> Self {
        Self {
            spend_intensity: spend.total().ln_1p(),
            shares: spend.shares(),
            behavior: behavior.sanitized(),
        }
    }

    /// The row as a vector in the fixed model order: spend intensity, the
    /// four category shares, then the four behavioral features.
    pub fn to_vector(&self) -> [f64; FEATURE_DIMENSIONS] {
        [
            self.spend_intensity,
            self.shares.wines,
            self.shares.fruits,
            self.shares.fish,
            self.shares.sweets,
            self.behavior.web_purchases,
            self.behavior.web_visits,
            self.behavior.web_share,
            self.behavior.deal_purchases,
        ]
    }
}
