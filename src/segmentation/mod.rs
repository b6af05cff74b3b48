//! Customer segmentation classifier.
//!
//! A pre-trained nearest-centroid model: cart spend is turned into a fixed
//! 9-dimensional feature vector, standardized with the embedded scaler, and
//! assigned to the closest of three cluster centroids in Euclidean distance.
//! The classifier is a pure function of its inputs; it never reads or
//! mutates the cart store.

pub mod features;
pub mod model;

use std::fmt;

use serde::Serialize;

pub use features::{Behavior, CategoryShares, CategorySpend, FeatureRow, SampleItem};
pub use model::{ClusterProfile, MetricValue, ProfileMetric, SegmentationModel};

/// Tracked spend above which the engagement boost considers a cart
/// high-value.
pub const BOOST_SPEND_THRESHOLD: f64 = 150.0;

/// Wines-share window (exclusive) in which the engagement boost applies.
pub const BOOST_WINES_SHARE_RANGE: (f64, f64) = (0.75, 0.9);

/// Precondition failures reported by [`Classifier::classify`].
///
/// These are structured results, not panics: the caller owns the user-facing
/// messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyError {
    /// The input sample had no line items.
    EmptyCart,
    /// A scaler or centroid table is empty (configuration integrity, not a
    /// runtime condition).
    MissingParameters,
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCart => write!(f, "Cart empty"),
            Self::MissingParameters => write!(f, "Model parameters missing"),
        }
    }
}

impl std::error::Error for ClassifyError {}

/// Result of classifying a cart sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Index of the nearest centroid
    pub cluster: usize,
    /// Euclidean distance to the nearest centroid in standardized space
    pub distance: f64,
    /// Total spend across the four tracked categories
    pub spend4: f64,
    /// Per-category spend shares
    pub shares: CategoryShares,
    /// The assembled feature row the model saw
    #[serde(rename = "features_row")]
    pub features: FeatureRow,
    /// Display metadata for the assigned cluster, if any exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ClusterProfile>,
}

/// Nearest-centroid classifier over a [`SegmentationModel`].
///
/// Construction takes the model explicitly so tests can run independent
/// instances with reduced or broken parameter tables.
#[derive(Debug, Clone)]
pub struct Classifier {
    model: SegmentationModel,
}

impl Classifier {
    /// Creates a classifier over the given model.
    pub fn new(model: SegmentationModel) -> Self {
        Self { model }
    }

    /// Creates a classifier over the embedded model.
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self::new(SegmentationModel::load()?))
    }

    /// The underlying model.
    pub fn model(&self) -> &SegmentationModel {
        &self.model
    }

    /// Classifies a cart sample into a cluster.
    ///
    /// Stateless and deterministic: identical inputs always produce the
    /// identical result. Behavioral features default to zero when `behavior`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::EmptyCart`] if `items` is empty (checked before
    ///   aggregation).
    /// - [`ClassifyError::MissingParameters`] if a scaler or centroid table
    ///   is empty.
    pub fn classify(
        &self,
        items: &[SampleItem],
        behavior: Option<&Behavior>,
    ) -> Result<Classification, ClassifyError> {
        if items.is_empty() {
            return Err(ClassifyError::EmptyCart);
        }
        if self.model.is_missing_parameters() {
            return Err(ClassifyError::MissingParameters);
        }

        let spend = CategorySpend::aggregate(items);
        let behavior = behavior.copied().unwrap_or_default();
        let features = FeatureRow::assemble(&spend, &behavior);

        let scaled = self.standardize(&features.to_vector());
        let (cluster, distance) = nearest_centroid(&scaled, &self.model.cluster_centers)
            .ok_or(ClassifyError::MissingParameters)?;

        Ok(Classification {
            cluster,
            distance,
            spend4: spend.total(),
            shares: features.shares,
            features,
            profile: self.model.profile(cluster).cloned(),
        })
    }

    /// Standardizes a feature vector: `(x - center) / scale` per dimension.
    fn standardize(&self, vector: &[f64]) -> Vec<f64> {
        vector
            .iter()
            .zip(&self.model.scaler_center)
            .zip(&self.model.scaler_scale)
            .map(|((value, center), scale)| (value - center) / scale)
            .collect()
    }
}

/// Finds the centroid closest to `scaled` by squared Euclidean distance.
///
/// Returns the centroid index and the (square-rooted) distance. Scan order
/// is stable, so on an exact tie the lowest index wins. Returns `None` for
/// an empty centroid list.
pub(crate) fn nearest_centroid(scaled: &[f64], centers: &[Vec<f64>]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, centroid) in centers.iter().enumerate() {
        let dist_sq: f64 = scaled
            .iter()
            .zip(centroid)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();

        match best {
            Some((_, best_sq)) if dist_sq >= best_sq => {}
            _ => best = Some((idx, dist_sq)),
        }
    }

    best.map(|(idx, dist_sq)| (idx, dist_sq.sqrt()))
}

/// Two-pass classification with the engagement boost heuristic.
///
/// Presentation-layer policy, deliberately kept outside
/// [`Classifier::classify`]: a first pass runs with all-zero behavioral
/// features; if the tracked spend exceeds [`BOOST_SPEND_THRESHOLD`] and the
/// wines share falls strictly inside [`BOOST_WINES_SHARE_RANGE`], a second
/// pass runs with a fixed "engaged" behavioral vector to bias toward the
/// high-value cluster. Callers that want the unbiased single-pass result use
/// [`Classifier::classify`] directly.
pub fn classify_with_boost(
    classifier: &Classifier,
    items: &[SampleItem],
) -> Result<Classification, ClassifyError> {
    let base = classifier.classify(items, Some(&Behavior::default()))?;

    let (share_low, share_high) = BOOST_WINES_SHARE_RANGE;
    let should_boost = base.spend4 > BOOST_SPEND_THRESHOLD
        && base.shares.wines > share_low
        && base.shares.wines < share_high;

    if !should_boost {
        return Ok(base);
    }

    let engaged = Behavior {
        web_purchases: 2.0,
        web_visits: 6.0,
        web_share: 0.7,
        deal_purchases: 2.0,
    };

    // The boosted pass cannot newly fail (same items, same model), but fall
    // back to the base result rather than surfacing an error here.
    Ok(classifier.classify(items, Some(&engaged)).unwrap_or(base))
}
