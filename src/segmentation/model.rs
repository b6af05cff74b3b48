//! Segmentation model parameters and cluster profile metadata.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Number of feature dimensions the model operates on.
pub const FEATURE_DIMENSIONS: usize = 9;

/// Relative size of a cluster in the training population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSize {
    /// Share of the training population, in percent
    pub percentage: f64,
    /// Absolute customer count in the training population
    pub count: u64,
}

/// A profile metric value: standardized numbers for most metrics, free text
/// for qualitative ones ("Low", "High").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Standardized numeric metric
    Number(f64),
    /// Qualitative description
    Text(String),
}

/// One labelled metric in a cluster profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetric {
    /// Display label (e.g., "Wine share")
    pub label: String,
    /// Metric value
    pub value: MetricValue,
}

/// Display metadata for one cluster.
///
/// Purely descriptive: nothing in the classifier reads these fields, they
/// exist only so callers can present a classification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterProfile {
    /// Cluster index this profile describes
    pub id: usize,
    /// Segment name (e.g., "High-Value Web Enthusiast")
    pub name: String,
    /// One-paragraph segment description
    pub description: String,
    /// Share of the training population
    pub size: ClusterSize,
    /// Key standardized metrics for the segment
    pub metrics: Vec<ProfileMetric>,
    /// Bullet-point traits
    pub characteristics: Vec<String>,
    /// Recommended marketing strategy
    pub strategy: String,
}

/// Pre-trained segmentation model: scaler parameters, cluster centroids, and
/// profile metadata.
///
/// The model is embedded in the binary at compile time and is immutable for
/// the process lifetime. Fields are public so tests can build reduced or
/// deliberately broken models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationModel {
    /// Schema version of the embedded file
    pub version: String,
    /// Feature names in vector order
    pub features: Vec<String>,
    /// Per-dimension centers for standardization
    pub scaler_center: Vec<f64>,
    /// Per-dimension scales for standardization
    pub scaler_scale: Vec<f64>,
    /// Cluster centroids in standardized space
    pub cluster_centers: Vec<Vec<f64>>,
    /// Display metadata per cluster
    pub profiles: Vec<ClusterProfile>,
}

impl SegmentationModel {
    /// Loads the model from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("model.json");
        let model: Self =
            serde_json::from_str(json_data).context("Failed to parse embedded model.json")?;

        model.validate()?;
        Ok(model)
    }

    /// Validates dimensional consistency of the parameter tables.
    ///
    /// Malformed tables are a build defect in the embedded file, so this
    /// runs once at load rather than per classification.
    pub fn validate(&self) -> Result<()> {
        if self.features.len() != FEATURE_DIMENSIONS {
            anyhow::bail!(
                "Model declares {} features, expected {FEATURE_DIMENSIONS}",
                self.features.len()
            );
        }
        if self.scaler_center.len() != FEATURE_DIMENSIONS {
            anyhow::bail!(
                "Scaler center has {} dimensions, expected {FEATURE_DIMENSIONS}",
                self.scaler_center.len()
            );
        }
        if self.scaler_scale.len() != FEATURE_DIMENSIONS {
            anyhow::bail!(
                "Scaler scale has {} dimensions, expected {FEATURE_DIMENSIONS}",
                self.scaler_scale.len()
            );
        }
        if let Some(scale) = self.scaler_scale.iter().find(|s| **s == 0.0) {
            anyhow::bail!("Scaler scale contains a zero entry ({scale})");
        }
        for (idx, center) in self.cluster_centers.iter().enumerate() {
            if center.len() != FEATURE_DIMENSIONS {
                anyhow::bail!(
                    "Cluster centroid {idx} has {} dimensions, expected {FEATURE_DIMENSIONS}",
                    center.len()
                );
            }
        }

        Ok(())
    }

    /// Looks up the display profile for a cluster index.
    ///
    /// Returns `None` for an index with no metadata; callers render that as
    /// a distinct "unknown cluster" state rather than failing.
    pub fn profile(&self, cluster: usize) -> Option<&ClusterProfile> {
        self.profiles.iter().find(|p| p.id == cluster)
    }

    /// Whether any of the parameter tables required for classification is
    /// empty.
    pub fn is_missing_parameters(&self) -> bool {
        self.scaler_center.is_empty()
            || self.scaler_scale.is_empty()
            || self.cluster_centers.is_empty()
    }
}
