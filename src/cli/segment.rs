//! Customer segmentation command.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{
    format_currency, load_config, open_store, to_json_pretty, CliError, CliResult,
};
use crate::config::Config;
use crate::segmentation::{
    classify_with_boost, Behavior, Classification, Classifier, MetricValue,
};

/// Classify the current cart into a customer segment
#[derive(Debug, Clone, Args)]
pub struct SegmentArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable the engagement boost heuristic (single unbiased pass)
    #[arg(long)]
    pub no_boost: bool,

    /// Web purchase count behavioral feature
    #[arg(long, value_name = "N")]
    pub web_purchases: Option<f64>,

    /// Web visits per month behavioral feature
    #[arg(long, value_name = "N")]
    pub web_visits: Option<f64>,

    /// Web purchase share behavioral feature
    #[arg(long, value_name = "X")]
    pub web_share: Option<f64>,

    /// Deal purchase count behavioral feature
    #[arg(long, value_name = "N")]
    pub deal_purchases: Option<f64>,
}

#[derive(Debug, Serialize)]
struct SegmentError {
    error: String,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let store = open_store(&config)?;
        let sample = store.load().segmentation_sample();

        let classifier = Classifier::load()
            .map_err(|e| CliError::io(format!("Failed to load segmentation model: {e}")))?;

        // Explicit behavioral flags force a single unbiased pass; the boost
        // heuristic only applies to the default zero-behavior invocation.
        let result = if let Some(behavior) = self.explicit_behavior() {
            classifier.classify(&sample, Some(&behavior))
        } else if self.no_boost {
            classifier.classify(&sample, Some(&Behavior::default()))
        } else {
            classify_with_boost(&classifier, &sample)
        };

        match result {
            Ok(classification) => {
                if self.json {
                    println!("{}", to_json_pretty(&classification)?);
                } else {
                    print_classification(&classification, &config);
                }
                Ok(())
            }
            Err(e) => {
                if self.json {
                    println!(
                        "{}",
                        to_json_pretty(&SegmentError {
                            error: e.to_string(),
                        })?
                    );
                } else {
                    println!("Segment: {e}");
                }
                Err(CliError::validation(e.to_string()))
            }
        }
    }

    /// Behavioral features from CLI flags, if any were given.
    fn explicit_behavior(&self) -> Option<Behavior> {
        if self.web_purchases.is_none()
            && self.web_visits.is_none()
            && self.web_share.is_none()
            && self.deal_purchases.is_none()
        {
            return None;
        }

        Some(Behavior {
            web_purchases: self.web_purchases.unwrap_or(0.0),
            web_visits: self.web_visits.unwrap_or(0.0),
            web_share: self.web_share.unwrap_or(0.0),
            deal_purchases: self.deal_purchases.unwrap_or(0.0),
        })
    }
}

/// Renders a classification result with its cluster profile.
pub(crate) fn print_classification(result: &Classification, config: &Config) {
    let Some(profile) = &result.profile else {
        println!("Unknown Cluster: {}", result.cluster);
        println!("Distance: {:.3}", result.distance);
        return;
    };

    println!(
        "{} (cluster {}, {}% of customers)",
        profile.name, result.cluster, profile.size.percentage
    );
    println!("{}", profile.description);
    println!();

    println!("Characteristics:");
    for characteristic in &profile.characteristics {
        println!("  - {characteristic}");
    }

    println!("Metrics:");
    for metric in &profile.metrics {
        match &metric.value {
            MetricValue::Number(n) => println!("  {}: {:+.2}", metric.label, n),
            MetricValue::Text(t) => println!("  {}: {}", metric.label, t),
        }
    }

    println!("Strategy: {}", profile.strategy);
    println!();
    println!(
        "Distance: {:.3}  Tracked spend: {}  ({} customers)",
        result.distance,
        format_currency(result.spend4, &config.ui.currency),
        profile.size.count
    );
}
