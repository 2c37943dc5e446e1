//! Configuration types for toprank.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scoring::WeightVector;

/// Scoring configuration for a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreConfig {
    /// Base weight table; must sum to 1.0 with no negative entries
    pub weights: WeightVector,
    /// Size of the final ranked output
    pub top_k: usize,
    /// Hard conversion-rate floor; rows below it are removed
    pub conversion_floor: f64,
    /// Percentile bound for volume tail clipping
    pub clip_percentile: f64,
    /// Holiday lead time activating the calendar weight adjustment
    pub holiday_lead_days: i64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            weights: WeightVector::default(),
            top_k: 50,
            conversion_floor: 0.02,
            clip_percentile: 99.0,
            holiday_lead_days: 45,
        }
    }
}

impl ScoreConfig {
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: WeightVector) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_conversion_floor(mut self, floor: f64) -> Self {
        self.conversion_floor = floor;
        self
    }
}
