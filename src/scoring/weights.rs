//! Weight resolution: scenario selection, reallocation, and the
//! calendar adjustment.
//!
//! The resolver turns a base weight table plus per-batch column presence
//! and a representative date into the active weight vector. Resolved
//! vectors always sum to 1.0 within 1e-9 and carry no negative entries.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::calendar::days_to_next_holiday;
use super::dimensions::Dimension;
use crate::error::{Result, ScoreError};
use crate::normalize::ColumnPresence;

/// Sum tolerance for resolved weight vectors.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Absolute boost added to the 7-day sales weight in holiday mode.
const HOLIDAY_BOOST: f64 = 0.02;

/// One non-negative weight per scored dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct WeightVector {
    pub sales_30d: f64,
    pub gmv_30d: f64,
    pub sales_7d: f64,
    pub gmv_7d: f64,
    pub commission: f64,
    pub influencer: f64,
    pub rank: f64,
    pub growth: f64,
    pub channel: f64,
    pub conversion: f64,
}

impl Default for WeightVector {
    /// Base weight table. Sums to exactly 1.0.
    fn default() -> Self {
        Self {
            sales_30d: 0.12,
            gmv_30d: 0.08,
            sales_7d: 0.08,
            gmv_7d: 0.07,
            commission: 0.15,
            influencer: 0.10,
            rank: 0.12,
            growth: 0.08,
            channel: 0.10,
            conversion: 0.10,
        }
    }
}

impl WeightVector {
    /// Weights as an array in [`Dimension::ALL`] order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 10] {
        [
            self.sales_30d,
            self.gmv_30d,
            self.sales_7d,
            self.gmv_7d,
            self.commission,
            self.influencer,
            self.rank,
            self.growth,
            self.channel,
            self.conversion,
        ]
    }

    /// Weight for a single dimension.
    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Sales30d => self.sales_30d,
            Dimension::Gmv30d => self.gmv_30d,
            Dimension::Sales7d => self.sales_7d,
            Dimension::Gmv7d => self.gmv_7d,
            Dimension::Commission => self.commission,
            Dimension::Influencer => self.influencer,
            Dimension::Rank => self.rank,
            Dimension::Growth => self.growth,
            Dimension::Channel => self.channel,
            Dimension::Conversion => self.conversion,
        }
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// A valid weight table sums to 1.0 (within `tolerance`) with no
    /// negative entries.
    #[must_use]
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.sum() - 1.0).abs() <= tolerance && self.as_array().iter().all(|w| *w >= 0.0)
    }
}

/// Data-availability scenario for a batch.
///
/// Computed once from column presence and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Both the 7-day and 30-day sales+GMV pairs are populated.
    Full,
    /// Only the 30-day pair is populated.
    Only30d,
    /// Only the 7-day pair is populated.
    Only7d,
    /// Neither pair is usable; the batch cannot be scored.
    NoVolume,
}

impl Scenario {
    /// Derive the scenario from per-batch column presence.
    #[must_use]
    pub fn detect(presence: &ColumnPresence) -> Self {
        match (presence.has_7d_pair(), presence.has_30d_pair()) {
            (true, true) => Self::Full,
            (false, true) => Self::Only30d,
            (true, false) => Self::Only7d,
            (false, false) => Self::NoVolume,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Only30d => "only_30d",
            Self::Only7d => "only_7d",
            Self::NoVolume => "no_volume",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The active weight vector for a batch, plus how it was derived.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWeights {
    pub weights: WeightVector,
    pub scenario: Scenario,
    pub holiday_mode: bool,
    pub days_to_holiday: i64,
}

/// Resolve the active weight vector for a batch.
///
/// Scenario selection reallocates the mass of absent volume dimensions
/// onto their populated counterparts; the holiday adjustment then boosts
/// the 7-day sales weight when the batch date falls within
/// `holiday_lead_days` of a calendar holiday, rescaling the rest so the
/// vector still sums to 1.0. A `NoVolume` batch is rejected here rather
/// than scored with zero weight on an entire metric family.
pub fn resolve(
    base: &WeightVector,
    presence: &ColumnPresence,
    batch_date: NaiveDate,
    holiday_lead_days: i64,
) -> Result<ResolvedWeights> {
    let scenario = Scenario::detect(presence);
    debug!(%scenario, "weight scenario selected");

    let mut weights = *base;
    match scenario {
        Scenario::Full => {}
        Scenario::Only30d => {
            transfer_pair(
                &mut weights.sales_30d,
                &mut weights.gmv_30d,
                &mut weights.sales_7d,
                &mut weights.gmv_7d,
            );
        }
        Scenario::Only7d => {
            transfer_pair(
                &mut weights.sales_7d,
                &mut weights.gmv_7d,
                &mut weights.sales_30d,
                &mut weights.gmv_30d,
            );
        }
        Scenario::NoVolume => {
            return Err(ScoreError::coverage(
                "no usable sales/GMV column pair; batch cannot be scored",
                presence.has_7d_pair(),
                presence.has_30d_pair(),
            ));
        }
    }

    let days_to_holiday = days_to_next_holiday(batch_date);
    let holiday_mode = days_to_holiday <= holiday_lead_days && weights.sales_7d > 0.0;
    if holiday_mode {
        apply_holiday_boost(&mut weights);
        info!(days_to_holiday, "holiday mode: 7-day sales weight boosted");
    }

    debug_assert!(weights.is_normalized(WEIGHT_SUM_TOLERANCE));
    Ok(ResolvedWeights {
        weights,
        scenario,
        holiday_mode,
        days_to_holiday,
    })
}

/// Move the full weight mass of the absent sales/GMV pair onto the kept
/// pair, split in proportion to the kept pair's base weights.
fn transfer_pair(
    keep_sales: &mut f64,
    keep_gmv: &mut f64,
    drop_sales: &mut f64,
    drop_gmv: &mut f64,
) {
    let pool = *drop_sales + *drop_gmv;
    let kept = *keep_sales + *keep_gmv;
    if kept > 0.0 {
        *keep_sales += pool * (*keep_sales / kept);
        *keep_gmv += pool * (*keep_gmv / kept);
    } else {
        *keep_sales += pool / 2.0;
        *keep_gmv += pool / 2.0;
    }
    *drop_sales = 0.0;
    *drop_gmv = 0.0;
}

/// Add the absolute holiday boost to the 7-day sales weight, then rescale
/// every other weight by `(1 - new_sales_7d) / (sum of others before)`.
/// The boosted weight is clamped at 1.0 so the rescale factor stays
/// non-negative when nearly all base mass already sits on 7-day sales.
fn apply_holiday_boost(weights: &mut WeightVector) {
    let boosted = (weights.sales_7d + HOLIDAY_BOOST).min(1.0);
    let others = weights.sum() - weights.sales_7d;
    if others <= 0.0 {
        weights.sales_7d = 1.0;
        return;
    }
    let scale = (1.0 - boosted) / others;
    weights.sales_30d *= scale;
    weights.gmv_30d *= scale;
    weights.gmv_7d *= scale;
    weights.commission *= scale;
    weights.influencer *= scale;
    weights.rank *= scale;
    weights.growth *= scale;
    weights.channel *= scale;
    weights.conversion *= scale;
    weights.sales_7d = boosted;
}
