//! The scoring engine.
//!
//! Eight dimension scorers feed a weighted aggregation whose weight
//! vector is resolved per batch from column availability and the batch
//! date; a hard conversion-rate gate removes unsellable rows before the
//! deduplicated top-K selection.

pub mod aggregate;
pub mod calendar;
pub mod dimensions;
pub mod select;
pub mod weights;

use serde::{Deserialize, Serialize};

pub use aggregate::{aggregate, AggregateOutcome};
pub use calendar::{days_to_next_holiday, parse_batch_date, HOLIDAYS};
pub use dimensions::Dimension;
pub use select::{select_top_k, Selection};
pub use weights::{resolve, ResolvedWeights, Scenario, WeightVector};

use crate::model::ScoredRecord;

/// Per-batch run summary, produced alongside the ranked table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Rows in the input table
    pub input_rows: usize,
    /// Rows removed by the conversion-rate gate
    pub gated_rows: usize,
    /// Duplicate rows collapsed by `product_url`
    pub duplicate_rows: usize,
    /// Data-availability scenario used for weighting
    pub scenario: Scenario,
    /// Whether the calendar adjustment was applied
    pub holiday_mode: bool,
    /// Day distance to the next calendar holiday
    pub days_to_holiday: i64,
    /// Rows in the final ranked output
    pub output_rows: usize,
}

/// The result of scoring one batch: ranked top-K rows plus the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedBatch {
    pub report: ScoreReport,
    pub rows: Vec<ScoredRecord>,
}
