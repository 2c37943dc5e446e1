//! Pipeline orchestration for batch scoring.
//!
//! This module wires normalize → resolve weights → aggregate → select
//! into a single entry point shared by the CLI and library callers.

mod input;
mod output;

pub use input::{read_input, table_from_json_str};
pub use output::{render_ranked, write_output, OutputTarget};

use chrono::NaiveDate;
use tracing::info;

use crate::config::ScoreConfig;
use crate::error::Result;
use crate::model::RawTable;
use crate::normalize::normalize_table;
use crate::scoring::{aggregate, resolve, select_top_k, RankedBatch, ScoreReport};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - ranked output produced
    pub const SUCCESS: i32 = 0;
    /// The batch was rejected (unusable shape or volume coverage)
    pub const REJECTED: i32 = 1;
    /// Configuration was invalid
    pub const CONFIG: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Score one batch end to end.
///
/// Runs the full pipeline on a raw table and returns the ranked top-K
/// rows with the run report. Rejections (missing identity column, no
/// usable volume pair) come back as errors carrying the reason; they
/// never produce partial output.
pub fn run_batch(
    table: &RawTable,
    batch_date: NaiveDate,
    config: &ScoreConfig,
) -> Result<RankedBatch> {
    let input_rows = table.rows();
    let normalized = normalize_table(table)?;
    let resolved = resolve(
        &config.weights,
        &normalized.presence,
        batch_date,
        config.holiday_lead_days,
    )?;

    let outcome = aggregate(
        normalized.records,
        &normalized.presence,
        &resolved.weights,
        config,
    );
    let selection = select_top_k(outcome.scored, config.top_k);

    let report = ScoreReport {
        input_rows,
        gated_rows: outcome.gated_rows,
        duplicate_rows: selection.duplicate_rows,
        scenario: resolved.scenario,
        holiday_mode: resolved.holiday_mode,
        days_to_holiday: resolved.days_to_holiday,
        output_rows: selection.rows.len(),
    };
    info!(
        input_rows = report.input_rows,
        gated_rows = report.gated_rows,
        duplicate_rows = report.duplicate_rows,
        scenario = %report.scenario,
        holiday_mode = report.holiday_mode,
        output_rows = report.output_rows,
        "batch scored"
    );

    Ok(RankedBatch {
        report,
        rows: selection.rows,
    })
}
