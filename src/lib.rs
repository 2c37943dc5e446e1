//! **A scoring and selection engine for e-commerce product tables.**
//!
//! `toprank` takes a raw product table, typically exported from a
//! third-party analytics platform with inconsistent column captions and
//! human-formatted numbers, and produces a ranked top-K shortlist of
//! products worth sourcing.
//!
//! The engine scores each product across several dimensions (sales and
//! GMV volume, commission rate, influencer adoption, chart rank, growth
//! trend, channel mix, conversion rate) and combines them with a weight
//! vector that adapts to the batch at hand:
//!
//! - **Availability scenarios**: when the 7-day or 30-day sales/GMV
//!   column pair is missing, its weight mass is reallocated onto the
//!   populated pair instead of silently scoring zeros.
//! - **Calendar adjustment**: batches dated shortly before a major
//!   shopping holiday shift weight toward recent sales momentum.
//! - **Quality gate**: products below a hard conversion-rate floor are
//!   removed outright rather than merely ranked low.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the canonical field set, the column-oriented
//!   [`RawTable`] input, and the [`ProductRecord`] every table
//!   normalizes into.
//! - **[`normalize`]**: caption resolution (Chinese and English aliases
//!   plus a fuzzy fallback) and lenient numeric parsing (`3.2w`,
//!   `15%`, `1,234`).
//! - **[`scoring`]**: the dimension scorers, weight resolution, the
//!   conversion gate, and deduplicated top-K selection.
//! - **[`pipeline`]**: one-call orchestration from raw table to
//!   [`RankedBatch`].
//! - **[`config`]**: the weight table and selection knobs, loadable
//!   from `.toprank.yaml`.
//!
//! ## Getting Started
//!
//! ```no_run
//! use toprank::{run_batch, table_from_json_str, ScoreConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let input = std::fs::read_to_string("batch.json")?;
//!     let table = table_from_json_str(&input)?;
//!     let date = chrono::NaiveDate::from_ymd_opt(2025, 9, 20).unwrap();
//!
//!     let ranked = run_batch(&table, date, &ScoreConfig::default())?;
//!     println!(
//!         "scenario {}, {} of {} rows kept",
//!         ranked.report.scenario, ranked.report.output_rows, ranked.report.input_rows
//!     );
//!     for row in &ranked.rows {
//!         println!("{:.4}  {}", row.total_score, row.record.product_url);
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Cast safety: usize↔f64 casts are pervasive in the percentile and
    // normalization math; all values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `min`/`mid` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod scoring;

// Re-export main types for convenience
pub use config::{ConfigError, ScoreConfig, Validatable};
pub use error::{Result, ScoreError};
pub use model::{Field, ProductRecord, RawCell, RawTable, ScoredRecord};
pub use normalize::{normalize_table, ColumnPresence, NormalizedBatch};
pub use pipeline::{run_batch, table_from_json_str};
pub use scoring::{RankedBatch, Scenario, ScoreReport, WeightVector};
