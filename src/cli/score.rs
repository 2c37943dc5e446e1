//! Score command handler.
//!
//! Implements the `score` subcommand: load a batch table, run the
//! scoring pipeline, and write the ranked output.

use std::path::PathBuf;

use crate::config::ScoreConfig;
use crate::error::Result;
use crate::pipeline::{
    exit_codes, read_input, render_ranked, run_batch, table_from_json_str, write_output,
    OutputTarget,
};
use crate::scoring::parse_batch_date;

/// Score command configuration
pub struct ScoreCommandConfig {
    /// Batch input file (`-` for stdin)
    pub input: PathBuf,
    /// Batch date or date range; today when not given
    pub batch_date: Option<String>,
    /// Output file (stdout if not specified)
    pub output_file: Option<PathBuf>,
    /// Effective scoring configuration
    pub config: ScoreConfig,
}

/// Run the score command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_score(cmd: ScoreCommandConfig) -> Result<i32> {
    let batch_date = match cmd.batch_date.as_deref() {
        Some(raw) => parse_batch_date(raw)?,
        None => chrono::Local::now().date_naive(),
    };
    tracing::info!(input = %cmd.input.display(), %batch_date, "scoring batch");

    let content = read_input(&cmd.input)?;
    let table = table_from_json_str(&content)?;
    let ranked = run_batch(&table, batch_date, &cmd.config)?;

    let rendered = render_ranked(&ranked)?;
    write_output(&rendered, &OutputTarget::from_option(cmd.output_file))?;
    Ok(exit_codes::SUCCESS)
}
