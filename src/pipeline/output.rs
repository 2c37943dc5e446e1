//! Output rendering and writing for ranked batches.

use std::path::PathBuf;

use tracing::info;

use crate::error::{Result, ScoreError};
use crate::scoring::RankedBatch;

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p),
            None => OutputTarget::Stdout,
        }
    }
}

/// Render a ranked batch as pretty-printed JSON.
pub fn render_ranked(batch: &RankedBatch) -> Result<String> {
    Ok(serde_json::to_string_pretty(batch)?)
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content).map_err(|e| ScoreError::io(path.clone(), e))?;
            info!(path = %path.display(), "ranked output written");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Scenario, ScoreReport};

    #[test]
    fn test_output_target_from_option() {
        assert!(matches!(OutputTarget::from_option(None), OutputTarget::Stdout));
        let path = PathBuf::from("/tmp/out.json");
        match OutputTarget::from_option(Some(path.clone())) {
            OutputTarget::File(p) => assert_eq!(p, path),
            OutputTarget::Stdout => panic!("expected File variant"),
        }
    }

    #[test]
    fn test_render_includes_report() {
        let batch = RankedBatch {
            report: ScoreReport {
                input_rows: 3,
                gated_rows: 1,
                duplicate_rows: 0,
                scenario: Scenario::Only30d,
                holiday_mode: false,
                days_to_holiday: 60,
                output_rows: 2,
            },
            rows: Vec::new(),
        };
        let json = render_ranked(&batch).expect("render");
        assert!(json.contains("\"scenario\""));
        assert!(json.contains("\"input_rows\": 3"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.json");
        write_output("{}", &OutputTarget::File(path.clone())).expect("write");
        assert_eq!(std::fs::read_to_string(path).expect("read"), "{}");
    }
}
