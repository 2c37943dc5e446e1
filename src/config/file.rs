//! Config file loading and discovery.
//!
//! Configuration lives in a `.toprank.yaml` file, discovered in the
//! working directory when no explicit path is given.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use super::types::ScoreConfig;
use super::validation::Validatable;

/// Default config file name searched for in the working directory.
pub const CONFIG_FILE_NAME: &str = ".toprank.yaml";

/// Errors from config file handling.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config file {path}: {errors}")]
    Invalid { path: PathBuf, errors: String },
}

/// Load and validate a config file.
pub fn load_config_file(path: &Path) -> Result<ScoreConfig, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ScoreConfig =
        serde_yaml::from_str(&content).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let errors = config.validate();
    if !errors.is_empty() {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ConfigFileError::Invalid {
            path: path.to_path_buf(),
            errors: joined,
        });
    }

    debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Discover a config file in the working directory.
#[must_use]
pub fn discover_config_file() -> Option<PathBuf> {
    let candidate = PathBuf::from(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Load the given path, or a discovered config file, or defaults.
///
/// Returns the config and the path it was loaded from (`None` when
/// defaults were used). An explicit path that fails to load is an error
/// for the caller; a broken *discovered* file only warns and falls back
/// to defaults.
pub fn load_or_default(
    explicit: Option<&Path>,
) -> Result<(ScoreConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit {
        let config = load_config_file(path)?;
        return Ok((config, Some(path.to_path_buf())));
    }
    if let Some(path) = discover_config_file() {
        match load_config_file(&path) {
            Ok(config) => return Ok((config, Some(path))),
            Err(err) => warn!(%err, "ignoring discovered config file"),
        }
    }
    Ok((ScoreConfig::default(), None))
}

/// Generate a commented example config file.
#[must_use]
pub fn generate_example_config() -> String {
    let defaults = serde_yaml::to_string(&ScoreConfig::default())
        .unwrap_or_else(|_| String::from("{}"));
    format!(
        "# toprank configuration\n\
         # Base weights must sum to 1.0; the resolver reallocates them\n\
         # per batch based on which volume columns are populated.\n\
         {defaults}"
    )
}
