//! Configuration: the weight table, selection knobs, and file loading.
//!
//! A [`ScoreConfig`] captures everything a batch run needs beyond the
//! input table itself. It deserializes from `.toprank.yaml` (every field
//! optional, defaults applied) and is validated through [`Validatable`]
//! before use.

mod file;
mod types;
mod validation;

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError, CONFIG_FILE_NAME,
};
pub use types::ScoreConfig;
pub use validation::{ConfigError, Validatable};

/// Generate the JSON schema for the config file format.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(ScoreConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_generation() {
        let schema = generate_json_schema().expect("schema");
        assert!(schema.contains("ScoreConfig"));
        assert!(schema.contains("weights"));
        assert!(schema.contains("top_k"));
    }
}
