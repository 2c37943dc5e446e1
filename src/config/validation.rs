//! Configuration validation.

use super::types::ScoreConfig;
use crate::scoring::WeightVector;

/// Sum tolerance accepted for user-supplied base weight tables.
const BASE_WEIGHT_TOLERANCE: f64 = 1e-6;

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for ScoreConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.weights.validate();

        if self.top_k == 0 {
            errors.push(ConfigError {
                field: "top_k".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if !(0.0..1.0).contains(&self.conversion_floor) {
            errors.push(ConfigError {
                field: "conversion_floor".to_string(),
                message: format!(
                    "must be in [0.0, 1.0), got {}",
                    self.conversion_floor
                ),
            });
        }

        if !(0.0..=100.0).contains(&self.clip_percentile) || self.clip_percentile == 0.0 {
            errors.push(ConfigError {
                field: "clip_percentile".to_string(),
                message: format!("must be in (0.0, 100.0], got {}", self.clip_percentile),
            });
        }

        if self.holiday_lead_days < 0 {
            errors.push(ConfigError {
                field: "holiday_lead_days".to_string(),
                message: format!("must be non-negative, got {}", self.holiday_lead_days),
            });
        }

        errors
    }
}

impl Validatable for WeightVector {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.as_array().iter().any(|w| *w < 0.0) {
            errors.push(ConfigError {
                field: "weights".to_string(),
                message: "weights must be non-negative".to_string(),
            });
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > BASE_WEIGHT_TOLERANCE {
            errors.push(ConfigError {
                field: "weights".to_string(),
                message: format!("weights must sum to 1.0, got {sum:.6}"),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(ScoreConfig::default().is_valid());
    }

    #[test]
    fn test_zero_top_k_invalid() {
        let config = ScoreConfig::default().with_top_k(0);
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "top_k");
    }

    #[test]
    fn test_bad_weight_sum_invalid() {
        let mut weights = WeightVector::default();
        weights.commission += 0.05;
        let config = ScoreConfig::default().with_weights(weights);
        assert!(!config.is_valid());
    }

    #[test]
    fn test_negative_weight_invalid() {
        let mut weights = WeightVector::default();
        weights.rank = -0.12;
        weights.commission += 0.24;
        let errors = weights.validate();
        assert!(errors.iter().any(|e| e.message.contains("non-negative")));
    }

    #[test]
    fn test_conversion_floor_range() {
        let config = ScoreConfig::default().with_conversion_floor(1.0);
        assert!(!config.is_valid());
        let config = ScoreConfig::default().with_conversion_floor(0.0);
        assert!(config.is_valid());
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError {
            field: "top_k".to_string(),
            message: "must be at least 1".to_string(),
        };
        assert_eq!(error.to_string(), "top_k: must be at least 1");
    }
}
