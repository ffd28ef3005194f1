//! API configuration

use serde::Deserialize;

use core_kernel::CoreError;
use domain_scoring::RiskPolicy;
use domain_training::{HoldoutConfig, TrainingConfig};

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Decision boundary for the fraud label
    pub decision_threshold: f64,
    /// Laplace smoothing constant for retraining
    pub smoothing: f64,
    /// Bucket count for numeric features
    pub numeric_bins: usize,
    /// Every nth corpus record is held out during retraining (0 disables)
    pub holdout_every_nth: usize,
    /// Holdout accuracy below this floor raises a degradation warning
    pub holdout_accuracy_floor: f64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/fraudscore".to_string(),
            log_level: "info".to_string(),
            decision_threshold: 0.5,
            smoothing: 1.0,
            numeric_bins: 4,
            holdout_every_nth: 5,
            holdout_accuracy_floor: 0.7,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The risk policy derived from this configuration
    pub fn risk_policy(&self) -> Result<RiskPolicy, CoreError> {
        RiskPolicy::new(self.decision_threshold)
    }

    /// The retraining configuration derived from this configuration
    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            smoothing: self.smoothing,
            numeric_bins: self.numeric_bins,
            holdout: HoldoutConfig {
                every_nth: self.holdout_every_nth,
                accuracy_floor: self.holdout_accuracy_floor,
            },
        }
    }
}
