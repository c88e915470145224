//! Ingestion configuration
//!
//! Settings are stored as JSON. Every field has a default, so a partial file
//! (or none at all) reproduces the standard behavior.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::telemetry::IntervalStats;
use crate::unit_conversion::DEFAULT_COORDINATE_DIVISOR;

/// Standard deviation of sample gaps (seconds) above which a series is
/// considered non-uniform
pub const DEFAULT_UNIFORMITY_THRESHOLD_S: f64 = 0.1;

/// Errors loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for '{field}': {message}")]
    Invalid { field: String, message: String },
}

/// When to project the series onto the 1 Hz grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleMode {
    /// Resample only when sample gaps are irregular
    #[default]
    Auto,
    /// Always resample
    Always,
    /// Never resample
    Never,
}

/// Ingestion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Fixed-point scale of latitude/longitude columns
    pub coordinate_divisor: f64,

    /// Gap standard deviation (s) above which resampling kicks in
    pub uniformity_threshold_s: f64,

    /// Resampling policy
    pub resample: ResampleMode,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            coordinate_divisor: DEFAULT_COORDINATE_DIVISOR,
            uniformity_threshold_s: DEFAULT_UNIFORMITY_THRESHOLD_S,
            resample: ResampleMode::Auto,
        }
    }
}

impl IngestConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: IngestConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Save as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check that numeric settings are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.coordinate_divisor.is_finite() || self.coordinate_divisor <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "coordinate_divisor".into(),
                message: format!("must be positive, got {}", self.coordinate_divisor),
            });
        }
        if !self.uniformity_threshold_s.is_finite() || self.uniformity_threshold_s < 0.0 {
            return Err(ConfigError::Invalid {
                field: "uniformity_threshold_s".into(),
                message: format!("must be non-negative, got {}", self.uniformity_threshold_s),
            });
        }
        Ok(())
    }

    /// Decide whether a series with these gap statistics gets resampled
    pub fn should_resample(&self, intervals: &IntervalStats) -> bool {
        match self.resample {
            ResampleMode::Auto => intervals.is_irregular(self.uniformity_threshold_s),
            ResampleMode::Always => true,
            ResampleMode::Never => false,
        }
    }
}
