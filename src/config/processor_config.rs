//! Processor Configuration - detection thresholds as operator-tunable TOML values
//!
//! Each struct implements `Default` with the documented threshold values,
//! so a missing file or a partial file behaves exactly like the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults::{
    CONFIG_ENV_VAR, DEFAULT_PRESSURE_THRESHOLD_PSI, DEFAULT_TEMPERATURE_THRESHOLD_F,
    LOCAL_CONFIG_FILE,
};
use crate::types::Thresholds;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a processor run.
///
/// Load with `ProcessorConfig::load()` which searches:
/// 1. `$PIPELINE_PROCESSOR_CONFIG`
/// 2. `./processor_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Anomaly detection limits
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

impl ProcessorConfig {
    /// Load configuration using the standard search order.
    ///
    /// Never fails: a broken file logs a warning and the search continues.
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(
                            path = %p.display(),
                            "Loaded processor config from {}",
                            CONFIG_ENV_VAR
                        );
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load config from {}, falling back",
                            CONFIG_ENV_VAR
                        );
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./processor_config.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded processor config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the effective config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate every threshold; all problems are reported together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let mut errors: Vec<String> = Vec::new();

        Self::check_limit(t.pressure_psi, "thresholds.pressure_psi", &mut errors);
        Self::check_limit(t.temperature_f, "thresholds.temperature_f", &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_limit(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass, so test finiteness first
        if !value.is_finite() {
            errors.push(format!("{name}: value must be finite (got {value})"));
        } else if value < 0.0 {
            errors.push(format!("{name} = {value} cannot be negative"));
        }
    }

    /// Apply per-run threshold overrides on top of this config.
    ///
    /// `Some` values win over the file or default value; the result is
    /// validated, so a negative or non-finite override is rejected.
    pub fn with_overrides(
        self,
        pressure_psi: Option<f64>,
        temperature_f: Option<f64>,
    ) -> Result<Self, ConfigError> {
        let t = self
            .detection_thresholds()
            .with_overrides(pressure_psi, temperature_f);
        let config = Self {
            thresholds: ThresholdConfig {
                pressure_psi: t.pressure_psi,
                temperature_f: t.temperature_f,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// The detector thresholds this config describes.
    pub const fn detection_thresholds(&self) -> Thresholds {
        Thresholds::new(self.thresholds.pressure_psi, self.thresholds.temperature_f)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Threshold Config
// ============================================================================

/// `[thresholds]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Pressure readings strictly above this raise `HIGH_PRESSURE` (psi).
    #[serde(default = "default_pressure_psi")]
    pub pressure_psi: f64,

    /// Temperature readings strictly above this raise `HIGH_TEMPERATURE` (°F).
    #[serde(default = "default_temperature_f")]
    pub temperature_f: f64,
}

fn default_pressure_psi() -> f64 { DEFAULT_PRESSURE_THRESHOLD_PSI }
fn default_temperature_f() -> f64 { DEFAULT_TEMPERATURE_THRESHOLD_F }

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            pressure_psi: default_pressure_psi(),
            temperature_f: default_temperature_f(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ProcessorConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, ProcessorConfig::default());
        assert_eq!(config.detection_thresholds(), Thresholds::default());
    }

    #[test]
    fn partial_thresholds_keep_remaining_defaults() {
        let config = ProcessorConfig::from_toml_str("[thresholds]\npressure_psi = 1200.0\n")
            .expect("partial config is valid");
        assert_eq!(config.thresholds.pressure_psi, 1200.0);
        assert_eq!(config.thresholds.temperature_f, 200.0);
    }

    #[test]
    fn negative_and_non_finite_limits_are_rejected_together() {
        let config = ProcessorConfig {
            thresholds: ThresholdConfig {
                pressure_psi: -1.0,
                temperature_f: f64::NAN,
            },
        };
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("pressure_psi"));
                assert!(errors[1].contains("finite"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_value_type_is_a_parse_error() {
        let err = ProcessorConfig::from_toml_str("[thresholds]\npressure_psi = \"high\"\n")
            .expect_err("string threshold must not parse");
        assert!(matches!(err, ConfigError::Parse(..)));
    }

    #[test]
    fn toml_round_trip_preserves_thresholds() {
        let config = ProcessorConfig {
            thresholds: ThresholdConfig {
                pressure_psi: 1425.5,
                temperature_f: 180.0,
            },
        };
        let text = config.to_toml().expect("serialize");
        let back = ProcessorConfig::from_toml_str(&text).expect("reparse");
        assert_eq!(back, config);
    }
}
