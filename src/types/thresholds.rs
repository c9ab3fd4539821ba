//! Safety thresholds for anomaly detection

use serde::{Deserialize, Serialize};

use crate::config::defaults::{DEFAULT_PRESSURE_THRESHOLD_PSI, DEFAULT_TEMPERATURE_THRESHOLD_F};

/// Limits a reading must strictly exceed to be flagged.
///
/// Passed explicitly to the detector; there is no global threshold state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Pressure limit (psi)
    pub pressure_psi: f64,
    /// Temperature limit (°F)
    pub temperature_f: f64,
}

impl Thresholds {
    pub const fn new(pressure_psi: f64, temperature_f: f64) -> Self {
        Self {
            pressure_psi,
            temperature_f,
        }
    }

    /// Replace whichever limits are `Some`, keeping the rest.
    #[must_use]
    pub fn with_overrides(self, pressure_psi: Option<f64>, temperature_f: Option<f64>) -> Self {
        Self {
            pressure_psi: pressure_psi.unwrap_or(self.pressure_psi),
            temperature_f: temperature_f.unwrap_or(self.temperature_f),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(DEFAULT_PRESSURE_THRESHOLD_PSI, DEFAULT_TEMPERATURE_THRESHOLD_F)
    }
}

impl std::fmt::Display for Thresholds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pressure > {} psi, temperature > {} °F",
            self.pressure_psi, self.temperature_f
        )
    }
}
