//! Threshold violation types

use serde::{Deserialize, Serialize};

/// Which safety threshold a reading exceeded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyKind {
    /// `pressure_psi` above the pressure threshold
    HighPressure,
    /// `temperature_f` above the temperature threshold
    HighTemperature,
}

impl AnomalyKind {
    /// Wire/display label, e.g. `HIGH_PRESSURE`.
    pub const fn as_str(self) -> &'static str {
        match self {
            AnomalyKind::HighPressure => "HIGH_PRESSURE",
            AnomalyKind::HighTemperature => "HIGH_TEMPERATURE",
        }
    }
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reading value that strictly exceeded its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub sensor_id: String,
    pub timestamp: String,
    /// The offending measurement
    pub value: f64,
    /// The limit it exceeded
    pub threshold: f64,
}
