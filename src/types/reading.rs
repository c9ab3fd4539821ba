//! Sensor reading and daily aggregate types

use serde::{Deserialize, Serialize};

/// One timestamped sensor observation, produced per CSV data row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Opaque sensor identifier
    pub sensor_id: String,
    /// Lexical timestamp, `YYYY-MM-DD HH:MM:SS`. Never parsed.
    pub timestamp: String,
    /// Line pressure (psi)
    pub pressure_psi: f64,
    /// Flow rate
    pub flow_rate: f64,
    /// Temperature (°F)
    pub temperature_f: f64,
}

impl Reading {
    /// Date portion of the timestamp: everything before the first space.
    ///
    /// A timestamp with no space is returned whole.
    pub fn date(&self) -> &str {
        self.timestamp
            .split_once(' ')
            .map_or(self.timestamp.as_str(), |(date, _)| date)
    }
}

/// Means over every reading sharing a (date, sensor_id) key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAverage {
    pub date: String,
    pub sensor_id: String,
    pub avg_pressure: f64,
    pub avg_flow: f64,
    pub avg_temp: f64,
    /// Number of readings in the group (always >= 1)
    pub reading_count: usize,
}
