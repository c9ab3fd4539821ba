//! Threshold anomaly detection
//!
//! Each reading is checked against both limits independently, so one reading
//! can raise zero, one, or two anomalies. Comparison is strict: a value equal
//! to its threshold is not an anomaly.

use crate::types::{Anomaly, AnomalyKind, Reading, Thresholds};

/// Flag every reading whose pressure or temperature exceeds `thresholds`.
///
/// Output follows input order; within a reading, `HIGH_PRESSURE` precedes
/// `HIGH_TEMPERATURE`.
pub fn detect_anomalies(readings: &[Reading], thresholds: Thresholds) -> Vec<Anomaly> {
    let anomalies: Vec<Anomaly> = readings
        .iter()
        .flat_map(|reading| check_reading(reading, thresholds))
        .collect();

    tracing::debug!(
        readings = readings.len(),
        anomalies = anomalies.len(),
        "Threshold check complete ({})",
        thresholds
    );
    anomalies
}

/// Anomalies for a single reading, pressure first.
pub fn check_reading(
    reading: &Reading,
    thresholds: Thresholds,
) -> impl Iterator<Item = Anomaly> + '_ {
    let checks = [
        (AnomalyKind::HighPressure, reading.pressure_psi, thresholds.pressure_psi),
        (AnomalyKind::HighTemperature, reading.temperature_f, thresholds.temperature_f),
    ];

    checks
        .into_iter()
        .filter(|&(_, value, limit)| value > limit)
        .map(move |(kind, value, threshold)| Anomaly {
            kind,
            sensor_id: reading.sensor_id.clone(),
            timestamp: reading.timestamp.clone(),
            value,
            threshold,
        })
}
