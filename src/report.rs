//! Run report: the aggregate and anomaly results of one batch, ready to print.
//!
//! The aggregator and detector each run over the full reading set; neither
//! sees the other's output.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregator::aggregate_daily;
use crate::detector::detect_anomalies;
use crate::types::{Anomaly, AnomalyKind, DailyAverage, Reading, Thresholds};

/// Summary of one processing run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Input the readings came from (file path or other label)
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub thresholds: Thresholds,
    pub reading_count: usize,
    pub sensor_count: usize,
    pub daily_averages: Vec<DailyAverage>,
    pub anomalies: Vec<Anomaly>,
    /// Anomaly totals keyed by kind, in kind order
    pub anomaly_counts: BTreeMap<AnomalyKind, usize>,
}

impl RunReport {
    pub fn build(source: impl Into<String>, readings: &[Reading], thresholds: Thresholds) -> Self {
        let daily_averages = aggregate_daily(readings);
        let anomalies = detect_anomalies(readings, thresholds);

        let sensor_count = readings
            .iter()
            .map(|r| r.sensor_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let mut anomaly_counts = BTreeMap::new();
        for a in &anomalies {
            *anomaly_counts.entry(a.kind).or_insert(0) += 1;
        }

        Self {
            source: source.into(),
            generated_at: Utc::now(),
            thresholds,
            reading_count: readings.len(),
            sensor_count,
            daily_averages,
            anomalies,
            anomaly_counts,
        }
    }

    /// Count of anomalies of one kind.
    pub fn count_of(&self, kind: AnomalyKind) -> usize {
        self.anomaly_counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable report: header, daily averages table, anomaly list.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, out: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(out, "Pipeline sensor report")?;
        writeln!(out, "  source:     {}", self.source)?;
        writeln!(
            out,
            "  generated:  {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(out, "  thresholds: {}", self.thresholds)?;
        writeln!(
            out,
            "  readings:   {} from {} sensor(s)",
            self.reading_count, self.sensor_count
        )?;
        writeln!(out)?;

        writeln!(out, "Daily averages ({})", self.daily_averages.len())?;
        if self.daily_averages.is_empty() {
            writeln!(out, "  (none)")?;
        } else {
            writeln!(
                out,
                "  {:<12} {:<16} {:>6} {:>12} {:>10} {:>10}",
                "date", "sensor", "n", "pressure", "flow", "temp"
            )?;
            for avg in &self.daily_averages {
                writeln!(
                    out,
                    "  {:<12} {:<16} {:>6} {:>12.2} {:>10.2} {:>10.2}",
                    avg.date,
                    avg.sensor_id,
                    avg.reading_count,
                    avg.avg_pressure,
                    avg.avg_flow,
                    avg.avg_temp
                )?;
            }
        }
        writeln!(out)?;

        writeln!(out, "Anomalies ({})", self.anomalies.len())?;
        for (kind, count) in &self.anomaly_counts {
            writeln!(out, "  {kind}: {count}")?;
        }
        for a in &self.anomalies {
            writeln!(
                out,
                "  [{}] {} {}: {} > {}",
                a.kind, a.timestamp, a.sensor_id, a.value, a.threshold
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(sensor: &str, ts: &str, p: f64, t: f64) -> Reading {
        Reading {
            sensor_id: sensor.to_string(),
            timestamp: ts.to_string(),
            pressure_psi: p,
            flow_rate: 10.0,
            temperature_f: t,
        }
    }

    #[test]
    fn build_combines_aggregates_and_anomalies() {
        let readings = vec![
            reading("A", "2024-01-01 01:00:00", 1600.0, 210.0),
            reading("A", "2024-01-01 02:00:00", 1400.0, 190.0),
            reading("B", "2024-01-01 01:00:00", 1000.0, 250.0),
        ];
        let report = RunReport::build("test.csv", &readings, Thresholds::default());

        assert_eq!(report.reading_count, 3);
        assert_eq!(report.sensor_count, 2);
        assert_eq!(report.daily_averages.len(), 2);
        assert_eq!(report.anomalies.len(), 3);
        assert_eq!(report.count_of(AnomalyKind::HighPressure), 1);
        assert_eq!(report.count_of(AnomalyKind::HighTemperature), 2);
    }

    #[test]
    fn empty_run_renders_placeholders() {
        let report = RunReport::build("empty.csv", &[], Thresholds::default());
        let text = report.render_text();
        assert!(text.contains("readings:   0 from 0 sensor(s)"));
        assert!(text.contains("Daily averages (0)"));
        assert!(text.contains("(none)"));
        assert!(text.contains("Anomalies (0)"));
        assert_eq!(report.count_of(AnomalyKind::HighPressure), 0);
    }

    #[test]
    fn text_lists_each_anomaly() {
        let readings = vec![reading("PS-9", "2024-01-01 01:00:00", 1750.0, 20.0)];
        let text = RunReport::build("x.csv", &readings, Thresholds::default()).render_text();
        assert!(text.contains("HIGH_PRESSURE: 1"));
        assert!(text.contains("[HIGH_PRESSURE] 2024-01-01 01:00:00 PS-9: 1750 > 1500"));
    }

    #[test]
    fn json_uses_wire_field_names() {
        let readings = vec![reading("A", "2024-01-01 01:00:00", 1600.0, 20.0)];
        let report = RunReport::build("x.csv", &readings, Thresholds::default());
        let value: serde_json::Value =
            serde_json::from_str(&report.to_json().expect("json")).expect("parse back");

        assert_eq!(value["reading_count"], 1);
        assert_eq!(value["anomalies"][0]["type"], "HIGH_PRESSURE");
        assert_eq!(value["anomaly_counts"]["HIGH_PRESSURE"], 1);
        assert_eq!(value["thresholds"]["pressure_psi"], 1500.0);
        assert_eq!(value["daily_averages"][0]["avg_pressure"], 1600.0);
    }

    #[test]
    fn display_renders_same_text() {
        let readings = vec![reading("A", "2024-01-01 01:00:00", 1600.0, 20.0)];
        let report = RunReport::build("x.csv", &readings, Thresholds::default());
        let text = report.render_text();
        assert_eq!(format!("{report}"), text);
        assert!(text.starts_with("Pipeline sensor report\n"));
        assert!(text.ends_with("1600 > 1500\n"));
    }
}
