//! Daily per-sensor aggregation

use std::collections::HashMap;

use crate::types::{DailyAverage, Reading};

/// Running totals for one (date, sensor_id) group.
#[derive(Debug, Clone)]
struct DailyTotals {
    date: String,
    sensor_id: String,
    pressure_sum: f64,
    flow_sum: f64,
    temp_sum: f64,
    count: usize,
}

impl DailyTotals {
    fn new(date: &str, sensor_id: &str) -> Self {
        Self {
            date: date.to_string(),
            sensor_id: sensor_id.to_string(),
            pressure_sum: 0.0,
            flow_sum: 0.0,
            temp_sum: 0.0,
            count: 0,
        }
    }

    fn add(&mut self, reading: &Reading) {
        self.pressure_sum += reading.pressure_psi;
        self.flow_sum += reading.flow_rate;
        self.temp_sum += reading.temperature_f;
        self.count += 1;
    }

    fn into_average(self) -> DailyAverage {
        // count >= 1: a group only exists once a reading was added
        let n = self.count as f64;
        DailyAverage {
            avg_pressure: self.pressure_sum / n,
            avg_flow: self.flow_sum / n,
            avg_temp: self.temp_sum / n,
            reading_count: self.count,
            date: self.date,
            sensor_id: self.sensor_id,
        }
    }
}

/// Average pressure, flow and temperature per (date, sensor_id).
///
/// `date` is the timestamp text before the first space (see
/// [`Reading::date`]). Groups come out in first-seen order; callers should
/// not rely on that.
pub fn aggregate_daily(readings: &[Reading]) -> Vec<DailyAverage> {
    let mut groups: Vec<DailyTotals> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for reading in readings {
        let key = (reading.date(), reading.sensor_id.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(DailyTotals::new(key.0, key.1));
            groups.len() - 1
        });
        groups[slot].add(reading);
    }

    tracing::debug!(readings = readings.len(), groups = groups.len(), "Aggregated daily averages");
    groups.into_iter().map(DailyTotals::into_average).collect()
}
