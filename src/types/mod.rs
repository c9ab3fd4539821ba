//! Shared data structures for the sensor batch pipeline
//!
//! - `Reading`: one row of the input CSV (Loader output)
//! - `DailyAverage`: per (date, sensor) means (Aggregator output)
//! - `Anomaly` / `AnomalyKind`: threshold violations (Detector output)
//! - `Thresholds`: the two safety limits the Detector compares against

mod reading;
mod anomaly;
pub mod thresholds;

pub use reading::*;
pub use anomaly::*;
pub use thresholds::*;
