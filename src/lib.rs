//! Pipeline Processor: offline batch analysis of pipeline sensor readings
//!
//! A single linear pipeline over one CSV export:
//!
//! - **Loader**: CSV file → ordered `Vec<Reading>`
//! - **Aggregator**: readings → one `DailyAverage` per (date, sensor)
//! - **Detector**: readings → `Anomaly` per threshold violation
//! - **Notifier**: anomaly → one `ALERT: ...` line on stdout
//!
//! ```no_run
//! use pipeline_processor::{aggregate_daily, detect_anomalies, load, send_alert, Thresholds};
//!
//! let readings = load("readings.csv")?;
//! let averages = aggregate_daily(&readings);
//! println!("{} daily groups", averages.len());
//! for anomaly in detect_anomalies(&readings, Thresholds::default()) {
//!     send_alert(Some(&anomaly));
//! }
//! # Ok::<(), pipeline_processor::LoadError>(())
//! ```

pub mod config;
pub mod types;
pub mod loader;
pub mod aggregator;
pub mod detector;
pub mod notifier;
pub mod report;

// Re-export configuration
pub use config::{ConfigError, ProcessorConfig};

// Re-export commonly used types
pub use types::{Anomaly, AnomalyKind, DailyAverage, Reading, Thresholds};

// Re-export pipeline stages
pub use aggregator::aggregate_daily;
pub use detector::detect_anomalies;
pub use loader::{load, load_from_reader, LoadError};
pub use notifier::{send_alert, Notifier};
pub use report::RunReport;
