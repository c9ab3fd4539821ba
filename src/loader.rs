//! CSV Reading Loader
//!
//! Turns a comma-separated sensor export into an ordered `Vec<Reading>`.
//!
//! Columns are resolved by header name, so column order is free and extra
//! columns are ignored. Required columns:
//!
//! | column          | type   |
//! |-----------------|--------|
//! | `sensor_id`     | string |
//! | `timestamp`     | string |
//! | `pressure_psi`  | f64    |
//! | `flow_rate`     | f64    |
//! | `temperature_f` | f64    |
//!
//! If a header name repeats, the last column with that name is used.
//!
//! Load policy is all-or-nothing: the first malformed row aborts the load and
//! no readings are returned. Range checks are not performed here; an
//! out-of-range value is a valid reading that the detector may later flag.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use thiserror::Error;

use crate::types::Reading;

/// Columns every input file must name in its header row.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "sensor_id",
    "timestamp",
    "pressure_psi",
    "flow_rate",
    "temperature_f",
];

/// Loader errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot open {}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    #[error("I/O error while reading CSV: {0}")]
    Io(#[source] std::io::Error),
}

/// Load every reading from the CSV file at `path`.
///
/// The file handle lives only for the duration of this call.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Reading>, LoadError> {
    let path = path.as_ref();
    let not_found = |source| LoadError::NotFound {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(not_found)?;

    // Opening a directory succeeds on Unix; reject it before the first read.
    if !file.metadata().map_err(not_found)?.is_file() {
        return Err(not_found(std::io::Error::other("not a regular file")));
    }

    let readings = load_from_reader(file)?;
    tracing::info!(
        path = %path.display(),
        count = readings.len(),
        "Loaded sensor readings from CSV"
    );
    Ok(readings)
}

/// Load every reading from any CSV byte source.
pub fn load_from_reader<R: Read>(source: R) -> Result<Vec<Reading>, LoadError> {
    // Flexible so a short row surfaces as a missing field, not a csv length error.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers().map_err(|e| csv_error(e, 1))?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut readings = Vec::new();
    let mut record = StringRecord::new();
    loop {
        // +1 past the header for the fallback line when csv has no position
        let fallback_line = readings.len() as u64 + 2;
        match reader.read_record(&mut record) {
            Ok(true) => {
                let line = record.position().map_or(fallback_line, csv::Position::line);
                readings.push(columns.parse_row(&record, line)?);
            }
            Ok(false) => break,
            Err(e) => return Err(csv_error(e, fallback_line)),
        }
    }

    tracing::debug!(count = readings.len(), "Parsed CSV rows");
    Ok(readings)
}

fn csv_error(err: csv::Error, fallback_line: u64) -> LoadError {
    let line = err.position().map_or(fallback_line, csv::Position::line);
    let message = format!("CSV parse error: {err}");
    match err.into_kind() {
        csv::ErrorKind::Io(e) => LoadError::Io(e),
        _ => LoadError::MalformedRecord { line, message },
    }
}

// ============================================================================
// Column Mapping
// ============================================================================

/// Header-name → field-index map for the required columns.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    sensor_id: usize,
    timestamp: usize,
    pressure_psi: usize,
    flow_rate: usize,
    temperature_f: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        // Last occurrence wins if a header is duplicated
        let index: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (normalize_header(name), i))
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !index.contains_key(c))
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MalformedRecord {
                line: 1,
                message: format!(
                    "header is missing required column(s): {}",
                    missing.join(", ")
                ),
            });
        }

        let col = |name: &str| index.get(name).copied().unwrap_or_default();
        Ok(Self {
            sensor_id: col("sensor_id"),
            timestamp: col("timestamp"),
            pressure_psi: col("pressure_psi"),
            flow_rate: col("flow_rate"),
            temperature_f: col("temperature_f"),
        })
    }

    fn parse_row(&self, record: &StringRecord, line: u64) -> Result<Reading, LoadError> {
        Ok(Reading {
            sensor_id: field(record, self.sensor_id, "sensor_id", line)?.to_string(),
            timestamp: field(record, self.timestamp, "timestamp", line)?.to_string(),
            pressure_psi: numeric(record, self.pressure_psi, "pressure_psi", line)?,
            flow_rate: numeric(record, self.flow_rate, "flow_rate", line)?,
            temperature_f: numeric(record, self.temperature_f, "temperature_f", line)?,
        })
    }
}

/// Strip surrounding whitespace and a leading UTF-8 BOM from a header name.
fn normalize_header(name: &str) -> &str {
    name.trim_start_matches('\u{feff}').trim()
}

fn field<'r>(
    record: &'r StringRecord,
    idx: usize,
    name: &str,
    line: u64,
) -> Result<&'r str, LoadError> {
    record.get(idx).ok_or_else(|| LoadError::MalformedRecord {
        line,
        message: format!("missing field '{name}'"),
    })
}

fn numeric(record: &StringRecord, idx: usize, name: &str, line: u64) -> Result<f64, LoadError> {
    let raw = field(record, idx, name, line)?;
    raw.trim()
        .parse::<f64>()
        .map_err(|e| LoadError::MalformedRecord {
            line,
            message: format!("'{name}' value {raw:?} is not a number ({e})"),
        })
}
