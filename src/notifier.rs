//! Local alert notification
//!
//! Formats one anomaly as a single line,
//! `ALERT: {type} detected at sensor {sensor_id}`, and writes it to an output
//! channel (stdout unless a different writer is supplied).

use std::io::{self, Write};

use crate::types::Anomaly;

/// Render the alert line for an anomaly, without a trailing newline.
pub fn format_alert(anomaly: &Anomaly) -> String {
    format!("ALERT: {} detected at sensor {}", anomaly.kind, anomaly.sensor_id)
}

/// Write an alert for `anomaly` to stdout and return the message.
///
/// `None` writes nothing and returns `None`.
pub fn send_alert(anomaly: Option<&Anomaly>) -> Option<String> {
    Notifier::stdout().send_alert(anomaly)
}

/// Alert emitter bound to one output channel.
pub struct Notifier<W: Write> {
    out: W,
    sent: usize,
}

impl Notifier<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Notifier<W> {
    pub const fn new(out: W) -> Self {
        Self { out, sent: 0 }
    }

    /// Emit one alert line.
    ///
    /// A failed write is logged and the message is still returned; alerting
    /// has no error path of its own.
    pub fn send_alert(&mut self, anomaly: Option<&Anomaly>) -> Option<String> {
        let anomaly = anomaly?;
        let message = format_alert(anomaly);

        if let Err(e) = writeln!(self.out, "{message}").and_then(|()| self.out.flush()) {
            tracing::warn!(sensor = %anomaly.sensor_id, error = %e, "Failed to write alert");
        } else {
            self.sent += 1;
        }
        Some(message)
    }

    /// Alerts successfully written so far.
    pub const fn sent(&self) -> usize {
        self.sent
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
