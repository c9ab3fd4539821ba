//! Pipeline Processor CLI
//!
//! Loads one CSV export of sensor readings, prints an `ALERT:` line per
//! threshold violation, then prints the run report.
//!
//! # Usage
//!
//! ```bash
//! pipeline-processor data/sample_readings.csv
//! pipeline-processor readings.csv --pressure-threshold 1400 --json
//! pipeline-processor readings.csv --config site.toml --no-alerts
//! ```
//!
//! # Environment Variables
//!
//! - `PIPELINE_PROCESSOR_CONFIG`: path to a threshold TOML file
//! - `RUST_LOG`: logging level (default: info). Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pipeline_processor::{load, Notifier, ProcessorConfig, RunReport};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "pipeline-processor")]
#[command(about = "Daily averages and threshold alerts for pipeline sensor CSV exports")]
#[command(version)]
struct CliArgs {
    /// CSV file with sensor_id, timestamp, pressure_psi, flow_rate, temperature_f columns
    #[arg(required_unless_present = "print_config")]
    input: Option<PathBuf>,

    /// Threshold config file (skips the PIPELINE_PROCESSOR_CONFIG / ./processor_config.toml search)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pressure limit in psi (overrides config)
    #[arg(long, value_name = "PSI")]
    pressure_threshold: Option<f64>,

    /// Temperature limit in °F (overrides config)
    #[arg(long, value_name = "DEG_F")]
    temp_threshold: Option<f64>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Skip per-anomaly ALERT lines
    #[arg(long)]
    no_alerts: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn resolve_config(args: &CliArgs) -> Result<ProcessorConfig> {
    let config = match &args.config {
        Some(path) => ProcessorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ProcessorConfig::load(),
    };

    config
        .with_overrides(args.pressure_threshold, args.temp_threshold)
        .context("Invalid threshold override")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    info!("Pipeline Data Processor v{}", env!("CARGO_PKG_VERSION"));

    let config = resolve_config(&args)?;
    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }
    let thresholds = config.detection_thresholds();
    info!(%thresholds, "Thresholds resolved");

    let input = args
        .input
        .as_deref()
        .context("An input CSV path is required")?;

    // Load failure ends the run before anything reaches stdout
    let readings = load(input)
        .with_context(|| format!("Failed to load readings from {}", input.display()))?;

    let report = RunReport::build(input.display().to_string(), &readings, thresholds);
    info!(
        readings = report.reading_count,
        sensors = report.sensor_count,
        daily_groups = report.daily_averages.len(),
        anomalies = report.anomalies.len(),
        "Analysis complete"
    );

    if !args.no_alerts {
        let mut notifier = Notifier::stdout();
        for anomaly in &report.anomalies {
            notifier.send_alert(Some(anomaly));
        }
    }

    if args.json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
