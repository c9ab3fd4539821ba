//! System-wide default constants.

// ============================================================================
// Detection Thresholds
// ============================================================================

/// Pressure above this is flagged `HIGH_PRESSURE` (psi).
pub const DEFAULT_PRESSURE_THRESHOLD_PSI: f64 = 1500.0;

/// Temperature above this is flagged `HIGH_TEMPERATURE` (°F).
pub const DEFAULT_TEMPERATURE_THRESHOLD_F: f64 = 200.0;

// ============================================================================
// Config Discovery
// ============================================================================

/// Environment variable naming an explicit config file path.
pub const CONFIG_ENV_VAR: &str = "PIPELINE_PROCESSOR_CONFIG";

/// Config file looked up in the working directory when the env var is unset.
pub const LOCAL_CONFIG_FILE: &str = "processor_config.toml";

// ============================================================================
// Validation
// ============================================================================

/// Maximum edit distance for "did you mean" suggestions on unknown keys.
pub const MAX_SUGGESTION_DISTANCE: usize = 3;
