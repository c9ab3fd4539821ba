//! Processor Configuration Module
//!
//! Threshold configuration loaded from a TOML file. The file is optional;
//! the built-in defaults match the documented 1500 psi / 200 °F limits.
//!
//! ## Loading Order
//!
//! 1. `PIPELINE_PROCESSOR_CONFIG` environment variable (path to TOML file)
//! 2. `processor_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Example
//!
//! ```toml
//! [thresholds]
//! pressure_psi = 1350.0
//! temperature_f = 190.0
//! ```
//!
//! The loaded config is returned by value and handed to the pipeline
//! explicitly; nothing here is held in global state.

mod processor_config;
pub mod defaults;
pub mod validation;

pub use processor_config::*;
