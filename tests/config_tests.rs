//! Config Tests
//!
//! File loading, typo detection and validation for `ProcessorConfig`,
//! independent of the rest of the pipeline.

use std::io::Write;

use pipeline_processor::config::validation::{
    known_config_keys, suggest_correction, validate_unknown_keys,
};
use pipeline_processor::{ConfigError, ProcessorConfig, Thresholds};
use tempfile::NamedTempFile;

fn write_toml(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp toml");
    file.flush().expect("flush temp toml");
    file
}

#[test]
fn file_thresholds_flow_into_detector_thresholds() {
    let file = write_toml(
        r#"
[thresholds]
pressure_psi = 1350.0
temperature_f = 185.5
"#,
    );
    let config = ProcessorConfig::load_from_file(file.path()).expect("valid config");
    assert_eq!(config.detection_thresholds(), Thresholds::new(1350.0, 185.5));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = ProcessorConfig::load_from_file(&dir.path().join("absent.toml"))
        .expect_err("no such file");
    assert!(matches!(err, ConfigError::Io(..)));
}

#[test]
fn syntax_error_reports_file_path() {
    let file = write_toml("[thresholds\npressure_psi = 1\n");
    match ProcessorConfig::load_from_file(file.path()) {
        Err(ConfigError::Parse(path, _)) => assert_eq!(path, file.path()),
        other => panic!("expected Parse error, got {other:?}"),
    }
}

#[test]
fn negative_threshold_fails_validation() {
    let file = write_toml("[thresholds]\ntemperature_f = -40.0\n");
    let err = ProcessorConfig::load_from_file(file.path()).expect_err("negative limit");
    let ConfigError::Validation(errors) = err else {
        panic!("expected Validation error");
    };
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("thresholds.temperature_f"));
}

#[test]
fn typo_in_threshold_key_warns_with_suggestion() {
    let warnings = validate_unknown_keys("[thresholds]\npresure_psi = 1400.0\n");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "thresholds.presure_psi");
    assert_eq!(warnings[0].suggestion.as_deref(), Some("thresholds.pressure_psi"));
    assert!(warnings[0].to_string().contains("did you mean 'thresholds.pressure_psi'"));
}

#[test]
fn typo_is_ignored_and_default_kept() {
    // Unknown keys only warn; the misspelt value does not apply.
    let file = write_toml("[thresholds]\ntemprature_f = 150.0\n");
    let config = ProcessorConfig::load_from_file(file.path()).expect("typo is non-fatal");
    assert_eq!(config.thresholds.temperature_f, 200.0);
}

#[test]
fn valid_config_produces_zero_warnings() {
    let warnings = validate_unknown_keys(
        r#"
[thresholds]
pressure_psi = 1500.0
temperature_f = 200.0
"#,
    );
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn suggestion_requires_close_match() {
    let known = known_config_keys();
    assert_eq!(suggest_correction("thresholds", &known).as_deref(), Some("thresholds"));
    assert_eq!(suggest_correction("notifications.email", &known), None);
}

#[test]
fn print_config_output_reloads() {
    let config = ProcessorConfig::default();
    let text = config.to_toml().expect("serialize");
    assert!(text.contains("[thresholds]"));
    let file = write_toml(&text);
    assert_eq!(ProcessorConfig::load_from_file(file.path()).expect("reload"), config);
}

#[test]
fn cli_override_beats_file_value() {
    let file = write_toml("[thresholds]\npressure_psi = 1350.0\ntemperature_f = 185.0\n");
    let config = ProcessorConfig::load_from_file(file.path())
        .expect("valid config")
        .with_overrides(Some(1100.0), None)
        .expect("valid override");
    assert_eq!(config.detection_thresholds(), Thresholds::new(1100.0, 185.0));
}

#[test]
fn absent_overrides_fall_back_to_file_then_default() {
    let file = write_toml("[thresholds]\ntemperature_f = 185.0\n");
    let config = ProcessorConfig::load_from_file(file.path())
        .expect("valid config")
        .with_overrides(None, None)
        .expect("no overrides");
    assert_eq!(config.detection_thresholds(), Thresholds::new(1500.0, 185.0));

    let defaults = ProcessorConfig::default()
        .with_overrides(None, Some(210.0))
        .expect("valid override");
    assert_eq!(defaults.detection_thresholds(), Thresholds::new(1500.0, 210.0));
}

#[test]
fn negative_override_is_rejected() {
    let err = ProcessorConfig::default()
        .with_overrides(Some(-5.0), None)
        .expect_err("negative pressure limit");
    let ConfigError::Validation(errors) = err else {
        panic!("expected Validation error");
    };
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("thresholds.pressure_psi"));
}
