//! BDD-style scenarios for settings loading.

use std::io::Write;

use ckmetrics_settings::{OopSettings, SettingsError};

// ============================================================================
// Scenario: TOML configuration
// ============================================================================

#[test]
fn given_partial_toml_when_loaded_then_missing_options_take_defaults() {
    // Given
    let doc = r#"
cbo_threshold = 6
include_tests = true
exclude_patterns = ["generated"]
"#;

    // When
    let s = OopSettings::from_toml_str(doc).expect("parse");

    // Then
    assert_eq!(s.cbo_threshold, 6);
    assert!(s.include_tests);
    assert_eq!(s.exclude_patterns, vec!["generated"]);
    assert_eq!(s.dit_threshold, 5);
    assert_eq!(s.lcom_threshold, 0.8);
}

#[test]
fn given_malformed_toml_when_loaded_then_a_toml_error_is_returned() {
    let err = OopSettings::from_toml_str("cbo_threshold = [").unwrap_err();
    assert!(matches!(err, SettingsError::Toml(_)));
}

// ============================================================================
// Scenario: settings files
// ============================================================================

#[test]
fn given_json_file_when_loaded_by_extension_then_json_parser_is_used() {
    // Given
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ckmetrics.json");
    let mut f = std::fs::File::create(&path).expect("create");
    f.write_all(br#"{"wmc_threshold": 30, "include_extensions": [".py", ".pyi"]}"#)
        .expect("write");

    // When
    let s = OopSettings::from_file(&path).expect("load");

    // Then
    assert_eq!(s.wmc_threshold, 30);
    assert_eq!(s.include_extensions, vec![".py", ".pyi"]);
}

#[test]
fn given_toml_file_when_loaded_then_thresholds_are_applied() {
    // Given
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ckmetrics.toml");
    std::fs::write(&path, "lcom_threshold = 0.6\nrfc_threshold = 40\n").expect("write");

    // When
    let t = OopSettings::from_file(&path).expect("load").thresholds();

    // Then
    assert_eq!(t.lcom, 0.6);
    assert_eq!(t.rfc, 40);
}

#[test]
fn given_missing_file_when_loaded_then_an_io_error_is_returned() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = OopSettings::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::Io(_)));
}
