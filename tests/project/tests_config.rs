//! Analyzer configuration files.

use std::fs;

use tempfile::TempDir;
use wpflint::{AnalyzerConfig, ConfigError, RuleId, Severity};

#[test]
fn test_load_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wpflint.json");
    fs::write(
        &path,
        r#"{
            "skipGenerated": false,
            "rules": {
                "WPF0042": { "enabled": false },
                "WPF0061": { "severity": "warning" }
            }
        }"#,
    )
    .unwrap();

    let config = AnalyzerConfig::load(&path).unwrap();
    assert!(!config.skip_generated);
    assert!(!config.is_enabled(RuleId::Wpf0042));
    assert_eq!(config.severity(RuleId::Wpf0061), Severity::Warning);
    assert_eq!(config.severity(RuleId::Wpf0001), RuleId::Wpf0001.default_severity());
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let result = AnalyzerConfig::load(dir.path().join("missing.json"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn test_unknown_rule_in_config() {
    let result = AnalyzerConfig::from_json(r#"{ "rules": { "WPF9999": { "enabled": false } } }"#);
    let error = result.unwrap_err();
    assert!(matches!(error, ConfigError::UnknownRule(_)));
    assert!(error.to_string().contains("WPF9999"));
}

#[test]
fn test_malformed_config() {
    let result = AnalyzerConfig::from_json(r#"{ "rules": [ }"#);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
