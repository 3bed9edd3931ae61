//! Analyzer configuration.
//!
//! Read from JSON:
//!
//! ```json
//! {
//!   "skipGenerated": true,
//!   "rules": {
//!     "WPF0042": { "enabled": false },
//!     "WPF0001": { "severity": "error" }
//!   }
//! }
//! ```
//!
//! Rules not listed keep their default severity and are enabled.

use std::path::Path;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::rules::{RuleId, Severity, UnknownRule};

/// Errors raised while reading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The text is not a valid configuration document.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A rule id in the `rules` table is not known.
    #[error(transparent)]
    UnknownRule(#[from] UnknownRule),

    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Per-rule settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetting {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Replaces the rule's default severity.
    #[serde(default)]
    pub severity: Option<Severity>,
}

fn enabled_by_default() -> bool {
    true
}

impl Default for RuleSetting {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

/// Document shape before rule ids are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    #[serde(default = "enabled_by_default")]
    skip_generated: bool,
    #[serde(default)]
    rules: IndexMap<String, RuleSetting>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalyzerConfig {
    rules: FxHashMap<RuleId, RuleSetting>,
    /// Skip `*.g.cs` and `*.designer.cs` files.
    pub skip_generated: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            rules: FxHashMap::default(),
            skip_generated: true,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;
        let mut rules = FxHashMap::default();
        for (code, setting) in raw.rules {
            rules.insert(code.parse::<RuleId>()?, setting);
        }
        Ok(Self {
            rules,
            skip_generated: raw.skip_generated,
        })
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), rules = config.rules.len(), "loaded analyzer config");
        Ok(config)
    }

    pub fn setting(&self, rule: RuleId) -> RuleSetting {
        self.rules.get(&rule).copied().unwrap_or_default()
    }

    pub fn set(&mut self, rule: RuleId, setting: RuleSetting) {
        self.rules.insert(rule, setting);
    }

    pub fn is_enabled(&self, rule: RuleId) -> bool {
        self.setting(rule).enabled
    }

    /// Configured severity, or the rule's default.
    pub fn severity(&self, rule: RuleId) -> Severity {
        self.setting(rule)
            .severity
            .unwrap_or_else(|| rule.default_severity())
    }

    /// Generated sources, skipped when `skip_generated` is set.
    pub fn is_generated(path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let name = name.to_ascii_lowercase();
        name.ends_with(".g.cs") || name.ends_with(".g.i.cs") || name.ends_with(".designer.cs")
    }

    pub fn skips(&self, path: &Path) -> bool {
        self.skip_generated && Self::is_generated(path)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let config = AnalyzerConfig::default();
        for rule in RuleId::ALL {
            assert!(config.is_enabled(rule));
            assert_eq!(config.severity(rule), rule.default_severity());
        }
        assert!(config.skip_generated);
    }

    #[test]
    fn rules_table_overrides_defaults() {
        let config = AnalyzerConfig::from_json(
            r#"{
                "skipGenerated": false,
                "rules": {
                    "WPF0042": { "enabled": false },
                    "wpf0001": { "severity": "error" }
                }
            }"#,
        )
        .unwrap();

        assert!(!config.is_enabled(RuleId::Wpf0042));
        assert!(config.is_enabled(RuleId::Wpf0001));
        assert_eq!(config.severity(RuleId::Wpf0001), Severity::Error);
        assert_eq!(config.severity(RuleId::Wpf0003), Severity::Warning);
        assert!(!config.skip_generated);
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let err = AnalyzerConfig::from_json(r#"{ "rules": { "WPF9999": {} } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRule(UnknownRule(ref code)) if code == "WPF9999"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = AnalyzerConfig::from_json(r#"{ "rules": [ }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[rstest]
    #[case("MainWindow.g.cs", true)]
    #[case("MainWindow.g.i.cs", true)]
    #[case("Resources.Designer.cs", true)]
    #[case("FooControl.cs", false)]
    #[case("generated.cs", false)]
    fn generated_file_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(AnalyzerConfig::is_generated(Path::new(name)), expected);
    }
}
