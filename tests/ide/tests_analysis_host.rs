//! AnalysisHost and Analysis snapshot behavior.

use tokio_util::sync::CancellationToken;
use wpflint::config::RuleSetting;
use wpflint::{AnalysisHost, AnalyzerConfig, Recognized, RuleId, Severity};

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

const MISNAMED_FIELD: &str = r#"
        public static readonly DependencyProperty ErrorProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl));
"#;

// =============================================================================
// SNAPSHOTS
// =============================================================================

#[test]
fn test_recognize_lists_declarations_in_source_order() {
    let source = control(BAR_PROPERTY);
    let (mut host, file_id) = analysis_from_source(&source, "FooControl.cs");
    let items = host.analysis().recognize(file_id).unwrap();

    assert_eq!(items.len(), 2);
    assert!(matches!(items[0], Recognized::Registration(_)));
    assert!(matches!(items[1], Recognized::ClrProperty(_)));
}

#[test]
fn test_diagnostic_positions_are_line_and_column() {
    let source = control(MISNAMED_FIELD);
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0001);
    let diagnostic = &diagnostics[0];

    let line = source.lines().nth(diagnostic.start_line as usize).unwrap();
    assert!(line[diagnostic.start_col as usize..].starts_with("ErrorProperty"));
    assert_eq!(diagnostic.start_line, diagnostic.end_line);
    assert_eq!(diagnostic.end_col - diagnostic.start_col, "ErrorProperty".len() as u32);
}

#[test]
fn test_updated_file_is_reanalyzed() {
    let mut host = AnalysisHost::new();
    let (file_id, _) = host.set_file_content("FooControl.cs", &control(MISNAMED_FIELD));
    let cancel = CancellationToken::new();
    assert_eq!(host.analysis().diagnostics(file_id, &cancel).unwrap().len(), 1);

    host.set_file_content("FooControl.cs", &control(BAR_PROPERTY));
    assert!(host.analysis().diagnostics(file_id, &cancel).unwrap().is_empty());
}

// =============================================================================
// WORKSPACE ANALYSIS
// =============================================================================

#[test]
fn test_all_diagnostics_in_file_order() {
    let mut host = AnalysisHost::new();
    let (first, _) = host.set_file_content("First.cs", &control(MISNAMED_FIELD));
    host.set_file_content("Clean.cs", &attached(ATTACHED_BAR));
    let (last, _) = host.set_file_content("Last.cs", &control(MISNAMED_FIELD).replace("FooControl", "BarControl"));

    let diagnostics = host.analysis().all_diagnostics(&CancellationToken::new()).unwrap();
    let files: Vec<_> = diagnostics.iter().map(|d| d.file).collect();
    assert_eq!(files, vec![first, last]);
}

#[test]
fn test_cancelled_workspace_analysis() {
    let mut host = AnalysisHost::new();
    host.set_file_content("FooControl.cs", &control(MISNAMED_FIELD));
    let cancel = CancellationToken::new();
    cancel.cancel();
    assert!(host.analysis().all_diagnostics(&cancel).is_err());
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn test_disabled_rule_is_not_reported() {
    let mut config = AnalyzerConfig::default();
    config.set(
        RuleId::Wpf0001,
        RuleSetting {
            enabled: false,
            severity: None,
        },
    );
    let (mut host, file_id) = analysis_with_config(&control(MISNAMED_FIELD), "FooControl.cs", config);
    let diagnostics = host
        .analysis()
        .diagnostics(file_id, &CancellationToken::new())
        .unwrap();
    assert!(diagnostics.is_empty());
}

#[test]
fn test_configured_severity_is_applied() {
    let config = AnalyzerConfig::from_json(r#"{ "rules": { "WPF0001": { "severity": "error" } } }"#).unwrap();
    let (mut host, file_id) = analysis_with_config(&control(MISNAMED_FIELD), "FooControl.cs", config);
    let diagnostics = host
        .analysis()
        .diagnostics(file_id, &CancellationToken::new())
        .unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[test]
fn test_generated_files_are_skipped_unless_configured() {
    let source = control(MISNAMED_FIELD);
    let cancel = CancellationToken::new();

    let (mut host, file_id) = analysis_from_source(&source, "FooControl.g.cs");
    assert!(host.analysis().diagnostics(file_id, &cancel).unwrap().is_empty());

    let config = AnalyzerConfig::from_json(r#"{ "skipGenerated": false }"#).unwrap();
    host.set_config(config);
    assert_eq!(host.analysis().diagnostics(file_id, &cancel).unwrap().len(), 1);
}
