//! Analysis host setup and diagnostic queries.

use tokio_util::sync::CancellationToken;
use wpflint::{AnalysisHost, AnalyzerConfig, Diagnostic, FileId, RuleId};

/// Creates an AnalysisHost with a single file.
pub fn analysis_from_source(source: &str, filename: &str) -> (AnalysisHost, FileId) {
    analysis_with_config(source, filename, AnalyzerConfig::default())
}

pub fn analysis_with_config(
    source: &str,
    filename: &str,
    config: AnalyzerConfig,
) -> (AnalysisHost, FileId) {
    let mut host = AnalysisHost::with_config(config);
    let (file_id, errors) = host.set_file_content(filename, source);
    assert!(
        errors.is_empty(),
        "Parse errors in '{}': {:?}",
        filename,
        errors
    );
    (host, file_id)
}

/// All diagnostics for a single `FooControl.cs`.
pub fn diagnostics(source: &str) -> Vec<Diagnostic> {
    let (mut host, file_id) = analysis_from_source(source, "FooControl.cs");
    host.analysis()
        .diagnostics(file_id, &CancellationToken::new())
        .expect("analysis is not cancelled")
}

/// Diagnostics of one rule.
pub fn diagnostics_for(source: &str, rule: RuleId) -> Vec<Diagnostic> {
    diagnostics(source)
        .into_iter()
        .filter(|d| d.rule == rule)
        .collect()
}

/// Rule codes reported for a source, sorted.
pub fn codes(source: &str) -> Vec<&'static str> {
    let mut codes: Vec<_> = diagnostics(source).iter().map(|d| d.rule.code()).collect();
    codes.sort_unstable();
    codes
}

/// Source text covered by a diagnostic.
pub fn reported_text<'a>(source: &'a str, diagnostic: &Diagnostic) -> &'a str {
    &source[diagnostic.range]
}

/// Assert a source is clean.
pub fn assert_no_diagnostics(source: &str) {
    let diagnostics = diagnostics(source);
    assert!(
        diagnostics.is_empty(),
        "Expected no diagnostics, got {}:\n{}",
        diagnostics.len(),
        diagnostics
            .iter()
            .map(|d| format!("  Line {}: {} {}", d.start_line + 1, d.rule, d.message))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Apply the rewrite of the single `rule` diagnostic and return the new text.
pub fn fixed(source: &str, rule: RuleId) -> String {
    let (mut host, file_id) = analysis_from_source(source, "FooControl.cs");
    let analysis = host.analysis();
    let diagnostics = analysis
        .diagnostics(file_id, &CancellationToken::new())
        .expect("analysis is not cancelled");
    let diagnostic = diagnostics
        .iter()
        .find(|d| d.rule == rule)
        .unwrap_or_else(|| panic!("no {rule} diagnostic"));
    analysis
        .apply_fix(file_id, diagnostic)
        .expect("fix applies")
        .unwrap_or_else(|| panic!("{rule} offers no fix"))
}
