//! Diagnostics reported by the dependency property rules.

use std::sync::Arc;

use serde::Deserialize;
use smol_str::SmolStr;

use super::codes::RuleId;
use crate::base::{FileId, LineIndex, TextRange};
use crate::semantic::SymbolId;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// A rewrite a diagnostic can offer. Turned into a concrete plan by
/// [`crate::fix`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FixHint {
    /// Rename a declared member and its references in the file.
    Rename { symbol: SymbolId, new_name: SmolStr },
    /// Replace the `SetCurrentValue` name of the call at `invocation`.
    UseSetValue { invocation: TextRange },
    /// Replace the type of the cast whose type syntax spans `cast_type`.
    ReplaceCastType { cast_type: TextRange, new_type: SmolStr },
}

/// A diagnostic message with location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// The file containing this diagnostic.
    pub file: FileId,
    pub range: TextRange,
    /// Start line (0-indexed).
    pub start_line: u32,
    /// Start column (0-indexed).
    pub start_col: u32,
    /// End line (0-indexed).
    pub end_line: u32,
    /// End column (0-indexed).
    pub end_col: u32,
    pub severity: Severity,
    pub rule: RuleId,
    pub message: Arc<str>,
    pub fix: Option<FixHint>,
}

impl Diagnostic {
    /// Create a diagnostic with the rule's default severity.
    pub fn new(rule: RuleId, file: FileId, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self {
            file,
            range,
            start_line: 0,
            start_col: 0,
            end_line: 0,
            end_col: 0,
            severity: rule.default_severity(),
            rule,
            message: message.into(),
            fix: None,
        }
    }

    /// Fill in line/column positions from the range.
    pub fn with_positions(mut self, index: &LineIndex) -> Self {
        let start = index.line_col(self.range.start());
        let end = index.line_col(self.range.end());
        self.start_line = start.line;
        self.start_col = start.col;
        self.end_line = end.line;
        self.end_col = end.col;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_fix(mut self, fix: FixHint) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Rule code, e.g. `WPF0001`.
    pub fn code(&self) -> &'static str {
        self.rule.code()
    }
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics while the rules run over one file.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics reported for one rule.
    pub fn for_rule(&self, rule: RuleId) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.rule == rule).collect()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Take all diagnostics sorted by position, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.sort_by_key(|d| (d.range.start(), d.rule));
        diagnostics
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn new_diagnostic_uses_rule_default_severity() {
        let diag = Diagnostic::new(RuleId::Wpf0032, FileId::new(1), range(0, 3), "mismatch");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code(), "WPF0032");
        let diag = diag.with_severity(Severity::Hint);
        assert_eq!(diag.severity.to_lsp(), 4);
    }

    #[test]
    fn with_fix_attaches_the_hint() {
        let diag = Diagnostic::new(RuleId::Wpf0043, FileId::new(1), range(0, 3), "x");
        assert!(diag.fix.is_none());
        let hint = FixHint::UseSetValue { invocation: range(0, 3) };
        let diag = diag.with_fix(hint.clone());
        assert_eq!(diag.fix, Some(hint));
        assert_eq!(diag.range, range(0, 3));
    }

    #[test]
    fn positions_come_from_the_line_index() {
        let index = LineIndex::new("ab\ncdef\n");
        let diag = Diagnostic::new(RuleId::Wpf0001, FileId::new(1), range(4, 6), "x")
            .with_positions(&index);
        assert_eq!((diag.start_line, diag.start_col), (1, 1));
        assert_eq!((diag.end_line, diag.end_col), (1, 3));
    }

    #[test]
    fn collector_counts_and_sorts() {
        let mut collector = DiagnosticCollector::new();
        collector.add(Diagnostic::new(RuleId::Wpf0003, FileId::new(1), range(10, 12), "b"));
        collector.add(Diagnostic::new(RuleId::Wpf0032, FileId::new(1), range(2, 4), "a"));
        collector.add(Diagnostic::new(RuleId::Wpf0061, FileId::new(1), range(20, 22), "c"));

        assert_eq!(collector.error_count(), 1);
        assert_eq!(collector.warning_count(), 1);
        assert_eq!(collector.for_rule(RuleId::Wpf0003).len(), 1);

        let taken = collector.take();
        let codes: Vec<_> = taken.iter().map(|d| d.code()).collect();
        assert_eq!(codes, ["WPF0032", "WPF0003", "WPF0061"]);
        assert!(collector.diagnostics().is_empty());
    }
}
