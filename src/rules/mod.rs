//! Rules built on the dependency property recognizer.
//!
//! ## Checks
//!
//! ```text
//! naming     → WPF0001-0004  member and accessor names
//! callbacks  → WPF0005-0007  callback names, WPF0019/0020 casts in callbacks
//! types      → WPF0012/0013  accessor types against the registered type
//! accessors  → WPF0031/0032/0040/0042/0043
//! attached   → WPF0033/0034/0061
//! ```
//!
//! [`check_file`] recognizes every declaration first, then runs the checks.
//! The cancellation token is polled between declarations; a cancelled run
//! returns [`Cancelled`] and no diagnostics.

mod accessors;
mod attached;
mod callbacks;
pub mod codes;
pub mod diagnostic;
mod naming;
mod types;

pub use codes::{RuleId, UnknownRule};
pub use diagnostic::{Diagnostic, DiagnosticCollector, FixHint, Severity};

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::base::{FileId, LineIndex, TextRange};
use crate::config::AnalyzerConfig;
use crate::dependency_property::{Recognized, recognizer};
use crate::parser::{SyntaxKind, SyntaxNode};
use crate::semantic::SemanticModel;

/// The run was cancelled before it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rule run cancelled")]
pub struct Cancelled;

/// Shared state for the checks over one file.
pub struct RuleContext<'a> {
    pub model: &'a dyn SemanticModel,
    pub root: SyntaxNode,
    config: &'a AnalyzerConfig,
    collector: DiagnosticCollector,
}

impl<'a> RuleContext<'a> {
    pub fn new(model: &'a dyn SemanticModel, root: SyntaxNode, config: &'a AnalyzerConfig) -> Self {
        Self {
            model,
            root,
            config,
            collector: DiagnosticCollector::new(),
        }
    }

    pub fn file(&self) -> FileId {
        self.model.file()
    }

    pub fn is_enabled(&self, rule: RuleId) -> bool {
        self.config.is_enabled(rule)
    }

    /// Report `message` for `rule` at `range`, honoring the configuration.
    pub fn report(&mut self, rule: RuleId, range: TextRange, message: impl Into<std::sync::Arc<str>>) {
        self.report_with(rule, range, message, None);
    }

    pub fn report_with(
        &mut self,
        rule: RuleId,
        range: TextRange,
        message: impl Into<std::sync::Arc<str>>,
        fix: Option<FixHint>,
    ) {
        if !self.is_enabled(rule) {
            return;
        }
        let mut diagnostic = Diagnostic::new(rule, self.file(), range, message)
            .with_severity(self.config.severity(rule));
        diagnostic.fix = fix;
        self.collector.add(diagnostic);
    }

    fn finish(mut self) -> Vec<Diagnostic> {
        let index = LineIndex::new(&self.root.text().to_string());
        self.collector
            .take()
            .into_iter()
            .map(|d| d.with_positions(&index))
            .collect()
    }
}

/// Range of a declaration's name, or of the whole node when it has none.
pub(crate) fn name_range(node: &SyntaxNode) -> TextRange {
    node.children()
        .find(|child| child.kind() == SyntaxKind::NAME)
        .map(|name| name.text_range())
        .unwrap_or_else(|| node.text_range())
}

/// Run every enabled rule over the model's file.
pub fn check_file(
    model: &dyn SemanticModel,
    config: &AnalyzerConfig,
    cancel: &CancellationToken,
) -> Result<Vec<Diagnostic>, Cancelled> {
    if cancel.is_cancelled() {
        return Err(Cancelled);
    }
    let Some(root) = model.compilation().root(model.file()) else {
        return Ok(Vec::new());
    };

    let mut recognized = Vec::new();
    for node in recognizer::candidates(&root) {
        if cancel.is_cancelled() {
            tracing::debug!(file = model.file().index(), "rule run cancelled during recognition");
            return Err(Cancelled);
        }
        if let Some(item) = recognizer::recognize(model, &node) {
            recognized.push(item);
        }
    }

    let mut ctx = RuleContext::new(model, root, config);
    for item in &recognized {
        if cancel.is_cancelled() {
            tracing::debug!(file = model.file().index(), "rule run cancelled");
            return Err(Cancelled);
        }
        check_declaration(&mut ctx, item);
    }
    accessors::check_value_calls(&mut ctx, cancel)?;

    let diagnostics = ctx.finish();
    tracing::trace!(
        file = model.file().index(),
        declarations = recognized.len(),
        diagnostics = diagnostics.len(),
        "rules finished"
    );
    Ok(diagnostics)
}

fn check_declaration(ctx: &mut RuleContext<'_>, item: &Recognized) {
    naming::check(ctx, item);
    callbacks::check(ctx, item);
    types::check(ctx, item);
    accessors::check(ctx, item);
    attached::check(ctx, item);
}
