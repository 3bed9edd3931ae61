//! AnalysisHost and Analysis: owned file state and read-only snapshots.
//!
//! The `AnalysisHost` owns all mutable state and provides `Analysis` snapshots
//! for querying. The compilation is rebuilt lazily the first time a snapshot
//! is taken after a change.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.set_file_content("FooControl.cs", source);
//!
//! let analysis = host.analysis();
//! let file = analysis.file_id("FooControl.cs").unwrap();
//! let diagnostics = analysis.diagnostics(file, &CancellationToken::new())?;
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::base::{FileId, LineIndex};
use crate::config::AnalyzerConfig;
use crate::dependency_property::{Recognized, recognize_file};
use crate::fix::{self, FixError, RewritePlan};
use crate::parser::{GreenNode, SyntaxError, parse};
use crate::rules::{self, Cancelled, Diagnostic};
use crate::semantic::{Compilation, FileSemantics};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("analysis cancelled")]
    Cancelled,

    #[error("no file with id {0:?}")]
    UnknownFile(FileId),

    #[error(transparent)]
    Fix(#[from] FixError),
}

impl From<Cancelled> for AnalysisError {
    fn from(_: Cancelled) -> Self {
        AnalysisError::Cancelled
    }
}

/// A source file as stored by the host.
struct SourceFile {
    path: String,
    text: Arc<str>,
    green: GreenNode,
    line_index: LineIndex,
}

/// Owns all mutable state for the analysis layer.
///
/// Apply changes via `set_file_content()` and `remove_file()`,
/// then get a consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    files: BTreeMap<FileId, SourceFile>,
    /// Map from file path to FileId
    file_id_map: HashMap<String, FileId>,
    next_file_id: u32,
    config: AnalyzerConfig,
    compilation: Compilation,
    /// Whether the compilation needs rebuilding
    compilation_dirty: bool,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            files: BTreeMap::new(),
            file_id_map: HashMap::new(),
            next_file_id: FileId::FRAMEWORK.index() + 1,
            config,
            compilation: Compilation::new([]),
            compilation_dirty: false,
        }
    }

    /// Set the content of a file, parsing it and storing the result.
    ///
    /// A path keeps its `FileId` across updates. Returns syntax errors if any.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> (FileId, Vec<SyntaxError>) {
        let file_id = match self.file_id_map.get(path) {
            Some(&id) => id,
            None => {
                let id = FileId::new(self.next_file_id);
                self.next_file_id += 1;
                self.file_id_map.insert(path.to_string(), id);
                id
            }
        };

        let parsed = parse(content);
        self.files.insert(
            file_id,
            SourceFile {
                path: path.to_string(),
                text: Arc::from(content),
                green: parsed.green,
                line_index: LineIndex::new(content),
            },
        );
        self.compilation_dirty = true;
        (file_id, parsed.errors)
    }

    /// Remove a file from storage.
    pub fn remove_file(&mut self, path: &str) -> bool {
        let Some(file_id) = self.file_id_map.remove(path) else {
            return false;
        };
        self.files.remove(&file_id);
        self.compilation_dirty = true;
        true
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.file_id_map.contains_key(path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.file_id_map.get(path).copied()
    }

    pub fn file_path(&self, file_id: FileId) -> Option<&str> {
        self.files.get(&file_id).map(|f| f.path.as_str())
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnalyzerConfig) {
        self.config = config;
    }

    /// Rebuild the compilation from the current files.
    ///
    /// This is called automatically by `analysis()` if the compilation is dirty.
    pub fn rebuild_compilation(&mut self) {
        let sources: Vec<(FileId, GreenNode)> = self
            .files
            .iter()
            .map(|(id, file)| (*id, file.green.clone()))
            .collect();
        self.compilation = Compilation::new(sources);
        self.compilation_dirty = false;
        debug!(files = self.files.len(), "rebuilt compilation");
    }

    /// Get a consistent snapshot for querying.
    ///
    /// If the compilation is dirty, it will be rebuilt first.
    pub fn analysis(&mut self) -> Analysis<'_> {
        if self.compilation_dirty {
            self.rebuild_compilation();
        }
        Analysis {
            compilation: &self.compilation,
            files: &self.files,
            file_id_map: &self.file_id_map,
            config: &self.config,
        }
    }
}

/// An immutable snapshot of the analysis state.
pub struct Analysis<'a> {
    compilation: &'a Compilation,
    files: &'a BTreeMap<FileId, SourceFile>,
    file_id_map: &'a HashMap<String, FileId>,
    config: &'a AnalyzerConfig,
}

impl<'a> Analysis<'a> {
    pub fn compilation(&self) -> &'a Compilation {
        self.compilation
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.file_id_map.get(path).copied()
    }

    pub fn file_path(&self, file_id: FileId) -> Option<&'a str> {
        self.files.get(&file_id).map(|f| f.path.as_str())
    }

    /// Files in id order.
    pub fn files(&self) -> impl Iterator<Item = FileId> + '_ {
        self.files.keys().copied()
    }

    pub fn text(&self, file_id: FileId) -> Option<Arc<str>> {
        self.files.get(&file_id).map(|f| f.text.clone())
    }

    pub fn line_index(&self, file_id: FileId) -> Option<&'a LineIndex> {
        self.files.get(&file_id).map(|f| &f.line_index)
    }

    fn source(&self, file_id: FileId) -> Result<&'a SourceFile, AnalysisError> {
        self.files
            .get(&file_id)
            .ok_or(AnalysisError::UnknownFile(file_id))
    }

    /// Every recognized dependency property declaration, in source order.
    pub fn recognize(&self, file_id: FileId) -> Result<Vec<Recognized>, AnalysisError> {
        self.source(file_id)?;
        let model = FileSemantics::new(self.compilation, file_id);
        let root = self
            .compilation
            .root(file_id)
            .ok_or(AnalysisError::UnknownFile(file_id))?;
        Ok(recognize_file(&model, &root))
    }

    /// Run the rules over one file.
    ///
    /// Generated files are skipped when the configuration says so.
    pub fn diagnostics(
        &self,
        file_id: FileId,
        cancel: &CancellationToken,
    ) -> Result<Vec<Diagnostic>, AnalysisError> {
        let source = self.source(file_id)?;
        if self.config.skips(Path::new(&source.path)) {
            debug!(path = %source.path, "skipping generated file");
            return Ok(Vec::new());
        }
        let model = FileSemantics::new(self.compilation, file_id);
        Ok(rules::check_file(&model, self.config, cancel)?)
    }

    /// Run the rules over every file in parallel, in file id order.
    pub fn all_diagnostics(&self, cancel: &CancellationToken) -> Result<Vec<Diagnostic>, AnalysisError> {
        let ids: Vec<FileId> = self.files.keys().copied().collect();
        let per_file = ids
            .par_iter()
            .map(|&file_id| self.diagnostics(file_id, cancel))
            .collect::<Result<Vec<_>, _>>()?;
        let diagnostics: Vec<Diagnostic> = per_file.into_iter().flatten().collect();
        debug!(
            files = ids.len(),
            diagnostics = diagnostics.len(),
            "workspace analysis finished"
        );
        Ok(diagnostics)
    }

    /// Rewrites offered for `diagnostic`.
    pub fn fixes(&self, file_id: FileId, diagnostic: &Diagnostic) -> Result<Vec<RewritePlan>, AnalysisError> {
        self.source(file_id)?;
        let model = FileSemantics::new(self.compilation, file_id);
        Ok(fix::plans_for(&model, diagnostic)?)
    }

    /// Apply the first rewrite offered for `diagnostic` and return the new text.
    pub fn apply_fix(&self, file_id: FileId, diagnostic: &Diagnostic) -> Result<Option<String>, AnalysisError> {
        let source = self.source(file_id)?;
        let Some(plan) = self.fixes(file_id, diagnostic)?.into_iter().next() else {
            return Ok(None);
        };
        Ok(Some(fix::apply_plan(&source.text, &plan)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
using System.Windows;
using System.Windows.Controls;

public class FooControl : Control
{
    public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
        "Bar", typeof(int), typeof(FooControl));
}
"#;

    #[test]
    fn file_ids_are_stable_across_updates() {
        let mut host = AnalysisHost::new();
        let (first, errors) = host.set_file_content("FooControl.cs", SOURCE);
        assert!(errors.is_empty());
        assert_ne!(first, FileId::FRAMEWORK);

        let (again, _) = host.set_file_content("FooControl.cs", SOURCE);
        assert_eq!(first, again);
        let (second, _) = host.set_file_content("Other.cs", "public class Other { }");
        assert_ne!(first, second);
        assert_eq!(host.file_count(), 2);
    }

    #[test]
    fn file_removal() {
        let mut host = AnalysisHost::new();
        host.set_file_content("FooControl.cs", SOURCE);
        assert!(host.remove_file("FooControl.cs"));
        assert!(!host.remove_file("FooControl.cs"));

        let analysis = host.analysis();
        assert!(analysis.file_id("FooControl.cs").is_none());
        assert_eq!(analysis.files().count(), 0);
    }

    #[test]
    fn snapshot_sees_latest_content() {
        let mut host = AnalysisHost::new();
        let (file, _) = host.set_file_content("FooControl.cs", "public class Empty { }");
        assert!(host.analysis().recognize(file).unwrap().is_empty());

        host.set_file_content("FooControl.cs", SOURCE);
        let analysis = host.analysis();
        assert_eq!(analysis.recognize(file).unwrap().len(), 1);
        assert_eq!(analysis.file_path(file), Some("FooControl.cs"));
    }

    #[test]
    fn unknown_file_is_an_error() {
        let mut host = AnalysisHost::new();
        let analysis = host.analysis();
        let missing = FileId::new(42);
        assert_eq!(
            analysis.diagnostics(missing, &CancellationToken::new()).unwrap_err(),
            AnalysisError::UnknownFile(missing)
        );
    }

    #[test]
    fn cancelled_run_returns_no_diagnostics() {
        let mut host = AnalysisHost::new();
        let (file, _) = host.set_file_content("FooControl.cs", SOURCE);
        let analysis = host.analysis();

        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(
            analysis.diagnostics(file, &cancel).unwrap_err(),
            AnalysisError::Cancelled
        );
    }
}
