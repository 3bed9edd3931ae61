//! # wpflint-base
//!
//! Core library for recognizing WPF dependency property declarations in C#
//! sources and checking them.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide                  → AnalysisHost / Analysis snapshots
//!   ↓
//! project              → Workspace loading
//!   ↓
//! rules, fix, config   → Checks, rewrites, analyzer settings
//!   ↓
//! dependency_property  → Shape recognizer and metadata extraction
//!   ↓
//! semantic             → Compilation, symbols, binder
//!   ↓
//! parser               → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base                 → Primitives (FileId, TextRange, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → semantic → dependency_property → rules → ide)
// ============================================================================

/// Foundation types: FileId, TextRange, LineIndex
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Semantic model: symbols, compilation, name and overload resolution
pub mod semantic;

/// Dependency property recognizer and metadata extraction
pub mod dependency_property;

/// Analyzer settings
pub mod config;

/// Rule checks over recognized declarations
pub mod rules;

/// Rewrites offered for diagnostics
pub mod fix;

/// Host layer: file state and analysis snapshots
pub mod ide;

/// Project management: workspace loading
pub mod project;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};

pub use config::{AnalyzerConfig, ConfigError};
pub use dependency_property::{Recognized, recognize, recognize_file};
pub use ide::{Analysis, AnalysisError, AnalysisHost};
pub use rules::{Diagnostic, RuleId, Severity};
