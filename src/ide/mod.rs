//! Host layer between callers (CLI, language server) and the analyzer.
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use wpflint::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! let (file_id, _) = host.set_file_content("FooControl.cs", source);
//!
//! let analysis = host.analysis();
//! let diagnostics = analysis.diagnostics(file_id, &CancellationToken::new())?;
//! ```

mod analysis;

pub use analysis::{Analysis, AnalysisError, AnalysisHost};
