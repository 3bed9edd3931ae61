use std::path::Path;

use crate::ide::AnalysisHost;

use super::file_loader::{self, LoadError};

/// Loads workspace files on demand
#[derive(Debug, Default)]
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads all C# files under a directory into an AnalysisHost.
    ///
    /// Files that load are kept even when others fail; the failures are
    /// returned together. Returns the number of files loaded.
    pub fn load_directory_into_host(
        &self,
        path: impl AsRef<Path>,
        host: &mut AnalysisHost,
    ) -> Result<usize, LoadError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(LoadError::DirectoryNotFound(path.to_path_buf()));
        }

        let paths = file_loader::collect_file_paths(path)?;
        let mut loaded = 0;
        let mut errors = Vec::new();
        for file in paths {
            match self.load_file_into_host(&file, host) {
                Ok(()) => loaded += 1,
                Err(e) => {
                    tracing::warn!(path = %file.display(), error = %e, "failed to load file");
                    errors.push(e);
                }
            }
        }
        tracing::debug!(dir = %path.display(), loaded, failed = errors.len(), "loaded directory");

        if errors.is_empty() {
            Ok(loaded)
        } else {
            Err(LoadError::Failed(errors))
        }
    }

    /// Loads a single file into an AnalysisHost.
    pub fn load_file_into_host(&self, path: impl AsRef<Path>, host: &mut AnalysisHost) -> Result<(), LoadError> {
        let path = path.as_ref();
        let content = file_loader::load_file(path)?;
        let (_, errors) = host.set_file_content(&path.to_string_lossy(), &content);
        if !errors.is_empty() {
            tracing::debug!(path = %path.display(), errors = errors.len(), "file parsed with syntax errors");
        }
        Ok(())
    }
}
