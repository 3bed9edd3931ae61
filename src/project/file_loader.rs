//! Finding and reading C# sources on disk.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading sources from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(PathBuf),

    /// Some files of a directory could not be loaded.
    #[error("failed to load {} file(s)", .0.len())]
    Failed(Vec<LoadError>),
}

/// Directories never descended into.
const SKIPPED_DIRECTORIES: &[&str] = &["bin", "obj"];

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("cs"))
}

fn is_skipped_directory(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name))
}

/// Every `*.cs` file under `dir`, sorted by path.
pub fn collect_file_paths(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    collect_recursive(dir, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_recursive(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let io = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in std::fs::read_dir(dir).map_err(io)? {
        let path = entry.map_err(io)?.path();
        if path.is_dir() {
            if !is_skipped_directory(&path) {
                collect_recursive(&path, paths)?;
            }
        } else if is_source_file(&path) {
            paths.push(path);
        }
    }
    Ok(())
}

/// Read one source file.
pub fn load_file(path: &Path) -> Result<String, LoadError> {
    if !is_source_file(path) {
        return Err(LoadError::UnsupportedExtension(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
