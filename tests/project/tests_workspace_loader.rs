//! Workspace loading from a directory tree.

use std::fs;

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wpflint::AnalysisHost;
use wpflint::project::{LoadError, WorkspaceLoader, file_loader};

use crate::helpers::source_fixtures::*;

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("Controls")).unwrap();
    fs::create_dir_all(dir.path().join("obj").join("Debug")).unwrap();
    fs::create_dir_all(dir.path().join(".vs")).unwrap();

    fs::write(dir.path().join("Controls").join("FooControl.cs"), control(BAR_PROPERTY)).unwrap();
    fs::write(dir.path().join("Foo.cs"), attached(ATTACHED_BAR)).unwrap();
    fs::write(dir.path().join("README.md"), "# Demo").unwrap();
    fs::write(dir.path().join("obj").join("Debug").join("Generated.cs"), "class Generated { }").unwrap();
    fs::write(dir.path().join(".vs").join("Cache.cs"), "class Cache { }").unwrap();
    dir
}

#[test]
fn test_collects_source_files_sorted_and_skips_build_output() {
    let dir = workspace();
    let paths = file_loader::collect_file_paths(dir.path()).unwrap();
    let names: Vec<_> = paths
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["Controls/FooControl.cs", "Foo.cs"]);
}

#[test]
fn test_load_directory_into_host() {
    let dir = workspace();
    let mut host = AnalysisHost::new();
    let loaded = WorkspaceLoader::new()
        .load_directory_into_host(dir.path(), &mut host)
        .unwrap();
    assert_eq!(loaded, 2);
    assert_eq!(host.file_count(), 2);

    let diagnostics = host
        .analysis()
        .all_diagnostics(&CancellationToken::new())
        .unwrap();
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn test_missing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");
    let mut host = AnalysisHost::new();
    let result = WorkspaceLoader::new().load_directory_into_host(&missing, &mut host);
    assert!(matches!(result, Err(LoadError::DirectoryNotFound(path)) if path == missing));
}

#[test]
fn test_load_file_rejects_other_extensions() {
    let dir = workspace();
    let result = file_loader::load_file(&dir.path().join("README.md"));
    assert!(matches!(result, Err(LoadError::UnsupportedExtension(_))));
}

#[test]
fn test_reloading_keeps_file_ids() {
    let dir = workspace();
    let loader = WorkspaceLoader::new();
    let mut host = AnalysisHost::new();
    let path = dir.path().join("Foo.cs");

    loader.load_file_into_host(&path, &mut host).unwrap();
    let first = host.file_id(&path.to_string_lossy()).unwrap();
    loader.load_file_into_host(&path, &mut host).unwrap();
    assert_eq!(host.file_id(&path.to_string_lossy()), Some(first));
    assert_eq!(host.file_count(), 1);
}
