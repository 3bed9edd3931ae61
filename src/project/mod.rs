pub mod file_loader;
pub mod workspace_loader;

pub use file_loader::LoadError;
pub use workspace_loader::WorkspaceLoader;
