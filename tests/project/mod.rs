//! Project tests
//!
//! Tests for:
//! - Loading C# sources from disk
//! - Reading analyzer configuration files

pub mod tests_config;
pub mod tests_workspace_loader;
