//! Analysis host tests
//!
//! Tests for:
//! - File state and snapshots
//! - Workspace-wide analysis
//! - Configuration applied by the host

pub mod tests_analysis_host;
