//! Rule tests
//!
//! Tests for:
//! - Member, property and accessor names
//! - Callback names and casts
//! - Accessor types
//! - Accessor bodies, declaration order, value calls
//! - Attached accessor attribute and docs
//! - Rewrites offered by diagnostics

pub mod tests_accessors;
pub mod tests_attached;
pub mod tests_callbacks;
pub mod tests_fixes;
pub mod tests_naming;
pub mod tests_types;
