//! Shared helpers for the integration tests.

#![allow(dead_code)]

pub mod analysis_helpers;
pub mod source_fixtures;
