//! Shared test utilities used across netclust crates.

pub mod fixtures;
pub mod tracing;
