//! Benchmark support crate for netclust.
//!
//! Provides seeded synthetic edge lists and parameter types used by the
//! Criterion benchmarks for the indexing and clustering stages.

pub mod error;
pub mod params;
pub mod source;
