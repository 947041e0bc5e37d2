//! Benchmark setup error type.

use netclust_core::NetclustError;

use crate::source::SyntheticError;

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Building, indexing or clustering failed.
    #[error("netclust operation failed: {0}")]
    Core(#[from] NetclustError),
}
