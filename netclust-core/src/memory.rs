//! Memory sizing for clustering runs.
//!
//! Node and edge counts come from file headers, so tables are reserved with
//! `try_reserve_exact` and a failure surfaces as
//! [`NetclustError::Allocation`] instead of aborting the process.

use crate::{Result, error::NetclustError};

/// Bytes per node for the parent array.
const PARENT_BYTES: u64 = 4;

/// Bytes per node for the size array, released after the union phase.
const SIZE_BYTES: u64 = 4;

/// Bytes per node for the root-to-cluster conversion table.
const CLUSTER_SLOT_BYTES: u64 = 4;

/// `String` header plus the member pointer held by its cluster.
const LABEL_OVERHEAD_BYTES: u64 = 32;

/// Returns an estimate of the peak memory (in bytes) a clustering run needs
/// for `node_count` nodes with `label_width`-byte labels.
///
/// Edges stream from disk and are not counted.
///
/// # Examples
///
/// ```
/// use netclust_core::estimate_clustering_bytes;
///
/// assert_eq!(estimate_clustering_bytes(0, 30), 0);
/// assert!(estimate_clustering_bytes(1_000, 30) > estimate_clustering_bytes(1_000, 10));
/// ```
#[must_use]
pub fn estimate_clustering_bytes(node_count: u32, label_width: u32) -> u64 {
    let n = u64::from(node_count);
    let per_node = PARENT_BYTES
        .saturating_add(SIZE_BYTES)
        .saturating_add(CLUSTER_SLOT_BYTES)
        .saturating_add(LABEL_OVERHEAD_BYTES)
        .saturating_add(u64::from(label_width));
    n.saturating_mul(per_node)
}

/// Formats a byte count using binary units, e.g. `"1.0 KiB"`.
///
/// # Examples
///
/// ```
/// use netclust_core::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1536), "1.5 KiB");
/// assert_eq!(format_bytes(1_073_741_824), "1.0 GiB");
/// ```
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    const GIB: u64 = 1024 * MIB;

    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Returns an empty vector able to hold `len` elements.
pub(crate) fn reserve_vec<T>(len: usize, what: &'static str) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| NetclustError::Allocation {
            what,
            requested: len,
        })?;
    Ok(out)
}

/// Appends `value`, reporting a failed reservation instead of aborting.
pub(crate) fn push_checked<T>(vec: &mut Vec<T>, value: T, what: &'static str) -> Result<()> {
    vec.try_reserve(1).map_err(|_| NetclustError::Allocation {
        what,
        requested: vec.len().saturating_add(1),
    })?;
    vec.push(value);
    Ok(())
}

/// Returns a vector of `len` copies of `value`.
pub(crate) fn filled_vec<T: Clone>(len: usize, value: T, what: &'static str) -> Result<Vec<T>> {
    let mut out = reserve_vec(len, what)?;
    out.resize(len, value);
    Ok(out)
}
