//! File naming for index and cluster outputs.
//!
//! Every output sits next to the input edge list and appends a suffix to its
//! full file name, so `graph.tsv` yields `graph.tsv.nidx`, `graph.tsv.eidx`
//! and so on.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

fn with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Files read and written by an indexing run.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use netclust_core::IndexPaths;
///
/// let paths = IndexPaths::for_input("data/blast.tsv");
/// assert_eq!(paths.nodes, Path::new("data/blast.tsv.nidx"));
/// assert_eq!(paths.subset, Path::new("data/blast.tsv.sube"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexPaths {
    /// Text edge list.
    pub input: PathBuf,
    /// Node index (`.nidx`).
    pub nodes: PathBuf,
    /// Edge index (`.eidx`).
    pub edges: PathBuf,
    /// Accepted subset of the input edges (`.sube`).
    pub subset: PathBuf,
    /// Run summary (`.netindex.log`).
    pub log: PathBuf,
}

impl IndexPaths {
    /// Derives every output name from `input`.
    #[must_use]
    pub fn for_input(input: impl AsRef<Path>) -> Self {
        let input = input.as_ref();
        Self {
            input: input.to_path_buf(),
            nodes: with_suffix(input, ".nidx"),
            edges: with_suffix(input, ".eidx"),
            subset: with_suffix(input, ".sube"),
            log: with_suffix(input, ".netindex.log"),
        }
    }
}

/// Files read and written by a clustering run.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use netclust_core::ClusterPaths;
///
/// let paths = ClusterPaths::for_input("blast.tsv");
/// assert_eq!(paths.edges, Path::new("blast.tsv.eidx"));
/// assert_eq!(paths.clusters, Path::new("blast.tsv.clst"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterPaths {
    /// Edge list the index was built from.
    pub input: PathBuf,
    /// Node index (`.nidx`).
    pub nodes: PathBuf,
    /// Edge index (`.eidx`).
    pub edges: PathBuf,
    /// Cluster listing (`.clst`).
    pub clusters: PathBuf,
    /// Run summary (`.netclust.log`).
    pub log: PathBuf,
}

impl ClusterPaths {
    /// Derives every file name from `input`.
    #[must_use]
    pub fn for_input(input: impl AsRef<Path>) -> Self {
        let input = input.as_ref();
        Self {
            input: input.to_path_buf(),
            nodes: with_suffix(input, ".nidx"),
            edges: with_suffix(input, ".eidx"),
            clusters: with_suffix(input, ".clst"),
            log: with_suffix(input, ".netclust.log"),
        }
    }
}
