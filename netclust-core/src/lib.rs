//! Netclust core library.
//!
//! Turns a weighted text edge list into compact node and edge index files,
//! then computes single-linkage clusters over those files with a disjoint-set
//! forest. Indexing happens once; clustering can be repeated against
//! different cutoffs without re-reading the text.

mod builder;
mod cluster;
mod clusterer;
mod error;
mod filter;
pub mod format;
mod indexer;
mod interner;
mod memory;
mod paths;
mod union_find;

pub use crate::{
    builder::{ClustererBuilder, DEFAULT_INTERNER_CAPACITY, IndexerBuilder},
    cluster::{Cluster, ClusterId, Partition},
    clusterer::{ClusterReport, Clusterer, ClusteringOutcome},
    error::{ErrorCategory, LabelError, Location, NetclustError, NetclustErrorCode, Result},
    filter::{EdgeClass, EdgeFilter, WeightType, classify},
    format::HeaderLayout,
    indexer::{IndexOutputs, IndexReport, IndexSummary, Indexer, OutputNames},
    interner::{Interned, NodeIndex, NodeInterner},
    memory::{estimate_clustering_bytes, format_bytes},
    paths::{ClusterPaths, IndexPaths},
    union_find::DisjointSet,
};
