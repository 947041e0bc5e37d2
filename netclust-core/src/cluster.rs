//! Cluster extraction from resolved union-find roots.

use std::num::NonZeroU32;

use crate::{
    Result,
    error::NetclustError,
    interner::NodeIndex,
    memory::{filled_vec, reserve_vec},
};

/// One-based cluster identifier, assigned in order of first appearance during
/// an ascending scan over node indices.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClusterId(NonZeroU32);

impl ClusterId {
    /// Wraps `id`, returning `None` for zero.
    ///
    /// # Examples
    /// ```
    /// use netclust_core::ClusterId;
    ///
    /// assert_eq!(ClusterId::new(3).map(ClusterId::get), Some(3));
    /// assert!(ClusterId::new(0).is_none());
    /// ```
    #[must_use]
    pub const fn new(id: u32) -> Option<Self> {
        match NonZeroU32::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// A connected component of the accepted-edge graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    id: ClusterId,
    size: u32,
    members: Vec<String>,
}

impl Cluster {
    /// Identifier of the cluster.
    #[must_use]
    pub const fn id(&self) -> ClusterId {
        self.id
    }

    /// Number of members.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Member labels in ascending node index order.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Whether the cluster holds a single node.
    #[must_use]
    pub const fn is_singleton(&self) -> bool {
        self.size < 2
    }
}

/// Every node's cluster, ordered by descending cluster size.
///
/// Singletons are kept so that sizes add up to the node count;
/// [`Partition::non_singletons`] yields the clusters meant for output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    clusters: Vec<Cluster>,
    node_count: u32,
}

impl Partition {
    /// All clusters, largest first.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Iterates over all clusters, largest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }

    /// Iterates over clusters with at least two members, largest first.
    pub fn non_singletons(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().filter(|cluster| !cluster.is_singleton())
    }

    /// Number of clusters, singletons included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Whether the partition has no clusters, which only happens for an
    /// empty node table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of partitioned nodes.
    #[must_use]
    pub const fn node_count(&self) -> u32 {
        self.node_count
    }

    /// Number of clusters with at least two members.
    #[must_use]
    pub fn non_singleton_count(&self) -> usize {
        self.non_singletons().count()
    }

    /// Number of nodes inside clusters with at least two members.
    #[must_use]
    pub fn clustered_node_count(&self) -> u64 {
        self.non_singletons()
            .map(|cluster| u64::from(cluster.size))
            .sum()
    }

    /// Consumes the partition, returning its clusters largest first.
    #[must_use]
    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a Cluster;
    type IntoIter = std::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Groups `labels` by their resolved `roots`.
///
/// `roots[i]` must be the canonical root of node `i` and `labels[i]` its
/// label. Cluster ids follow the first appearance of each root while scanning
/// nodes in ascending order; members keep ascending node order. The result is
/// sorted by descending size with a stable sort, so equal-sized clusters stay
/// in id order.
pub(crate) fn extract_clusters(roots: &[NodeIndex], labels: Vec<String>) -> Result<Partition> {
    debug_assert_eq!(roots.len(), labels.len(), "one label per resolved root");
    let node_count = u32::try_from(roots.len())
        .map_err(|_| NetclustError::CountOverflow { what: "node count" })?;

    // Slot per root: 0 while unassigned, otherwise the one-based cluster id.
    let mut cluster_of_root = filled_vec(roots.len(), 0_u32, "cluster ids")?;
    let mut sizes: Vec<u32> = Vec::new();
    for &root in roots {
        let slot = &mut cluster_of_root[root as usize];
        if *slot == 0 {
            sizes.push(0);
            *slot = u32::try_from(sizes.len())
                .map_err(|_| NetclustError::CountOverflow { what: "cluster count" })?;
        }
        sizes[*slot as usize - 1] += 1;
    }

    let mut clusters = reserve_vec(sizes.len(), "clusters")?;
    for (id, &size) in (1..).zip(&sizes) {
        let id = ClusterId::new(id).ok_or(NetclustError::CountOverflow {
            what: "cluster count",
        })?;
        clusters.push(Cluster {
            id,
            size,
            members: reserve_vec(size as usize, "cluster members")?,
        });
    }

    for (&root, label) in roots.iter().zip(labels) {
        let slot = cluster_of_root[root as usize] as usize - 1;
        clusters[slot].members.push(label);
    }

    clusters.sort_by(|left, right| right.size.cmp(&left.size));
    Ok(Partition {
        clusters,
        node_count,
    })
}
