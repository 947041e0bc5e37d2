//! Clustering pipeline: index files in, single-linkage partition out.

use tracing::{debug, info, instrument};

use crate::{
    Result,
    cluster::{Partition, extract_clusters},
    error::{Location, NetclustError},
    filter::{EdgeClass, EdgeFilter, WeightType},
    format::{EdgeTableReader, IndexedEdge, NodeTable},
    memory::{estimate_clustering_bytes, format_bytes},
    paths::ClusterPaths,
    union_find::DisjointSet,
};

/// Totals of a clustering run, as consumed by summaries and log files.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterReport {
    /// Weight type in force.
    pub weight_type: WeightType,
    /// Cutoff applied to every edge record.
    pub cutoff: f32,
    /// Nodes in the node index.
    pub node_count: u32,
    /// Records in the edge index.
    pub edges_in_table: u64,
    /// Records accepted by this run's cutoff.
    pub edges_accepted: u64,
    /// Clusters, singletons included.
    pub cluster_count: usize,
    /// Clusters with at least two members.
    pub non_singleton_count: usize,
    /// Nodes inside clusters with at least two members.
    pub clustered_nodes: u64,
}

/// Partition and counters produced by [`Clusterer::cluster`].
#[derive(Clone, Debug, PartialEq)]
pub struct ClusteringOutcome {
    partition: Partition,
    filter: EdgeFilter,
    edges_in_table: u64,
    edges_accepted: u64,
}

impl ClusteringOutcome {
    /// Clusters ordered by descending size.
    #[must_use]
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Consumes the outcome, returning its partition.
    #[must_use]
    pub fn into_partition(self) -> Partition {
        self.partition
    }

    /// Edge records read from the index.
    #[must_use]
    pub const fn edges_in_table(&self) -> u64 {
        self.edges_in_table
    }

    /// Edge records that passed this run's cutoff. May be lower than
    /// [`ClusteringOutcome::edges_in_table`] when the run uses a stricter
    /// cutoff than indexing did.
    #[must_use]
    pub const fn edges_accepted(&self) -> u64 {
        self.edges_accepted
    }

    /// Summarises the run.
    #[must_use]
    pub fn report(&self) -> ClusterReport {
        ClusterReport {
            weight_type: self.filter.weight_type(),
            cutoff: self.filter.cutoff(),
            node_count: self.partition.node_count(),
            edges_in_table: self.edges_in_table,
            edges_accepted: self.edges_accepted,
            cluster_count: self.partition.len(),
            non_singleton_count: self.partition.non_singleton_count(),
            clustered_nodes: self.partition.clustered_node_count(),
        }
    }
}

/// Computes connected components of the accepted-edge graph.
///
/// Edge records are filtered again with this clusterer's cutoff; the cutoff
/// used while indexing is not trusted.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use netclust_core::{ClustererBuilder, IndexOutputs, IndexerBuilder, format::{EdgeTable, NodeTable}};
///
/// let mut nodes = Cursor::new(Vec::new());
/// let mut edges = Cursor::new(Vec::new());
/// IndexerBuilder::new()
///     .build()
///     .expect("configuration is valid")
///     .index(
///         "A B 0.9\nB C 0.4\nD E 0.8\n".as_bytes(),
///         IndexOutputs::new(&mut nodes, &mut edges, std::io::sink()),
///     )
///     .expect("input is well formed");
///
/// let nodes = NodeTable::read_from(nodes.get_ref().as_slice(), "nodes").expect("nodes decode");
/// let edges = EdgeTable::read_from(edges.get_ref().as_slice(), "edges").expect("edges decode");
/// let outcome = ClustererBuilder::new()
///     .with_cutoff(0.5)
///     .build()
///     .expect("configuration is valid")
///     .cluster(nodes, edges.edges().iter().copied().map(Ok))
///     .expect("index is consistent");
/// assert_eq!(outcome.edges_in_table(), 3);
/// assert_eq!(outcome.edges_accepted(), 2);
/// let sizes: Vec<u32> = outcome.partition().iter().map(|cluster| cluster.size()).collect();
/// assert_eq!(sizes, [2, 2, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct Clusterer {
    filter: EdgeFilter,
}

impl Clusterer {
    pub(crate) fn new(filter: EdgeFilter) -> Self {
        Self { filter }
    }

    /// Weight type and cutoff applied to edge records.
    #[must_use]
    pub fn filter(&self) -> EdgeFilter {
        self.filter
    }

    /// Clusters `nodes` using the edge records yielded by `edges`.
    ///
    /// # Errors
    /// Returns [`NetclustError::NodeIndexOutOfRange`] for records pointing
    /// past the node table, [`NetclustError::InvalidWeight`] for weights
    /// outside the weight type's range, any error yielded by `edges` and
    /// [`NetclustError::Allocation`] when the forest cannot be reserved.
    #[instrument(
        name = "core.cluster",
        err,
        skip(self, nodes, edges),
        fields(
            nodes = nodes.len(),
            weight_type = %self.filter.weight_type(),
            cutoff = self.filter.cutoff(),
        ),
    )]
    pub fn cluster<I>(&self, nodes: NodeTable, edges: I) -> Result<ClusteringOutcome>
    where
        I: IntoIterator<Item = Result<IndexedEdge>>,
    {
        let node_count = nodes.len();
        debug!(
            estimate = %format_bytes(estimate_clustering_bytes(node_count, nodes.label_width())),
            "reserving clustering tables"
        );
        let mut forest = DisjointSet::new(node_count)?;

        let mut edges_in_table = 0_u64;
        let mut edges_accepted = 0_u64;
        for edge in edges {
            let edge = edge?;
            let location = Location::EdgeRecord(
                u32::try_from(edges_in_table)
                    .map_err(|_| NetclustError::CountOverflow { what: "edge count" })?,
            );
            edges_in_table += 1;
            for index in [edge.node_a, edge.node_b] {
                if index >= node_count {
                    return Err(NetclustError::NodeIndexOutOfRange {
                        location,
                        index,
                        node_count,
                    });
                }
            }
            match self.filter.classify(edge.weight) {
                EdgeClass::Accept => {
                    edges_accepted += 1;
                    forest.union(edge.node_a, edge.node_b);
                }
                EdgeClass::Reject => {}
                EdgeClass::Invalid => {
                    return Err(NetclustError::InvalidWeight {
                        location,
                        weight: edge.weight,
                        weight_type: self.filter.weight_type(),
                    });
                }
            }
        }
        debug!(edges_in_table, edges_accepted, "union phase completed");

        let roots = forest.into_roots();
        let partition = extract_clusters(&roots, nodes.into_labels())?;
        info!(
            clusters = partition.len(),
            non_singletons = partition.non_singleton_count(),
            edges_accepted,
            "clustering completed"
        );
        Ok(ClusteringOutcome {
            partition,
            filter: self.filter,
            edges_in_table,
            edges_accepted,
        })
    }

    /// Clusters the index files named by `paths`.
    ///
    /// Edge records stream from disk and are never held in memory at once.
    ///
    /// # Errors
    /// Returns [`NetclustError::Io`] when a file cannot be opened, the read
    /// errors of [`NodeTable`] and [`EdgeTableReader`], and the errors of
    /// [`Clusterer::cluster`].
    #[instrument(
        name = "core.cluster_files",
        err,
        skip(self, paths),
        fields(nodes = %paths.nodes.display(), edges = %paths.edges.display()),
    )]
    pub fn run(&self, paths: &ClusterPaths) -> Result<ClusteringOutcome> {
        let nodes = NodeTable::open(&paths.nodes)?;
        let edges = EdgeTableReader::open(&paths.edges)?;
        debug!(
            nodes = nodes.len(),
            edges = edges.declared_len(),
            "index headers read"
        );
        self.cluster(nodes, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{ClustererBuilder, format::NodeTableWriter};

    fn node_table(labels: &[&str]) -> NodeTable {
        let mut writer = NodeTableWriter::new(
            std::io::Cursor::new(Vec::new()),
            "nodes",
            8,
            crate::format::HeaderLayout::Rewrite,
        )
        .expect("width is valid");
        for label in labels {
            writer.push(label).expect("label fits");
        }
        let bytes = writer.finish().expect("finish succeeds").into_inner();
        NodeTable::read_from(bytes.as_slice(), "nodes").expect("table decodes")
    }

    fn clusterer(weight_type: WeightType, cutoff: f32) -> Clusterer {
        ClustererBuilder::new()
            .with_weight_type(weight_type)
            .with_cutoff(cutoff)
            .build()
            .expect("configuration is valid")
    }

    fn records(edges: &[(u32, u32, f32)]) -> Vec<Result<IndexedEdge>> {
        edges
            .iter()
            .map(|&(a, b, weight)| Ok(IndexedEdge::new(a, b, weight)))
            .collect()
    }

    #[rstest]
    fn five_node_scenario_yields_one_emitted_cluster() {
        let outcome = clusterer(WeightType::Similarity, 0.5)
            .cluster(
                node_table(&["A", "B", "C", "D", "E"]),
                records(&[(0, 1, 0.9), (1, 2, 0.9)]),
            )
            .expect("index is consistent");
        let emitted: Vec<&[String]> = outcome
            .partition()
            .non_singletons()
            .map(|cluster| cluster.members())
            .collect();
        assert_eq!(emitted, [["A", "B", "C"]]);
        let report = outcome.report();
        assert_eq!(report.node_count, 5);
        assert_eq!(report.cluster_count, 3);
        assert_eq!(report.non_singleton_count, 1);
        assert_eq!(report.clustered_nodes, 3);
    }

    #[rstest]
    fn stricter_cutoff_refilters_records() {
        let outcome = clusterer(WeightType::Distance, 0.2)
            .cluster(
                node_table(&["a", "b", "c"]),
                records(&[(0, 1, 0.1), (1, 2, 0.6)]),
            )
            .expect("index is consistent");
        assert_eq!(outcome.edges_in_table(), 2);
        assert_eq!(outcome.edges_accepted(), 1);
        let sizes: Vec<u32> = outcome.partition().iter().map(|c| c.size()).collect();
        assert_eq!(sizes, [2, 1]);
    }

    #[rstest]
    fn star_graph_collapses_to_one_cluster() {
        let labels: Vec<String> = (0..50).map(|node| format!("n{node}")).collect();
        let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let star: Vec<(u32, u32, f32)> = (1..50).map(|leaf| (0, leaf, 1.0)).collect();
        let outcome = clusterer(WeightType::Similarity, 0.0)
            .cluster(node_table(&label_refs), records(&star))
            .expect("index is consistent");
        assert_eq!(outcome.partition().len(), 1);
        assert_eq!(outcome.partition().clusters()[0].size(), 50);
    }

    #[rstest]
    fn empty_index_yields_no_clusters() {
        let outcome = clusterer(WeightType::Similarity, 0.0)
            .cluster(node_table(&[]), records(&[]))
            .expect("empty index is valid");
        assert!(outcome.partition().is_empty());
        assert_eq!(outcome.report().cluster_count, 0);
    }

    #[rstest]
    fn out_of_range_records_are_format_errors() {
        let err = clusterer(WeightType::Similarity, 0.0)
            .cluster(node_table(&["a", "b"]), records(&[(0, 1, 1.0), (1, 2, 1.0)]))
            .expect_err("record points past the table");
        assert!(matches!(
            err,
            NetclustError::NodeIndexOutOfRange {
                location: Location::EdgeRecord(1),
                index: 2,
                node_count: 2,
            }
        ));
    }

    #[rstest]
    fn invalid_stored_weights_are_fatal() {
        let err = clusterer(WeightType::Distance, 1.0)
            .cluster(node_table(&["a", "b"]), records(&[(0, 1, 1.5)]))
            .expect_err("weight is out of range");
        assert!(matches!(
            err,
            NetclustError::InvalidWeight {
                location: Location::EdgeRecord(0),
                ..
            }
        ));
    }

    #[rstest]
    fn reader_errors_propagate() {
        let truncated = vec![
            Ok(IndexedEdge::new(0, 1, 1.0)),
            Err(NetclustError::Truncated {
                resource: "edges".into(),
                section: "edge records",
            }),
        ];
        let err = clusterer(WeightType::Similarity, 0.0)
            .cluster(node_table(&["a", "b"]), truncated)
            .expect_err("truncation is fatal");
        assert!(matches!(err, NetclustError::Truncated { .. }));
    }
}
