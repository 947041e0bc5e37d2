//! Seeded synthetic edge lists.
//!
//! Edges join uniformly chosen node pairs with weights uniform in `[0, 1)`,
//! so a similarity cutoff `c` keeps roughly `1 - c` of them.

use std::fmt::Write as _;
use std::io::{self, Cursor};

use netclust_core::{
    IndexOutputs, Indexer, Result as CoreResult,
    format::{EdgeTable, NodeTable},
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors that may occur during synthetic graph generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// Fewer than two nodes were requested.
    #[error("a graph needs at least two nodes, got {node_count}")]
    TooFewNodes {
        /// Requested node count.
        node_count: usize,
    },
}

/// Configuration for synthetic graph generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of distinct node labels.
    pub node_count: usize,
    /// Number of edge lines.
    pub edge_count: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A text edge list generated from a [`SyntheticConfig`].
///
/// # Examples
///
/// ```
/// use netclust_benches::source::{SyntheticConfig, SyntheticGraph};
///
/// let config = SyntheticConfig { node_count: 4, edge_count: 3, seed: 7 };
/// let graph = SyntheticGraph::generate(&config).expect("valid config");
/// assert_eq!(graph.text().lines().count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticGraph {
    text: String,
    edge_count: usize,
}

/// Node and edge tables decoded from an in-memory indexing run.
#[derive(Clone, Debug)]
pub struct IndexedGraph {
    /// Decoded node index.
    pub nodes: NodeTable,
    /// Decoded edge index.
    pub edges: EdgeTable,
}

impl SyntheticGraph {
    /// Generates the edge list eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::TooFewNodes`] if `node_count` is below two.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        if config.node_count < 2 {
            return Err(SyntheticError::TooFewNodes {
                node_count: config.node_count,
            });
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut text = String::with_capacity(config.edge_count.saturating_mul(24));
        for _ in 0..config.edge_count {
            let a = rng.gen_range(0..config.node_count);
            let b = rng.gen_range(0..config.node_count);
            let weight: f32 = rng.gen_range(0.0..1.0);
            let _ = writeln!(text, "v{a}\tv{b}\t{weight:.4}");
        }

        Ok(Self {
            text,
            edge_count: config.edge_count,
        })
    }

    /// The edge list as text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of edge lines.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Indexes the graph into memory buffers and decodes the result.
    ///
    /// # Errors
    ///
    /// Propagates any indexing or decoding failure.
    pub fn index_with(&self, indexer: &Indexer) -> CoreResult<IndexedGraph> {
        let mut nodes = Cursor::new(Vec::new());
        let mut edges = Cursor::new(Vec::new());
        indexer.index(
            self.text.as_bytes(),
            IndexOutputs::new(&mut nodes, &mut edges, io::sink()),
        )?;
        Ok(IndexedGraph {
            nodes: NodeTable::read_from(nodes.get_ref().as_slice(), "node index")?,
            edges: EdgeTable::read_from(edges.get_ref().as_slice(), "edge index")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use netclust_core::IndexerBuilder;
    use rstest::rstest;

    #[rstest]
    fn same_seed_same_graph() {
        let config = SyntheticConfig {
            node_count: 50,
            edge_count: 200,
            seed: 42,
        };
        let first = SyntheticGraph::generate(&config).expect("valid config");
        let second = SyntheticGraph::generate(&config).expect("valid config");
        assert_eq!(first.text(), second.text());
        assert_eq!(first.edge_count(), 200);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn rejects_degenerate_node_counts(#[case] node_count: usize) {
        let config = SyntheticConfig {
            node_count,
            edge_count: 1,
            seed: 1,
        };
        assert_eq!(
            SyntheticGraph::generate(&config).expect_err("too few nodes"),
            SyntheticError::TooFewNodes { node_count }
        );
    }

    #[rstest]
    fn indexes_in_memory() {
        let config = SyntheticConfig {
            node_count: 20,
            edge_count: 100,
            seed: 3,
        };
        let graph = SyntheticGraph::generate(&config).expect("valid config");
        let indexer = IndexerBuilder::new().build().expect("defaults are valid");
        let indexed = graph.index_with(&indexer).expect("graph indexes");
        assert!(indexed.nodes.len() <= 20);
        assert_eq!(indexed.edges.len(), 100);
    }
}
