//! Benchmark parameter types.

use std::fmt;

use netclust_core::HeaderLayout;

/// Parameters for an indexing benchmark run.
#[derive(Clone, Debug)]
pub struct IndexBenchParams {
    /// Number of distinct node labels.
    pub node_count: usize,
    /// Number of edge lines.
    pub edge_count: usize,
    /// How the index files receive their headers.
    pub layout: HeaderLayout,
}

impl fmt::Display for IndexBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = match self.layout {
            HeaderLayout::Rewrite => "rewrite",
            HeaderLayout::Buffered => "buffered",
        };
        write!(
            f,
            "n={},e={},{layout}",
            self.node_count, self.edge_count
        )
    }
}

/// Parameters for a clustering benchmark run.
#[derive(Clone, Debug)]
pub struct ClusterBenchParams {
    /// Number of distinct node labels.
    pub node_count: usize,
    /// Similarity cutoff applied while clustering.
    pub cutoff: f32,
}

impl fmt::Display for ClusterBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},cutoff={}", self.node_count, self.cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn ids_name_every_parameter() {
        let index = IndexBenchParams {
            node_count: 10,
            edge_count: 40,
            layout: HeaderLayout::Buffered,
        };
        assert_eq!(index.to_string(), "n=10,e=40,buffered");
        let cluster = ClusterBenchParams {
            node_count: 10,
            cutoff: 0.5,
        };
        assert_eq!(cluster.to_string(), "n=10,cutoff=0.5");
    }
}
