//! Clustering benchmarks.
//!
//! Measures union-find over decoded index tables followed by cluster
//! extraction, at several similarity cutoffs over the same graph.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use netclust_benches::{
    error::BenchSetupError,
    params::ClusterBenchParams,
    source::{SyntheticConfig, SyntheticGraph},
};
use netclust_core::{ClustererBuilder, IndexerBuilder};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Node counts to benchmark; each graph has three edges per node.
const NODE_COUNTS: &[usize] = &[1_000, 10_000, 100_000];

/// Similarity cutoffs applied while clustering.
const CUTOFFS: &[f32] = &[0.25, 0.5, 0.9];

fn cluster_index_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("cluster_index");
    group.sample_size(20);
    let indexer = IndexerBuilder::new().build()?;

    for &node_count in NODE_COUNTS {
        let graph = SyntheticGraph::generate(&SyntheticConfig {
            node_count,
            edge_count: node_count.saturating_mul(3),
            seed: SEED,
        })?;
        let indexed = graph.index_with(&indexer)?;

        for &cutoff in CUTOFFS {
            let clusterer = ClustererBuilder::new().with_cutoff(cutoff).build()?;
            let params = ClusterBenchParams { node_count, cutoff };

            group.bench_with_input(
                BenchmarkId::from_parameter(&params),
                &indexed,
                |b, indexed| {
                    b.iter(|| {
                        let edges = indexed.edges.edges().iter().copied().map(Ok);
                        match clusterer.cluster(indexed.nodes.clone(), edges) {
                            Ok(outcome) => outcome,
                            Err(err) => panic!("clustering failed during benchmark: {err}"),
                        }
                    });
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn cluster_index(c: &mut Criterion) {
    if let Err(err) = cluster_index_impl(c) {
        panic!("cluster_index benchmark setup failed: {err}");
    }
}

criterion_group!(benches, cluster_index);
criterion_main!(benches);
