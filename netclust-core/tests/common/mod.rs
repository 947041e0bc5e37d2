use std::collections::BTreeSet;

use netclust_core::{
    ClusterPaths, ClustererBuilder, ClusteringOutcome, IndexPaths, IndexReport, IndexerBuilder,
    WeightType,
};
use netclust_test_support::fixtures::EdgeListFixture;

/// Writes `text` to a fixture and indexes it.
pub fn index_text(text: &str, weight_type: WeightType, cutoff: f32) -> (EdgeListFixture, IndexReport) {
    let fixture = EdgeListFixture::new(text).expect("fixture writes");
    let report = IndexerBuilder::new()
        .with_weight_type(weight_type)
        .with_cutoff(cutoff)
        .build()
        .expect("configuration is valid")
        .run(&IndexPaths::for_input(fixture.path()))
        .expect("indexing succeeds");
    (fixture, report)
}

/// Clusters the index files next to `fixture`.
pub fn cluster_fixture(
    fixture: &EdgeListFixture,
    weight_type: WeightType,
    cutoff: f32,
) -> ClusteringOutcome {
    ClustererBuilder::new()
        .with_weight_type(weight_type)
        .with_cutoff(cutoff)
        .build()
        .expect("configuration is valid")
        .run(&ClusterPaths::for_input(fixture.path()))
        .expect("clustering succeeds")
}

/// Membership of every cluster, ignoring ids and order.
pub fn membership(outcome: &ClusteringOutcome) -> BTreeSet<BTreeSet<String>> {
    outcome
        .partition()
        .iter()
        .map(|cluster| cluster.members().iter().cloned().collect())
        .collect()
}
