//! Small helpers shared across CLI tests.

use std::path::PathBuf;

use netclust_test_support::fixtures::EdgeListFixture;

use super::{
    Cli, CliError, ClusterCommand, ClusterRun, Command, ExecutionSummary, IndexCommand, IndexRun,
    WeightArg, WeightArgs, run_cli,
};
use crate::output::OutputMode;

pub(super) fn fixture(contents: &str) -> EdgeListFixture {
    match EdgeListFixture::new(contents) {
        Ok(fixture) => fixture,
        Err(err) => panic!("failed to write edge list: {err}"),
    }
}

pub(super) fn weights(weight_type: WeightArg, cutoff: Option<f32>) -> WeightArgs {
    WeightArgs {
        weight_type,
        cutoff,
    }
}

pub(super) fn index_cli(path: PathBuf, weights: WeightArgs) -> Cli {
    Cli {
        command: Command::Index(IndexCommand {
            path,
            weights,
            label_width: 30,
            buffered_headers: false,
        }),
    }
}

pub(super) fn cluster_cli(path: PathBuf, output_mode: OutputMode, weights: WeightArgs) -> Cli {
    Cli {
        command: Command::Cluster(ClusterCommand {
            path,
            output_mode,
            weights,
        }),
    }
}

pub(super) fn expect_index(cli: Cli) -> IndexRun {
    match run_cli(cli) {
        Ok(ExecutionSummary::Index(run)) => run,
        Ok(other) => panic!("expected an index summary, got {other:?}"),
        Err(err) => panic!("index run failed: {err}"),
    }
}

pub(super) fn expect_cluster(cli: Cli) -> ClusterRun {
    match run_cli(cli) {
        Ok(ExecutionSummary::Cluster(run)) => run,
        Ok(other) => panic!("expected a cluster summary, got {other:?}"),
        Err(err) => panic!("cluster run failed: {err}"),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
