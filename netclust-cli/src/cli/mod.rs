//! Command-line interface orchestration for netclust.
//!
//! `index` turns a text edge list into node and edge index files; `cluster`
//! reads those files back and lists single-linkage clusters.

mod commands;

pub use commands::{
    Cli, CliError, ClusterCommand, ClusterRun, Command, ExecutionSummary, IndexCommand, IndexRun,
    WeightArg, WeightArgs, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
