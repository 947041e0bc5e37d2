//! Command implementations and argument parsing for the netclust CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use netclust_core::{
    ClusterPaths, ClusterReport, ClustererBuilder, HeaderLayout, IndexPaths, IndexReport,
    IndexerBuilder, NetclustError, Partition, WeightType, format::DEFAULT_LABEL_WIDTH,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use crate::output::{Listing, OutputMode, write_clusters};
use crate::report::{
    CLUSTER_LOG_TITLE, INDEX_LOG_TITLE, cluster_entries, index_entries, save_summary,
    write_summary,
};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "netclust",
    about = "Index weighted edge lists and extract single-linkage clusters."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build node and edge index files from a text edge list.
    Index(IndexCommand),
    /// Cluster a previously indexed edge list.
    Cluster(ClusterCommand),
}

/// How edge weights are interpreted.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum WeightArg {
    /// Larger weights are closer; edges at or above the cutoff are kept.
    #[default]
    Similarity,
    /// Smaller weights are closer; edges at or below the cutoff are kept.
    Distance,
}

impl From<WeightArg> for WeightType {
    fn from(value: WeightArg) -> Self {
        match value {
            WeightArg::Similarity => Self::Similarity,
            WeightArg::Distance => Self::Distance,
        }
    }
}

/// Weight interpretation shared by both commands.
#[derive(Debug, Args, Clone, Copy)]
pub struct WeightArgs {
    /// Interpretation of the third column.
    #[arg(
        long = "weight-type",
        value_enum,
        ignore_case = true,
        default_value_t = WeightArg::Similarity
    )]
    pub weight_type: WeightArg,

    /// Edge cutoff (defaults to 0 for similarity and 1 for distance).
    #[arg(long, allow_negative_numbers = true)]
    pub cutoff: Option<f32>,
}

/// Options accepted by the `index` command.
#[derive(Debug, Args, Clone)]
pub struct IndexCommand {
    /// Whitespace-separated `nodeA nodeB weight` edge list.
    pub path: PathBuf,

    /// Weight interpretation and cutoff.
    #[command(flatten)]
    pub weights: WeightArgs,

    /// Bytes reserved per label in the node index, terminator included.
    #[arg(long = "label-width", default_value_t = DEFAULT_LABEL_WIDTH)]
    pub label_width: u32,

    /// Buffer records in memory and write each header once.
    #[arg(long = "buffered-headers")]
    pub buffered_headers: bool,
}

/// Options accepted by the `cluster` command.
#[derive(Debug, Args, Clone)]
pub struct ClusterCommand {
    /// Edge list whose `.nidx` and `.eidx` files were built by `index`.
    pub path: PathBuf,

    /// Destination and layout of the cluster listing.
    #[arg(
        long = "output-mode",
        value_enum,
        ignore_case = true,
        default_value_t = OutputMode::F1
    )]
    pub output_mode: OutputMode,

    /// Weight interpretation and cutoff.
    #[command(flatten)]
    pub weights: WeightArgs,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Writing a cluster listing or log file failed.
    #[error("failed to write `{path}`: {source}")]
    Write {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Indexing or clustering failed.
    #[error(transparent)]
    Core(#[from] NetclustError),
}

/// Outcome of an `index` run.
#[derive(Debug, Clone)]
pub struct IndexRun {
    /// What the indexer read and wrote.
    pub report: IndexReport,
    /// Log file written for the run.
    pub log: PathBuf,
}

/// Outcome of a `cluster` run.
#[derive(Debug, Clone)]
pub struct ClusterRun {
    /// Counts gathered while clustering.
    pub report: ClusterReport,
    /// Files read and written by the run.
    pub paths: ClusterPaths,
    /// Selected output mode.
    pub mode: OutputMode,
    /// Every cluster, singletons included.
    pub partition: Partition,
    /// What went to the `.clst` file; `None` in standard-output modes.
    pub listing: Option<Listing>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// An `index` run.
    Index(IndexRun),
    /// A `cluster` run.
    Cluster(ClusterRun),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when indexing, clustering or writing results fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use netclust_cli::cli::{Cli, Command, ExecutionSummary, IndexCommand, WeightArg, WeightArgs, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let path = dir.path().join("graph.tsv");
/// std::fs::write(&path, "A B 0.9\nB C 0.9\nD E 0.1\n")?;
/// let cli = Cli {
///     command: Command::Index(IndexCommand {
///         path,
///         weights: WeightArgs { weight_type: WeightArg::Similarity, cutoff: Some(0.5) },
///         label_width: 30,
///         buffered_headers: false,
///     }),
/// };
/// let ExecutionSummary::Index(run) = run_cli(cli)? else { unreachable!() };
/// assert_eq!(run.report.summary.edges_accepted(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Index(command) => {
            span.record("command", field::display("index"));
            run_index(command).map(ExecutionSummary::Index)
        }
        Command::Cluster(command) => {
            span.record("command", field::display("cluster"));
            run_cluster(command).map(ExecutionSummary::Cluster)
        }
    }
}

#[instrument(
    name = "cli.index",
    err,
    skip(command),
    fields(path = %command.path.display(), label_width = command.label_width),
)]
pub(super) fn run_index(command: IndexCommand) -> Result<IndexRun, CliError> {
    let IndexCommand {
        path,
        weights,
        label_width,
        buffered_headers,
    } = command;
    let layout = if buffered_headers {
        HeaderLayout::Buffered
    } else {
        HeaderLayout::Rewrite
    };
    let mut builder = IndexerBuilder::new()
        .with_weight_type(weights.weight_type.into())
        .with_label_width(label_width)
        .with_header_layout(layout);
    if let Some(cutoff) = weights.cutoff {
        builder = builder.with_cutoff(cutoff);
    }
    let indexer = builder.build()?;

    let paths = IndexPaths::for_input(&path);
    let report = indexer.run(&paths)?;
    save_summary(&paths.log, INDEX_LOG_TITLE, &index_entries(&report, &paths.log))
        .map_err(|source| write_error(&paths.log, source))?;
    info!(log = %paths.log.display(), "index log written");

    Ok(IndexRun {
        report,
        log: paths.log,
    })
}

#[instrument(
    name = "cli.cluster",
    err,
    skip(command),
    fields(path = %command.path.display(), mode = ?command.output_mode),
)]
pub(super) fn run_cluster(command: ClusterCommand) -> Result<ClusterRun, CliError> {
    let ClusterCommand {
        path,
        output_mode,
        weights,
    } = command;
    let mut builder = ClustererBuilder::new().with_weight_type(weights.weight_type.into());
    if let Some(cutoff) = weights.cutoff {
        builder = builder.with_cutoff(cutoff);
    }
    let clusterer = builder.build()?;

    let paths = ClusterPaths::for_input(&path);
    let outcome = clusterer.run(&paths)?;
    let report = outcome.report();
    let partition = outcome.into_partition();

    let listing = if output_mode.writes_file() {
        let listing = save_clusters(&paths.clusters, &partition, output_mode)?;
        info!(
            path = %paths.clusters.display(),
            clusters = listing.clusters,
            members = listing.members,
            "cluster listing written"
        );
        Some(listing)
    } else {
        None
    };

    let clusters_file = listing.map(|_| paths.clusters.as_path());
    save_summary(
        &paths.log,
        CLUSTER_LOG_TITLE,
        &cluster_entries(&report, &paths, clusters_file),
    )
    .map_err(|source| write_error(&paths.log, source))?;
    info!(log = %paths.log.display(), "cluster log written");

    Ok(ClusterRun {
        report,
        paths,
        mode: output_mode,
        partition,
        listing,
    })
}

fn save_clusters(path: &Path, partition: &Partition, mode: OutputMode) -> Result<Listing, CliError> {
    let file = File::create(path).map_err(|source| write_error(path, source))?;
    write_clusters(partition, mode.layout(), BufWriter::new(file))
        .map_err(|source| write_error(path, source))
}

fn write_error(path: &Path, source: io::Error) -> CliError {
    CliError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Renders `summary` to `writer`.
///
/// Standard-output cluster modes print the cluster listing; every other run
/// prints the same summary that went to its log file.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Index(run) => write_summary(
            &mut writer,
            INDEX_LOG_TITLE,
            &index_entries(&run.report, &run.log),
        ),
        ExecutionSummary::Cluster(run) if run.mode.writes_file() => write_summary(
            &mut writer,
            CLUSTER_LOG_TITLE,
            &cluster_entries(&run.report, &run.paths, Some(&run.paths.clusters)),
        ),
        ExecutionSummary::Cluster(run) => {
            write_clusters(&run.partition, run.mode.layout(), &mut writer).map(|_| ())
        }
    }
}
