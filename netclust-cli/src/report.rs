//! Run summaries written to `.netindex.log` and `.netclust.log`.
//!
//! Both logs are a banner followed by aligned `key value` lines. Cutoffs use
//! two decimals; files a run did not produce are shown as `(None)`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use netclust_core::{ClusterPaths, ClusterReport, IndexReport, WeightType};

/// Banner title of indexing logs.
pub const INDEX_LOG_TITLE: &str = "Netindex Log";

/// Banner title of clustering logs.
pub const CLUSTER_LOG_TITLE: &str = "Netclust Log";

const ABSENT: &str = "(None)";
const STDOUT: &str = "(stdout)";
const KEY_WIDTH: usize = 19;

/// One `key value` line of a summary.
pub type Entry = (&'static str, String);

fn weight_type_name(weight_type: WeightType) -> &'static str {
    match weight_type {
        WeightType::Similarity => "Similarity",
        WeightType::Distance => "Distance",
    }
}

fn path_value(path: Option<&Path>, absent: &str) -> String {
    path.map_or_else(|| absent.to_owned(), |path| path.display().to_string())
}

/// Entries describing an indexing run whose log is written to `log`.
#[must_use]
pub fn index_entries(report: &IndexReport, log: &Path) -> Vec<Entry> {
    vec![
        ("InputFile", report.input.display().to_string()),
        (
            "WeightType",
            weight_type_name(report.filter.weight_type()).to_owned(),
        ),
        ("WeightCutoff", format!("{:.2}", report.filter.cutoff())),
        ("NumNodes", report.summary.node_count().to_string()),
        ("NumEdges", report.summary.edges_read().to_string()),
        ("NumEdgesPassed", report.summary.edges_accepted().to_string()),
        ("OutputLogFile", log.display().to_string()),
        ("OutputNidxFile", report.nodes.display().to_string()),
        ("OutputEidxFile", report.edges.display().to_string()),
        ("OutputSubeFile", path_value(report.subset.as_deref(), ABSENT)),
    ]
}

/// Entries describing a clustering run. `clusters` is the listing file, or
/// `None` when clusters went to standard output.
#[must_use]
pub fn cluster_entries(
    report: &ClusterReport,
    paths: &ClusterPaths,
    clusters: Option<&Path>,
) -> Vec<Entry> {
    vec![
        ("InputFile", paths.input.display().to_string()),
        ("InputNidxFile", paths.nodes.display().to_string()),
        ("InputEidxFile", paths.edges.display().to_string()),
        ("OutputClstFile", path_value(clusters, STDOUT)),
        ("OutputLogFile", paths.log.display().to_string()),
        ("WeightType", weight_type_name(report.weight_type).to_owned()),
        ("WeightCutoff", format!("{:.2}", report.cutoff)),
        ("NumNodes", report.node_count.to_string()),
        ("NumEdges", report.edges_in_table.to_string()),
        ("NumEdgesPassed", report.edges_accepted.to_string()),
        ("NumClusters", report.non_singleton_count.to_string()),
        ("NumClusteredNodes", report.clustered_nodes.to_string()),
    ]
}

/// Writes a banner with `title` followed by `entries`.
///
/// # Errors
/// Returns any error raised by `writer`.
///
/// # Examples
/// ```
/// use netclust_cli::report::write_summary;
///
/// let mut buffer = Vec::new();
/// write_summary(&mut buffer, "Demo", &[("NumNodes", "5".to_owned())]).expect("buffer accepts writes");
/// let text = String::from_utf8(buffer).expect("utf-8");
/// assert!(text.contains(" NumNodes           5\n"));
/// ```
pub fn write_summary(mut writer: impl Write, title: &str, entries: &[Entry]) -> io::Result<()> {
    let rule = "*".repeat(title.len() + 4);
    writeln!(writer, "{rule}")?;
    writeln!(writer, "* {title} *")?;
    writeln!(writer, "{rule}")?;
    for (key, value) in entries {
        writeln!(writer, " {key:<KEY_WIDTH$}{value}")?;
    }
    writeln!(writer)?;
    writer.flush()
}

/// Creates `path` and writes the summary into it.
///
/// # Errors
/// Returns any error raised while creating or writing the file.
pub fn save_summary(path: &Path, title: &str, entries: &[Entry]) -> io::Result<()> {
    let file = File::create(path)?;
    write_summary(BufWriter::new(file), title, entries)
}
