//! Indexing pipeline: a text edge list in, node and edge index files out.
//!
//! Each line holds `nodeA nodeB weight`. Both endpoints of every well-formed
//! line are interned, so nodes that only appear on rejected edges still get a
//! record and end up as singletons when clustering. Accepted edges go to the
//! edge index and, as text, to the subset stream.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    error::{LabelError, Location, NetclustError},
    filter::{EdgeClass, EdgeFilter},
    format::{EdgeTableWriter, HeaderLayout, IndexedEdge, NodeTableWriter, check_label},
    interner::{NodeIndex, NodeInterner},
    paths::IndexPaths,
};

/// Names used for the streams of an indexing run in errors and logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputNames {
    /// Text edge list.
    pub input: Arc<str>,
    /// Node index.
    pub nodes: Arc<str>,
    /// Edge index.
    pub edges: Arc<str>,
    /// Accepted subset.
    pub subset: Arc<str>,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            input: Arc::from("input"),
            nodes: Arc::from("node index"),
            edges: Arc::from("edge index"),
            subset: Arc::from("subset"),
        }
    }
}

impl OutputNames {
    /// Uses the displayed file paths as names.
    #[must_use]
    pub fn for_paths(paths: &IndexPaths) -> Self {
        let name = |path: &Path| -> Arc<str> { Arc::from(path.display().to_string()) };
        Self {
            input: name(&paths.input),
            nodes: name(&paths.nodes),
            edges: name(&paths.edges),
            subset: name(&paths.subset),
        }
    }
}

/// Destinations for one indexing run.
///
/// The subset stream receives every accepted edge. Whether it is worth
/// keeping is decided afterwards by [`IndexSummary::subset_kept`].
#[derive(Debug)]
pub struct IndexOutputs<N, E, S> {
    /// Node index destination.
    pub nodes: N,
    /// Edge index destination.
    pub edges: E,
    /// Subset text destination.
    pub subset: S,
    /// Stream names for diagnostics.
    pub names: OutputNames,
}

impl<N, E, S> IndexOutputs<N, E, S> {
    /// Bundles the three destinations under default names.
    pub fn new(nodes: N, edges: E, subset: S) -> Self {
        Self {
            nodes,
            edges,
            subset,
            names: OutputNames::default(),
        }
    }

    /// Replaces the stream names.
    #[must_use]
    pub fn with_names(mut self, names: OutputNames) -> Self {
        self.names = names;
        self
    }
}

/// Counts produced by an indexing run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexSummary {
    node_count: u32,
    edges_read: u64,
    edges_accepted: u32,
}

impl IndexSummary {
    /// Distinct labels written to the node index.
    #[must_use]
    pub const fn node_count(&self) -> u32 {
        self.node_count
    }

    /// Well-formed input lines.
    #[must_use]
    pub const fn edges_read(&self) -> u64 {
        self.edges_read
    }

    /// Edges written to the edge index.
    #[must_use]
    pub const fn edges_accepted(&self) -> u32 {
        self.edges_accepted
    }

    /// Edges excluded by the cutoff.
    #[must_use]
    pub const fn edges_rejected(&self) -> u64 {
        self.edges_read.saturating_sub(self.edges_accepted as u64)
    }

    /// Whether the subset differs from both nothing and the full input.
    #[must_use]
    pub const fn subset_kept(&self) -> bool {
        self.edges_accepted > 0 && (self.edges_accepted as u64) < self.edges_read
    }
}

/// Result of [`Indexer::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct IndexReport {
    /// Text edge list that was indexed.
    pub input: PathBuf,
    /// Weight type and cutoff in force.
    pub filter: EdgeFilter,
    /// Counts of the run.
    pub summary: IndexSummary,
    /// Node index file.
    pub nodes: PathBuf,
    /// Edge index file.
    pub edges: PathBuf,
    /// Subset file, absent when it was empty or equal to the input.
    pub subset: Option<PathBuf>,
}

/// Files created by an indexing run. Unless committed, every tracked file is
/// removed on drop.
#[derive(Debug, Default)]
struct OutputGuard {
    created: Vec<PathBuf>,
    committed: bool,
}

impl OutputGuard {
    fn create(&mut self, path: &Path, resource: &Arc<str>) -> Result<BufWriter<File>> {
        let file = File::create(path).map_err(NetclustError::io(resource))?;
        self.created.push(path.to_path_buf());
        Ok(BufWriter::new(file))
    }

    fn discard(&mut self, path: &Path, resource: &Arc<str>) -> Result<()> {
        fs::remove_file(path).map_err(NetclustError::io(resource))?;
        self.created.retain(|created| created != path);
        debug!(path = %path.display(), "subset omitted");
        Ok(())
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for path in &self.created {
            match fs::remove_file(path) {
                Ok(()) => warn!(path = %path.display(), "removed partial index output"),
                Err(error) => warn!(
                    path = %path.display(),
                    error = %error,
                    "failed to remove partial index output"
                ),
            }
        }
    }
}

/// One parsed input line.
#[derive(Debug)]
struct TextEdge<'a> {
    node_a: &'a str,
    node_b: &'a str,
    weight: f32,
}

fn parse_line(line: &str, line_number: u64) -> Result<TextEdge<'_>> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(node_a), Some(node_b), Some(raw), None) => {
            let weight = raw
                .parse::<f32>()
                .map_err(|_| NetclustError::UnparsableWeight {
                    line: line_number,
                    raw: raw.to_owned(),
                })?;
            Ok(TextEdge {
                node_a,
                node_b,
                weight,
            })
        }
        _ => Err(NetclustError::MalformedLine {
            line: line_number,
            tokens: line.split_whitespace().count(),
        }),
    }
}

fn intern_label<W: Write + Seek>(
    interner: &mut NodeInterner,
    table: &mut NodeTableWriter<W>,
    label: &str,
    line_number: u64,
) -> Result<NodeIndex> {
    if let Some(index) = interner.get(label) {
        return Ok(index);
    }
    check_label(label, table.label_width()).map_err(|source| NetclustError::InvalidLabel {
        location: Location::Line(line_number),
        source,
    })?;
    let interned = interner.intern(label)?;
    let written = table.push(label)?;
    debug_assert_eq!(written, interned.index, "node records follow interning order");
    Ok(interned.index)
}

/// Converts text edge lists into node and edge index files.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use netclust_core::{IndexOutputs, IndexerBuilder, format::NodeTable};
///
/// let indexer = IndexerBuilder::new()
///     .with_cutoff(0.5)
///     .build()
///     .expect("configuration is valid");
/// let mut nodes = Cursor::new(Vec::new());
/// let mut edges = Cursor::new(Vec::new());
/// let mut subset = Vec::new();
/// let summary = indexer
///     .index(
///         "A B 0.9\nB C 0.9\nD E 0.1\n".as_bytes(),
///         IndexOutputs::new(&mut nodes, &mut edges, &mut subset),
///     )
///     .expect("input is well formed");
/// assert_eq!(summary.node_count(), 5);
/// assert_eq!(summary.edges_accepted(), 2);
///
/// let table = NodeTable::read_from(nodes.get_ref().as_slice(), "nodes").expect("table decodes");
/// assert_eq!(table.labels(), ["A", "B", "C", "D", "E"]);
/// ```
#[derive(Clone, Debug)]
pub struct Indexer {
    filter: EdgeFilter,
    label_width: NonZeroU32,
    interner_capacity: NonZeroUsize,
    header_layout: HeaderLayout,
}

impl Indexer {
    pub(crate) fn new(
        filter: EdgeFilter,
        label_width: NonZeroU32,
        interner_capacity: NonZeroUsize,
        header_layout: HeaderLayout,
    ) -> Self {
        Self {
            filter,
            label_width,
            interner_capacity,
            header_layout,
        }
    }

    /// Weight type and cutoff applied while indexing.
    #[must_use]
    pub fn filter(&self) -> EdgeFilter {
        self.filter
    }

    /// Record width of node labels.
    #[must_use]
    pub fn label_width(&self) -> NonZeroU32 {
        self.label_width
    }

    /// Initial interner capacity.
    #[must_use]
    pub fn interner_capacity(&self) -> NonZeroUsize {
        self.interner_capacity
    }

    /// How index headers are written.
    #[must_use]
    pub fn header_layout(&self) -> HeaderLayout {
        self.header_layout
    }

    /// Streams `input` into `outputs`.
    ///
    /// On error the outputs hold partial data; callers writing to files are
    /// expected to remove them. [`Indexer::run`] does so.
    ///
    /// # Errors
    /// Returns [`NetclustError::MalformedLine`] for lines without exactly
    /// three tokens, [`NetclustError::UnparsableWeight`] and
    /// [`NetclustError::InvalidWeight`] for bad weights,
    /// [`NetclustError::InvalidLabel`] for lines that are not UTF-8 or labels
    /// that do not fit a record and [`NetclustError::Io`] when reading or
    /// writing fails.
    #[instrument(
        name = "core.index",
        err,
        skip(self, input, outputs),
        fields(
            input = %outputs.names.input,
            weight_type = %self.filter.weight_type(),
            cutoff = self.filter.cutoff(),
        ),
    )]
    pub fn index<R, N, E, S>(&self, mut input: R, outputs: IndexOutputs<N, E, S>) -> Result<IndexSummary>
    where
        R: BufRead,
        N: Write + Seek,
        E: Write + Seek,
        S: Write,
    {
        let IndexOutputs {
            nodes,
            edges,
            mut subset,
            names,
        } = outputs;
        let mut interner = NodeInterner::with_capacity(self.interner_capacity.get())?;
        let mut node_table = NodeTableWriter::new(
            nodes,
            Arc::clone(&names.nodes),
            self.label_width.get(),
            self.header_layout,
        )?;
        let mut edge_table =
            EdgeTableWriter::new(edges, Arc::clone(&names.edges), self.header_layout)?;

        let mut raw = Vec::new();
        let mut line_number = 0_u64;
        loop {
            raw.clear();
            let read = input
                .read_until(b'\n', &mut raw)
                .map_err(NetclustError::io(&names.input))?;
            if read == 0 {
                break;
            }
            line_number += 1;
            let line =
                std::str::from_utf8(&raw).map_err(|_| NetclustError::InvalidLabel {
                    location: Location::Line(line_number),
                    source: LabelError::NotUtf8,
                })?;
            let edge = parse_line(line, line_number)?;
            let class = self.filter.classify(edge.weight);
            if class == EdgeClass::Invalid {
                return Err(NetclustError::InvalidWeight {
                    location: Location::Line(line_number),
                    weight: edge.weight,
                    weight_type: self.filter.weight_type(),
                });
            }
            let node_a = intern_label(&mut interner, &mut node_table, edge.node_a, line_number)?;
            let node_b = intern_label(&mut interner, &mut node_table, edge.node_b, line_number)?;
            if class == EdgeClass::Accept {
                edge_table.push(IndexedEdge::new(node_a, node_b, edge.weight))?;
                writeln!(
                    subset,
                    "{}\t{}\t{:.6}",
                    edge.node_a, edge.node_b, edge.weight
                )
                .map_err(NetclustError::io(&names.subset))?;
            }
        }

        let summary = IndexSummary {
            node_count: node_table.len(),
            edges_read: line_number,
            edges_accepted: edge_table.len(),
        };
        node_table.finish()?;
        edge_table.finish()?;
        subset.flush().map_err(NetclustError::io(&names.subset))?;
        info!(
            nodes = summary.node_count,
            edges_read = summary.edges_read,
            edges_accepted = summary.edges_accepted,
            edges_rejected = summary.edges_rejected(),
            "indexing completed"
        );
        Ok(summary)
    }

    /// Indexes the file at `paths.input`, writing the files named by `paths`.
    ///
    /// Any error removes every output created so far. The subset file is
    /// removed when [`IndexSummary::subset_kept`] is `false`.
    ///
    /// # Errors
    /// Returns the errors of [`Indexer::index`] and [`NetclustError::Io`]
    /// when a file cannot be opened, created or removed.
    #[instrument(
        name = "core.index_files",
        err,
        skip(self, paths),
        fields(input = %paths.input.display()),
    )]
    pub fn run(&self, paths: &IndexPaths) -> Result<IndexReport> {
        let names = OutputNames::for_paths(paths);
        let input = File::open(&paths.input).map_err(NetclustError::io(&names.input))?;

        let mut guard = OutputGuard::default();
        let nodes = guard.create(&paths.nodes, &names.nodes)?;
        let edges = guard.create(&paths.edges, &names.edges)?;
        let subset = guard.create(&paths.subset, &names.subset)?;
        let outputs = IndexOutputs::new(nodes, edges, subset).with_names(names.clone());
        let summary = self.index(BufReader::new(input), outputs)?;

        let subset = if summary.subset_kept() {
            Some(paths.subset.clone())
        } else {
            guard.discard(&paths.subset, &names.subset)?;
            None
        };
        guard.commit();
        Ok(IndexReport {
            input: paths.input.clone(),
            filter: self.filter,
            summary,
            nodes: paths.nodes.clone(),
            edges: paths.edges.clone(),
            subset,
        })
    }
}
