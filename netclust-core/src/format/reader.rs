//! Readers for node and edge index files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use super::{EDGE_HEADER_LEN, EDGE_RECORD_LEN, IndexedEdge, NODE_HEADER_LEN, decode_label};
use crate::{
    Result,
    error::{Location, NetclustError},
    interner::NodeIndex,
    memory::{push_checked, reserve_vec},
};

/// Most records reserved up front. Header counts are untrusted, so larger
/// tables grow as their records actually arrive.
const RESERVE_LIMIT: usize = 1 << 16;

fn bounded_reserve<T>(declared: u32, what: &'static str) -> Result<Vec<T>> {
    reserve_vec((declared as usize).min(RESERVE_LIMIT), what)
}

fn open_file(path: &Path) -> Result<(BufReader<File>, Arc<str>)> {
    let resource: Arc<str> = Arc::from(path.display().to_string());
    let file = File::open(path).map_err(NetclustError::io(&resource))?;
    Ok((BufReader::new(file), resource))
}

/// Node labels indexed by [`NodeIndex`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeTable {
    labels: Vec<String>,
    label_width: u32,
}

impl NodeTable {
    /// Reads a node index from `reader`.
    ///
    /// # Errors
    /// Returns [`NetclustError::Truncated`] when the stream holds fewer labels
    /// than its header announces, [`NetclustError::CorruptHeader`] for a zero
    /// label width, [`NetclustError::InvalidLabel`] for records that are not
    /// UTF-8, and [`NetclustError::Allocation`] when the table cannot be
    /// reserved.
    pub fn read_from<R: Read>(mut reader: R, resource: impl Into<Arc<str>>) -> Result<Self> {
        let resource = resource.into();
        let mut header = [0_u8; NODE_HEADER_LEN];
        reader
            .read_exact(&mut header)
            .map_err(NetclustError::read(&resource, "node header"))?;
        let [c0, c1, c2, c3, w0, w1, w2, w3] = header;
        let node_count = u32::from_le_bytes([c0, c1, c2, c3]);
        let label_width = u32::from_le_bytes([w0, w1, w2, w3]);
        if label_width == 0 && node_count > 0 {
            return Err(NetclustError::CorruptHeader {
                resource,
                reason: "label width is zero",
            });
        }

        let mut labels = bounded_reserve(node_count, "node labels")?;
        // Filled from the bytes actually present, so a corrupt width cannot
        // force a large allocation before the shortfall is noticed.
        let mut record = Vec::new();
        for index in 0..node_count {
            record.clear();
            (&mut reader)
                .take(u64::from(label_width))
                .read_to_end(&mut record)
                .map_err(NetclustError::read(&resource, "node labels"))?;
            if record.len() < label_width as usize {
                return Err(NetclustError::Truncated {
                    resource,
                    section: "node labels",
                });
            }
            let label = decode_label(&record).map_err(|source| NetclustError::InvalidLabel {
                location: Location::NodeRecord(index),
                source,
            })?;
            push_checked(&mut labels, label, "node labels")?;
        }
        Ok(Self {
            labels,
            label_width,
        })
    }

    /// Opens and reads the node index at `path`.
    ///
    /// # Errors
    /// Returns [`NetclustError::Io`] when the file cannot be opened, otherwise
    /// the errors of [`NodeTable::read_from`].
    pub fn open(path: &Path) -> Result<Self> {
        let (reader, resource) = open_file(path)?;
        Self::read_from(reader, resource)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> u32 {
        // `read_from` never holds more than a `u32` count of labels.
        u32::try_from(self.labels.len()).unwrap_or(u32::MAX)
    }

    /// Whether the table holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label width recorded in the header.
    #[must_use]
    pub const fn label_width(&self) -> u32 {
        self.label_width
    }

    /// Label of node `index`.
    #[must_use]
    pub fn label(&self, index: NodeIndex) -> Option<&str> {
        self.labels.get(index as usize).map(String::as_str)
    }

    /// All labels in index order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Consumes the table, returning its labels in index order.
    #[must_use]
    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }
}

/// Streams records out of an edge index in file order.
///
/// The header is read on construction. Iteration yields exactly the number of
/// records the header announces and stops after the first error.
#[derive(Debug)]
pub struct EdgeTableReader<R> {
    inner: R,
    resource: Arc<str>,
    declared: u32,
    next_record: u32,
}

impl<R: Read> EdgeTableReader<R> {
    /// Reads the header from `inner`.
    ///
    /// # Errors
    /// Returns [`NetclustError::Truncated`] when the header is incomplete and
    /// [`NetclustError::Io`] for other read failures.
    pub fn new(mut inner: R, resource: impl Into<Arc<str>>) -> Result<Self> {
        let resource = resource.into();
        let mut header = [0_u8; EDGE_HEADER_LEN];
        inner
            .read_exact(&mut header)
            .map_err(NetclustError::read(&resource, "edge header"))?;
        Ok(Self {
            inner,
            resource,
            declared: u32::from_le_bytes(header),
            next_record: 0,
        })
    }

    /// Number of records announced by the header.
    #[must_use]
    pub const fn declared_len(&self) -> u32 {
        self.declared
    }

    /// Records not yet yielded.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.declared.saturating_sub(self.next_record)
    }

    /// File path or stream name being read.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl EdgeTableReader<BufReader<File>> {
    /// Opens the edge index at `path` and reads its header.
    ///
    /// # Errors
    /// Returns [`NetclustError::Io`] when the file cannot be opened, otherwise
    /// the errors of [`EdgeTableReader::new`].
    pub fn open(path: &Path) -> Result<Self> {
        let (reader, resource) = open_file(path)?;
        Self::new(reader, resource)
    }
}

impl<R: Read> Iterator for EdgeTableReader<R> {
    type Item = Result<IndexedEdge>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_record >= self.declared {
            return None;
        }
        let mut record = [0_u8; EDGE_RECORD_LEN];
        if let Err(err) = self.inner.read_exact(&mut record) {
            self.next_record = self.declared;
            return Some(Err(NetclustError::read(&self.resource, "edge records")(err)));
        }
        self.next_record += 1;
        Some(Ok(IndexedEdge::from_bytes(record)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining() as usize;
        (remaining, Some(remaining))
    }
}

/// A fully materialised edge index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeTable {
    edges: Vec<IndexedEdge>,
}

impl EdgeTable {
    /// Reads every record from `reader`.
    ///
    /// # Errors
    /// Returns the errors of [`EdgeTableReader`] and
    /// [`NetclustError::Allocation`] when the table cannot be reserved.
    pub fn read_from<R: Read>(reader: R, resource: impl Into<Arc<str>>) -> Result<Self> {
        let records = EdgeTableReader::new(reader, resource)?;
        let mut edges = bounded_reserve(records.declared_len(), "edge records")?;
        for edge in records {
            push_checked(&mut edges, edge?, "edge records")?;
        }
        Ok(Self { edges })
    }

    /// Opens and reads the edge index at `path`.
    ///
    /// # Errors
    /// Returns [`NetclustError::Io`] when the file cannot be opened, otherwise
    /// the errors of [`EdgeTable::read_from`].
    pub fn open(path: &Path) -> Result<Self> {
        let (reader, resource) = open_file(path)?;
        Self::read_from(reader, resource)
    }

    /// Records in file order.
    #[must_use]
    pub fn edges(&self) -> &[IndexedEdge] {
        &self.edges
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
