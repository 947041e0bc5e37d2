//! Streaming writers for node and edge index files.

use std::io::{Seek, SeekFrom, Write};
use std::sync::Arc;

use tracing::debug;

use super::{HeaderLayout, IndexedEdge, check_label};
use crate::{
    Result,
    error::{Location, NetclustError},
    interner::NodeIndex,
};

/// Sink for the fixed-width header fields and records of one index file.
#[derive(Debug)]
struct RecordSink<W> {
    inner: W,
    resource: Arc<str>,
    layout: HeaderLayout,
    pending: Vec<u8>,
}

impl<W: Write + Seek> RecordSink<W> {
    fn new(inner: W, resource: Arc<str>, layout: HeaderLayout, header: &[u8]) -> Result<Self> {
        let mut sink = Self {
            inner,
            resource,
            layout,
            pending: Vec::new(),
        };
        if sink.layout == HeaderLayout::Rewrite {
            sink.inner
                .write_all(header)
                .map_err(NetclustError::io(&sink.resource))?;
        }
        Ok(sink)
    }

    fn write_record(&mut self, record: &[u8]) -> Result<()> {
        match self.layout {
            HeaderLayout::Rewrite => self
                .inner
                .write_all(record)
                .map_err(NetclustError::io(&self.resource)),
            HeaderLayout::Buffered => {
                self.pending.extend_from_slice(record);
                Ok(())
            }
        }
    }

    /// Writes the final header. `count` is the leading `u32` of the header and
    /// `rest` any fields that follow it.
    fn finish(mut self, count: u32, rest: &[u8]) -> Result<W> {
        let io_err = NetclustError::io;
        match self.layout {
            HeaderLayout::Rewrite => {
                self.inner
                    .seek(SeekFrom::Start(0))
                    .map_err(io_err(&self.resource))?;
                self.inner
                    .write_all(&count.to_le_bytes())
                    .map_err(io_err(&self.resource))?;
                self.inner
                    .seek(SeekFrom::End(0))
                    .map_err(io_err(&self.resource))?;
            }
            HeaderLayout::Buffered => {
                self.inner
                    .write_all(&count.to_le_bytes())
                    .map_err(io_err(&self.resource))?;
                self.inner
                    .write_all(rest)
                    .map_err(io_err(&self.resource))?;
                self.inner
                    .write_all(&self.pending)
                    .map_err(io_err(&self.resource))?;
            }
        }
        self.inner.flush().map_err(io_err(&self.resource))?;
        debug!(resource = %self.resource, count, "index header finalised");
        Ok(self.inner)
    }
}

/// Streams labels into a node index file.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use netclust_core::format::{HeaderLayout, NodeTable, NodeTableWriter};
///
/// let mut writer = NodeTableWriter::new(Cursor::new(Vec::new()), "nodes", 8, HeaderLayout::Rewrite)
///     .expect("width is valid");
/// writer.push("alpha").expect("label fits");
/// writer.push("beta").expect("label fits");
/// let bytes = writer.finish().expect("header rewrite succeeds").into_inner();
///
/// let table = NodeTable::read_from(bytes.as_slice(), "nodes").expect("table decodes");
/// assert_eq!(table.labels(), ["alpha", "beta"]);
/// ```
#[derive(Debug)]
pub struct NodeTableWriter<W> {
    sink: RecordSink<W>,
    label_width: u32,
    count: u32,
    record: Vec<u8>,
}

impl<W: Write + Seek> NodeTableWriter<W> {
    /// Starts a node index on `inner`.
    ///
    /// # Errors
    /// Returns [`NetclustError::InvalidLabelWidth`] for a zero width and
    /// [`NetclustError::Io`] if the placeholder header cannot be written.
    pub fn new(
        inner: W,
        resource: impl Into<Arc<str>>,
        label_width: u32,
        layout: HeaderLayout,
    ) -> Result<Self> {
        if label_width == 0 {
            return Err(NetclustError::InvalidLabelWidth { width: label_width });
        }
        let [z0, z1, z2, z3] = 0_u32.to_le_bytes();
        let [w0, w1, w2, w3] = label_width.to_le_bytes();
        let header = [z0, z1, z2, z3, w0, w1, w2, w3];
        Ok(Self {
            sink: RecordSink::new(inner, resource.into(), layout, &header)?,
            label_width,
            count: 0,
            record: Vec::with_capacity(label_width as usize),
        })
    }

    /// Appends `label` as the next record and returns its index.
    ///
    /// # Errors
    /// Returns [`NetclustError::InvalidLabel`] when the label does not fit the
    /// record width, [`NetclustError::CountOverflow`] past `u32::MAX` records,
    /// and [`NetclustError::Io`] when writing fails.
    pub fn push(&mut self, label: &str) -> Result<NodeIndex> {
        let index = self.count;
        check_label(label, self.label_width).map_err(|source| NetclustError::InvalidLabel {
            location: Location::NodeRecord(index),
            source,
        })?;
        self.count = index
            .checked_add(1)
            .ok_or(NetclustError::CountOverflow { what: "node count" })?;
        self.record.clear();
        self.record.extend_from_slice(label.as_bytes());
        self.record.resize(self.label_width as usize, 0);
        self.sink.write_record(&self.record)?;
        Ok(index)
    }

    /// Number of labels written so far.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.count
    }

    /// Whether no label has been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Record width in bytes.
    #[must_use]
    pub const fn label_width(&self) -> u32 {
        self.label_width
    }

    /// Writes the true node count and flushes, returning the inner writer.
    ///
    /// # Errors
    /// Returns [`NetclustError::Io`] if seeking or writing fails.
    pub fn finish(self) -> Result<W> {
        let width = self.label_width.to_le_bytes();
        self.sink.finish(self.count, &width)
    }
}

/// Streams accepted edges into an edge index file.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use netclust_core::format::{EdgeTable, EdgeTableWriter, HeaderLayout, IndexedEdge};
///
/// let mut writer = EdgeTableWriter::new(Cursor::new(Vec::new()), "edges", HeaderLayout::Buffered)
///     .expect("header is buffered");
/// writer.push(IndexedEdge::new(0, 1, 0.9)).expect("record is written");
/// let bytes = writer.finish().expect("header write succeeds").into_inner();
///
/// let table = EdgeTable::read_from(bytes.as_slice(), "edges").expect("table decodes");
/// assert_eq!(table.edges(), [IndexedEdge::new(0, 1, 0.9)]);
/// ```
#[derive(Debug)]
pub struct EdgeTableWriter<W> {
    sink: RecordSink<W>,
    count: u32,
}

impl<W: Write + Seek> EdgeTableWriter<W> {
    /// Starts an edge index on `inner`.
    ///
    /// # Errors
    /// Returns [`NetclustError::Io`] if the placeholder header cannot be
    /// written.
    pub fn new(inner: W, resource: impl Into<Arc<str>>, layout: HeaderLayout) -> Result<Self> {
        Ok(Self {
            sink: RecordSink::new(inner, resource.into(), layout, &0_u32.to_le_bytes())?,
            count: 0,
        })
    }

    /// Appends `edge` as the next record.
    ///
    /// # Errors
    /// Returns [`NetclustError::CountOverflow`] past `u32::MAX` records and
    /// [`NetclustError::Io`] when writing fails.
    pub fn push(&mut self, edge: IndexedEdge) -> Result<()> {
        self.count = self
            .count
            .checked_add(1)
            .ok_or(NetclustError::CountOverflow { what: "edge count" })?;
        self.sink.write_record(&edge.to_bytes())
    }

    /// Number of edges written so far.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.count
    }

    /// Whether no edge has been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Writes the true edge count and flushes, returning the inner writer.
    ///
    /// # Errors
    /// Returns [`NetclustError::Io`] if seeking or writing fails.
    pub fn finish(self) -> Result<W> {
        self.sink.finish(self.count, &[])
    }
}
