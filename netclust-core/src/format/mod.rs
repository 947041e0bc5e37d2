//! Binary node and edge index files.
//!
//! Both files are little-endian.
//!
//! Node index: `u32 node_count`, `u32 label_width`, then `node_count` labels,
//! each NUL-padded to `label_width` bytes. Record position is the node's
//! [`NodeIndex`].
//!
//! Edge index: `u32 edge_count`, then `edge_count` records of
//! `(u32 node_a, u32 node_b, f32 weight)` in acceptance order.
//!
//! Writers stream records as they arrive. With [`HeaderLayout::Rewrite`] they
//! emit a zero count up front and seek back to patch it once the scan is
//! done, which keeps existing index files readable byte for byte.
//! [`HeaderLayout::Buffered`] holds records in memory and writes the header
//! once. Both layouts produce identical bytes.

mod reader;
mod writer;

pub use reader::{EdgeTable, EdgeTableReader, NodeTable};
pub use writer::{EdgeTableWriter, NodeTableWriter};

use crate::{error::LabelError, interner::NodeIndex};

/// Default label width: 29 characters plus a terminator.
pub const DEFAULT_LABEL_WIDTH: u32 = 30;

/// Size of the node index header in bytes.
pub const NODE_HEADER_LEN: usize = 8;

/// Size of the edge index header in bytes.
pub const EDGE_HEADER_LEN: usize = 4;

/// Size of one edge record in bytes.
pub const EDGE_RECORD_LEN: usize = 12;

/// How a writer produces its count header.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum HeaderLayout {
    /// Write a zero placeholder, stream records, then seek back and rewrite.
    #[default]
    Rewrite,
    /// Buffer records in memory and write header and records once.
    Buffered,
}

/// An edge between two interned nodes, as stored in the edge index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexedEdge {
    /// Index of the first endpoint.
    pub node_a: NodeIndex,
    /// Index of the second endpoint.
    pub node_b: NodeIndex,
    /// Edge weight.
    pub weight: f32,
}

impl IndexedEdge {
    /// Creates an edge record.
    #[must_use]
    pub const fn new(node_a: NodeIndex, node_b: NodeIndex, weight: f32) -> Self {
        Self {
            node_a,
            node_b,
            weight,
        }
    }

    /// Encodes the record in its on-disk form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; EDGE_RECORD_LEN] {
        let [a0, a1, a2, a3] = self.node_a.to_le_bytes();
        let [b0, b1, b2, b3] = self.node_b.to_le_bytes();
        let [w0, w1, w2, w3] = self.weight.to_le_bytes();
        [a0, a1, a2, a3, b0, b1, b2, b3, w0, w1, w2, w3]
    }

    /// Decodes a record from its on-disk form.
    #[must_use]
    pub fn from_bytes(bytes: [u8; EDGE_RECORD_LEN]) -> Self {
        let [a0, a1, a2, a3, b0, b1, b2, b3, w0, w1, w2, w3] = bytes;
        Self {
            node_a: u32::from_le_bytes([a0, a1, a2, a3]),
            node_b: u32::from_le_bytes([b0, b1, b2, b3]),
            weight: f32::from_le_bytes([w0, w1, w2, w3]),
        }
    }
}

/// Checks that `label` fits a `width`-byte record.
///
/// A label may use the full width; shorter labels are NUL-padded.
///
/// # Errors
/// Returns [`LabelError::TooLong`] when the label exceeds `width` bytes and
/// [`LabelError::ContainsNul`] when it holds a NUL byte.
///
/// # Examples
/// ```
/// use netclust_core::format::check_label;
///
/// assert!(check_label("P12345", 30).is_ok());
/// assert!(check_label("abcd", 3).is_err());
/// ```
pub fn check_label(label: &str, width: u32) -> Result<(), LabelError> {
    let fits = u32::try_from(label.len()).is_ok_and(|len| len <= width);
    if !fits {
        return Err(LabelError::TooLong {
            label: label.to_owned(),
            len: label.len(),
            width,
        });
    }
    if label.as_bytes().contains(&0) {
        return Err(LabelError::ContainsNul);
    }
    Ok(())
}

/// Decodes a fixed-width record, stopping at the first NUL.
///
/// Bytes after the first NUL are ignored since older writers left stale
/// buffer contents there.
pub(crate) fn decode_label(record: &[u8]) -> Result<String, LabelError> {
    let text = record.split(|&byte| byte == 0).next().unwrap_or_default();
    std::str::from_utf8(text)
        .map(ToOwned::to_owned)
        .map_err(|_| LabelError::NotUtf8)
}
