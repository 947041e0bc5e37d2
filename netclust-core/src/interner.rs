//! Node label interning.
//!
//! Maps each distinct label to a dense [`NodeIndex`] assigned in order of
//! first appearance, starting at zero.

use std::collections::HashMap;

use crate::{Result, error::NetclustError};

/// Dense node identifier. Valid ids are exactly `0..node_count`.
pub type NodeIndex = u32;

/// Result of [`NodeInterner::intern`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Interned {
    /// Index assigned to the label.
    pub index: NodeIndex,
    /// Whether this call assigned the index.
    pub is_new: bool,
}

/// Deduplicates labels into sequential indices.
///
/// # Examples
/// ```
/// use netclust_core::NodeInterner;
///
/// let mut interner = NodeInterner::with_capacity(16).expect("capacity is non-zero");
/// let first = interner.intern("P12345").expect("interning succeeds");
/// let second = interner.intern("Q67890").expect("interning succeeds");
/// let again = interner.intern("P12345").expect("interning succeeds");
/// assert_eq!((first.index, first.is_new), (0, true));
/// assert_eq!((second.index, second.is_new), (1, true));
/// assert_eq!((again.index, again.is_new), (0, false));
/// assert_eq!(interner.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct NodeInterner {
    ids: HashMap<Box<str>, NodeIndex>,
}

impl NodeInterner {
    /// Creates an interner sized for roughly `capacity` labels. The map grows
    /// beyond that as needed.
    ///
    /// # Errors
    /// Returns [`NetclustError::ZeroInternerCapacity`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(NetclustError::ZeroInternerCapacity);
        }
        Ok(Self {
            ids: HashMap::with_capacity(capacity),
        })
    }

    /// Returns the index of `label`, assigning the next one on first sight.
    ///
    /// # Errors
    /// Returns [`NetclustError::CountOverflow`] once every 32-bit index is in
    /// use.
    pub fn intern(&mut self, label: &str) -> Result<Interned> {
        if let Some(&index) = self.ids.get(label) {
            return Ok(Interned {
                index,
                is_new: false,
            });
        }
        let index = NodeIndex::try_from(self.ids.len())
            .map_err(|_| NetclustError::CountOverflow { what: "node count" })?;
        self.ids.insert(label.into(), index);
        Ok(Interned {
            index,
            is_new: true,
        })
    }

    /// Looks up `label` without interning it.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<NodeIndex> {
        self.ids.get(label).copied()
    }

    /// Number of distinct labels seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no label has been interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
