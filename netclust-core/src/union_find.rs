//! Disjoint-set forest over node indices.
//!
//! Union by size with full path compression. `find` is iterative so long
//! parent chains never grow the call stack.

use crate::{Result, interner::NodeIndex, memory::reserve_vec};

/// Partition of `0..len` into disjoint sets.
///
/// # Examples
/// ```
/// use netclust_core::DisjointSet;
///
/// let mut set = DisjointSet::new(4).expect("allocation succeeds");
/// assert!(set.union(0, 1));
/// assert!(set.union(2, 1));
/// assert!(!set.union(0, 2));
/// assert_eq!(set.find(2), set.find(0));
/// assert_ne!(set.find(3), set.find(0));
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<NodeIndex>,
    size: Vec<u32>,
}

impl DisjointSet {
    /// Creates `len` singleton sets.
    ///
    /// # Errors
    /// Returns [`crate::NetclustError::Allocation`] when the arrays cannot be
    /// reserved.
    pub fn new(len: u32) -> Result<Self> {
        let mut parent = reserve_vec(len as usize, "union-find parents")?;
        parent.extend(0..len);
        let mut size = reserve_vec(len as usize, "union-find sizes")?;
        size.resize(len as usize, 1);
        Ok(Self { parent, size })
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether the forest is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of `node`, pointing every node on the way at it.
    ///
    /// # Panics
    /// Panics if `node` is not below [`DisjointSet::len`].
    pub fn find(&mut self, mut node: NodeIndex) -> NodeIndex {
        let mut root = node;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Merges the sets holding `left` and `right`.
    ///
    /// The root of the smaller set is attached under the larger one; on equal
    /// sizes the root of `left` survives. Returns `false` when both were
    /// already in the same set.
    ///
    /// # Panics
    /// Panics if either node is not below [`DisjointSet::len`].
    pub fn union(&mut self, left: NodeIndex, right: NodeIndex) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return false;
        }
        let (parent, child) = if self.size[left_root as usize] < self.size[right_root as usize] {
            (right_root, left_root)
        } else {
            (left_root, right_root)
        };
        self.parent[child as usize] = parent;
        self.size[parent as usize] += self.size[child as usize];
        true
    }

    /// Number of elements in the set holding `node`.
    ///
    /// # Panics
    /// Panics if `node` is not below [`DisjointSet::len`].
    pub fn set_size(&mut self, node: NodeIndex) -> u32 {
        let root = self.find(node);
        self.size[root as usize]
    }

    /// Resolves every element to its root and releases the size array.
    ///
    /// Entry `i` of the result is the canonical root of node `i`.
    #[must_use]
    pub fn into_roots(mut self) -> Vec<NodeIndex> {
        self.size = Vec::new();
        for node in 0..self.parent.len() {
            let parent = self.parent[node];
            self.parent[node] = self.find(parent);
        }
        self.parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    /// Components by breadth-first search, used as an oracle.
    fn reference_components(len: u32, edges: &[(u32, u32)]) -> Vec<usize> {
        let n = len as usize;
        let mut adjacency = vec![Vec::new(); n];
        for &(a, b) in edges {
            adjacency[a as usize].push(b as usize);
            adjacency[b as usize].push(a as usize);
        }
        let mut component = vec![usize::MAX; n];
        let mut next = 0;
        for start in 0..n {
            if component[start] != usize::MAX {
                continue;
            }
            let mut queue = vec![start];
            component[start] = next;
            while let Some(node) = queue.pop() {
                for &neighbour in &adjacency[node] {
                    if component[neighbour] == usize::MAX {
                        component[neighbour] = next;
                        queue.push(neighbour);
                    }
                }
            }
            next += 1;
        }
        component
    }

    #[rstest]
    fn starts_as_singletons() {
        let mut set = DisjointSet::new(3).expect("allocation succeeds");
        for node in 0..3 {
            assert_eq!(set.find(node), node);
            assert_eq!(set.set_size(node), 1);
        }
    }

    #[rstest]
    fn smaller_set_joins_larger() {
        let mut set = DisjointSet::new(4).expect("allocation succeeds");
        set.union(1, 2);
        set.union(1, 3);
        let big_root = set.find(1);
        set.union(0, 1);
        assert_eq!(set.find(0), big_root);
        assert_eq!(set.set_size(0), 4);
    }

    #[rstest]
    fn equal_sizes_keep_left_root() {
        let mut set = DisjointSet::new(2).expect("allocation succeeds");
        assert!(set.union(1, 0));
        assert_eq!(set.find(0), 1);
    }

    #[rstest]
    fn long_chains_resolve_iteratively() {
        let len = 200_000;
        let mut set = DisjointSet::new(len).expect("allocation succeeds");
        for node in 1..len {
            set.parent[node as usize] = node - 1;
        }
        assert_eq!(set.find(len - 1), 0);
        assert!(set.parent.iter().all(|&parent| parent == 0));
    }

    #[rstest]
    fn into_roots_flattens_every_node() {
        let mut set = DisjointSet::new(6).expect("allocation succeeds");
        set.union(0, 1);
        set.union(2, 3);
        set.union(3, 0);
        set.union(4, 5);
        let roots = set.into_roots();
        assert_eq!(roots[0], roots[1]);
        assert_eq!(roots[0], roots[2]);
        assert_eq!(roots[0], roots[3]);
        assert_eq!(roots[4], roots[5]);
        assert_ne!(roots[0], roots[4]);
        for (node, &root) in roots.iter().enumerate() {
            assert_eq!(roots[root as usize], root, "root of node {node} must be a root");
        }
    }

    #[rstest]
    fn empty_forest_has_no_roots() {
        let set = DisjointSet::new(0).expect("allocation succeeds");
        assert!(set.is_empty());
        assert!(set.into_roots().is_empty());
    }

    fn graph_strategy() -> impl Strategy<Value = (u32, Vec<(u32, u32)>)> {
        (1_u32..48).prop_flat_map(|len| {
            let edges = prop::collection::vec((0..len, 0..len), 0..96);
            (Just(len), edges)
        })
    }

    proptest! {
        #[test]
        fn roots_match_connected_components((len, edges) in graph_strategy()) {
            let mut set = DisjointSet::new(len).expect("allocation succeeds");
            for &(a, b) in &edges {
                set.union(a, b);
            }
            let roots = set.into_roots();
            let expected = reference_components(len, &edges);
            for a in 0..len as usize {
                for b in 0..len as usize {
                    prop_assert_eq!(roots[a] == roots[b], expected[a] == expected[b]);
                }
            }
        }

        #[test]
        fn edge_order_does_not_change_membership((len, edges) in graph_strategy()) {
            let mut forward = DisjointSet::new(len).expect("allocation succeeds");
            let mut backward = DisjointSet::new(len).expect("allocation succeeds");
            for &(a, b) in &edges {
                forward.union(a, b);
            }
            for &(a, b) in edges.iter().rev() {
                backward.union(b, a);
            }
            let forward = forward.into_roots();
            let backward = backward.into_roots();
            for a in 0..len as usize {
                for b in 0..len as usize {
                    prop_assert_eq!(forward[a] == forward[b], backward[a] == backward[b]);
                }
            }
        }
    }
}
