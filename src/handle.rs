//! Node handles and the caller-maintained lookup table.
//!
//! A [`NodeId`] names an arena slot, not a key. Keys move between slots: a rotation swaps the
//! keys of the two nodes it rotates, and deleting a node with two children moves its predecessor's
//! key into its slot. A [`Lookup`] built from the handles returned by
//! [`Tree::add`][crate::Tree::add] therefore has to be kept up to date:
//!
//! - [`Tree::rotate_left`][crate::Tree::rotate_left] and
//!   [`Tree::rotate_right`][crate::Tree::rotate_right] rewrite the entries of both keys they move.
//! - [`Tree::remove_tracked`][crate::Tree::remove_tracked] drops the removed key and rewrites the
//!   entry of a relocated key. Plain [`Tree::remove`][crate::Tree::remove] does not touch any
//!   table, so entries may go stale.
//!
//! A stale handle never aliases a live node: releasing a slot bumps its generation, so lookups
//! through the old handle fail. A slot whose generation runs out is retired instead of reused.

use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of a node in a [`Tree`][crate::Tree].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    /// The slot index. Indices are reused after deletion, so this alone does not identify a node.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

/// Mapping from key to the node currently holding it. Owned by the caller.
pub type Lookup<K> = BTreeMap<K, NodeId>;
