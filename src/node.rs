//! Nodes and the recursive primitives the [`Tree`][crate::Tree] delegates to.
//!
//! Nodes live in an arena and point at their children by [`NodeId`]. Every primitive takes the
//! arena and the id of the subtree root it works on, recurses down child links, and fixes up the
//! cached `size` of each node on the way back up. A primitive that can replace the subtree root
//! (only [`Node::delete`]) returns the new root for the caller to link in.

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::debug;

use crate::arena::Arena;
use crate::error::{Error, Result};
use crate::handle::{Lookup, NodeId};
use crate::iter::Inorder;

pub(crate) type Nodes<K> = Arena<Node<K>>;

/// Which child of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The subtree of smaller keys.
    Left,
    /// The subtree of larger keys.
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    /// How many nodes are in the subtree rooted at this node, this one included.
    pub(crate) size: usize,
}

/// The result of a successful [`Node::delete`].
pub(crate) struct Splice {
    /// What the caller should link in place of the subtree the delete ran on.
    pub(crate) root: Option<NodeId>,
    /// The node that took over its predecessor's key in a two-child delete.
    pub(crate) moved: Option<NodeId>,
}

fn size_of<K>(nodes: &Nodes<K>, id: Option<NodeId>) -> usize {
    id.map_or(0, |id| nodes[id].size)
}

impl<K> Node<K> {
    pub(crate) fn leaf(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            size: 1,
        }
    }

    /// Sets the size of `id` from the sizes of its children. The children must already be correct.
    pub(crate) fn fix_size(nodes: &mut Nodes<K>, id: NodeId) {
        let node = &nodes[id];
        let size = 1 + size_of(nodes, node.left) + size_of(nodes, node.right);
        nodes[id].size = size;
    }

    /// The rightmost node of the subtree rooted at `id`.
    pub(crate) fn max_node(nodes: &Nodes<K>, id: NodeId) -> NodeId {
        match nodes[id].right {
            Some(right) => Self::max_node(nodes, right),
            None => id,
        }
    }

    pub(crate) fn min_node(nodes: &Nodes<K>, id: NodeId) -> NodeId {
        match nodes[id].left {
            Some(left) => Self::min_node(nodes, left),
            None => id,
        }
    }

    /// The node holding the `rank`th smallest key (0-based) of the subtree rooted at `id`.
    pub(crate) fn select(nodes: &Nodes<K>, id: NodeId, rank: usize) -> Option<NodeId> {
        let node = &nodes[id];
        let left_size = size_of(nodes, node.left);
        match rank.cmp(&left_size) {
            Ordering::Less => Self::select(nodes, node.left?, rank),
            Ordering::Equal => Some(id),
            Ordering::Greater => Self::select(nodes, node.right?, rank - left_size - 1),
        }
    }
}

impl<K: Ord> Node<K> {
    /// Inserts `key` below `id` and returns the new leaf.
    ///
    /// If the key is already present nothing changes and the existing node is reported through
    /// [`Error::DuplicateKey`].
    pub(crate) fn insert(nodes: &mut Nodes<K>, id: NodeId, key: K) -> Result<NodeId> {
        let inserted = match key.cmp(&nodes[id].key) {
            Ordering::Less => match nodes[id].left {
                Some(left) => Self::insert(nodes, left, key)?,
                None => {
                    let leaf = nodes.alloc(Self::leaf(key));
                    nodes[id].left = Some(leaf);
                    leaf
                }
            },
            Ordering::Equal => return Err(Error::DuplicateKey(id)),
            Ordering::Greater => match nodes[id].right {
                Some(right) => Self::insert(nodes, right, key)?,
                None => {
                    let leaf = nodes.alloc(Self::leaf(key));
                    nodes[id].right = Some(leaf);
                    leaf
                }
            },
        };
        Self::fix_size(nodes, id);
        Self::debug_assert_order(nodes, id);

        Ok(inserted)
    }

    /// Deletes `key` from the subtree rooted at `id`.
    ///
    /// A node with at most one child is released and replaced by that child. A node with two
    /// children keeps its slot: it takes the key of its predecessor (the largest key of its left
    /// subtree) and the predecessor's node is deleted instead.
    ///
    /// Nothing is modified when the key isn't found.
    pub(crate) fn delete(nodes: &mut Nodes<K>, id: NodeId, key: &K) -> Result<Splice> {
        let (left, right) = (nodes[id].left, nodes[id].right);
        let moved = match key.cmp(&nodes[id].key) {
            Ordering::Less => {
                let splice = Self::delete(nodes, left.ok_or(Error::NotFound)?, key)?;
                nodes[id].left = splice.root;
                splice.moved
            }
            Ordering::Greater => {
                let splice = Self::delete(nodes, right.ok_or(Error::NotFound)?, key)?;
                nodes[id].right = splice.root;
                splice.moved
            }
            Ordering::Equal => match (left, right) {
                (Some(left), Some(_)) => {
                    let predecessor = Self::max_node(nodes, left);
                    let (node, pred) = nodes.pair_mut(id, predecessor);
                    mem::swap(&mut node.key, &mut pred.key);
                    debug!(node = %id, predecessor = %predecessor, "two-child delete");

                    // `key` is now the largest key on the left and its node has no right child.
                    let splice = Self::delete(nodes, left, key)?;
                    nodes[id].left = splice.root;
                    Some(id)
                }
                (None, child) | (child, None) => {
                    nodes.release(id);
                    return Ok(Splice {
                        root: child,
                        moved: None,
                    });
                }
            },
        };
        Self::fix_size(nodes, id);

        Ok(Splice {
            root: Some(id),
            moved,
        })
    }

    pub(crate) fn contains(nodes: &Nodes<K>, id: NodeId, key: &K) -> bool {
        Self::find(nodes, id, key).is_some()
    }

    pub(crate) fn find(nodes: &Nodes<K>, id: NodeId, key: &K) -> Option<NodeId> {
        let node = &nodes[id];
        match key.cmp(&node.key) {
            Ordering::Less => Self::find(nodes, node.left?, key),
            Ordering::Equal => Some(id),
            Ordering::Greater => Self::find(nodes, node.right?, key),
        }
    }

    /// How many keys of the subtree rooted at `id` are smaller than `key`, if `key` is in it.
    pub(crate) fn rank(nodes: &Nodes<K>, id: NodeId, key: &K) -> Option<usize> {
        let node = &nodes[id];
        match key.cmp(&node.key) {
            Ordering::Less => Self::rank(nodes, node.left?, key),
            Ordering::Equal => Some(size_of(nodes, node.left)),
            Ordering::Greater => Self::rank(nodes, node.right?, key)
                .map(|rank| rank + size_of(nodes, node.left) + 1),
        }
    }

    fn debug_assert_order(nodes: &Nodes<K>, id: NodeId) {
        if cfg!(debug_assertions) {
            let node = &nodes[id];
            if let Some(left) = node.left {
                assert!(nodes[left].key < node.key);
            }
            if let Some(right) = node.right {
                assert!(nodes[right].key > node.key);
            }
        }
    }
}

impl<K: Ord + Clone> Node<K> {
    /// Rotates the subtree rooted at `x` to the left.
    ///
    /// The nodes keep their slots and trade keys instead: `x` stays linked from its parent and
    /// takes the key of its right child `y`, while `y` takes the key `x` had and moves down to the
    /// left. Both keys are re-pointed in `lookup`.
    ///
    /// ```text
    ///      x(p)                      x(q)
    ///     /    \                    /    \
    ///    A     y(q)    rotate ->  y(p)    C
    ///         /   \              /   \
    ///        B     C            A     B
    /// ```
    ///
    /// Nothing is modified on error.
    pub(crate) fn rotate_left(
        nodes: &mut Nodes<K>,
        x: NodeId,
        lookup: &mut Lookup<K>,
    ) -> Result<()> {
        let upper = nodes.get(x).ok_or(Error::StaleHandle(x))?;
        let y = upper.right.ok_or(Error::InvalidRotation(Side::Right))?;
        let a = upper.left;
        let (b, c) = (nodes[y].left, nodes[y].right);

        let (upper, lower) = nodes.pair_mut(x, y);
        mem::swap(&mut upper.key, &mut lower.key);
        lower.left = a;
        lower.right = b;
        upper.left = Some(y);
        upper.right = c;

        Self::fix_size(nodes, y);
        Self::fix_size(nodes, x);
        Self::debug_assert_order(nodes, y);
        Self::debug_assert_order(nodes, x);

        lookup.insert(nodes[x].key.clone(), x);
        lookup.insert(nodes[y].key.clone(), y);
        Ok(())
    }

    /// Rotates the subtree rooted at `x` to the right. The mirror image of
    /// [`rotate_left`][Node::rotate_left]: `x` takes the key of its left child `y` and `y` moves
    /// down to the right.
    ///
    /// ```text
    ///        x(q)                  x(p)
    ///       /    \                /    \
    ///     y(p)    C   rotate ->  A     y(q)
    ///    /   \                        /   \
    ///   A     B                      B     C
    /// ```
    pub(crate) fn rotate_right(
        nodes: &mut Nodes<K>,
        x: NodeId,
        lookup: &mut Lookup<K>,
    ) -> Result<()> {
        let upper = nodes.get(x).ok_or(Error::StaleHandle(x))?;
        let y = upper.left.ok_or(Error::InvalidRotation(Side::Left))?;
        let c = upper.right;
        let (a, b) = (nodes[y].left, nodes[y].right);

        let (upper, lower) = nodes.pair_mut(x, y);
        mem::swap(&mut upper.key, &mut lower.key);
        lower.left = b;
        lower.right = c;
        upper.left = a;
        upper.right = Some(y);

        Self::fix_size(nodes, y);
        Self::fix_size(nodes, x);
        Self::debug_assert_order(nodes, y);
        Self::debug_assert_order(nodes, x);

        lookup.insert(nodes[x].key.clone(), x);
        lookup.insert(nodes[y].key.clone(), y);
        Ok(())
    }
}

/// A read-only view of one node of a [`Tree`][crate::Tree].
///
/// This is what a renderer walks to lay a tree out: starting from
/// [`Tree::root`][crate::Tree::root] it can follow [`left`][NodeRef::left] and
/// [`right`][NodeRef::right] to every node, using [`id`][NodeRef::id] as a stable identity.
pub struct NodeRef<'a, K> {
    nodes: &'a Nodes<K>,
    id: NodeId,
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for NodeRef<'_, K> {}

impl<'a, K> NodeRef<'a, K> {
    pub(crate) fn new(nodes: &'a Nodes<K>, id: NodeId) -> Self {
        Self { nodes, id }
    }

    fn node(&self) -> &'a Node<K> {
        let nodes = self.nodes;
        &nodes[self.id]
    }

    /// The handle of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The key currently held by this node.
    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    /// The number of nodes in the subtree rooted here, this one included.
    pub fn size(&self) -> usize {
        self.node().size
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<Self> {
        self.child(Side::Left)
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<Self> {
        self.child(Side::Right)
    }

    /// The child on the given side, if any.
    pub fn child(&self, side: Side) -> Option<Self> {
        let node = self.node();
        let child = match side {
            Side::Left => node.left,
            Side::Right => node.right,
        };
        child.map(|id| Self::new(self.nodes, id))
    }

    /// The keys of the subtree rooted here, in ascending order.
    pub fn inorder(&self) -> Inorder<'a, K> {
        Inorder::new(self.nodes, Some(self.id))
    }
}

impl<K> fmt::Debug for NodeRef<'_, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", self.key())
            .field("size", &self.size())
            .finish()
    }
}
