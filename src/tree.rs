//! The tree itself. A thin layer over the node primitives that owns the node arena and the root,
//! and handles the empty tree.
//!
//! # Examples
//!
//! ```
//! use sized_bst::{Lookup, Tree};
//!
//! let mut tree = Tree::new();
//! let mut lookup = Lookup::new();
//! for key in [5, 3, 8, 1, 4] {
//!     lookup.insert(key, tree.add(key).unwrap());
//! }
//! assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
//!
//! // Bring 3 up to the root. The root node now holds 3 and the lookup table says so.
//! tree.rotate_right(lookup[&5], &mut lookup);
//! assert_eq!(tree.root().map(|root| *root.key()), Some(3));
//! assert_eq!(tree.root().map(|root| root.id()), Some(lookup[&3]));
//!
//! // Still in order.
//! assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
//! ```

use tracing::{debug, trace};

use crate::config::{Config, DuplicatePolicy};
use crate::error::{Error, Result};
use crate::handle::{Lookup, NodeId};
use crate::iter::Inorder;
use crate::node::{Node, NodeRef, Nodes};

/// A binary search tree of unique keys where every node knows the size of its subtree.
///
/// The tree never rebalances itself. [`rotate_left`][Tree::rotate_left] and
/// [`rotate_right`][Tree::rotate_right] are provided for callers that want to reshape it.
#[derive(Clone, Debug)]
pub struct Tree<K> {
    nodes: Nodes<K>,
    root: Option<NodeId>,
    config: Config,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree` with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Generates a new, empty `Tree` with the given settings.
    pub fn with_config(config: Config) -> Self {
        Self {
            nodes: Nodes::new(),
            root: None,
            config,
        }
    }

    /// The settings this tree was built with.
    ///
    /// ```
    /// use sized_bst::{Config, DuplicatePolicy, Tree};
    ///
    /// let tree = Tree::<i32>::new();
    /// assert_eq!(tree.config().duplicates, DuplicatePolicy::Reject);
    ///
    /// let tree = Tree::<i32>::with_config(Config::new().with_duplicates(DuplicatePolicy::Ignore));
    /// assert_eq!(tree.config().duplicates, DuplicatePolicy::Ignore);
    /// ```
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of keys in the tree. This is the cached size of the root so it's `O(1)`.
    pub fn len(&self) -> usize {
        self.root.map_or(0, |root| self.nodes[root].size)
    }

    /// Whether the tree has no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every key. All outstanding handles become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.map(|root| NodeRef::new(&self.nodes, root))
    }

    /// The node behind a handle, or `None` if the handle is stale.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K>> {
        self.nodes.get(id).map(|_| NodeRef::new(&self.nodes, id))
    }

    /// The keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sized_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.inorder().next(), None);
    ///
    /// for key in [2, 3, 1] {
    ///     tree.add(key).unwrap();
    /// }
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), [&1, &2, &3]);
    /// ```
    pub fn inorder(&self) -> Inorder<'_, K> {
        Inorder::new(&self.nodes, self.root)
    }

    /// The smallest key.
    pub fn min(&self) -> Option<&K> {
        self.root.map(|root| &self.nodes[Node::min_node(&self.nodes, root)].key)
    }

    /// The largest key.
    pub fn max(&self) -> Option<&K> {
        self.root.map(|root| &self.nodes[Node::max_node(&self.nodes, root)].key)
    }

    /// The key with `rank` smaller keys in the tree, i.e. `select(0)` is the minimum. `O(height)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sized_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [50, 30, 80, 10] {
    ///     tree.add(key).unwrap();
    /// }
    ///
    /// assert_eq!(tree.select(0), Some(&10));
    /// assert_eq!(tree.select(2), Some(&50));
    /// assert_eq!(tree.select(4), None);
    /// ```
    pub fn select(&self, rank: usize) -> Option<&K> {
        let id = Node::select(&self.nodes, self.root?, rank)?;
        Some(&self.nodes[id].key)
    }
}

impl<K: Ord> Tree<K> {
    /// Adds a key and returns the handle of the node created for it.
    ///
    /// If the key is already present the tree's [`DuplicatePolicy`] decides: `Reject` returns
    /// [`Error::DuplicateKey`], `Ignore` returns the existing node's handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use sized_bst::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// let one = tree.add(1).unwrap();
    ///
    /// assert_eq!(tree.node(one).map(|node| *node.key()), Some(1));
    /// assert_eq!(tree.add(1), Err(Error::DuplicateKey(one)));
    /// ```
    pub fn add(&mut self, key: K) -> Result<NodeId> {
        let Some(root) = self.root else {
            let id = self.nodes.alloc(Node::leaf(key));
            self.root = Some(id);
            trace!(node = %id, "added root");
            return Ok(id);
        };

        match Node::insert(&mut self.nodes, root, key) {
            Ok(id) => {
                trace!(node = %id, "added");
                Ok(id)
            }
            Err(Error::DuplicateKey(existing))
                if self.config.duplicates == DuplicatePolicy::Ignore =>
            {
                trace!(node = %existing, "ignored duplicate key");
                Ok(existing)
            }
            Err(err) => Err(err),
        }
    }

    /// Removes a key.
    ///
    /// Removing from an empty tree does nothing. Removing a key that isn't in a non-empty tree
    /// returns [`Error::NotFound`] and leaves the tree unchanged.
    ///
    /// Handles held elsewhere may go stale: the removed key's node is usually released, and when
    /// the key had two children its predecessor's key moves into its node. Use
    /// [`remove_tracked`][Tree::remove_tracked] to keep a [`Lookup`] current.
    ///
    /// # Examples
    ///
    /// ```
    /// use sized_bst::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.remove(&1), Ok(()));
    ///
    /// tree.add(1).unwrap();
    /// assert_eq!(tree.remove(&2), Err(Error::NotFound));
    /// assert_eq!(tree.remove(&1), Ok(()));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Result<()> {
        self.splice_out(key).map(|_| ())
    }

    /// Removes the key like [`remove`][Tree::remove] and brings `lookup` up to date: the removed
    /// key's entry is dropped and a key that moved to another node is re-pointed.
    pub fn remove_tracked(&mut self, key: &K, lookup: &mut Lookup<K>) -> Result<()>
    where
        K: Clone,
    {
        let moved = self.splice_out(key)?;
        lookup.remove(key);
        if let Some(id) = moved {
            lookup.insert(self.nodes[id].key.clone(), id);
        }
        Ok(())
    }

    /// Unlinks `key` and returns the node that received a relocated key, if any.
    fn splice_out(&mut self, key: &K) -> Result<Option<NodeId>> {
        let Some(root) = self.root else {
            trace!("remove from empty tree");
            return Ok(None);
        };
        let splice = Node::delete(&mut self.nodes, root, key)?;
        self.root = splice.root;
        Ok(splice.moved)
    }

    /// Whether the key is in the tree.
    pub fn contains(&self, key: &K) -> bool {
        self.root
            .is_some_and(|root| Node::contains(&self.nodes, root, key))
    }

    /// The handle of the node holding the key.
    pub fn find(&self, key: &K) -> Option<NodeId> {
        Node::find(&self.nodes, self.root?, key)
    }

    /// How many keys in the tree are smaller than `key`, or `None` if `key` isn't present.
    /// The inverse of [`select`][Tree::select].
    pub fn rank(&self, key: &K) -> Option<usize> {
        Node::rank(&self.nodes, self.root?, key)
    }
}

impl<K: Ord + Clone> Tree<K> {
    /// Rotates the subtree rooted at `id` to the left, lifting its right child.
    ///
    /// Nodes don't move. `id` stays where it is and takes its right child's key, and the right
    /// child takes `id`'s old key and becomes the left child. Both keys are re-pointed in
    /// `lookup`. Subtree sizes of the two nodes are recomputed, everything else is untouched.
    ///
    /// # Panics
    ///
    /// If `id` is stale or has no right child. Use [`try_rotate_left`][Tree::try_rotate_left]
    /// to check instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use sized_bst::{Lookup, Tree};
    ///
    /// let mut tree = Tree::new();
    /// let mut lookup = Lookup::new();
    /// for key in [1, 2, 3] {
    ///     lookup.insert(key, tree.add(key).unwrap());
    /// }
    /// let root = lookup[&1];
    ///
    /// tree.rotate_left(root, &mut lookup);
    ///
    /// let top = tree.node(root).unwrap();
    /// assert_eq!(*top.key(), 2);
    /// assert_eq!(top.left().map(|n| *n.key()), Some(1));
    /// assert_eq!(top.right().map(|n| *n.key()), Some(3));
    /// assert_eq!(lookup[&2], root);
    /// ```
    pub fn rotate_left(&mut self, id: NodeId, lookup: &mut Lookup<K>) {
        if let Err(err) = self.try_rotate_left(id, lookup) {
            panic!("cannot rotate left at {id}: {err}");
        }
    }

    /// Rotates the subtree rooted at `id` to the right, lifting its left child. The mirror image
    /// of [`rotate_left`][Tree::rotate_left].
    ///
    /// # Panics
    ///
    /// If `id` is stale or has no left child.
    pub fn rotate_right(&mut self, id: NodeId, lookup: &mut Lookup<K>) {
        if let Err(err) = self.try_rotate_right(id, lookup) {
            panic!("cannot rotate right at {id}: {err}");
        }
    }

    /// Like [`rotate_left`][Tree::rotate_left] but returns [`Error::InvalidRotation`] or
    /// [`Error::StaleHandle`] instead of panicking. The tree and `lookup` are unchanged on error.
    pub fn try_rotate_left(&mut self, id: NodeId, lookup: &mut Lookup<K>) -> Result<()> {
        Node::rotate_left(&mut self.nodes, id, lookup)?;
        debug!(node = %id, "rotated left");
        Ok(())
    }

    /// Like [`rotate_right`][Tree::rotate_right] but returns [`Error::InvalidRotation`] or
    /// [`Error::StaleHandle`] instead of panicking. The tree and `lookup` are unchanged on error.
    pub fn try_rotate_right(&mut self, id: NodeId, lookup: &mut Lookup<K>) -> Result<()> {
        Node::rotate_right(&mut self.nodes, id, lookup)?;
        debug!(node = %id, "rotated right");
        Ok(())
    }
}

/// Borrowing a tree iterates its keys in order.
///
/// ```
/// use sized_bst::Tree;
///
/// let mut tree = Tree::new();
/// for key in [5, 3, 8, 1] {
///     tree.add(key).unwrap();
/// }
///
/// let mut keys = Vec::new();
/// for key in &tree {
///     keys.push(*key);
/// }
/// assert_eq!(keys, [1, 3, 5, 8]);
/// ```
impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Inorder<'a, K>;

    fn into_iter(self) -> Inorder<'a, K> {
        self.inorder()
    }
}
