//! A Binary Search Tree (BST) whose nodes know the size of their subtree, with rotations exposed
//! as a primitive for callers who want to reshape it.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! This tree adds a third:
//!
//! 3. Every `Node` caches the number of `Node`s in its subtree, itself included.
//!
//! The sizes make the tree's length `O(1)` and give `O(height)` order statistics
//! ([`Tree::select`] and [`Tree::rank`]). They are kept correct by every insert, delete and
//! rotation.
//!
//! ## Handles
//!
//! [`Tree::add`] returns a [`NodeId`] naming the node that now holds the key. Rotations move keys
//! between nodes rather than moving nodes, so a caller that addresses nodes by handle keeps a
//! [`Lookup`] table and lets the tree update it. See the [`handle`] module for the details.
//!
//! ## Balance
//!
//! The tree does not balance itself. Inserting keys in ascending order builds a stick with height
//! `N`, and every operation on it is `O(N)`.
//!
//! # Examples
//!
//! ```
//! use sized_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.add(key).unwrap();
//! }
//! assert_eq!(tree.len(), 7);
//! assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
//!
//! // 5 has two children, so its predecessor 4 takes its place.
//! tree.remove(&5).unwrap();
//! assert_eq!(tree.root().map(|root| *root.key()), Some(4));
//! assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
mod config;
mod error;
pub mod handle;
mod iter;
mod node;
mod tree;


pub use config::{Config, DuplicatePolicy};
pub use error::{Error, Result};
pub use handle::{Lookup, NodeId};
pub use iter::Inorder;
pub use node::{NodeRef, Side};
pub use tree::Tree;
