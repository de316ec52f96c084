use std::iter::FusedIterator;

use crate::handle::NodeId;
use crate::node::Nodes;

/// Ascending iterator over the keys of a subtree.
///
/// Created by [`Tree::inorder`][crate::Tree::inorder] and
/// [`NodeRef::inorder`][crate::NodeRef::inorder]. Keys are produced lazily: the iterator keeps
/// the path of nodes whose left subtrees it is still working through.
pub struct Inorder<'a, K> {
    nodes: &'a Nodes<K>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, K> Inorder<'a, K> {
    pub(crate) fn new(nodes: &'a Nodes<K>, root: Option<NodeId>) -> Self {
        let mut iter = Self {
            nodes,
            stack: Vec::new(),
            remaining: root.map_or(0, |id| nodes[id].size),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut next: Option<NodeId>) {
        while let Some(id) = next {
            self.stack.push(id);
            next = self.nodes[id].left;
        }
    }
}

impl<K> Clone for Inorder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Iterator for Inorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let id = self.stack.pop()?;
        let nodes = self.nodes;
        let node = &nodes[id];
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Inorder<'_, K> {}
impl<K> FusedIterator for Inorder<'_, K> {}
