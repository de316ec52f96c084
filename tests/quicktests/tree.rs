use sized_bst::{Config, DuplicatePolicy, Error, Lookup, NodeId, NodeRef, Tree};

use std::collections::BTreeSet;

use crate::Op;

fn lenient() -> Tree<i8> {
    Tree::with_config(Config::new().with_duplicates(DuplicatePolicy::Ignore))
}

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of adds
/// and removes we have the same set of keys in both.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, set: &mut BTreeSet<i8>) {
    for op in ops {
        match op {
            Op::Add(k) => {
                tree.add(*k).unwrap();
                set.insert(*k);
            }
            Op::Remove(k) => {
                assert_eq!(tree.remove(k).is_ok(), set.remove(k) || set.is_empty());
            }
        }
    }
}

/// The in-order rank and depth of every node, the way a renderer would lay the tree out.
fn layout(node: Option<NodeRef<'_, i8>>, depth: usize, out: &mut Vec<(i8, usize)>) {
    if let Some(node) = node {
        layout(node.left(), depth + 1, out);
        out.push((*node.key(), depth));
        layout(node.right(), depth + 1, out);
    }
}

/// Every node as `(id, key, left, right, size)`, in order.
type Shape = Vec<(NodeId, i8, Option<NodeId>, Option<NodeId>, usize)>;

fn shape(node: Option<NodeRef<'_, i8>>, out: &mut Shape) {
    if let Some(node) = node {
        shape(node.left(), out);
        out.push((
            node.id(),
            *node.key(),
            node.left().map(|n| n.id()),
            node.right().map(|n| n.id()),
            node.size(),
        ));
        shape(node.right(), out);
    }
}

fn sizes_consistent(node: Option<NodeRef<'_, i8>>) -> Option<usize> {
    let Some(node) = node else {
        return Some(0);
    };
    let size = 1 + sizes_consistent(node.left())? + sizes_consistent(node.right())?;
    (size == node.size()).then_some(size)
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = lenient();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.inorder().eq(set.iter())
        && tree.len() == set.len()
        && sizes_consistent(tree.root()) == Some(set.len())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = lenient();
    for x in &xs {
        tree.add(*x).unwrap();
    }

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = lenient();
    for x in &xs {
        tree.add(*x).unwrap();
    }
    let added: BTreeSet<_> = xs.into_iter().collect();
    let nots: BTreeSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = lenient();
    for x in &xs {
        tree.add(*x).unwrap();
    }
    let mut present: BTreeSet<_> = xs.iter().copied().collect();
    for delete in &deletes {
        assert_eq!(
            tree.remove(delete).is_ok(),
            present.remove(delete) || present.is_empty()
        );
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|x| !tree.contains(x)) && still_present.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn duplicates_rejected(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    let mut seen = BTreeSet::new();

    xs.iter().all(|x| match tree.add(*x) {
        Ok(_) => seen.insert(*x),
        Err(Error::DuplicateKey(id)) => {
            !seen.insert(*x) && tree.node(id).map(|n| n.key()) == Some(x)
        }
        Err(_) => false,
    })
}

#[quickcheck]
fn rotations_keep_order_and_sizes(xs: Vec<i8>, at: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    let mut lookup = Lookup::new();
    for x in &xs {
        if let Ok(id) = tree.add(*x) {
            lookup.insert(*x, id);
        }
    }
    let before: Vec<_> = tree.inorder().copied().collect();

    for k in &at {
        let Some(&id) = lookup.get(k) else {
            continue;
        };
        if tree.try_rotate_left(id, &mut lookup).is_err() {
            let _ = tree.try_rotate_right(id, &mut lookup);
        }
    }

    tree.inorder().copied().eq(before)
        && sizes_consistent(tree.root()) == Some(lookup.len())
        && lookup.iter().all(|(k, id)| tree.node(*id).map(|n| n.key()) == Some(k))
}

#[quickcheck]
fn rotate_left_then_right_is_identity(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    let mut lookup = Lookup::new();
    for x in &xs {
        if let Ok(id) = tree.add(*x) {
            lookup.insert(*x, id);
        }
    }
    let mut before = Shape::new();
    shape(tree.root(), &mut before);

    for &(id, _, _, right, _) in &before {
        if right.is_none() {
            continue;
        }
        tree.rotate_left(id, &mut lookup);
        tree.rotate_right(id, &mut lookup);

        let mut after = Shape::new();
        shape(tree.root(), &mut after);
        if after != before {
            return false;
        }
    }

    lookup.len() == tree.len()
        && lookup.iter().all(|(k, id)| tree.node(*id).map(|n| n.key()) == Some(k))
}

#[quickcheck]
fn layout_ranks_match_inorder(xs: Vec<i8>) -> bool {
    let mut tree = lenient();
    for x in &xs {
        tree.add(*x).unwrap();
    }
    let mut placed = Vec::new();
    layout(tree.root(), 0, &mut placed);

    let roots = placed.iter().filter(|(_, depth)| *depth == 0).count();

    roots == usize::from(!tree.is_empty())
        && placed
            .iter()
            .enumerate()
            .all(|(rank, (key, _))| tree.select(rank) == Some(key) && tree.rank(key) == Some(rank))
}
