//! Builds a small tree, keeps a lookup table of node handles, and rotates at two keys, printing
//! the in-order keys and a text drawing of the tree after each step.
//!
//! Run with `cargo run --example rotation`. Set `VERBOSE=1` to also see the tree's trace and debug
//! events.

use sized_bst::{Lookup, NodeRef, Tree};
use tracing::Level;

const KEYS: [i32; 25] = [
    50, 0, 40, 25, 95, 85, 45, 65, 5, 75, 15, 20, 70, 90, 30, 60, 35, 80, 55, 10, 6, 100, 56, 34,
    84,
];

/// Collects `(x, y, key)` for every node: `x` is the in-order rank and `y` the depth.
fn layout(node: Option<NodeRef<'_, i32>>, depth: usize, out: &mut Vec<(usize, usize, i32)>) {
    if let Some(node) = node {
        layout(node.left(), depth + 1, out);
        out.push((out.len(), depth, *node.key()));
        layout(node.right(), depth + 1, out);
    }
}

fn draw(tree: &Tree<i32>) -> String {
    let mut placed = Vec::with_capacity(tree.len());
    layout(tree.root(), 0, &mut placed);

    let height = placed.iter().map(|(_, y, _)| y + 1).max().unwrap_or(0);
    let mut rows = vec![vec!["    ".to_string(); placed.len()]; height];
    for (x, y, key) in placed {
        rows[y][x] = format!("{key:>4}");
    }
    rows.iter()
        .map(|row| row.concat().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn show(step: &str, tree: &Tree<i32>) {
    println!("== {step}");
    println!("{:?}", tree.inorder().collect::<Vec<_>>());
    println!("{}\n", draw(tree));
}

fn main() {
    let level = if std::env::var_os("VERBOSE").is_some() {
        Level::TRACE
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut tree = Tree::new();
    let mut lookup = Lookup::new();
    for key in KEYS {
        match tree.add(key) {
            Ok(id) => {
                lookup.insert(key, id);
            }
            Err(err) => tracing::warn!(key, %err, "skipping key"),
        }
    }
    println!("{} keys", tree.len());
    show("initial", &tree);

    for key in [85, 30] {
        tree.rotate_left(lookup[&key], &mut lookup);
        show(&format!("rotate left at {key}"), &tree);
    }
}
