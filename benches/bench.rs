use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sized_bst::{Lookup, Tree};

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: usize) -> usize {
    2usize.pow(num_levels as u32) - 1
}

/// Builds a tree by adding keys in an ascending manner. Without balancing this is a stick.
fn get_unbalanced_tree(num_levels: usize) -> (Tree<i32>, Lookup<i32>) {
    let mut tree = Tree::new();
    let mut lookup = Lookup::new();
    for x in (0..).take(num_nodes_in_full_tree(num_levels)) {
        lookup.insert(x, tree.add(x).unwrap());
    }

    (tree, lookup)
}

/// Builds a tree by adding keys so that, without any balancing, the resultant tree is still
/// balanced.
///
/// It ensures there are `num_levels` of nodes, all full.
fn get_balanced_tree(num_levels: usize) -> (Tree<i32>, Lookup<i32>) {
    let mut tree = Tree::new();
    let mut lookup = Lookup::new();
    let xs = (0..).take(num_nodes_in_full_tree(num_levels)).collect::<Vec<_>>();
    fill_balanced_tree(&mut tree, &mut lookup, &xs);
    (tree, lookup)
}

/// Recursive helper for [`get_balanced_tree`].
fn fill_balanced_tree(tree: &mut Tree<i32>, lookup: &mut Lookup<i32>, xs: &[i32]) {
    if !xs.is_empty() {
        let mid = xs.len() / 2;
        lookup.insert(xs[mid], tree.add(xs[mid]).unwrap());
        fill_balanced_tree(tree, lookup, &xs[..mid]);
        fill_balanced_tree(tree, lookup, &xs[mid + 1..]);
    }
}

/// Helper to bench a function on a tree.
/// It creates a group for the given name and closure and runs it against balanced and unbalanced
/// trees of various sizes before finishing the group. Each iteration gets a fresh clone of the
/// tree so mutations don't leak between iterations.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Tree<i32>, &mut Lookup<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    // For trees of size 2^3, 2^7, etc....
    for num_levels in [3, 7, 11] {
        let tree_tests = [
            ("unbalanced", get_unbalanced_tree(num_levels)),
            ("balanced", get_balanced_tree(num_levels)),
        ];
        let largest_key_in_tree = num_nodes_in_full_tree(num_levels) - 1;
        for (shape, (tree, lookup)) in tree_tests {
            let id = BenchmarkId::new(shape, largest_key_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let mut lookup = black_box(lookup.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, &mut lookup, black_box(largest_key_in_tree as i32));
                        time += instant.elapsed();
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

/// All benches run against balanced and unbalanced trees of various sizes and cover successful
/// and unsuccessful operations.
pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "contains", |tree, _, i| {
        black_box(tree.contains(&i));
    });
    bench_helper(c, "contains-miss", |tree, _, i| {
        black_box(tree.contains(&(i + 1)));
    });

    bench_helper(c, "add", |tree, _, i| {
        let _ = black_box(tree.add(i + 1));
    });

    bench_helper(c, "remove", |tree, _, i| {
        let _ = black_box(tree.remove(&i));
    });
    bench_helper(c, "remove-root", |tree, lookup, _| {
        let root = *tree.root().unwrap().key();
        let _ = black_box(tree.remove_tracked(&root, lookup));
    });
    bench_helper(c, "remove-miss", |tree, _, i| {
        let _ = black_box(tree.remove(&(i + 1)));
    });

    bench_helper(c, "rotate", |tree, lookup, _| {
        let root = tree.root().unwrap().id();
        if tree.try_rotate_left(root, lookup).is_err() {
            tree.rotate_right(root, lookup);
        }
    });

    bench_helper(c, "select-median", |tree, _, i| {
        black_box(tree.select(i as usize / 2));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
