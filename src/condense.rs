use crate::data_wrappers::{CondensedRow, DendrogramRow};
use num_traits::Float;
use std::collections::VecDeque;

/// Walks the dendrogram breadth-first and rewrites it as a condensed tree.
/// Splits where both sides hold at least `min_cluster_size` points become new
/// clusters; smaller sides dissolve into per-point fall-out rows at the
/// lambda of the split. Relabelled cluster ids start at `n_samples` (the
/// root) and grow densely from there.
pub(crate) fn condense_tree<T: Float>(
    dendrogram: &[DendrogramRow<T>],
    n_samples: usize,
    min_cluster_size: usize,
) -> Vec<CondensedRow<T>> {
    let root = 2 * (n_samples - 1);
    let node_ids = bfs_dendrogram(dendrogram, root, n_samples);

    let mut relabel = vec![0_usize; root + 1];
    relabel[root] = n_samples;
    let mut next_label = n_samples + 1;

    let mut ignore = vec![false; root + 1];
    let mut condensed = Vec::new();

    for node_id in node_ids {
        if ignore[node_id] || node_id < n_samples {
            continue;
        }

        let row = &dendrogram[node_id - n_samples];
        let lambda = calc_lambda(row.delta);
        let left = row.left_child;
        let right = row.right_child;
        let left_count = subtree_size(dendrogram, left, n_samples);
        let right_count = subtree_size(dendrogram, right, n_samples);

        let left_is_cluster = left_count >= min_cluster_size;
        let right_is_cluster = right_count >= min_cluster_size;

        match (left_is_cluster, right_is_cluster) {
            (true, true) => {
                for (child, child_size) in [(left, left_count), (right, right_count)] {
                    relabel[child] = next_label;
                    next_label += 1;
                    condensed.push(CondensedRow {
                        parent: relabel[node_id],
                        child: relabel[child],
                        lambda,
                        child_size,
                    });
                }
            }
            (false, false) => {
                let parent = relabel[node_id];
                add_fall_outs(dendrogram, left, parent, lambda, n_samples, &mut condensed, &mut ignore);
                add_fall_outs(dendrogram, right, parent, lambda, n_samples, &mut condensed, &mut ignore);
            }
            (true, false) => {
                // The surviving side keeps this node's label: no split happened.
                relabel[left] = relabel[node_id];
                add_fall_outs(
                    dendrogram,
                    right,
                    relabel[node_id],
                    lambda,
                    n_samples,
                    &mut condensed,
                    &mut ignore,
                );
            }
            (false, true) => {
                relabel[right] = relabel[node_id];
                add_fall_outs(
                    dendrogram,
                    left,
                    relabel[node_id],
                    lambda,
                    n_samples,
                    &mut condensed,
                    &mut ignore,
                );
            }
        }
    }
    condensed
}

/// Zero-distance merges condense at infinite density.
fn calc_lambda<T: Float>(delta: T) -> T {
    if delta > T::zero() {
        T::one() / delta
    } else {
        T::infinity()
    }
}

fn subtree_size<T: Float>(dendrogram: &[DendrogramRow<T>], node_id: usize, n_samples: usize) -> usize {
    if node_id < n_samples {
        1
    } else {
        dendrogram[node_id - n_samples].size
    }
}

/// Breadth-first visit order over the dendrogram starting at `root`.
/// Leaves appear in the order too; callers skip or collect them as needed.
pub(crate) fn bfs_dendrogram<T: Float>(
    dendrogram: &[DendrogramRow<T>],
    root: usize,
    n_samples: usize,
) -> Vec<usize> {
    let mut process_queue = VecDeque::from([root]);
    let mut visit_order = Vec::new();

    while let Some(node_id) = process_queue.pop_front() {
        visit_order.push(node_id);
        if node_id >= n_samples {
            let row = &dendrogram[node_id - n_samples];
            process_queue.push_back(row.left_child);
            process_queue.push_back(row.right_child);
        }
    }
    visit_order
}

fn add_fall_outs<T: Float>(
    dendrogram: &[DendrogramRow<T>],
    node_id: usize,
    parent: usize,
    lambda: T,
    n_samples: usize,
    condensed: &mut Vec<CondensedRow<T>>,
    ignore: &mut [bool],
) {
    for child_id in bfs_dendrogram(dendrogram, node_id, n_samples) {
        if child_id < n_samples {
            condensed.push(CondensedRow {
                parent,
                child: child_id,
                lambda,
                child_size: 1,
            });
        }
        ignore[child_id] = true;
    }
}
