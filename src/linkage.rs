use crate::data_wrappers::{DendrogramRow, MstEdge};
use crate::distance::DistanceMetric;
use crate::union_find::UnionFind;
use num_traits::Float;

/// Strategy for constructing the minimum spanning tree of the mutual
/// reachability graph.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Algorithm {
    /// Materialises the full mutual reachability matrix and runs Prim's
    /// algorithm over it. Memory is quadratic in the number of samples.
    Generic,
    /// Prim's algorithm with pairwise distances computed on demand and core
    /// distances answered by a k-d tree. Never builds the full matrix.
    PrimsIndexed,
}

/// Transforms a pairwise distance matrix into mutual reachability:
/// `max(core[i], core[j], dist[i][j] / alpha)`. Core distances must have been
/// taken from the matrix before the alpha scaling applied here.
pub(crate) fn mutual_reachability<T: Float>(
    mut dist_matrix: Vec<Vec<T>>,
    core_distances: &[T],
    alpha: f64,
) -> Vec<Vec<T>> {
    if alpha != 1.0 {
        let alpha = T::from(alpha).expect("Couldn't convert alpha to T");
        for row in dist_matrix.iter_mut() {
            for val in row.iter_mut() {
                *val = *val / alpha;
            }
        }
    }
    for (i, row) in dist_matrix.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            let core = core_distances[i].max(core_distances[j]);
            if core > *val {
                *val = core;
            }
        }
    }
    dist_matrix
}

/// Prim's algorithm over a dense mutual reachability matrix. Emits n - 1
/// edges in discovery order; the left node of each edge is the right node of
/// the previous one.
pub(crate) fn mst_linkage_core<T: Float>(mutual_reachability: &[Vec<T>]) -> Vec<MstEdge<T>> {
    let n_samples = mutual_reachability.len();
    let mut mst = Vec::with_capacity(n_samples.saturating_sub(1));

    let mut current_node = 0_usize;
    let mut current_labels: Vec<usize> = (0..n_samples).collect();
    let mut current_distances: Vec<T> = vec![T::infinity(); n_samples];

    for _ in 1..n_samples {
        // Drop the node just added to the tree, keeping the best known
        // distance of every remaining node aligned with its label.
        let mut labels = Vec::with_capacity(current_labels.len() - 1);
        let mut left = Vec::with_capacity(current_labels.len() - 1);
        for (&label, &dist) in current_labels.iter().zip(current_distances.iter()) {
            if label != current_node {
                labels.push(label);
                left.push(dist);
            }
        }
        current_labels = labels;

        current_distances = current_labels
            .iter()
            .zip(left.iter())
            .map(|(&label, &known)| {
                let candidate = mutual_reachability[current_node][label];
                if known <= candidate {
                    known
                } else {
                    candidate
                }
            })
            .collect();

        let mut new_index = 0;
        for (idx, dist) in current_distances.iter().enumerate() {
            if *dist < current_distances[new_index] {
                new_index = idx;
            }
        }
        let new_node = current_labels[new_index];
        mst.push(MstEdge {
            left: current_node,
            right: new_node,
            weight: current_distances[new_index],
        });
        current_node = new_node;
    }
    mst
}

/// Prim's algorithm without a materialised matrix. Mutual reachability is
/// folded into the scan: a raw distance only has to be computed (and maxed
/// with the two core distances) when it could improve on the best known
/// distance of a node outside the tree.
pub(crate) fn mst_linkage_cdist<T: Float>(
    data: &[Vec<T>],
    core_distances: &[T],
    dist_metric: DistanceMetric,
    alpha: f64,
) -> Vec<MstEdge<T>> {
    let n_samples = data.len();
    let alpha_t = T::from(alpha).expect("Couldn't convert alpha to T");
    let mut mst = Vec::with_capacity(n_samples.saturating_sub(1));

    let mut in_tree = vec![false; n_samples];
    let mut current_distances: Vec<T> = vec![T::infinity(); n_samples];
    let mut current_node = 0_usize;

    for _ in 1..n_samples {
        in_tree[current_node] = true;
        let current_core = core_distances[current_node];

        let mut new_dist = T::max_value();
        let mut new_node = 0;

        for j in 0..n_samples {
            if in_tree[j] {
                continue;
            }
            let right = current_distances[j];
            let mut left = dist_metric.calc_dist(&data[current_node], &data[j]);
            if alpha != 1.0 {
                left = left / alpha_t;
            }
            let core_j = core_distances[j];

            // The mutual reachability through this edge cannot beat the best
            // known distance of j, so only j's existing entry competes.
            if current_core > right || core_j > right || left > right {
                if right < new_dist {
                    new_dist = right;
                    new_node = j;
                }
                continue;
            }

            left = left.max(current_core).max(core_j);
            if left < right {
                current_distances[j] = left;
                if left < new_dist {
                    new_dist = left;
                    new_node = j;
                }
            } else if right < new_dist {
                new_dist = right;
                new_node = j;
            }
        }

        mst.push(MstEdge {
            left: current_node,
            right: new_node,
            weight: new_dist,
        });
        current_node = new_node;
    }
    mst
}

pub(crate) fn sort_mst_by_weight<T: Float>(mst: &mut [MstEdge<T>]) {
    mst.sort_by(|a, b| a.weight.partial_cmp(&b.weight).expect("Invalid floats"));
}

/// Relabels the sorted minimum spanning tree into a single linkage
/// dendrogram, tracking merged cluster sizes through a union-find.
pub(crate) fn label_mst<T: Float>(
    sorted_mst: &[MstEdge<T>],
    n_samples: usize,
) -> Vec<DendrogramRow<T>> {
    let mut dendrogram: Vec<DendrogramRow<T>> = Vec::with_capacity(n_samples - 1);
    let mut union_find = UnionFind::new(n_samples);

    for edge in sorted_mst.iter().take(n_samples - 1) {
        let left_child = union_find.fast_find(edge.left);
        let right_child = union_find.fast_find(edge.right);
        let size = union_find.size_of(left_child) + union_find.size_of(right_child);

        dendrogram.push(DendrogramRow {
            left_child,
            right_child,
            delta: edge.weight,
            size,
        });

        union_find.union(left_child, right_child);
    }

    dendrogram
}
