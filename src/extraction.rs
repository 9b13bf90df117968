use crate::data_wrappers::CondensedRow;
use crate::union_find::LabelUnionFind;
use crate::NOISE;
use num_traits::Float;
use std::collections::{HashMap, HashSet, VecDeque};

/// Stability of every condensed tree parent: the sum over its rows of
/// `(lambda - birth) * child_size`, where a node's birth is the smallest
/// lambda at which it appeared as a child. Roots never appear as children and
/// are born at zero.
pub(crate) fn compute_stabilities<T: Float>(condensed_tree: &[CondensedRow<T>]) -> HashMap<usize, T> {
    let mut births: HashMap<usize, T> = HashMap::new();
    for row in condensed_tree {
        births
            .entry(row.child)
            .and_modify(|birth| {
                if row.lambda < *birth {
                    *birth = row.lambda
                }
            })
            .or_insert(row.lambda);
    }

    let mut stabilities: HashMap<usize, T> = HashMap::new();
    for row in condensed_tree {
        let birth = births.get(&row.parent).copied().unwrap_or_else(T::zero);
        let persistence = (row.lambda - birth) * T::from(row.child_size).unwrap_or_else(T::one);
        let entry = stabilities.entry(row.parent).or_insert_with(T::zero);
        *entry = *entry + persistence;
    }
    stabilities
}

/// Picks the clusters that maximise total stability, walking candidates from
/// the deepest id upwards. A parent whose combined child stability exceeds
/// its own cedes to the children (and passes the combined value further up);
/// otherwise it claims the whole subtree. No winner is an ancestor of
/// another.
pub(crate) fn extract_winning_clusters<T: Float>(
    condensed_tree: &[CondensedRow<T>],
    stabilities: &mut HashMap<usize, T>,
    n_samples: usize,
) -> Vec<usize> {
    // Children with more than one point form the cluster tree; single-point
    // fall-outs are not selection candidates.
    let mut cluster_children: HashMap<usize, Vec<usize>> = HashMap::new();
    for row in condensed_tree {
        if row.child_size > 1 {
            cluster_children.entry(row.parent).or_default().push(row.child);
        }
    }

    let mut node_ids: Vec<usize> = stabilities
        .keys()
        .copied()
        .filter(|&id| id != n_samples)
        .collect();
    node_ids.sort_unstable_by(|a, b| b.cmp(a));

    let mut is_cluster: HashMap<usize, bool> = node_ids.iter().map(|&id| (id, true)).collect();

    for &node_id in &node_ids {
        let subtree_stability = cluster_children
            .get(&node_id)
            .map(|children| {
                children
                    .iter()
                    .map(|child| stabilities.get(child).copied().unwrap_or_else(T::zero))
                    .fold(T::zero(), std::ops::Add::add)
            })
            .unwrap_or_else(T::zero);
        let own_stability = stabilities.get(&node_id).copied().unwrap_or_else(T::zero);

        if subtree_stability > own_stability {
            is_cluster.insert(node_id, false);
            stabilities.insert(node_id, subtree_stability);
        } else {
            for descendant in cluster_descendants(&cluster_children, node_id) {
                if descendant != node_id {
                    is_cluster.insert(descendant, false);
                }
            }
        }
    }

    let mut winning_clusters: Vec<usize> = is_cluster
        .into_iter()
        .filter(|(_, selected)| *selected)
        .map(|(id, _)| id)
        .collect();
    winning_clusters.sort_unstable();
    winning_clusters
}

fn cluster_descendants(
    cluster_children: &HashMap<usize, Vec<usize>>,
    root: usize,
) -> Vec<usize> {
    let mut process_queue = VecDeque::from([root]);
    let mut descendants = Vec::new();
    while let Some(node_id) = process_queue.pop_front() {
        descendants.push(node_id);
        if let Some(children) = cluster_children.get(&node_id) {
            process_queue.extend(children.iter().copied());
        }
    }
    descendants
}

/// Maps every point to the dense label of its enclosing winning cluster, or
/// to `NOISE`. Rows whose child is not a winner are collapsed through a
/// union-find, so each point's representative lands on its nearest selected
/// ancestor (or on the root, meaning noise).
pub(crate) fn label_data<T: Float>(
    condensed_tree: &[CondensedRow<T>],
    winning_clusters: &[usize],
    n_samples: usize,
) -> Vec<i32> {
    let mut labels = vec![NOISE; n_samples];
    if winning_clusters.is_empty() || condensed_tree.is_empty() {
        return labels;
    }

    let cluster_labels: HashMap<usize, i32> = winning_clusters
        .iter()
        .enumerate()
        .map(|(label, &id)| (id, label as i32))
        .collect();
    let winning: HashSet<usize> = winning_clusters.iter().copied().collect();

    let root_cluster = condensed_tree
        .iter()
        .map(|row| row.parent)
        .min()
        .unwrap_or(n_samples);
    let max_parent = condensed_tree
        .iter()
        .map(|row| row.parent)
        .max()
        .unwrap_or(n_samples);

    let mut union_find = LabelUnionFind::new(max_parent + 1);
    for row in condensed_tree {
        if !winning.contains(&row.child) {
            union_find.union(row.parent, row.child);
        }
    }

    for (point, label) in labels.iter_mut().enumerate() {
        let cluster = union_find.find(point);
        if cluster > root_cluster {
            if let Some(&cluster_label) = cluster_labels.get(&cluster) {
                *label = cluster_label;
            }
        }
    }
    labels
}
