#![cfg(feature = "parallel")]
use crate::distance::DistanceMetric;
use num_traits::Float;
use rayon::prelude::*;

pub(crate) fn calc_pairwise_distances<T: Float + Send + Sync>(
    data: &[Vec<T>],
    dist_metric: DistanceMetric,
) -> Vec<Vec<T>> {
    data.par_iter()
        .map(|a| data.iter().map(|b| dist_metric.calc_dist(a, b)).collect())
        .collect()
}

pub(crate) fn core_distances_from_matrix<T: Float + Send + Sync>(
    dist_matrix: &[Vec<T>],
    k: usize,
) -> Vec<T> {
    dist_matrix
        .par_iter()
        .map(|distances| {
            let mut dist = distances.clone();
            dist.sort_by(|a, b| a.partial_cmp(b).expect("Invalid float"));
            dist[k - 1]
        })
        .collect()
}

/// Tree construction stays serial; only the per-point queries fan out.
pub(crate) fn kd_tree_core_distances<T: Float + Send + Sync>(
    data: &[Vec<T>],
    k: usize,
    dist_metric: DistanceMetric,
    leaf_size: usize,
) -> Vec<T> {
    let mut tree: kdtree::KdTree<T, usize, &Vec<T>> =
        kdtree::KdTree::with_capacity(data[0].len(), leaf_size);
    data.iter()
        .enumerate()
        .for_each(|(n, datapoint)| tree.add(datapoint, n).expect("Failed to add to KdTree"));

    let dist_func = |a: &[T], b: &[T]| dist_metric.calc_dist(a, b);
    data.par_iter()
        .map(|datapoint| {
            let result = tree
                .nearest(datapoint, k, &dist_func)
                .expect("Failed to find neighbours");
            result
                .into_iter()
                .map(|(dist, _idx)| dist)
                .last()
                .expect("Failed to find neighbours")
        })
        .collect()
}
