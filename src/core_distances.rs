pub(crate) mod parallel;
pub(crate) mod serial;

/// Effective neighbourhood size for core distances: `min_pts` capped to the
/// number of rows, since a point has at most n - 1 neighbours.
pub(crate) fn neighbourhood_size(n_samples: usize, min_pts: usize) -> usize {
    min_pts.min(n_samples - 1)
}
