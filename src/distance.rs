use num_traits::Float;

/// Pairwise distance metrics available to the HDBSCAN model.
///
/// All variants other than `Precalculated` compute a distance from two
/// coordinate vectors. `Precalculated` instead instructs the model to treat
/// the input rows as a ready-made symmetric distance matrix; it can only be
/// combined with [`crate::Algorithm::Generic`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DistanceMetric {
    Euclidean,
    Manhattan,
    /// L-infinity: the largest per-dimension difference.
    Chebyshev,
    /// General Lp distance with the given exponent p >= 1.
    Minkowski(f64),
    /// The input data is already a pairwise distance matrix.
    Precalculated,
}

impl DistanceMetric {
    pub(crate) fn calc_dist<T: Float>(&self, a: &[T], b: &[T]) -> T {
        match *self {
            Self::Euclidean => euclidean_distance(a, b),
            Self::Manhattan => manhattan_distance(a, b),
            Self::Chebyshev => chebyshev_distance(a, b),
            Self::Minkowski(p) => minkowski_distance(a, b, p),
            // Never computed: precalculated distances are read straight from
            // the input matrix, enforced during validation.
            Self::Precalculated => T::nan(),
        }
    }
}

pub(crate) fn euclidean_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| ((*x) - (*y)) * ((*x) - (*y)))
        .fold(T::zero(), std::ops::Add::add)
        .sqrt()
}

pub(crate) fn manhattan_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| ((*x) - (*y)).abs())
        .fold(T::zero(), std::ops::Add::add)
}

pub(crate) fn chebyshev_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| ((*x) - (*y)).abs())
        .fold(T::zero(), T::max)
}

pub(crate) fn minkowski_distance<T: Float>(a: &[T], b: &[T], p: f64) -> T {
    let p = T::from(p).unwrap_or_else(T::one);
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| ((*x) - (*y)).abs().powf(p))
        .fold(T::zero(), std::ops::Add::add)
        .powf(T::one() / p)
}
