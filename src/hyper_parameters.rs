use crate::distance::DistanceMetric;
use crate::linkage::Algorithm;

// Defaults for parameters
const MIN_PTS_DEFAULT: usize = 5;
const MIN_CLUSTER_SIZE_DEFAULT: usize = 5;
const ALPHA_DEFAULT: f64 = 1.0;
const ALGORITHM_DEFAULT: Algorithm = Algorithm::Generic;
const LEAF_SIZE_DEFAULT: usize = 40;
const DISTANCE_METRIC_DEFAULT: DistanceMetric = DistanceMetric::Euclidean;

/// A wrapper around the various hyper parameters used in HDBSCAN clustering.
/// Only use if you want to tune hyper parameters. Otherwise use
/// `Hdbscan::default_hyper_params` to instantiate the model with default
/// hyper parameters.
///
/// Values are stored as given; they are validated at entry to `Hdbscan::fit`.
#[derive(Debug, Clone, PartialEq)]
pub struct HdbscanHyperParams {
    pub(crate) min_pts: usize,
    pub(crate) min_cluster_size: usize,
    pub(crate) alpha: f64,
    pub(crate) algorithm: Algorithm,
    pub(crate) leaf_size: usize,
    pub(crate) dist_metric: DistanceMetric,
}

/// Builder object to set custom hyper parameters.
pub struct HyperParamBuilder {
    min_pts: Option<usize>,
    min_cluster_size: Option<usize>,
    alpha: Option<f64>,
    algorithm: Option<Algorithm>,
    leaf_size: Option<usize>,
    dist_metric: Option<DistanceMetric>,
}

impl HdbscanHyperParams {
    pub(crate) fn default() -> Self {
        Self::builder().build()
    }

    /// Enters the builder pattern, allowing custom hyper parameters to be set
    /// using the various setter methods.
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn builder() -> HyperParamBuilder {
        HyperParamBuilder {
            min_pts: None,
            min_cluster_size: None,
            alpha: None,
            algorithm: None,
            leaf_size: None,
            dist_metric: None,
        }
    }
}

impl HyperParamBuilder {
    /// Sets min points, the neighbourhood size used when calculating core
    /// distances. The core distance of a data point is the distance to its
    /// min_pts-th nearest neighbour (the point itself included), and acts as
    /// the density measure that the whole clustering is built on.
    /// Must be at least 1. Defaults to 5.
    ///
    /// # Parameters
    /// * min_pts - the number of neighbourhood points considered in core distances
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn min_pts(mut self, min_pts: usize) -> HyperParamBuilder {
        self.min_pts = Some(min_pts);
        self
    }

    /// Sets the minimum cluster size - the minimum number of samples for a
    /// group of data points to be considered a cluster. Any would-be cluster
    /// with fewer members is dissolved into individual noise candidates.
    /// This should be considered the main hyper parameter for changing the
    /// results of clustering. Must be at least 2. Defaults to 5.
    ///
    /// # Parameters
    /// * min_cluster_size - the minimum cluster size
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn min_cluster_size(mut self, min_cluster_size: usize) -> HyperParamBuilder {
        self.min_cluster_size = Some(min_cluster_size);
        self
    }

    /// Sets alpha, a scaler applied to raw distances before they enter the
    /// mutual reachability calculation. Distances are divided by alpha, so
    /// values above 1.0 shrink effective distances and make merges less
    /// conservative. Must be greater than zero. Defaults to 1.0.
    ///
    /// # Parameters
    /// * alpha - the distance scaler
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn alpha(mut self, alpha: f64) -> HyperParamBuilder {
        self.alpha = Some(alpha);
        self
    }

    /// Sets the algorithm used to construct the minimum spanning tree of the
    /// mutual reachability graph. `Generic` materialises the full pairwise
    /// matrix and suits small data or precalculated distances;
    /// `PrimsIndexed` answers core-distance queries through a k-d tree and
    /// never builds the matrix. Defaults to `Generic`.
    ///
    /// # Parameters
    /// * algorithm - the minimum spanning tree construction strategy
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn algorithm(mut self, algorithm: Algorithm) -> HyperParamBuilder {
        self.algorithm = Some(algorithm);
        self
    }

    /// Sets the leaf size hint for the spatial index backing `PrimsIndexed`.
    /// Ignored by the `Generic` algorithm. Must be at least 1. Defaults to 40.
    ///
    /// # Parameters
    /// * leaf_size - the spatial index bucket capacity
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn leaf_size(mut self, leaf_size: usize) -> HyperParamBuilder {
        self.leaf_size = Some(leaf_size);
        self
    }

    /// Sets the distance metric. HDBSCAN uses this metric to calculate the
    /// distance between data points. Defaults to Euclidean. Options are
    /// defined by the DistanceMetric enum.
    ///
    /// # Parameters
    /// * dist_metric - the distance metric
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn dist_metric(mut self, dist_metric: DistanceMetric) -> HyperParamBuilder {
        self.dist_metric = Some(dist_metric);
        self
    }

    /// Finishes the building of the hyper parameter configuration. A call to
    /// this method is required to exit the builder pattern and complete the
    /// construction of the hyper parameters.
    ///
    /// # Returns
    /// * The completed HDBSCAN hyper parameter configuration.
    pub fn build(self) -> HdbscanHyperParams {
        HdbscanHyperParams {
            min_pts: self.min_pts.unwrap_or(MIN_PTS_DEFAULT),
            min_cluster_size: self.min_cluster_size.unwrap_or(MIN_CLUSTER_SIZE_DEFAULT),
            alpha: self.alpha.unwrap_or(ALPHA_DEFAULT),
            algorithm: self.algorithm.unwrap_or(ALGORITHM_DEFAULT),
            leaf_size: self.leaf_size.unwrap_or(LEAF_SIZE_DEFAULT),
            dist_metric: self.dist_metric.unwrap_or(DISTANCE_METRIC_DEFAULT),
        }
    }
}
