use crate::condense::condense_tree;
#[cfg(feature = "parallel")]
use crate::core_distances::parallel;
#[cfg(feature = "serial")]
use crate::core_distances::serial;
use crate::core_distances::neighbourhood_size;
use crate::data_wrappers::MstEdge;
use crate::extraction::{compute_stabilities, extract_winning_clusters, label_data};
use crate::linkage::{self, Algorithm};
use crate::validation::DataValidator;
use crate::{DistanceMetric, HdbscanError, HdbscanHyperParams, NOISE};
use num_traits::Float;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct FittedModel {
    labels: Vec<i32>,
    num_clusters: usize,
    num_noise: usize,
}

/// The HDBSCAN clustering model. Generic over floating point numeric types.
///
/// The model is constructed around a borrowed data set and fitted in place:
/// `fit` runs the clustering pipeline once and caches the result, after which
/// the label accessors become available. Repeated or concurrent calls to
/// `fit` observe the cached result rather than recomputing it.
#[derive(Debug)]
pub struct Hdbscan<'a, T> {
    data: &'a [Vec<T>],
    n_samples: usize,
    hp: HdbscanHyperParams,
    fitted: Mutex<Option<FittedModel>>,
}

impl<'a, T: Float> Hdbscan<'a, T> {
    /// Creates an instance of the HDBSCAN clustering model using a custom
    /// hyper parameter configuration.
    ///
    /// # Parameters
    /// * `data` - a reference to the data to cluster, a collection of vectors
    ///            of floating point numbers. The vectors must all be of the
    ///            same dimensionality and contain no non-finite values.
    /// * `hyper_params` - the hyper parameter configuration.
    ///
    /// # Returns
    /// * The HDBSCAN model instance.
    ///
    /// # Examples
    /// ```
    ///use hdclust::{Algorithm, DistanceMetric, Hdbscan, HdbscanHyperParams};
    ///
    ///let data: Vec<Vec<f32>> = vec![
    ///    vec![1.3, 1.1],
    ///    vec![1.3, 1.2],
    ///    vec![1.2, 1.2],
    ///    vec![1.0, 1.1],
    ///    vec![0.9, 1.0],
    ///    vec![0.9, 1.0],
    ///    vec![3.7, 4.0],
    ///];
    ///let config = HdbscanHyperParams::builder()
    ///    .min_cluster_size(3)
    ///    .min_pts(2)
    ///    .dist_metric(DistanceMetric::Manhattan)
    ///    .algorithm(Algorithm::Generic)
    ///    .build();
    ///let clusterer = Hdbscan::new(&data, config);
    /// ```
    pub fn new(data: &'a [Vec<T>], hyper_params: HdbscanHyperParams) -> Self {
        let n_samples = data.len();
        Hdbscan {
            data,
            n_samples,
            hp: hyper_params,
            fitted: Mutex::new(None),
        }
    }

    /// Creates an instance of the HDBSCAN clustering model using the default
    /// hyper parameters.
    ///
    /// # Parameters
    /// * `data` - a reference to the data to cluster, a collection of vectors
    ///            of floating point numbers. The vectors must all be of the
    ///            same dimensionality and contain no non-finite values.
    ///
    /// # Returns
    /// * The HDBSCAN model instance.
    ///
    /// # Examples
    /// ```
    ///use hdclust::Hdbscan;
    ///
    ///let data: Vec<Vec<f32>> = vec![
    ///    vec![1.5, 2.2],
    ///    vec![1.0, 1.1],
    ///    vec![1.2, 1.4],
    ///    vec![0.8, 1.0],
    ///    vec![1.1, 1.0],
    ///    vec![3.7, 4.0],
    ///    vec![3.9, 3.9],
    ///    vec![3.6, 4.1],
    ///    vec![3.8, 3.9],
    ///    vec![4.0, 4.1],
    ///    vec![10.0, 10.0],
    ///];
    ///let clusterer = Hdbscan::default_hyper_params(&data);
    /// ```
    pub fn default_hyper_params(data: &'a [Vec<T>]) -> Hdbscan<'a, T> {
        let hyper_params = HdbscanHyperParams::default();
        Hdbscan::new(data, hyper_params)
    }

    /// Fits the model: runs the full clustering pipeline and caches a label
    /// for every input point. Returns the fitted model, so accessor calls can
    /// be chained.
    ///
    /// Fitting is idempotent. A second call, from this or another thread,
    /// waits for the first to finish and then returns the cached result.
    /// Inputs of fewer than two points produce an all-noise labelling without
    /// touching the pipeline.
    ///
    /// # Returns
    /// * A result holding the fitted model, or an error if the hyper
    ///   parameters or the input data are invalid.
    ///
    /// # Examples
    /// ```
    ///use hdclust::Hdbscan;
    ///use std::collections::HashSet;
    ///
    ///let data: Vec<Vec<f32>> = vec![
    ///    vec![1.5, 2.2],
    ///    vec![1.0, 1.1],
    ///    vec![1.2, 1.4],
    ///    vec![0.8, 1.0],
    ///    vec![1.1, 1.0],
    ///    vec![3.7, 4.0],
    ///    vec![3.9, 3.9],
    ///    vec![3.6, 4.1],
    ///    vec![3.8, 3.9],
    ///    vec![4.0, 4.1],
    ///    vec![10.0, 10.0],
    ///];
    ///let clusterer = Hdbscan::default_hyper_params(&data);
    ///let labels = clusterer.fit().unwrap().labels().unwrap();
    /// //First five points form one cluster
    ///assert_eq!(1, labels[..5].iter().collect::<HashSet<_>>().len());
    /// // Next five points are a second cluster
    ///assert_eq!(1, labels[5..10].iter().collect::<HashSet<_>>().len());
    /// // The final point is noise
    ///assert_eq!(-1, labels[10]);
    /// ```
    #[cfg(feature = "serial")]
    pub fn fit(&self) -> Result<&Self, HdbscanError> {
        let mut state = self.lock_state()?;
        if state.is_some() {
            return Ok(self);
        }
        DataValidator::new(self.data, &self.hp).validate()?;
        info!(
            n_samples = self.n_samples,
            algorithm = ?self.hp.algorithm,
            "fitting HDBSCAN model"
        );

        let fitted = if self.n_samples < 2 {
            self.trivial_fit()
        } else {
            let min_spanning_tree = self.build_sorted_mst_serial();
            self.finish_fit(min_spanning_tree)
        };
        info!(
            num_clusters = fitted.num_clusters,
            num_noise = fitted.num_noise,
            "model fit complete"
        );

        *state = Some(fitted);
        Ok(self)
    }

    /// The cluster labels computed by `fit`, as a copy.
    ///
    /// A label of `NOISE` (-1) marks a point belonging to no cluster; any
    /// other label is a dense cluster index in `0..num_clusters`.
    ///
    /// # Returns
    /// * A result holding the label vector, or `NotFitted` if `fit` has not
    ///   completed.
    pub fn labels(&self) -> Result<Vec<i32>, HdbscanError> {
        let state = self.lock_state()?;
        state
            .as_ref()
            .map(|fitted| fitted.labels.clone())
            .ok_or(HdbscanError::NotFitted)
    }

    /// The number of distinct non-noise clusters found by `fit`.
    ///
    /// # Returns
    /// * A result holding the cluster count, or `NotFitted` if `fit` has not
    ///   completed.
    pub fn num_clusters(&self) -> Result<usize, HdbscanError> {
        let state = self.lock_state()?;
        state
            .as_ref()
            .map(|fitted| fitted.num_clusters)
            .ok_or(HdbscanError::NotFitted)
    }

    /// The number of points labelled as noise by `fit`.
    ///
    /// # Returns
    /// * A result holding the noise count, or `NotFitted` if `fit` has not
    ///   completed.
    pub fn num_noise(&self) -> Result<usize, HdbscanError> {
        let state = self.lock_state()?;
        state
            .as_ref()
            .map(|fitted| fitted.num_noise)
            .ok_or(HdbscanError::NotFitted)
    }

    /// The name of this model.
    pub fn name(&self) -> &'static str {
        "HDBSCAN"
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, Option<FittedModel>>, HdbscanError> {
        self.fitted.lock().map_err(|_| {
            HdbscanError::Resource(String::from(
                "model state lock poisoned by an earlier failed fit",
            ))
        })
    }

    #[cfg(feature = "serial")]
    fn build_sorted_mst_serial(&self) -> Vec<MstEdge<T>> {
        let k = neighbourhood_size(self.n_samples, self.hp.min_pts);
        let mut min_spanning_tree = match self.hp.algorithm {
            Algorithm::Generic => {
                let dist_matrix = if self.hp.dist_metric == DistanceMetric::Precalculated {
                    self.data.to_vec()
                } else {
                    serial::calc_pairwise_distances(self.data, self.hp.dist_metric)
                };
                let core_distances = serial::core_distances_from_matrix(&dist_matrix, k);
                let mutual_reachability =
                    linkage::mutual_reachability(dist_matrix, &core_distances, self.hp.alpha);
                linkage::mst_linkage_core(&mutual_reachability)
            }
            Algorithm::PrimsIndexed => {
                let core_distances = serial::kd_tree_core_distances(
                    self.data,
                    k,
                    self.hp.dist_metric,
                    self.hp.leaf_size,
                );
                linkage::mst_linkage_cdist(
                    self.data,
                    &core_distances,
                    self.hp.dist_metric,
                    self.hp.alpha,
                )
            }
        };
        linkage::sort_mst_by_weight(&mut min_spanning_tree);
        min_spanning_tree
    }

    fn finish_fit(&self, sorted_mst: Vec<MstEdge<T>>) -> FittedModel {
        debug!(n_edges = sorted_mst.len(), "minimum spanning tree built");
        let dendrogram = linkage::label_mst(&sorted_mst, self.n_samples);
        drop(sorted_mst);

        let condensed_tree = condense_tree(&dendrogram, self.n_samples, self.hp.min_cluster_size);
        drop(dendrogram);
        debug!(n_rows = condensed_tree.len(), "dendrogram condensed");

        let mut stabilities = compute_stabilities(&condensed_tree);
        let winning_clusters =
            extract_winning_clusters(&condensed_tree, &mut stabilities, self.n_samples);
        let labels = label_data(&condensed_tree, &winning_clusters, self.n_samples);

        let num_clusters = labels
            .iter()
            .filter(|&&label| label != NOISE)
            .collect::<HashSet<_>>()
            .len();
        let num_noise = labels.iter().filter(|&&label| label == NOISE).count();
        FittedModel {
            labels,
            num_clusters,
            num_noise,
        }
    }

    fn trivial_fit(&self) -> FittedModel {
        FittedModel {
            labels: vec![NOISE; self.n_samples],
            num_clusters: 0,
            num_noise: self.n_samples,
        }
    }
}

#[cfg(feature = "parallel")]
impl<'a, T: Float + Send + Sync> Hdbscan<'a, T> {
    /// Fits the model with the distance-matrix and core-distance stages
    /// parallelised. The remainder of the pipeline is identical to `fit` and
    /// the resulting labels are too. Not recommended for small or low
    /// dimension datasets.
    ///
    /// # Returns
    /// * A result holding the fitted model, or an error if the hyper
    ///   parameters or the input data are invalid.
    pub fn fit_par(&self) -> Result<&Self, HdbscanError> {
        let mut state = self.lock_state()?;
        if state.is_some() {
            return Ok(self);
        }
        DataValidator::new(self.data, &self.hp).validate()?;
        info!(
            n_samples = self.n_samples,
            algorithm = ?self.hp.algorithm,
            "fitting HDBSCAN model (parallel core distances)"
        );

        let fitted = if self.n_samples < 2 {
            self.trivial_fit()
        } else {
            let min_spanning_tree = self.build_sorted_mst_parallel();
            self.finish_fit(min_spanning_tree)
        };
        info!(
            num_clusters = fitted.num_clusters,
            num_noise = fitted.num_noise,
            "model fit complete"
        );

        *state = Some(fitted);
        Ok(self)
    }

    fn build_sorted_mst_parallel(&self) -> Vec<MstEdge<T>> {
        let k = neighbourhood_size(self.n_samples, self.hp.min_pts);
        let mut min_spanning_tree = match self.hp.algorithm {
            Algorithm::Generic => {
                let dist_matrix = if self.hp.dist_metric == DistanceMetric::Precalculated {
                    self.data.to_vec()
                } else {
                    parallel::calc_pairwise_distances(self.data, self.hp.dist_metric)
                };
                let core_distances = parallel::core_distances_from_matrix(&dist_matrix, k);
                let mutual_reachability =
                    linkage::mutual_reachability(dist_matrix, &core_distances, self.hp.alpha);
                linkage::mst_linkage_core(&mutual_reachability)
            }
            Algorithm::PrimsIndexed => {
                let core_distances = parallel::kd_tree_core_distances(
                    self.data,
                    k,
                    self.hp.dist_metric,
                    self.hp.leaf_size,
                );
                linkage::mst_linkage_cdist(
                    self.data,
                    &core_distances,
                    self.hp.dist_metric,
                    self.hp.alpha,
                )
            }
        };
        linkage::sort_mst_by_weight(&mut min_spanning_tree);
        min_spanning_tree
    }
}
