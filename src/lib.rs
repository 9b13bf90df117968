//! Hierarchical Density-Based Spatial Clustering of Applications with Noise
//! ("HDBSCAN") in Rust. Generic over floating point numeric types.
//!
//! HDBSCAN runs density-based clustering across every density threshold at
//! once and keeps the clusters that persist the longest, which gives it three
//! properties that matter on real world data:
//!  1. It does not force every point into a cluster. Points in sparse regions
//!     are labelled as noise;
//!  2. It finds clusters of varying densities, unlike plain DBSCAN which
//!     applies one static density threshold everywhere; and
//!  3. It makes no assumption about the number of clusters. The most
//!     persistent clusters are selected, however many there are.
//!
//! The pipeline behind `fit` builds mutual reachability distances from
//! per-point core distances, spans them with a minimum spanning tree (either
//! over a dense matrix or through a k-d tree), condenses the resulting single
//! linkage dendrogram under a minimum cluster size, and selects the final
//! clusters by maximising stability.
//!
//! # Examples
//!```
//!use std::collections::HashSet;
//!use hdclust::Hdbscan;
//!
//!let data: Vec<Vec<f32>> = vec![
//!    vec![1.5, 2.2],
//!    vec![1.0, 1.1],
//!    vec![1.2, 1.4],
//!    vec![0.8, 1.0],
//!    vec![1.1, 1.0],
//!    vec![3.7, 4.0],
//!    vec![3.9, 3.9],
//!    vec![3.6, 4.1],
//!    vec![3.8, 3.9],
//!    vec![4.0, 4.1],
//!    vec![10.0, 10.0],
//!];
//!let clusterer = Hdbscan::default_hyper_params(&data);
//!let labels = clusterer.fit().unwrap().labels().unwrap();
//!//First five points form one cluster
//!assert_eq!(1, labels[..5].iter().collect::<HashSet<_>>().len());
//!// Next five points are a second cluster
//!assert_eq!(1, labels[5..10].iter().collect::<HashSet<_>>().len());
//!// The final point is noise
//!assert_eq!(-1, labels[10]);
//!```
//!
//! # References
//! * [Campello, R.J.G.B.; Moulavi, D.; Sander, J. Density-based clustering based on hierarchical density estimates.](https://link.springer.com/chapter/10.1007/978-3-642-37456-2_14)
//! * [How HDBSCAN Works](https://hdbscan.readthedocs.io/en/latest/how_hdbscan_works.html)

pub use crate::distance::DistanceMetric;
pub use crate::error::HdbscanError;
pub use crate::hdbscan::Hdbscan;
pub use crate::hyper_parameters::{HdbscanHyperParams, HyperParamBuilder};
pub use crate::linkage::Algorithm;

mod condense;
mod core_distances;
mod data_wrappers;
mod distance;
mod error;
mod extraction;
mod hdbscan;
mod hyper_parameters;
mod linkage;
mod union_find;
mod validation;

/// The reserved label marking a point that belongs to no cluster.
pub const NOISE: i32 = -1;
