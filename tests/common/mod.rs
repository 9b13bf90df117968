use hdclust::{Algorithm, DistanceMetric, Hdbscan, HdbscanError, HdbscanHyperParams, NOISE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

pub type FitFn = fn(&Hdbscan<f64>) -> Result<(), HdbscanError>;

fn three_blob_data() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
        vec![11.0, 10.0],
        vec![-10.0, -10.0],
        vec![-10.0, -11.0],
        vec![-11.0, -10.0],
    ]
}

fn two_blobs_and_outlier_data() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0],
        vec![0.0, 0.1],
        vec![0.1, 0.0],
        vec![5.0, 5.0],
        vec![5.0, 5.1],
        vec![5.1, 5.0],
        vec![100.0, 100.0],
    ]
}

fn assert_one_shared_label(labels: &[i32]) {
    assert_eq!(1, labels.iter().collect::<HashSet<_>>().len());
    assert!(labels.iter().all(|&label| label != NOISE));
}

pub fn test_three_well_separated_blobs(fit_fn: FitFn) {
    let data = three_blob_data();
    for algorithm in [Algorithm::Generic, Algorithm::PrimsIndexed] {
        let hp = HdbscanHyperParams::builder()
            .min_pts(3)
            .min_cluster_size(3)
            .alpha(1.0)
            .algorithm(algorithm)
            .build();
        let clusterer = Hdbscan::new(&data, hp);
        fit_fn(&clusterer).unwrap();
        let labels = clusterer.labels().unwrap();

        assert_eq!(3, clusterer.num_clusters().unwrap());
        assert_eq!(0, clusterer.num_noise().unwrap());
        assert_one_shared_label(&labels[..3]);
        assert_one_shared_label(&labels[3..6]);
        assert_one_shared_label(&labels[6..]);
        assert_eq!(
            3,
            [labels[0], labels[3], labels[6]]
                .iter()
                .collect::<HashSet<_>>()
                .len()
        );
    }
}

pub fn test_two_blobs_and_an_outlier(fit_fn: FitFn) {
    let data = two_blobs_and_outlier_data();
    let hp = HdbscanHyperParams::builder()
        .min_pts(2)
        .min_cluster_size(3)
        .build();
    let clusterer = Hdbscan::new(&data, hp);
    fit_fn(&clusterer).unwrap();
    let labels = clusterer.labels().unwrap();

    assert_eq!(2, clusterer.num_clusters().unwrap());
    assert_eq!(1, clusterer.num_noise().unwrap());
    assert_one_shared_label(&labels[..3]);
    assert_one_shared_label(&labels[3..6]);
    assert_ne!(labels[0], labels[3]);
    assert_eq!(NOISE, labels[6]);
}

pub fn test_min_cluster_size_dissolves_small_groups(fit_fn: FitFn) {
    let data = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
    ];
    let hp = HdbscanHyperParams::builder()
        .min_pts(2)
        .min_cluster_size(3)
        .build();
    let clusterer = Hdbscan::new(&data, hp);
    fit_fn(&clusterer).unwrap();

    assert_eq!(vec![NOISE; 4], clusterer.labels().unwrap());
    assert_eq!(0, clusterer.num_clusters().unwrap());
    assert_eq!(4, clusterer.num_noise().unwrap());
}

fn three_jittered_blobs(seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let centers = [(0.0, 0.0), (25.0, 25.0), (-25.0, 25.0)];
    let mut data = Vec::new();
    for (centre_x, centre_y) in centers {
        for _ in 0..6 {
            data.push(vec![
                centre_x + rng.gen_range(-1.0..1.0),
                centre_y + rng.gen_range(-1.0..1.0),
            ]);
        }
    }
    data
}

fn cluster_count_with_alpha(fit_fn: FitFn, data: &[Vec<f64>], alpha: f64) -> usize {
    let hp = HdbscanHyperParams::builder()
        .min_pts(4)
        .min_cluster_size(4)
        .alpha(alpha)
        .build();
    let clusterer = Hdbscan::new(data, hp);
    fit_fn(&clusterer).unwrap();
    clusterer.num_clusters().unwrap()
}

pub fn test_stricter_alpha_never_adds_clusters(fit_fn: FitFn) {
    for seed in 0..10 {
        let data = three_jittered_blobs(seed);
        let looser = cluster_count_with_alpha(fit_fn, &data, 1.0);
        let stricter = cluster_count_with_alpha(fit_fn, &data, 0.1);
        assert!(stricter <= looser, "seed {seed}");
        assert_eq!(3, looser, "seed {seed}");
    }
}

pub fn test_coincident_points_cluster_without_panicking(fit_fn: FitFn) {
    // Zero pairwise distances condense at infinite lambda.
    let data = vec![
        vec![0.0, 0.0],
        vec![0.0, 0.0],
        vec![3.0, 3.0],
        vec![3.0, 3.0],
        vec![10.0, 0.0],
        vec![10.0, 0.0],
    ];
    let hp = HdbscanHyperParams::builder()
        .min_pts(2)
        .min_cluster_size(2)
        .build();
    let clusterer = Hdbscan::new(&data, hp);
    fit_fn(&clusterer).unwrap();
    let labels = clusterer.labels().unwrap();

    for pair in labels.chunks(2) {
        assert_eq!(pair[0], pair[1]);
        assert_ne!(NOISE, pair[0]);
    }
}

pub fn test_single_point_is_noise(fit_fn: FitFn) {
    let data = vec![vec![1.0, 2.0]];
    let clusterer = Hdbscan::default_hyper_params(&data);
    fit_fn(&clusterer).unwrap();

    assert_eq!(vec![NOISE], clusterer.labels().unwrap());
    assert_eq!(0, clusterer.num_clusters().unwrap());
    assert_eq!(1, clusterer.num_noise().unwrap());
}

pub fn test_empty_dataset(fit_fn: FitFn) {
    let data: Vec<Vec<f64>> = Vec::new();
    let clusterer = Hdbscan::default_hyper_params(&data);
    fit_fn(&clusterer).unwrap();

    assert!(clusterer.labels().unwrap().is_empty());
    assert_eq!(0, clusterer.num_clusters().unwrap());
    assert_eq!(0, clusterer.num_noise().unwrap());
}

pub fn test_repeated_fits_are_deterministic(fit_fn: FitFn) {
    let data = three_blob_data();
    let fit_labels = || {
        let hp = HdbscanHyperParams::builder()
            .min_pts(3)
            .min_cluster_size(3)
            .build();
        let clusterer = Hdbscan::new(&data, hp);
        fit_fn(&clusterer).unwrap();
        clusterer.labels().unwrap()
    };
    assert_eq!(fit_labels(), fit_labels());
}

pub fn test_fit_is_idempotent(fit_fn: FitFn) {
    let data = two_blobs_and_outlier_data();
    let hp = HdbscanHyperParams::builder()
        .min_pts(2)
        .min_cluster_size(3)
        .build();
    let clusterer = Hdbscan::new(&data, hp);
    fit_fn(&clusterer).unwrap();
    let first = clusterer.labels().unwrap();
    fit_fn(&clusterer).unwrap();
    assert_eq!(first, clusterer.labels().unwrap());
}

pub fn test_concurrent_fits_share_one_result(fit_fn: FitFn) {
    let data = three_blob_data();
    let hp = HdbscanHyperParams::builder()
        .min_pts(3)
        .min_cluster_size(3)
        .build();
    let clusterer = Hdbscan::new(&data, hp);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| fit_fn(&clusterer).unwrap());
        }
    });

    assert_eq!(3, clusterer.num_clusters().unwrap());
    assert_eq!(0, clusterer.num_noise().unwrap());
}

pub fn test_labels_partition_into_noise_and_dense_ids(fit_fn: FitFn) {
    let data = two_blobs_and_outlier_data();
    let hp = HdbscanHyperParams::builder()
        .min_pts(2)
        .min_cluster_size(3)
        .build();
    let clusterer = Hdbscan::new(&data, hp);
    fit_fn(&clusterer).unwrap();

    let labels = clusterer.labels().unwrap();
    let num_clusters = clusterer.num_clusters().unwrap() as i32;
    for label in labels {
        assert!(label == NOISE || (0..num_clusters).contains(&label));
    }
}

pub fn test_clusters_respect_min_cluster_size(fit_fn: FitFn) {
    let data = three_jittered_blobs(42);
    let hp = HdbscanHyperParams::builder()
        .min_pts(4)
        .min_cluster_size(4)
        .build();
    let clusterer = Hdbscan::new(&data, hp);
    fit_fn(&clusterer).unwrap();

    let mut counts: HashMap<i32, usize> = HashMap::new();
    for label in clusterer.labels().unwrap() {
        if label != NOISE {
            *counts.entry(label).or_insert(0) += 1;
        }
    }
    for (label, count) in counts {
        assert!(count >= 4, "cluster {label} has only {count} points");
    }
}

pub fn test_indexed_algorithm_agrees_with_generic(fit_fn: FitFn) {
    let data = two_blobs_and_outlier_data();
    let labels_for = |algorithm: Algorithm| {
        let hp = HdbscanHyperParams::builder()
            .min_pts(2)
            .min_cluster_size(3)
            .algorithm(algorithm)
            .build();
        let clusterer = Hdbscan::new(&data, hp);
        fit_fn(&clusterer).unwrap();
        clusterer.labels().unwrap()
    };
    let generic = labels_for(Algorithm::Generic);
    let indexed = labels_for(Algorithm::PrimsIndexed);

    // Cluster numbering may differ between back ends; the partition may not.
    for i in 0..generic.len() {
        assert_eq!(generic[i] == NOISE, indexed[i] == NOISE, "point {i}");
        for j in (i + 1)..generic.len() {
            assert_eq!(
                generic[i] == generic[j],
                indexed[i] == indexed[j],
                "points {i} and {j}"
            );
        }
    }
}

pub fn test_alternative_metrics(fit_fn: FitFn) {
    let data = three_blob_data();
    for dist_metric in [
        DistanceMetric::Manhattan,
        DistanceMetric::Chebyshev,
        DistanceMetric::Minkowski(3.0),
    ] {
        for algorithm in [Algorithm::Generic, Algorithm::PrimsIndexed] {
            let hp = HdbscanHyperParams::builder()
                .min_pts(3)
                .min_cluster_size(3)
                .dist_metric(dist_metric)
                .algorithm(algorithm)
                .build();
            let clusterer = Hdbscan::new(&data, hp);
            fit_fn(&clusterer).unwrap();
            assert_eq!(3, clusterer.num_clusters().unwrap());
            assert_eq!(0, clusterer.num_noise().unwrap());
        }
    }
}

pub fn test_precalculated_distance_matrix(fit_fn: FitFn) {
    // Two tight triples 5.0 apart plus one far point, expressed directly as
    // a symmetric distance matrix.
    let group_of = |i: usize| match i {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    };
    let n = 7;
    let mut dist_matrix = vec![vec![0.0_f64; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            dist_matrix[i][j] = match (group_of(i), group_of(j)) {
                (a, b) if a == b => 0.1,
                (2, _) | (_, 2) => 9.0,
                _ => 5.0,
            };
        }
    }

    let hp = HdbscanHyperParams::builder()
        .min_pts(2)
        .min_cluster_size(3)
        .dist_metric(DistanceMetric::Precalculated)
        .build();
    let clusterer = Hdbscan::new(&dist_matrix, hp);
    fit_fn(&clusterer).unwrap();
    let labels = clusterer.labels().unwrap();

    assert_eq!(2, clusterer.num_clusters().unwrap());
    assert_one_shared_label(&labels[..3]);
    assert_one_shared_label(&labels[3..6]);
    assert_ne!(labels[0], labels[3]);
    assert_eq!(NOISE, labels[6]);
}

pub fn test_invalid_parameters_are_rejected(fit_fn: FitFn) {
    let data = two_blobs_and_outlier_data();
    let bad_configs = vec![
        HdbscanHyperParams::builder().alpha(0.0).build(),
        HdbscanHyperParams::builder().alpha(-1.5).build(),
        HdbscanHyperParams::builder().min_pts(0).build(),
        HdbscanHyperParams::builder().min_cluster_size(1).build(),
        HdbscanHyperParams::builder().leaf_size(0).build(),
        HdbscanHyperParams::builder()
            .dist_metric(DistanceMetric::Minkowski(0.5))
            .build(),
        HdbscanHyperParams::builder()
            .dist_metric(DistanceMetric::Precalculated)
            .algorithm(Algorithm::PrimsIndexed)
            .build(),
    ];
    for hp in bad_configs {
        let clusterer = Hdbscan::new(&data, hp);
        let result = fit_fn(&clusterer);
        assert!(matches!(result, Err(HdbscanError::InvalidParameter(..))));
        // A rejected fit leaves the model unfitted.
        assert!(matches!(clusterer.labels(), Err(HdbscanError::NotFitted)));
    }
}

pub fn test_mismatched_dimensions(fit_fn: FitFn) {
    let data = vec![vec![1.5, 2.2], vec![1.0, 1.1], vec![1.2]];
    let clusterer = Hdbscan::default_hyper_params(&data);
    let result = fit_fn(&clusterer);
    assert!(matches!(result, Err(HdbscanError::InvalidParameter(..))));
}

pub fn test_non_finite_coordinate(fit_fn: FitFn) {
    let data = vec![vec![1.5, f64::INFINITY], vec![1.0, 1.1]];
    let clusterer = Hdbscan::default_hyper_params(&data);
    let result = fit_fn(&clusterer);
    assert!(matches!(result, Err(HdbscanError::InvalidParameter(..))));
}
