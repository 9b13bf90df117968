use crate::linkage::Algorithm;
use crate::{DistanceMetric, HdbscanError, HdbscanHyperParams};
use num_traits::Float;

/// Checks hyper parameters and input data before any clustering work begins.
pub(crate) struct DataValidator<'a, T> {
    data: &'a [Vec<T>],
    hp: &'a HdbscanHyperParams,
}

impl<'a, T: Float> DataValidator<'a, T> {
    pub(crate) fn new(data: &'a [Vec<T>], hp: &'a HdbscanHyperParams) -> Self {
        Self { data, hp }
    }

    pub(crate) fn validate(&self) -> Result<(), HdbscanError> {
        self.validate_hyper_params()?;
        self.validate_input_data()
    }

    fn validate_hyper_params(&self) -> Result<(), HdbscanError> {
        if !(self.hp.alpha > 0.0) {
            return Err(HdbscanError::InvalidParameter(format!(
                "alpha must be greater than zero, got {}",
                self.hp.alpha
            )));
        }
        if self.hp.min_pts < 1 {
            return Err(HdbscanError::InvalidParameter(String::from(
                "min_pts cannot be lower than 1",
            )));
        }
        if self.hp.min_cluster_size < 2 {
            return Err(HdbscanError::InvalidParameter(String::from(
                "min_cluster_size cannot be lower than 2",
            )));
        }
        if self.hp.leaf_size < 1 {
            return Err(HdbscanError::InvalidParameter(String::from(
                "leaf_size cannot be lower than 1",
            )));
        }
        if let DistanceMetric::Minkowski(p) = self.hp.dist_metric {
            if !(p >= 1.0) {
                return Err(HdbscanError::InvalidParameter(format!(
                    "Minkowski exponent must be at least 1, got {p}"
                )));
            }
        }
        if self.hp.algorithm == Algorithm::PrimsIndexed
            && self.hp.dist_metric == DistanceMetric::Precalculated
        {
            return Err(HdbscanError::InvalidParameter(String::from(
                "precalculated distances cannot be queried through a spatial index; \
                use the Generic algorithm",
            )));
        }
        Ok(())
    }

    fn validate_input_data(&self) -> Result<(), HdbscanError> {
        if self.data.is_empty() {
            // Trivial inputs are labelled without running the pipeline.
            return Ok(());
        }
        let dims_0th = self.data[0].len();
        for (n, datapoint) in self.data.iter().enumerate() {
            for element in datapoint {
                if !element.is_finite() {
                    return Err(HdbscanError::InvalidParameter(format!(
                        "{n}th vector contains non-finite element(s)"
                    )));
                }
            }
            let dims_nth = datapoint.len();
            if dims_nth != dims_0th {
                return Err(HdbscanError::InvalidParameter(format!(
                    "0th data point has {dims_0th} dimensions, but {n}th has {dims_nth}"
                )));
            }
        }
        if self.hp.dist_metric == DistanceMetric::Precalculated {
            self.validate_precalculated_distances()?
        }
        Ok(())
    }

    fn validate_precalculated_distances(&self) -> Result<(), HdbscanError> {
        if !self.is_symmetrical_matrix() {
            return Err(HdbscanError::InvalidParameter(String::from(
                "precalculated distances must form a symmetrical square matrix",
            )));
        }
        Ok(())
    }

    fn is_symmetrical_matrix(&self) -> bool {
        let n = self.data.len();
        if self.data.iter().any(|row| row.len() != n) {
            return false;
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if (self.data[i][j] - self.data[j][i]).abs() > T::epsilon() {
                    return false;
                }
            }
        }
        true
    }
}
