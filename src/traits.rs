//! Core traits for the fitted models.
//!
//! Every model here was fitted offline and is only ever applied. The traits
//! are the narrow seams between the recommender and those models, so a
//! different encoder or clustering model can be swapped in without touching
//! the ranking code.

use crate::error::Result;

/// Trait for fitted numeric transformers (scalers, projections).
///
/// # Examples
///
/// ```
/// use dinerec::prelude::*;
///
/// let scaler = StandardScaler::from_parts(vec![1.0, 10.0], vec![1.0, 5.0]).unwrap();
/// let out = scaler.transform_one(&[2.0, 20.0]).unwrap();
/// assert_eq!(out, vec![1.0, 2.0]);
/// ```
pub trait Transformer {
    /// Number of input features the transformer was fitted on.
    fn n_features_in(&self) -> usize;

    /// Number of output features it produces.
    fn n_features_out(&self) -> usize;

    /// Transforms one sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample width differs from `n_features_in`.
    fn transform_one(&self, x: &[f32]) -> Result<Vec<f32>>;
}

/// Trait for fitted categorical encoders.
///
/// An encoder turns one raw category value into a fixed-width numeric block
/// whose columns are named by [`feature_names`](CategoricalEncoder::feature_names).
pub trait CategoricalEncoder {
    /// Names of the produced columns, in output order.
    fn feature_names(&self) -> Vec<String>;

    /// Encodes one raw value.
    ///
    /// # Errors
    ///
    /// Returns [`DinerecError::UnknownCategory`](crate::error::DinerecError::UnknownCategory)
    /// when the value was not seen at fit time and the encoder rejects unknowns.
    fn encode(&self, value: &str) -> Result<Vec<f32>>;
}

/// Trait for fitted clustering models.
pub trait ClusterModel {
    /// Number of clusters.
    fn n_clusters(&self) -> usize;

    /// Assigns one sample to a cluster.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample width differs from the model's.
    fn predict_one(&self, x: &[f32]) -> Result<usize>;

    /// Cluster labels of the training rows, in training order.
    fn labels(&self) -> &[usize];

    /// Row indices of training rows labelled with `cluster`, ascending.
    fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels()
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == cluster)
            .map(|(i, _)| i)
            .collect()
    }
}
