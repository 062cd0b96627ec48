//! Fitted K-Means model.

use crate::error::{DinerecError, Result};
use crate::primitives::Matrix;
use crate::traits::ClusterModel;
use serde::{Deserialize, Serialize};

/// Fitted K-Means clustering model.
///
/// Carries the centroids found at training time and the cluster label of
/// every training row. New samples are assigned to the nearest centroid by
/// squared Euclidean distance; on an exact tie the lowest cluster id wins.
///
/// # Examples
///
/// ```
/// use dinerec::prelude::*;
///
/// let centroids = Matrix::from_vec(2, 2, vec![
///     0.0, 0.0,
///     10.0, 10.0,
/// ]).expect("Valid matrix dimensions and data length");
///
/// let kmeans = KMeans::from_parts(centroids, vec![0, 0, 1]).expect("labels in range");
/// assert_eq!(kmeans.predict_one(&[9.0, 11.0]).unwrap(), 1);
/// assert_eq!(kmeans.members(0), vec![0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KMeansParams")]
pub struct KMeans {
    /// Cluster centroids (n_clusters x n_features).
    centroids: Matrix<f32>,
    /// Labels for training data.
    labels: Vec<usize>,
}

#[derive(Deserialize)]
struct KMeansParams {
    centroids: Matrix<f32>,
    labels: Vec<usize>,
}

impl TryFrom<KMeansParams> for KMeans {
    type Error = DinerecError;

    fn try_from(p: KMeansParams) -> Result<Self> {
        Self::from_parts(p.centroids, p.labels)
    }
}

impl KMeans {
    /// Creates a model from fitted centroids and training labels.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no centroids or a label does not name
    /// one of them.
    pub fn from_parts(centroids: Matrix<f32>, labels: Vec<usize>) -> Result<Self> {
        let n_clusters = centroids.n_rows();
        if n_clusters == 0 {
            return Err(DinerecError::dimension_mismatch("n_clusters", 1, 0));
        }
        if let Some(&bad) = labels.iter().find(|&&l| l >= n_clusters) {
            return Err(DinerecError::InvalidConfig {
                param: "labels".to_string(),
                value: bad.to_string(),
                constraint: format!("cluster ids below {n_clusters}"),
            });
        }
        Ok(Self { centroids, labels })
    }

    /// Returns the cluster centroids.
    #[must_use]
    pub fn centroids(&self) -> &Matrix<f32> {
        &self.centroids
    }

    /// Returns the number of features each centroid has.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.centroids.n_cols()
    }

    /// Returns the number of training rows per cluster.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.centroids.n_rows()];
        for &label in &self.labels {
            counts[label] += 1;
        }
        counts
    }
}

impl ClusterModel for KMeans {
    fn n_clusters(&self) -> usize {
        self.centroids.n_rows()
    }

    fn predict_one(&self, x: &[f32]) -> Result<usize> {
        if x.len() != self.centroids.n_cols() {
            return Err(DinerecError::dimension_mismatch(
                "kmeans n_features",
                self.centroids.n_cols(),
                x.len(),
            ));
        }

        let mut min_dist = f32::INFINITY;
        let mut min_cluster = 0;

        for (k, centroid) in self.centroids.rows().enumerate() {
            let dist: f32 = x
                .iter()
                .zip(centroid)
                .map(|(a, b)| (a - b) * (a - b))
                .sum();

            if dist < min_dist {
                min_dist = dist;
                min_cluster = k;
            }
        }

        Ok(min_cluster)
    }

    fn labels(&self) -> &[usize] {
        &self.labels
    }
}
