//! Fitted preprocessing transformers.
//!
//! The scaler and PCA projection here carry parameters fitted offline and
//! loaded from JSON artifacts. They reproduce the training-time transforms
//! exactly; there is no `fit`.
//!
//! # Example
//!
//! ```
//! use dinerec::prelude::*;
//!
//! let scaler = StandardScaler::from_parts(vec![2.0, 20.0], vec![1.0, 10.0])
//!     .expect("matching lengths");
//! let components = Matrix::from_vec(1, 2, vec![1.0, 0.0]).expect("valid matrix dimensions");
//! let pca = PCA::from_parts(vec![0.0, 0.0], components).expect("valid PCA");
//!
//! let scaled = scaler.transform_one(&[3.0, 40.0]).expect("width matches");
//! let projected = pca.transform_one(&scaled).expect("width matches");
//! assert_eq!(projected, vec![1.0]);
//! ```

mod encoders;

pub use encoders::{HandleUnknown, MultiLabelBinarizer, OneHotEncoder};

use crate::error::{DinerecError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Standardizes features by removing the fitted mean and dividing by the
/// fitted scale.
///
/// The standard score of a sample x is: z = (x - mean) / scale
///
/// Columns whose scale is (numerically) zero are only centered, matching
/// how a constant training column is handled at fit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalerParams")]
pub struct StandardScaler {
    /// Mean of each feature.
    mean: Vec<f32>,
    /// Scale (standard deviation) of each feature.
    scale: Vec<f32>,
    /// Whether to center the data (subtract mean).
    with_mean: bool,
    /// Whether to scale the data (divide by scale).
    with_std: bool,
}

#[derive(Deserialize)]
struct ScalerParams {
    mean: Vec<f32>,
    scale: Vec<f32>,
    #[serde(default = "default_true")]
    with_mean: bool,
    #[serde(default = "default_true")]
    with_std: bool,
}

fn default_true() -> bool {
    true
}

impl TryFrom<ScalerParams> for StandardScaler {
    type Error = DinerecError;

    fn try_from(p: ScalerParams) -> Result<Self> {
        Ok(Self::from_parts(p.mean, p.scale)?
            .with_mean(p.with_mean)
            .with_std(p.with_std))
    }
}

impl StandardScaler {
    /// Creates a scaler from fitted mean and scale vectors.
    ///
    /// Centering and scaling are both enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length or are empty.
    pub fn from_parts(mean: Vec<f32>, scale: Vec<f32>) -> Result<Self> {
        if mean.is_empty() {
            return Err(DinerecError::dimension_mismatch("scaler mean", 1, 0));
        }
        if mean.len() != scale.len() {
            return Err(DinerecError::dimension_mismatch(
                "scaler scale",
                mean.len(),
                scale.len(),
            ));
        }
        Ok(Self {
            mean,
            scale,
            with_mean: true,
            with_std: true,
        })
    }

    /// Sets whether to center the data by subtracting the mean.
    #[must_use]
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.with_mean = with_mean;
        self
    }

    /// Sets whether to divide by the scale.
    #[must_use]
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.with_std = with_std;
        self
    }

    /// Returns the mean of each feature.
    #[must_use]
    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    /// Returns the scale of each feature.
    #[must_use]
    pub fn scale(&self) -> &[f32] {
        &self.scale
    }
}

impl Transformer for StandardScaler {
    fn n_features_in(&self) -> usize {
        self.mean.len()
    }

    fn n_features_out(&self) -> usize {
        self.mean.len()
    }

    fn transform_one(&self, x: &[f32]) -> Result<Vec<f32>> {
        if x.len() != self.mean.len() {
            return Err(DinerecError::dimension_mismatch(
                "scaler n_features",
                self.mean.len(),
                x.len(),
            ));
        }

        Ok(x.iter()
            .enumerate()
            .map(|(j, &v)| {
                let mut val = v;

                // Center
                if self.with_mean {
                    val -= self.mean[j];
                }

                // Scale
                if self.with_std && self.scale[j].abs() > 1e-10 {
                    val /= self.scale[j];
                }

                val
            })
            .collect())
    }
}

/// Fitted Principal Component Analysis projection.
///
/// Projects samples onto the fitted principal components:
/// `X_pca = (X - mean) @ components^T`, optionally whitened by dividing
/// each component by the square root of its explained variance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PcaParams")]
pub struct PCA {
    /// Mean of each input feature.
    mean: Vec<f32>,
    /// Principal components, one per row (n_components x n_features).
    components: Matrix<f32>,
    /// Whether outputs are scaled to unit variance.
    whiten: bool,
    /// Variance explained by each component.
    explained_variance: Option<Vec<f32>>,
}

#[derive(Deserialize)]
struct PcaParams {
    mean: Vec<f32>,
    components: Matrix<f32>,
    #[serde(default)]
    whiten: bool,
    #[serde(default)]
    explained_variance: Option<Vec<f32>>,
}

impl TryFrom<PcaParams> for PCA {
    type Error = DinerecError;

    fn try_from(p: PcaParams) -> Result<Self> {
        let pca = Self::from_parts(p.mean, p.components)?;
        match p.explained_variance {
            Some(variance) => pca.with_whitening(variance),
            None if p.whiten => Err(DinerecError::InvalidConfig {
                param: "whiten".to_string(),
                value: "true".to_string(),
                constraint: "explained_variance to be present".to_string(),
            }),
            None => Ok(pca),
        }
    }
}

impl PCA {
    /// Creates a projection from a fitted mean and component matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the mean length differs from the component width
    /// or there are no components.
    pub fn from_parts(mean: Vec<f32>, components: Matrix<f32>) -> Result<Self> {
        if components.n_rows() == 0 {
            return Err(DinerecError::dimension_mismatch("n_components", 1, 0));
        }
        if mean.len() != components.n_cols() {
            return Err(DinerecError::dimension_mismatch(
                "pca mean",
                components.n_cols(),
                mean.len(),
            ));
        }
        Ok(Self {
            mean,
            components,
            whiten: false,
            explained_variance: None,
        })
    }

    /// Enables whitening with the fitted explained variance.
    ///
    /// # Errors
    ///
    /// Returns an error if there is not exactly one non-negative variance
    /// per component.
    pub fn with_whitening(mut self, explained_variance: Vec<f32>) -> Result<Self> {
        if explained_variance.len() != self.components.n_rows() {
            return Err(DinerecError::dimension_mismatch(
                "explained_variance",
                self.components.n_rows(),
                explained_variance.len(),
            ));
        }
        if explained_variance.iter().any(|v| *v < 0.0 || v.is_nan()) {
            return Err(DinerecError::InvalidConfig {
                param: "explained_variance".to_string(),
                value: format!("{explained_variance:?}"),
                constraint: "non-negative values".to_string(),
            });
        }
        self.whiten = true;
        self.explained_variance = Some(explained_variance);
        Ok(self)
    }

    /// Returns the number of components.
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.components.n_rows()
    }

    /// Returns the principal components.
    #[must_use]
    pub fn components(&self) -> &Matrix<f32> {
        &self.components
    }

    /// Returns the variance explained by each component, if known.
    #[must_use]
    pub fn explained_variance(&self) -> Option<&[f32]> {
        self.explained_variance.as_deref()
    }
}

impl Transformer for PCA {
    fn n_features_in(&self) -> usize {
        self.components.n_cols()
    }

    fn n_features_out(&self) -> usize {
        self.components.n_rows()
    }

    fn transform_one(&self, x: &[f32]) -> Result<Vec<f32>> {
        let n_features = self.components.n_cols();
        if x.len() != n_features {
            return Err(DinerecError::dimension_mismatch(
                "pca n_features",
                n_features,
                x.len(),
            ));
        }

        let centered: Vec<f32> = x.iter().zip(&self.mean).map(|(v, m)| v - m).collect();
        let mut projected = self
            .components
            .matvec(&centered)
            .map_err(|e| DinerecError::DimensionMismatch {
                expected: format!("{n_features} features"),
                actual: e.to_string(),
            })?;

        if let (true, Some(variance)) = (self.whiten, &self.explained_variance) {
            for (value, var) in projected.iter_mut().zip(variance) {
                let std = var.sqrt();
                if std > 1e-10 {
                    *value /= std;
                }
            }
        }

        Ok(projected)
    }
}
