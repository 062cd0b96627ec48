//! JSON model artifacts.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cluster::KMeans;
use crate::config::ArtifactConfig;
use crate::error::{DinerecError, Result};
use crate::preprocessing::{MultiLabelBinarizer, OneHotEncoder, StandardScaler, PCA};
use crate::traits::{ClusterModel, Transformer};

/// The fitted models needed to encode a selection and assign its cluster.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    /// One-hot city encoder.
    pub city_encoder: OneHotEncoder,
    /// Multi-hot cuisine encoder.
    pub cuisine_encoder: MultiLabelBinarizer,
    /// Feature standardization.
    pub scaler: StandardScaler,
    /// Projection into PCA space.
    pub pca: PCA,
    /// Clustering over PCA space.
    pub kmeans: KMeans,
    /// Canonical feature order the scaler was fitted on.
    pub pca_input_columns: Vec<String>,
}

impl ModelBundle {
    /// Loads all six artifacts named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DinerecError::MissingFile`] for an absent artifact,
    /// [`DinerecError::InvalidArtifact`] for malformed content, and
    /// [`DinerecError::ArtifactMismatch`] when the models disagree on widths.
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        let bundle = Self {
            city_encoder: load_json(&config.city_encoder_path())?,
            cuisine_encoder: load_json(&config.cuisine_encoder_path())?,
            scaler: load_json(&config.scaler_path())?,
            pca: load_json(&config.pca_model_path())?,
            kmeans: load_json(&config.kmeans_model_path())?,
            pca_input_columns: load_columns(&config.pca_input_columns_path())?,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Checks that the models chain together.
    ///
    /// # Errors
    ///
    /// Returns [`DinerecError::ArtifactMismatch`] naming the first relation
    /// that does not hold.
    pub fn validate(&self) -> Result<()> {
        let n_columns = self.pca_input_columns.len();
        if self.scaler.n_features_in() != n_columns {
            return Err(DinerecError::mismatch(
                "scaler width vs pca_input_columns",
                n_columns,
                self.scaler.n_features_in(),
            ));
        }
        if self.pca.n_features_in() != n_columns {
            return Err(DinerecError::mismatch(
                "PCA input width vs pca_input_columns",
                n_columns,
                self.pca.n_features_in(),
            ));
        }
        if self.kmeans.n_features() != self.pca.n_components() {
            return Err(DinerecError::mismatch(
                "k-means centroid width vs PCA components",
                self.pca.n_components(),
                self.kmeans.n_features(),
            ));
        }
        debug!(
            n_columns,
            n_components = self.pca.n_components(),
            n_clusters = self.kmeans.n_clusters(),
            "model artifacts are consistent"
        );
        Ok(())
    }
}

/// Reads one JSON artifact.
///
/// # Errors
///
/// Returns [`DinerecError::MissingFile`] if `path` does not exist and
/// [`DinerecError::InvalidArtifact`] if it does not deserialize.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(DinerecError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| DinerecError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| DinerecError::InvalidArtifact {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn load_columns(path: &Path) -> Result<Vec<String>> {
    let columns: Vec<String> = load_json(path)?;
    if columns.is_empty() {
        return Err(DinerecError::InvalidArtifact {
            path: path.to_path_buf(),
            message: "column list is empty".to_string(),
        });
    }
    let mut seen = HashSet::with_capacity(columns.len());
    if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
        return Err(DinerecError::InvalidArtifact {
            path: path.to_path_buf(),
            message: format!("duplicate column '{dup}'"),
        });
    }
    Ok(columns)
}
