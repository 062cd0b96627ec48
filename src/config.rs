//! Configuration for artifact locations and result presentation.
//!
//! Every field has a default, so an empty JSON object is a valid config
//! file. Relative artifact names resolve against `data_dir`.
//!
//! # Example
//!
//! ```
//! use dinerec::config::{ArtifactConfig, DinerecConfig};
//!
//! let config: DinerecConfig =
//!     serde_json::from_str(r#"{ "recommender": { "top_k": 5 } }"#).unwrap();
//! assert_eq!(config.recommender.top_k, 5);
//! assert_eq!(config.artifacts, ArtifactConfig::default());
//!
//! let artifacts = ArtifactConfig::default().with_data_dir("/srv/dinerec");
//! assert!(artifacts.archive_path().ends_with("encoded_data.zip"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DinerecError, Result};

/// Where the dataset archive and model artifacts live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Directory all relative names resolve against.
    pub data_dir: PathBuf,
    /// Zip archive holding both CSVs.
    pub archive: String,
    /// Directory the archive is extracted into.
    pub extract_dir: String,
    /// Cleaned restaurant CSV inside the extract dir.
    pub cleaned_csv: String,
    /// PCA vector CSV inside the extract dir.
    pub pca_csv: String,
    /// One-hot city encoder.
    pub city_encoder: String,
    /// Multi-label cuisine encoder.
    pub cuisine_encoder: String,
    /// Standard scaler.
    pub scaler: String,
    /// PCA projection.
    pub pca_model: String,
    /// K-means model.
    pub kmeans_model: String,
    /// Canonical feature column list.
    pub pca_input_columns: String,
    /// Home page image.
    pub home_image: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            archive: "encoded_data.zip".to_string(),
            extract_dir: "encoded_data".to_string(),
            cleaned_csv: "cleaned_data.csv".to_string(),
            pca_csv: "encoded_data.csv".to_string(),
            city_encoder: "city_encoder.json".to_string(),
            cuisine_encoder: "cuisine_encoder.json".to_string(),
            scaler: "scaler.json".to_string(),
            pca_model: "pca_model.json".to_string(),
            kmeans_model: "kmeans_model.json".to_string(),
            pca_input_columns: "pca_input_columns.json".to_string(),
            home_image: "images.png".to_string(),
        }
    }
}

impl ArtifactConfig {
    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Sets the archive name.
    #[must_use]
    pub fn with_archive(mut self, archive: impl Into<String>) -> Self {
        self.archive = archive.into();
        self
    }

    /// Sets the extract directory name.
    #[must_use]
    pub fn with_extract_dir(mut self, extract_dir: impl Into<String>) -> Self {
        self.extract_dir = extract_dir.into();
        self
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    /// Path of the dataset archive.
    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.resolve(&self.archive)
    }

    /// Path of the extraction directory.
    #[must_use]
    pub fn extract_path(&self) -> PathBuf {
        self.resolve(&self.extract_dir)
    }

    /// Path of the cleaned CSV.
    #[must_use]
    pub fn cleaned_csv_path(&self) -> PathBuf {
        self.extract_path().join(&self.cleaned_csv)
    }

    /// Path of the PCA CSV.
    #[must_use]
    pub fn pca_csv_path(&self) -> PathBuf {
        self.extract_path().join(&self.pca_csv)
    }

    /// Path of the city encoder.
    #[must_use]
    pub fn city_encoder_path(&self) -> PathBuf {
        self.resolve(&self.city_encoder)
    }

    /// Path of the cuisine encoder.
    #[must_use]
    pub fn cuisine_encoder_path(&self) -> PathBuf {
        self.resolve(&self.cuisine_encoder)
    }

    /// Path of the scaler.
    #[must_use]
    pub fn scaler_path(&self) -> PathBuf {
        self.resolve(&self.scaler)
    }

    /// Path of the PCA model.
    #[must_use]
    pub fn pca_model_path(&self) -> PathBuf {
        self.resolve(&self.pca_model)
    }

    /// Path of the k-means model.
    #[must_use]
    pub fn kmeans_model_path(&self) -> PathBuf {
        self.resolve(&self.kmeans_model)
    }

    /// Path of the feature column list.
    #[must_use]
    pub fn pca_input_columns_path(&self) -> PathBuf {
        self.resolve(&self.pca_input_columns)
    }

    /// Path of the home page image.
    #[must_use]
    pub fn home_image_path(&self) -> PathBuf {
        self.resolve(&self.home_image)
    }
}

/// Ranking and presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Maximum number of recommendations.
    pub top_k: usize,
    /// Map search URL the address is appended to.
    pub maps_base_url: String,
    /// Currency prefix for costs.
    pub currency_symbol: String,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            maps_base_url: "https://www.google.com/maps/search/".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl RecommenderConfig {
    /// Sets the number of recommendations.
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Checks value constraints.
    ///
    /// # Errors
    ///
    /// Returns [`DinerecError::InvalidConfig`] if `top_k` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(DinerecError::InvalidConfig {
                param: "top_k".to_string(),
                value: "0".to_string(),
                constraint: "at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Contents of a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DinerecConfig {
    /// Artifact locations.
    pub artifacts: ArtifactConfig,
    /// Ranking and presentation.
    pub recommender: RecommenderConfig,
}

impl DinerecConfig {
    /// Reads a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, not valid JSON,
    /// or holds out-of-range values.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DinerecError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path).map_err(|e| DinerecError::io(path, e))?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| DinerecError::InvalidConfig {
                param: path.display().to_string(),
                value: e.to_string(),
                constraint: "a JSON object with optional artifacts and recommender sections"
                    .to_string(),
            })?;
        config.recommender.validate()?;
        Ok(config)
    }
}
