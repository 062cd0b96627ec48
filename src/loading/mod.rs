//! Startup loading of the dataset and fitted models.
//!
//! Everything the recommender needs is read once into an immutable
//! [`AppContext`]. Loading is all-or-nothing: the first missing or malformed
//! file aborts with an error and no partial context is returned.
//!
//! # Example
//!
//! ```no_run
//! use dinerec::config::ArtifactConfig;
//! use dinerec::loading::AppContext;
//!
//! let ctx = AppContext::load(&ArtifactConfig::default().with_data_dir("data"))?;
//! println!("{} restaurants", ctx.dataset().len());
//! # Ok::<(), dinerec::error::DinerecError>(())
//! ```

mod archive;
mod artifacts;

pub use archive::{ensure_extracted, ExtractOutcome};
pub use artifacts::{load_json, ModelBundle};

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::ArtifactConfig;
use crate::data::{Dataset, PcaFrame};
use crate::error::{DinerecError, Result};
use crate::traits::ClusterModel;

/// Loaded, cross-validated application state.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ArtifactConfig,
    dataset: Dataset,
    pca_vectors: PcaFrame,
    models: ModelBundle,
    home_image: Option<PathBuf>,
}

impl AppContext {
    /// Extracts the archive if needed and loads every artifact.
    ///
    /// # Errors
    ///
    /// Returns the first loading error, or [`DinerecError::ArtifactMismatch`]
    /// if the datasets and models do not line up.
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        ensure_extracted(&config.archive_path(), &config.extract_path())?;

        let dataset = Dataset::from_csv_path(config.cleaned_csv_path())?;
        let pca_vectors = PcaFrame::from_csv_path(config.pca_csv_path())?;
        let models = ModelBundle::load(config)?;

        let ctx = Self::from_parts(config.clone(), dataset, pca_vectors, models)?;
        info!(
            rows = ctx.dataset.len(),
            n_components = ctx.pca_vectors.n_components(),
            n_clusters = ctx.models.kmeans.n_clusters(),
            "loaded artifacts"
        );
        Ok(ctx)
    }

    /// Assembles a context from already loaded parts.
    ///
    /// # Errors
    ///
    /// Returns [`DinerecError::ArtifactMismatch`] if row counts or widths
    /// disagree.
    pub fn from_parts(
        config: ArtifactConfig,
        dataset: Dataset,
        pca_vectors: PcaFrame,
        models: ModelBundle,
    ) -> Result<Self> {
        models.validate()?;
        check(
            "PCA rows vs cleaned rows",
            dataset.len(),
            pca_vectors.n_rows(),
        )?;
        check(
            "k-means labels vs cleaned rows",
            dataset.len(),
            models.kmeans.labels().len(),
        )?;
        check(
            "PCA dataset width vs PCA components",
            models.pca.n_components(),
            pca_vectors.n_components(),
        )?;

        let image = config.home_image_path();
        let home_image = if image.exists() {
            Some(image)
        } else {
            warn!(path = %image.display(), "home image not found");
            None
        };

        Ok(Self {
            config,
            dataset,
            pca_vectors,
            models,
            home_image,
        })
    }

    /// The cleaned restaurant rows.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// PCA vectors, row-aligned with [`dataset`](Self::dataset).
    #[must_use]
    pub fn pca_vectors(&self) -> &PcaFrame {
        &self.pca_vectors
    }

    /// The fitted models.
    #[must_use]
    pub fn models(&self) -> &ModelBundle {
        &self.models
    }

    /// Where the artifacts were loaded from.
    #[must_use]
    pub fn config(&self) -> &ArtifactConfig {
        &self.config
    }

    /// Home page image, if present.
    #[must_use]
    pub fn home_image(&self) -> Option<&PathBuf> {
        self.home_image.as_ref()
    }
}

fn check(what: &str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(DinerecError::mismatch(what, expected, actual))
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
