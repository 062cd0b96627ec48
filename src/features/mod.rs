//! Encoding a user selection into the training-time feature space.
//!
//! The pipeline is order-sensitive and mirrors how the training matrix was
//! built: numeric columns, then the one-hot city block, then the multi-hot
//! cuisine block, reindexed to the canonical column list, standardized and
//! finally projected through PCA.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{DinerecError, Result};
use crate::filter::UserSelection;
use crate::loading::ModelBundle;
use crate::traits::{CategoricalEncoder, Transformer};

/// Names of the numeric columns, in assembly order.
pub const NUMERIC_COLUMNS: [&str; 3] = ["rating", "rating_count", "cost"];

/// A named feature row, before scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    names: Vec<String>,
    values: Vec<f32>,
}

impl FeatureRow {
    /// Column names, in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Column values, in order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value of a named column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f32> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reorders the row to `columns`.
    ///
    /// Missing columns become 0 and columns not listed are dropped, so the
    /// result always has exactly `columns.len()` values.
    ///
    /// # Errors
    ///
    /// Returns [`DinerecError::DuplicateFeature`] if this row carries the
    /// same column name twice.
    pub fn reindex(&self, columns: &[String]) -> Result<FeatureRow> {
        let mut lookup = HashMap::with_capacity(self.names.len());
        for (name, &value) in self.names.iter().zip(&self.values) {
            if lookup.insert(name.as_str(), value).is_some() {
                return Err(DinerecError::DuplicateFeature {
                    column: name.clone(),
                });
            }
        }

        let values = columns
            .iter()
            .map(|c| lookup.get(c.as_str()).copied().unwrap_or(0.0))
            .collect();
        Ok(FeatureRow {
            names: columns.to_vec(),
            values,
        })
    }
}

/// Encodes selections with the fitted models.
///
/// Holds the models behind their traits only, so any encoder or transformer
/// fitted the same way can be plugged in.
pub struct FeatureEncoder<'a> {
    city: &'a dyn CategoricalEncoder,
    cuisine: &'a dyn CategoricalEncoder,
    scaler: &'a dyn Transformer,
    pca: &'a dyn Transformer,
    columns: &'a [String],
}

impl std::fmt::Debug for FeatureEncoder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureEncoder")
            .field("columns", &self.columns.len())
            .field("n_components", &self.pca.n_features_out())
            .finish()
    }
}

impl<'a> FeatureEncoder<'a> {
    /// Creates an encoder from its parts.
    #[must_use]
    pub fn new(
        city: &'a dyn CategoricalEncoder,
        cuisine: &'a dyn CategoricalEncoder,
        scaler: &'a dyn Transformer,
        pca: &'a dyn Transformer,
        columns: &'a [String],
    ) -> Self {
        Self {
            city,
            cuisine,
            scaler,
            pca,
            columns,
        }
    }

    /// Creates an encoder over a loaded model bundle.
    #[must_use]
    pub fn from_models(models: &'a ModelBundle) -> Self {
        Self::new(
            &models.city_encoder,
            &models.cuisine_encoder,
            &models.scaler,
            &models.pca,
            &models.pca_input_columns,
        )
    }

    /// Builds the reindexed feature row for a selection, before scaling.
    ///
    /// # Errors
    ///
    /// Returns [`DinerecError::UnknownCategory`] for a value an encoder
    /// rejects (by default an unseen city), or [`DinerecError::DuplicateFeature`] when the encoders
    /// produce colliding column names.
    pub fn encode_row(&self, selection: &UserSelection) -> Result<FeatureRow> {
        let city = self.city.encode(&selection.city)?;
        let cuisine = self.cuisine.encode(&selection.cuisine)?;

        let mut names: Vec<String> = NUMERIC_COLUMNS.iter().map(|s| (*s).to_string()).collect();
        names.extend(self.city.feature_names());
        names.extend(self.cuisine.feature_names());

        let mut values = vec![
            selection.rating as f32,
            selection.rating_count as f32,
            selection.cost as f32,
        ];
        values.extend(city);
        values.extend(cuisine);

        if names.len() != values.len() {
            return Err(DinerecError::dimension_mismatch(
                "encoded columns",
                names.len(),
                values.len(),
            ));
        }

        FeatureRow { names, values }.reindex(self.columns)
    }

    /// Encodes a selection into PCA space.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`encode_row`](Self::encode_row), or a
    /// dimension mismatch if the models disagree on widths.
    pub fn encode(&self, selection: &UserSelection) -> Result<Vec<f32>> {
        let row = self.encode_row(selection)?;
        let scaled = self.scaler.transform_one(row.values())?;
        let projected = self.pca.transform_one(&scaled)?;
        debug!(
            city = %selection.city,
            cuisine = %selection.cuisine,
            n_features = row.len(),
            n_components = projected.len(),
            "encoded selection"
        );
        Ok(projected)
    }
}
