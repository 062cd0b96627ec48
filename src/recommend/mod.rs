//! Cluster-restricted nearest-neighbour recommendations.
//!
//! A selection is encoded into PCA space and assigned to a k-means cluster.
//! Candidates are the training rows of that cluster which also match the
//! selected city and cuisine exactly; they are ranked by distance to the
//! encoded selection.
//!
//! # Quick Start
//!
//! ```no_run
//! use dinerec::prelude::*;
//!
//! let ctx = AppContext::load(&ArtifactConfig::default())?;
//! let selection = FilterState::new()
//!     .with_city("Bangalore")
//!     .with_cuisine("Pizzas")
//!     .with_rating(4.2)
//!     .with_rating_count(120.0)
//!     .with_cost(400.0)
//!     .resolve(ctx.dataset(), DistanceMethod::Cosine)?;
//!
//! match Recommender::new(&ctx).recommend(&selection)? {
//!     Recommendations::Found { items, .. } => {
//!         for rec in items {
//!             println!("{} ({:.4})", rec.record.name, rec.distance);
//!         }
//!     }
//!     Recommendations::NoneFound { .. } => println!("No similar restaurants found."),
//! }
//! # Ok::<(), DinerecError>(())
//! ```

use tracing::debug;

use crate::config::RecommenderConfig;
use crate::data::RestaurantRecord;
use crate::error::Result;
use crate::features::FeatureEncoder;
use crate::filter::UserSelection;
use crate::loading::AppContext;
use crate::traits::ClusterModel;

/// One ranked restaurant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation<'a> {
    /// Row position in the cleaned dataset.
    pub row: usize,
    /// The restaurant.
    pub record: &'a RestaurantRecord,
    /// Distance to the encoded selection.
    pub distance: f32,
}

/// Outcome of a recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendations<'a> {
    /// At least one candidate, nearest first.
    Found {
        /// Cluster the selection was assigned to.
        cluster: usize,
        /// Ranked restaurants, at most `top_k`.
        items: Vec<Recommendation<'a>>,
    },
    /// The cluster holds no restaurant in the selected city and cuisine.
    NoneFound {
        /// Cluster the selection was assigned to.
        cluster: usize,
    },
}

impl<'a> Recommendations<'a> {
    /// Cluster the selection was assigned to.
    #[must_use]
    pub fn cluster(&self) -> usize {
        match self {
            Self::Found { cluster, .. } | Self::NoneFound { cluster } => *cluster,
        }
    }

    /// Ranked restaurants, empty for [`NoneFound`](Self::NoneFound).
    #[must_use]
    pub fn items(&self) -> &[Recommendation<'a>] {
        match self {
            Self::Found { items, .. } => items,
            Self::NoneFound { .. } => &[],
        }
    }

    /// Number of ranked restaurants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// Returns true when nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Ranks restaurants similar to a selection.
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    ctx: &'a AppContext,
    top_k: usize,
}

impl<'a> Recommender<'a> {
    /// Creates a recommender returning up to 10 restaurants.
    #[must_use]
    pub fn new(ctx: &'a AppContext) -> Self {
        Self {
            ctx,
            top_k: RecommenderConfig::default().top_k,
        }
    }

    /// Creates a recommender using `config.top_k`.
    #[must_use]
    pub fn with_config(ctx: &'a AppContext, config: &RecommenderConfig) -> Self {
        Self::new(ctx).with_top_k(config.top_k)
    }

    /// Sets the maximum number of results. Zero is treated as one.
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Returns the maximum number of results.
    #[must_use]
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Recommends restaurants for a validated selection.
    ///
    /// # Errors
    ///
    /// Returns [`DinerecError::UnknownCategory`](crate::error::DinerecError::UnknownCategory)
    /// when the selection holds a value the encoders were not fitted on, or
    /// a dimension mismatch when the models do not chain.
    pub fn recommend(&self, selection: &UserSelection) -> Result<Recommendations<'a>> {
        let models = self.ctx.models();
        let encoded = FeatureEncoder::from_models(models).encode(selection)?;
        let cluster = models.kmeans.predict_one(&encoded)?;

        let dataset = self.ctx.dataset();
        let candidates: Vec<(usize, &'a RestaurantRecord)> = models
            .kmeans
            .members(cluster)
            .into_iter()
            .filter_map(|row| dataset.get(row).map(|r| (row, r)))
            .filter(|(_, r)| r.city == selection.city && r.cuisine == selection.cuisine)
            .collect();
        debug!(cluster, candidates = candidates.len(), "cluster candidates");

        if candidates.is_empty() {
            return Ok(Recommendations::NoneFound { cluster });
        }

        let vectors = self.ctx.pca_vectors();
        let mut items: Vec<Recommendation<'a>> = candidates
            .into_iter()
            .map(|(row, record)| Recommendation {
                row,
                record,
                distance: selection.method.distance(vectors.vector(row), &encoded),
            })
            .collect();

        // sort_by is stable, so equal distances keep dataset order
        items.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        items.truncate(self.top_k);

        Ok(Recommendations::Found { cluster, items })
    }
}
