//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use dinerec::prelude::*;
//! ```

pub use crate::cluster::KMeans;
pub use crate::config::{ArtifactConfig, DinerecConfig, RecommenderConfig};
pub use crate::data::{Dataset, PcaFrame, RestaurantRecord};
pub use crate::error::DinerecError;
pub use crate::features::{FeatureEncoder, FeatureRow};
pub use crate::filter::{available_options, FilterLevel, FilterOptions, FilterState, UserSelection};
pub use crate::loading::{AppContext, ModelBundle};
pub use crate::metrics::DistanceMethod;
pub use crate::preprocessing::{MultiLabelBinarizer, OneHotEncoder, StandardScaler, PCA};
pub use crate::primitives::Matrix;
pub use crate::recommend::{Recommendation, Recommendations, Recommender};
pub use crate::render::ResultCard;
pub use crate::traits::{CategoricalEncoder, ClusterModel, Transformer};
