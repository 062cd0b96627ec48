//! Dinerec: restaurant recommendations from pre-trained PCA and k-means models.
//!
//! The models (categorical encoders, scaler, PCA projection, k-means) were
//! fitted offline. Dinerec loads them together with the restaurant dataset,
//! walks the user through cascading filters, encodes the final selection into
//! PCA space and ranks the restaurants of the selection's cluster by distance.
//!
//! # Quick Start
//!
//! ```
//! use dinerec::prelude::*;
//!
//! // The nearest-centroid step on its own
//! let centroids = Matrix::from_vec(2, 2, vec![0.0, 0.0, 5.0, 5.0]).unwrap();
//! let kmeans = KMeans::from_parts(centroids, vec![0, 1, 1]).unwrap();
//! assert_eq!(kmeans.predict_one(&[4.0, 6.0]).unwrap(), 1);
//!
//! // Ranking distances
//! assert_eq!(DistanceMethod::Cosine.distance(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
//! assert!((DistanceMethod::Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-6);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Row-major Matrix type
//! - [`data`]: Restaurant dataset and PCA vectors (CSV)
//! - [`preprocessing`]: Fitted encoders, scaler and PCA projection
//! - [`cluster`]: Fitted K-Means
//! - [`metrics`]: Euclidean and cosine distance
//! - [`filter`]: Cascading filter options
//! - [`features`]: Selection encoding into PCA space
//! - [`loading`]: Archive extraction and artifact loading
//! - [`recommend`]: Cluster-restricted ranking
//! - [`render`]: Result cards
//! - [`config`]: Artifact locations and presentation settings

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod filter;
pub mod loading;
pub mod metrics;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod recommend;
pub mod render;
pub mod traits;

pub use error::{DinerecError, Result};
pub use primitives::Matrix;
pub use traits::{CategoricalEncoder, ClusterModel, Transformer};
