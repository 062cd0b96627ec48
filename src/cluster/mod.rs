//! Clustering models.
//!
//! Holds the fitted K-Means model used to narrow recommendation candidates
//! to the selection's cluster.

mod kmeans;

pub use kmeans::KMeans;
