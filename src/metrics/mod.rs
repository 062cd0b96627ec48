//! Distance metrics for ranking recommendation candidates.
//!
//! Both metrics accumulate in `f64` and report `f32`, so identical inputs
//! always give exactly zero.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DinerecError;

/// Distance used to rank candidates against the encoded selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMethod {
    /// L2 norm of the difference vector.
    #[default]
    Euclidean,
    /// One minus cosine similarity.
    Cosine,
}

impl DistanceMethod {
    /// All methods, in the order they are offered.
    pub const ALL: [DistanceMethod; 2] = [DistanceMethod::Euclidean, DistanceMethod::Cosine];

    /// Computes the distance between two equally sized vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// use dinerec::metrics::DistanceMethod;
    ///
    /// let d = DistanceMethod::Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]);
    /// assert!((d - 5.0).abs() < 1e-6);
    /// assert_eq!(DistanceMethod::Cosine.distance(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    /// ```
    #[must_use]
    pub fn distance(self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            DistanceMethod::Euclidean => euclidean_distance(a, b),
            DistanceMethod::Cosine => cosine_distance(a, b),
        }
    }

    /// Display name as shown in result headings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceMethod::Euclidean => "Euclidean",
            DistanceMethod::Cosine => "Cosine",
        }
    }
}

impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMethod {
    type Err = DinerecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(DistanceMethod::Euclidean),
            "cosine" => Ok(DistanceMethod::Cosine),
            other => Err(DinerecError::InvalidConfig {
                param: "distance method".to_string(),
                value: other.to_string(),
                constraint: "euclidean or cosine".to_string(),
            }),
        }
    }
}

/// Euclidean distance between two slices.
///
/// ```text
/// d(a, b) = sqrt(Σ(a_i - b_i)²)
/// ```
#[must_use]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (f64::from(x) - f64::from(y)).powi(2))
        .sum::<f64>()
        .sqrt() as f32
}

/// Cosine similarity between two slices.
///
/// ```text
/// cos(a, b) = (a · b) / (||a|| × ||b||)
/// ```
///
/// A zero vector has similarity 0 with everything, including another zero
/// vector; [`cosine_distance`] special-cases identical inputs instead.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-12 {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0) as f32
    }
}

/// Cosine distance, `1 - cosine_similarity`, in `[0, 2]`.
///
/// Identical vectors are at distance exactly 0, zero vectors included.
#[must_use]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    if a == b {
        return 0.0;
    }
    (1.0 - cosine_similarity(a, b)).clamp(0.0, 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_basic() {
        let d = euclidean_distance(&[1.0, 2.0, 3.0], &[4.0, 6.0, 3.0]);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_euclidean_self_is_zero() {
        let x = [0.3_f32, -1.7, 12.25];
        assert_eq!(euclidean_distance(&x, &x), 0.0);
    }

    #[test]
    fn test_cosine_self_is_zero() {
        let x = [0.1_f32, 0.2, 0.3];
        assert_eq!(cosine_distance(&x, &x), 0.0);
    }

    #[test]
    fn test_cosine_zero_vectors() {
        assert_eq!(cosine_distance(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
        assert!((cosine_distance(&[0.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_same_direction_different_length() {
        let d = cosine_distance(&[1.0, 1.0], &[3.0, 3.0]);
        assert!(d.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_and_opposite() {
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-6);
        assert!((cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_mismatched_lengths() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_method_dispatch() {
        let a = [1.0_f32, 0.0];
        let b = [0.0_f32, 1.0];
        assert!((DistanceMethod::Euclidean.distance(&a, &b) - 2.0_f32.sqrt()).abs() < 1e-6);
        assert!((DistanceMethod::Cosine.distance(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_method_parse_and_display() {
        assert_eq!(
            "Cosine".parse::<DistanceMethod>().expect("valid"),
            DistanceMethod::Cosine
        );
        assert_eq!(
            " euclidean ".parse::<DistanceMethod>().expect("valid"),
            DistanceMethod::Euclidean
        );
        assert!("manhattan".parse::<DistanceMethod>().is_err());
        assert_eq!(DistanceMethod::Cosine.to_string(), "Cosine");
        assert_eq!(DistanceMethod::default(), DistanceMethod::Euclidean);
    }
}
