//! Core compute primitives.
//!
//! Fitted model parameters and the precomputed PCA vectors are stored as
//! dense row-major matrices.

mod matrix;

pub use matrix::Matrix;
