//! Error types for dinerec operations.
//!
//! Errors fall into two classes. Startup errors (missing or corrupt
//! artifacts) are fatal: nothing can be recommended until the files are
//! fixed. Interaction errors (an unknown category, a selection that is not
//! among the offered options, an empty filter level) only abort the current
//! request; see [`DinerecError::is_recoverable`].

use std::path::PathBuf;
use thiserror::Error;

use crate::filter::FilterLevel;

/// Main error type for dinerec operations.
///
/// # Examples
///
/// ```
/// use dinerec::error::DinerecError;
///
/// let err = DinerecError::UnknownCategory {
///     encoder: "city".to_string(),
///     value: "Atlantis".to_string(),
/// };
/// assert!(err.is_recoverable());
/// assert!(err.to_string().contains("Atlantis"));
/// ```
#[derive(Debug, Error)]
pub enum DinerecError {
    /// A required file does not exist.
    #[error("missing required file: {}", path.display())]
    MissingFile {
        /// Path that was looked up
        path: PathBuf,
    },

    /// I/O error while reading an artifact or extracting the archive.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The dataset archive could not be read or extracted.
    #[error("archive error in {}: {message}", path.display())]
    Archive {
        /// Archive path
        path: PathBuf,
        /// Error description
        message: String,
    },

    /// Malformed CSV content.
    #[error("malformed CSV {}: {message}", path.display())]
    Csv {
        /// CSV path
        path: PathBuf,
        /// Error description
        message: String,
    },

    /// A required CSV column is absent.
    #[error("column '{column}' not found in {}", path.display())]
    MissingColumn {
        /// CSV path
        path: PathBuf,
        /// Column name
        column: String,
    },

    /// Malformed model artifact.
    #[error("invalid model artifact {}: {message}", path.display())]
    InvalidArtifact {
        /// Artifact path
        path: PathBuf,
        /// Error description
        message: String,
    },

    /// Loaded datasets and models disagree on shape.
    #[error("artifact mismatch: {what} (expected {expected}, found {actual})")]
    ArtifactMismatch {
        /// Which relation failed
        what: String,
        /// Expected size
        expected: usize,
        /// Actual size
        actual: usize,
    },

    /// Vector/matrix dimensions don't match for the operation.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// A category value was not seen when the encoder was fitted.
    #[error("unknown {encoder} category '{value}'")]
    UnknownCategory {
        /// Encoder name (e.g. "city")
        encoder: String,
        /// Rejected value
        value: String,
    },

    /// The assembled feature row carries the same column twice.
    #[error("duplicate feature column '{column}' cannot be reindexed")]
    DuplicateFeature {
        /// Column name
        column: String,
    },

    /// A filter level has no options for the choices above it.
    #[error("no {level} options available for the current selection")]
    NoOptions {
        /// Level with an empty option list
        level: FilterLevel,
    },

    /// A chosen value is not among the options offered at its level.
    #[error("'{value}' is not a valid {level} for the current selection")]
    InvalidSelection {
        /// Level of the rejected choice
        level: FilterLevel,
        /// Rejected value
        value: String,
    },

    /// A required selection field was not provided.
    #[error("no {level} selected")]
    MissingSelection {
        /// Level left empty
        level: FilterLevel,
    },

    /// Invalid configuration value.
    #[error("invalid configuration: {param} = {value}, expected {constraint}")]
    InvalidConfig {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },
}

impl DinerecError {
    /// Returns true for interaction-level errors.
    ///
    /// The user can adjust the filters and retry within the same session;
    /// every other error means the artifacts themselves are unusable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownCategory { .. }
                | Self::NoOptions { .. }
                | Self::InvalidSelection { .. }
                | Self::MissingSelection { .. }
        )
    }

    /// Create an I/O error bound to a path
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an artifact mismatch error
    #[must_use]
    pub fn mismatch(what: &str, expected: usize, actual: usize) -> Self {
        Self::ArtifactMismatch {
            what: what.to_string(),
            expected,
            actual,
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, DinerecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_display() {
        let err = DinerecError::MissingFile {
            path: PathBuf::from("encoded_data.zip"),
        };
        assert_eq!(err.to_string(), "missing required file: encoded_data.zip");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_dimension_mismatch_helper() {
        let err = DinerecError::dimension_mismatch("n_features", 12, 9);
        let msg = err.to_string();
        assert!(msg.contains("n_features=12"));
        assert!(msg.contains('9'));
    }

    #[test]
    fn test_artifact_mismatch_display() {
        let err = DinerecError::mismatch("PCA rows vs cleaned rows", 100, 99);
        let msg = err.to_string();
        assert!(msg.contains("PCA rows vs cleaned rows"));
        assert!(msg.contains("100"));
        assert!(msg.contains("99"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_interaction_errors_are_recoverable() {
        let errors = [
            DinerecError::NoOptions {
                level: FilterLevel::Cuisine,
            },
            DinerecError::InvalidSelection {
                level: FilterLevel::Cost,
                value: "999".to_string(),
            },
            DinerecError::MissingSelection {
                level: FilterLevel::City,
            },
        ];
        for err in &errors {
            assert!(err.is_recoverable(), "{err} should be recoverable");
        }
    }

    #[test]
    fn test_no_options_names_level() {
        let err = DinerecError::NoOptions {
            level: FilterLevel::Cuisine,
        };
        assert_eq!(
            err.to_string(),
            "no cuisine options available for the current selection"
        );
    }

    #[test]
    fn test_io_error_source_chain() {
        use std::error::Error as _;

        let err = DinerecError::io(
            "scaler.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());
        assert!(err.to_string().contains("scaler.json"));
    }
}
