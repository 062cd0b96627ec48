//! Error types for dinerec-cli

use std::path::PathBuf;
use std::process::ExitCode;

use dinerec::error::DinerecError;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// The current request cannot be served; the artifacts are fine
    #[error("{0}")]
    Interaction(String),

    /// Required file not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Malformed dataset or model artifact
    #[error("{0}")]
    InvalidArtifact(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad configuration value
    #[error("{0}")]
    InvalidConfig(String),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::Interaction(_) => ExitCode::from(2),
            Self::FileNotFound(_) => ExitCode::from(3),
            Self::InvalidArtifact(_) => ExitCode::from(4),
            Self::Io(_) => ExitCode::from(7),
            Self::InvalidConfig(_) | Self::Json(_) => ExitCode::from(1),
        }
    }

    /// Whether this is shown as a warning rather than an error
    pub(crate) fn is_warning(&self) -> bool {
        matches!(self, Self::Interaction(_))
    }
}

impl From<DinerecError> for CliError {
    fn from(e: DinerecError) -> Self {
        if e.is_recoverable() {
            return Self::Interaction(e.to_string());
        }
        match e {
            DinerecError::MissingFile { path } => Self::FileNotFound(path),
            DinerecError::Io { path, source } => Self::Io(std::io::Error::new(
                source.kind(),
                format!("{}: {source}", path.display()),
            )),
            other @ DinerecError::InvalidConfig { .. } => Self::InvalidConfig(other.to_string()),
            other => Self::InvalidArtifact(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dinerec::filter::FilterLevel;

    fn code(e: &CliError) -> ExitCode {
        e.exit_code()
    }

    #[test]
    fn test_recoverable_errors_become_warnings() {
        let err = CliError::from(DinerecError::NoOptions {
            level: FilterLevel::Cuisine,
        });
        assert!(err.is_warning());
        assert_eq!(code(&err), ExitCode::from(2));
    }

    #[test]
    fn test_missing_file_exit_code() {
        let err = CliError::from(DinerecError::MissingFile {
            path: PathBuf::from("encoded_data.zip"),
        });
        assert!(matches!(err, CliError::FileNotFound(_)));
        assert_eq!(code(&err), ExitCode::from(3));
    }

    #[test]
    fn test_artifact_errors_exit_code() {
        let err = CliError::from(DinerecError::mismatch("PCA rows vs cleaned rows", 3, 2));
        assert!(matches!(err, CliError::InvalidArtifact(_)));
        assert_eq!(code(&err), ExitCode::from(4));
        assert!(!err.is_warning());
    }

    #[test]
    fn test_io_keeps_path() {
        let err = CliError::from(DinerecError::io(
            "encoded_data",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        ));
        assert_eq!(code(&err), ExitCode::from(7));
        assert!(err.to_string().contains("encoded_data"));
    }
}
