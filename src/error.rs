//! Error types for the scheduler policy resolver.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! the specific configuration problem and report it to the user.

use std::path::PathBuf;

use thiserror::Error;

use crate::spec::JobKind;

/// Errors raised while folding layers into a resolved document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// More than one accumulated job shares the name of a job in a less
    /// specific layer, so the parent job cannot be applied unambiguously.
    #[error("more than one {kind} named '{name}' matches {kind} '{name}' from layer '{layer}' ({matches} matches)")]
    AmbiguousJobName {
        kind: JobKind,
        name: String,
        layer: String,
        matches: usize,
    },
}

impl ResolveError {
    /// The job name that caused the failure.
    #[must_use]
    pub fn job_name(&self) -> &str {
        match self {
            Self::AmbiguousJobName { name, .. } => name,
        }
    }
}

/// Structural problems found in a single layer document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{kind} at index {index} has no name")]
    MissingJobName {
        kind: JobKind,
        index: usize,
    },

    #[error("{kind} '{name}' is defined more than once")]
    DuplicateJobName {
        kind: JobKind,
        name: String,
    },

    #[error("Field '{field}' has an invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    #[error("Field '{field}' has an invalid value: {reason}")]
    InvalidValue {
        field: String,
        reason: String,
    },

    #[error("Expected a document of kind 'Scheduler', found '{found}'")]
    UnexpectedKind {
        found: String,
    },
}

/// Errors raised while reading layer documents.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {origin}: {message}")]
    Parse {
        origin: String,
        message: String,
    },

    #[error("Invalid document {origin}: {source}")]
    Validation {
        origin: String,
        #[source]
        source: ValidationError,
    },
}

/// Errors raised while reading resolver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {message}")]
    Invalid {
        message: String,
    },
}

/// Top-level error type.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl SchedulerError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a resolve error.
    #[must_use]
    pub const fn is_resolve(&self) -> bool {
        matches!(self, Self::Resolve(_))
    }

    /// Returns true if this is a load error.
    #[must_use]
    pub const fn is_load(&self) -> bool {
        matches!(self, Self::Load(_))
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the error points at the user's configuration rather
    /// than at the environment (missing files) or a bug.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        match self {
            Self::Resolve(_) | Self::Validation(_) => true,
            Self::Load(e) => matches!(e, LoadError::Parse { .. } | LoadError::Validation { .. }),
            Self::Config(e) => matches!(e, ConfigError::Invalid { .. }),
            Self::Internal { .. } => false,
        }
    }
}

/// Result type alias for resolver operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_job_name_message() {
        let err = ResolveError::AmbiguousJobName {
            kind: JobKind::Presubmit,
            name: "unit".to_string(),
            layer: "org-defaults".to_string(),
            matches: 2,
        };
        let msg = format!("{err}");
        assert!(msg.contains("presubmit"));
        assert!(msg.contains("'unit'"));
        assert!(msg.contains("org-defaults"));
        assert!(msg.contains("2 matches"));
        assert_eq!(err.job_name(), "unit");
    }

    #[test]
    fn test_validation_error_duplicate() {
        let err = ValidationError::DuplicateJobName {
            kind: JobKind::Postsubmit,
            name: "release".to_string(),
        };
        assert_eq!(format!("{err}"), "postsubmit 'release' is defined more than once");
    }

    #[test]
    fn test_load_error_wraps_validation() {
        let err = LoadError::Validation {
            origin: "repo.yaml".to_string(),
            source: ValidationError::MissingJobName {
                kind: JobKind::Presubmit,
                index: 3,
            },
        };
        let msg = format!("{err}");
        assert!(msg.contains("repo.yaml"));
        assert!(msg.contains("index 3"));
    }

    #[test]
    fn test_scheduler_error_from_resolve() {
        let err: SchedulerError = ResolveError::AmbiguousJobName {
            kind: JobKind::Postsubmit,
            name: "deploy".to_string(),
            layer: "0".to_string(),
            matches: 3,
        }
        .into();
        assert!(err.is_resolve());
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_scheduler_error_io_is_not_configuration() {
        let err: SchedulerError = LoadError::Io {
            path: PathBuf::from("missing.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }
        .into();
        assert!(err.is_load());
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_scheduler_error_internal() {
        let err = SchedulerError::internal("unexpected state");
        assert!(!err.is_resolve());
        assert!(!err.is_validation());
        assert!(format!("{err}").contains("unexpected state"));
    }
}
