//! Resolver configuration.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a presubmit's `queries` combine when both the child and the parent
/// job define them.
///
/// The established behavior keeps the child's list and ignores the parent's.
/// `Append` is the opt-in alternative that concatenates the parent's queries
/// after the child's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMergeMode {
    #[default]
    ChildAuthoritative,
    Append,
}

impl fmt::Display for QueryMergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChildAuthoritative => write!(f, "child_authoritative"),
            Self::Append => write!(f, "append"),
        }
    }
}

/// Settings for a [`Resolver`](crate::Resolver).
///
/// # Examples
///
/// ```
/// use pipeline_scheduler::{QueryMergeMode, ResolverConfig};
///
/// let config = ResolverConfig::from_yaml_str("queryMerge: append").unwrap();
/// assert_eq!(config.query_merge, QueryMergeMode::Append);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ResolverConfig {
    pub query_merge: QueryMergeMode,
}

impl ResolverConfig {
    /// Parses a YAML configuration document. An empty document yields the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })
    }

    /// Reads a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    #[must_use]
    pub fn with_query_merge(mut self, mode: QueryMergeMode) -> Self {
        self.query_merge = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_to_child_authoritative_queries() {
        assert_eq!(ResolverConfig::default().query_merge, QueryMergeMode::ChildAuthoritative);
        assert_eq!(ResolverConfig::from_yaml_str("").unwrap(), ResolverConfig::default());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = ResolverConfig::from_yaml_str("queryMerge: append\nstrict: true").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(ResolverConfig::from_yaml_str("queryMerge: union").is_err());
    }

    #[test]
    fn test_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "queryMerge: append").unwrap();
        let config = ResolverConfig::load(file.path()).unwrap();
        assert_eq!(config.query_merge, QueryMergeMode::Append);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResolverConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
