//! Reading and writing layer documents.
//!
//! A layer is stored either as a full `Scheduler` resource
//!
//! ```yaml
//! apiVersion: jenkins.io/v1
//! kind: Scheduler
//! metadata:
//!   name: org-defaults
//! spec:
//!   plugins:
//!     items: [approve, lgtm]
//! ```
//!
//! or as a bare spec mapping. Both YAML and JSON are accepted.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{LoadError, SchedulerError, ValidationError};
use crate::resolver::Layer;
use crate::spec::SchedulerSpec;
use crate::validation::validate_spec;

/// The resource kind a layer document must declare, if it declares one.
pub const SCHEDULER_KIND: &str = "Scheduler";

const RESOURCE_KEYS: [&str; 4] = ["apiVersion", "kind", "metadata", "spec"];

/// Serialization format of a layer document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

impl DocumentFormat {
    /// `.json` files are JSON; everything else is read as YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// A `Scheduler` resource. Bare spec documents parse into one with no
/// `kind` and empty metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub metadata: ObjectMeta,

    pub spec: SchedulerSpec,
}

impl SchedulerDocument {
    /// The scheduler name from `metadata.name`, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref().filter(|n| !n.trim().is_empty())
    }

    fn bare(spec: SchedulerSpec) -> Self {
        Self {
            spec,
            ..Self::default()
        }
    }
}

/// Parses and validates a layer document.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] for malformed text and
/// [`LoadError::Validation`] for a wrong `kind` or an invalid spec.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<SchedulerDocument, LoadError> {
    parse_from(text, format, "document")
}

fn parse_from(text: &str, format: DocumentFormat, origin: &str) -> Result<SchedulerDocument, LoadError> {
    let parse_error = |message: String| LoadError::Parse {
        origin: origin.to_string(),
        message,
    };

    if text.trim().is_empty() {
        return Ok(SchedulerDocument::default());
    }
    let value: Value = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?,
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| parse_error(e.to_string()))?,
    };

    let document = match value {
        Value::Null => SchedulerDocument::default(),
        Value::Object(map) => {
            let is_resource = RESOURCE_KEYS.iter().any(|k| map.contains_key(*k));
            let value = Value::Object(map);
            if is_resource {
                serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))?
            } else {
                SchedulerDocument::bare(serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))?)
            }
        }
        other => {
            return Err(parse_error(format!(
                "expected a mapping, found {}",
                value_kind(&other)
            )))
        }
    };

    let invalid = |source: ValidationError| LoadError::Validation {
        origin: origin.to_string(),
        source,
    };
    if let Some(kind) = document.kind.as_deref() {
        if kind != SCHEDULER_KIND {
            return Err(invalid(ValidationError::UnexpectedKind {
                found: kind.to_string(),
            }));
        }
    }
    validate_spec(&document.spec).map_err(invalid)?;

    Ok(document)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Reads one layer file. The layer is named after `metadata.name`, falling
/// back to the file path.
///
/// # Errors
///
/// Returns [`LoadError::Io`] when the file cannot be read, otherwise see
/// [`parse_document`].
pub fn load_layer(path: &Path) -> Result<Layer, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let origin = path.display().to_string();
    let format = DocumentFormat::from_path(path);
    let document = parse_from(&text, format, &origin)?;

    let name = document.name().map_or(origin, str::to_string);
    debug!(layer = %name, path = %path.display(), %format, "loaded layer");
    Ok(Layer::new(name, document.spec))
}

/// Reads layer files in order, least specific first.
///
/// # Errors
///
/// Stops at the first file that fails to load.
pub fn load_layers<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Layer>, LoadError> {
    paths.iter().map(|p| load_layer(p.as_ref())).collect()
}

/// Serializes a spec in the given format.
pub fn render_spec(spec: &SchedulerSpec, format: DocumentFormat) -> Result<String, SchedulerError> {
    match format {
        DocumentFormat::Yaml => serde_yaml::to_string(spec)
            .map_err(|e| SchedulerError::internal(format!("serialize spec as yaml: {e}"))),
        DocumentFormat::Json => serde_json::to_string_pretty(spec)
            .map_err(|e| SchedulerError::internal(format!("serialize spec as json: {e}"))),
    }
}
