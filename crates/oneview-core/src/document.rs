//! # Request Documents
//!
//! Loads JSON or YAML documents (request bodies, guard tables) into a
//! `serde_json::Value` so that property paths and guards operate on a single
//! value model regardless of the on-disk format.
//!
//! YAML is converted to the JSON-compatible subset: map keys that are
//! numbers or booleans are stringified, tags are dropped and non-finite
//! floats are rejected.

use std::fmt;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Error loading a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        /// Path of the document.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid JSON or YAML.
    #[error("invalid {format} in '{path}': {reason}")]
    Parse {
        /// Path of the document, or `<memory>` for in-memory input.
        path: String,
        format: DocumentFormat,
        reason: String,
    },

    /// The YAML parsed but has no JSON equivalent.
    #[error("YAML-to-JSON conversion failed for '{path}': {reason}")]
    Conversion {
        /// Path of the document, or `<memory>` for in-memory input.
        path: String,
        reason: String,
    },
}

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml`/`.yml` is YAML; every other extension is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}

const IN_MEMORY: &str = "<memory>";

/// Read and parse the document at `path`, choosing the format by extension.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_labelled(&content, DocumentFormat::from_path(path), &path.display().to_string())
}

/// Parse an in-memory document.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Value, DocumentError> {
    parse_labelled(text, format, IN_MEMORY)
}

fn parse_labelled(text: &str, format: DocumentFormat, label: &str) -> Result<Value, DocumentError> {
    match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| DocumentError::Parse {
            path: label.to_string(),
            format,
            reason: e.to_string(),
        }),
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|e| DocumentError::Parse {
                    path: label.to_string(),
                    format,
                    reason: e.to_string(),
                })?;
            yaml_to_json_value(&yaml).map_err(|reason| DocumentError::Conversion {
                path: label.to_string(),
                reason,
            })
        }
    }
}

/// Convert a `serde_yaml::Value` tree into the equivalent `serde_json::Value`.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                object.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
