//! # Guard Tables
//!
//! Required-field declarations kept as data instead of code: a document
//! mapping operation names to the paths their request body must carry.
//!
//! ```yaml
//! operations:
//!   backups.create:
//!     - source.name
//!     - id
//!   switches.update_ports:
//!     - ports[0].portName
//! ```
//!
//! Each entry becomes a [`RequiredFields`] guard at load time. Every
//! operation must declare at least one path.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::document::{load_document, parse_document, DocumentError, DocumentFormat};
use crate::error::ValidationError;
use crate::required::RequiredFields;

/// Error loading a guard table or checking an argument against it.
#[derive(Error, Debug)]
pub enum TableError {
    /// The table document could not be read or parsed.
    #[error("guard table document error: {0}")]
    Document(#[from] DocumentError),

    /// The document parsed but does not have the table shape.
    #[error("malformed guard table: {reason}")]
    Malformed {
        reason: String,
    },

    /// An operation was declared with an empty path list.
    #[error("operation '{operation}' declares no required fields")]
    EmptyRequirement {
        operation: String,
    },

    /// No guard is declared for the requested operation.
    #[error("no required-fields guard declared for operation '{operation}'")]
    UnknownOperation {
        operation: String,
    },

    /// The argument failed the operation's guard.
    #[error("operation '{operation}' rejected: {source}")]
    Validation {
        operation: String,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableDocument {
    operations: BTreeMap<String, Vec<String>>,
}

/// Operation name → required-fields guard.
#[derive(Debug, Clone, Default)]
pub struct GuardTable {
    guards: BTreeMap<String, RequiredFields>,
}

impl GuardTable {
    /// Load a table from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let table = Self::from_value(load_document(path)?)?;
        tracing::debug!(
            path = %path.display(),
            operations = table.len(),
            "loaded guard table"
        );
        Ok(table)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, TableError> {
        Self::from_value(parse_document(text, DocumentFormat::Yaml)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, TableError> {
        Self::from_value(parse_document(text, DocumentFormat::Json)?)
    }

    /// Build a table from an already parsed document.
    pub fn from_value(document: Value) -> Result<Self, TableError> {
        let document: TableDocument =
            serde_json::from_value(document).map_err(|e| TableError::Malformed {
                reason: e.to_string(),
            })?;

        let mut guards = BTreeMap::new();
        for (operation, paths) in document.operations {
            let guard = RequiredFields::new(paths).map_err(|_| TableError::EmptyRequirement {
                operation: operation.clone(),
            })?;
            guards.insert(operation, guard);
        }
        Ok(Self { guards })
    }

    /// Declare or replace the guard for `operation`.
    pub fn insert(&mut self, operation: impl Into<String>, guard: RequiredFields) {
        self.guards.insert(operation.into(), guard);
    }

    pub fn get(&self, operation: &str) -> Option<&RequiredFields> {
        self.guards.get(operation)
    }

    /// Declared operation names, sorted.
    pub fn operations(&self) -> Vec<&str> {
        self.guards.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Check `argument` against the guard declared for `operation`.
    pub fn check(&self, operation: &str, argument: Option<&Value>) -> Result<(), TableError> {
        let guard = self.get(operation).ok_or_else(|| TableError::UnknownOperation {
            operation: operation.to_string(),
        })?;
        guard.check(argument).map_err(|source| TableError::Validation {
            operation: operation.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use serde_json::json;

    const TABLE: &str = r#"
operations:
  backups.create:
    - source.name
    - id
  switches.update_ports:
    - ports[0].portName
"#;

    #[test]
    fn test_load_yaml_table() {
        let table = GuardTable::from_yaml_str(TABLE).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.operations(), ["backups.create", "switches.update_ports"]);
        assert_eq!(
            table.get("backups.create").unwrap().paths(),
            ["source.name".to_string(), "id".to_string()]
        );
    }

    #[test]
    fn test_load_json_table() {
        let table =
            GuardTable::from_json_str(r#"{"operations": {"scopes.create": ["name"]}}"#).unwrap();
        assert_eq!(table.operations(), ["scopes.create"]);
    }

    #[test]
    fn test_empty_requirement_rejected() {
        let err = GuardTable::from_yaml_str("operations:\n  scopes.create: []\n").unwrap_err();
        match err {
            TableError::EmptyRequirement { operation } => assert_eq!(operation, "scopes.create"),
            other => panic!("Expected EmptyRequirement, got: {other}"),
        }
    }

    #[test]
    fn test_malformed_table_rejected() {
        let err = GuardTable::from_yaml_str("operations: [a, b]\n").unwrap_err();
        assert!(matches!(err, TableError::Malformed { .. }), "got: {err}");

        let err = GuardTable::from_yaml_str("ops: {}\n").unwrap_err();
        assert!(matches!(err, TableError::Malformed { .. }), "got: {err}");
    }

    #[test]
    fn test_check_passes_and_fails() {
        let table = GuardTable::from_yaml_str(TABLE).unwrap();
        table
            .check("switches.update_ports", Some(&json!({"ports": [{"portName": "X1"}]})))
            .unwrap();

        let err = table.check("backups.create", Some(&json!({"index": "value"}))).unwrap_err();
        match err {
            TableError::Validation { operation, source } => {
                assert_eq!(operation, "backups.create");
                assert_eq!(source.kind(), ValidationErrorKind::MissingRequiredFields);
                assert_eq!(source.missing_paths(), ["source.name".to_string(), "id".to_string()]);
            }
            other => panic!("Expected Validation, got: {other}"),
        }
    }

    #[test]
    fn test_unknown_operation() {
        let table = GuardTable::from_yaml_str(TABLE).unwrap();
        let err = table.check("enclosures.patch", Some(&json!({}))).unwrap_err();
        assert!(matches!(err, TableError::UnknownOperation { .. }));
    }

    #[test]
    fn test_insert_replaces_guard() {
        let mut table = GuardTable::default();
        assert!(table.is_empty());
        table.insert("id_pools.allocate", RequiredFields::new(["count"]).unwrap());
        table.insert("id_pools.allocate", RequiredFields::new(["idList"]).unwrap());
        assert_eq!(table.get("id_pools.allocate").unwrap().paths(), ["idList".to_string()]);
    }
}
