//! # Required-Fields Guard
//!
//! A precondition attached to an operation that takes a structured JSON
//! argument. Before the operation runs, every declared property path must
//! resolve to a truthy value in that argument; otherwise the call fails with
//! a [`ValidationError`] and the operation is never invoked.
//!
//! ## Composition
//!
//! Guards are attached explicitly at the call site:
//!
//! ```
//! use serde_json::{json, Value};
//! use oneview_core::{required_fields, ValidationError};
//!
//! struct Backups;
//!
//! let create = required_fields(["source.name", "id"])?
//!     .wrap(|_: &Backups, body: &Value, (): ()| -> Result<String, ValidationError> {
//!         Ok(body["source"]["name"].to_string())
//!     });
//!
//! let body = json!({"source": {"name": "Test"}, "id": 1});
//! assert_eq!(create.call(&Backups, Some(&body), ())?, "\"Test\"");
//!
//! let err = create.call(&Backups, Some(&json!({"index": "value"})), ()).unwrap_err();
//! assert_eq!(err.to_string(), "missing required fields: source.name;id;");
//! # Ok::<(), ValidationError>(())
//! ```
//!
//! ## Thread Safety
//!
//! The path list is fixed at construction and shared behind an `Arc`, so
//! clones are cheap and a guard can be used from many threads at once.

use std::sync::Arc;

use serde_json::Value;

use crate::error::ValidationError;
use crate::property::get_dict_property;
use crate::truthy::{is_truthy, json_type_name};

/// An immutable, non-empty list of required property paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFields {
    paths: Arc<[String]>,
}

impl RequiredFields {
    /// Declare a guard over `paths`, kept in the given order.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyRequirement` if `paths` is empty.
    pub fn new<I, S>(paths: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Arc<[String]> = paths.into_iter().map(Into::into).collect();
        if paths.is_empty() {
            return Err(ValidationError::EmptyRequirement);
        }
        Ok(Self { paths })
    }

    /// The declared paths, in declaration order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Declared paths that resolve to an absent or falsy value in `candidate`.
    ///
    /// Order and duplicates follow the declaration.
    pub fn missing(&self, candidate: &Value) -> Vec<&str> {
        self.paths
            .iter()
            .filter(|path| !is_truthy(get_dict_property(candidate, path)))
            .map(String::as_str)
            .collect()
    }

    /// Validate an operation's structured argument and hand it back.
    ///
    /// # Errors
    ///
    /// - `ArgumentNotFound` if `argument` is `None` or JSON `null`.
    /// - `InvalidArgumentType` if it is not an object.
    /// - `MissingRequiredFields` listing every unsatisfied path.
    pub fn validate<'a>(&self, argument: Option<&'a Value>) -> Result<&'a Value, ValidationError> {
        let candidate = match argument {
            None | Some(Value::Null) => return Err(ValidationError::ArgumentNotFound),
            Some(value @ Value::Object(_)) => value,
            Some(other) => {
                return Err(ValidationError::InvalidArgumentType {
                    actual: json_type_name(other),
                })
            }
        };

        let missing = self.missing(candidate);
        if !missing.is_empty() {
            tracing::debug!(missing = ?missing, "required fields missing");
            return Err(ValidationError::MissingRequiredFields {
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }
        Ok(candidate)
    }

    /// [`validate`](Self::validate) without the argument.
    pub fn check(&self, argument: Option<&Value>) -> Result<(), ValidationError> {
        self.validate(argument).map(|_| ())
    }

    /// Attach this guard to `operation`.
    pub fn wrap<F>(&self, operation: F) -> Guarded<F> {
        Guarded {
            guard: self.clone(),
            operation,
        }
    }
}

/// Free-function form of [`RequiredFields::new`].
pub fn required_fields<I, S>(paths: I) -> Result<RequiredFields, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    RequiredFields::new(paths)
}

/// An operation behind a [`RequiredFields`] guard.
///
/// The operation receives the receiver, the validated object and any
/// remaining arguments bundled as `A` (use `()` when there are none).
#[derive(Debug, Clone)]
pub struct Guarded<F> {
    guard: RequiredFields,
    operation: F,
}

impl<F> Guarded<F> {
    /// Validate `argument`, then run the operation with the original arguments.
    ///
    /// The operation's result is returned unchanged. On a guard failure the
    /// operation is not invoked and the error is converted into `E`.
    pub fn call<R, A, T, E>(&self, receiver: &R, argument: Option<&Value>, rest: A) -> Result<T, E>
    where
        R: ?Sized,
        F: Fn(&R, &Value, A) -> Result<T, E>,
        E: From<ValidationError>,
    {
        let argument = self.guard.validate(argument)?;
        (self.operation)(receiver, argument, rest)
    }

    pub fn required(&self) -> &RequiredFields {
        &self.guard
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::ValidationErrorKind;
    use serde_json::json;

    fn guard() -> RequiredFields {
        RequiredFields::new(["source.name", "id"]).unwrap()
    }

    #[test]
    fn test_empty_declaration_rejected() {
        let err = RequiredFields::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyRequirement);
    }

    #[test]
    fn test_paths_keep_declaration_order() {
        assert_eq!(guard().paths(), ["source.name".to_string(), "id".to_string()]);
    }

    #[test]
    fn test_complete_argument_passes() {
        let body = json!({"source": {"name": "Test"}, "id": 1});
        guard().check(Some(&body)).unwrap();
    }

    #[test]
    fn test_all_missing_reported_in_order() {
        let err = guard().check(Some(&json!({"index": "value"}))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingRequiredFields {
                missing: vec!["source.name".into(), "id".into()],
            }
        );
        assert_eq!(err.to_string(), "missing required fields: source.name;id;");
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        let body = json!({"source": {"name": ""}, "id": 0});
        let err = guard().check(Some(&body)).unwrap_err();
        assert_eq!(err.missing_paths(), ["source.name".to_string(), "id".to_string()]);
    }

    #[test]
    fn test_partial_missing() {
        let body = json!({"source": {"name": "Test"}});
        let err = guard().check(Some(&body)).unwrap_err();
        assert_eq!(err.missing_paths(), ["id".to_string()]);
    }

    #[test]
    fn test_duplicates_preserved() {
        let guard = RequiredFields::new(["id", "name", "id"]).unwrap();
        assert_eq!(guard.missing(&json!({"name": "x"})), ["id", "id"]);
    }

    #[test]
    fn test_absent_argument() {
        assert_eq!(guard().check(None).unwrap_err(), ValidationError::ArgumentNotFound);
        assert_eq!(
            guard().check(Some(&Value::Null)).unwrap_err(),
            ValidationError::ArgumentNotFound
        );
    }

    #[test]
    fn test_non_object_argument() {
        let err = guard().check(Some(&json!("not a dict"))).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::InvalidArgumentType);
        assert!(err.to_string().contains("string"));

        let err = guard().check(Some(&json!([1, 2]))).unwrap_err();
        assert_eq!(err, ValidationError::InvalidArgumentType { actual: "array" });
    }

    #[test]
    fn test_indexed_requirement() {
        let guard = RequiredFields::new(["ports[0].portName"]).unwrap();
        guard.check(Some(&json!({"ports": [{"portName": "X1"}]}))).unwrap();
        assert!(guard.check(Some(&json!({"ports": []}))).is_err());
    }

    #[test]
    fn test_wrapped_operation_runs_on_success() {
        let guarded = guard().wrap(|prefix: &str, body: &Value, suffix: &str| {
            Ok::<_, ValidationError>(format!("{prefix}{}{suffix}", body["id"]))
        });
        let body = json!({"source": {"name": "Test"}, "id": 1});
        assert_eq!(guarded.call("<", Some(&body), ">").unwrap(), "<1>");
    }

    #[test]
    fn test_wrapped_operation_skipped_on_failure() {
        let calls = Cell::new(0);
        let guarded = guard().wrap(|calls: &Cell<u32>, _: &Value, (): ()| {
            calls.set(calls.get() + 1);
            Ok::<_, ValidationError>(())
        });

        assert!(guarded.call(&calls, None, ()).is_err());
        assert!(guarded.call(&calls, Some(&json!("text")), ()).is_err());
        assert!(guarded.call(&calls, Some(&json!({})), ()).is_err());
        assert_eq!(calls.get(), 0);

        guarded
            .call(&calls, Some(&json!({"source": {"name": "n"}, "id": 2})), ())
            .unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_operation_error_passes_through() {
        #[derive(Debug, PartialEq)]
        enum CallError {
            Guard(ValidationError),
            Remote(u16),
        }
        impl From<ValidationError> for CallError {
            fn from(e: ValidationError) -> Self {
                Self::Guard(e)
            }
        }

        let guarded = guard().wrap(|_: &(), _: &Value, (): ()| Err::<(), _>(CallError::Remote(409)));
        let body = json!({"source": {"name": "n"}, "id": 2});
        assert_eq!(guarded.call(&(), Some(&body), ()), Err(CallError::Remote(409)));
        assert_eq!(
            guarded.call(&(), None, ()),
            Err(CallError::Guard(ValidationError::ArgumentNotFound))
        );
    }

    #[test]
    fn test_guard_shared_across_threads() {
        let guard = guard();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let guard = guard.clone();
                std::thread::spawn(move || {
                    let body = json!({"source": {"name": format!("t{i}")}, "id": i + 1});
                    guard.check(Some(&body)).is_ok()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
