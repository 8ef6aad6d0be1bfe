//! # oneview-core: Request-Argument Toolkit for the OneView Client
//!
//! The resource clients of the OneView library are thin wrappers that build
//! a URI and hand a JSON body to the shared HTTP helper. The logic they share
//! lives here:
//!
//! 1. **Property paths** ([`property`]). `A.B.data[0].info` style expressions
//!    resolved against nested JSON. A path that does not resolve yields
//!    `None`; it is never an error.
//!
//! 2. **Required-fields guards** ([`required`]). A fixed list of paths that
//!    must be truthy in an operation's body before the operation runs.
//!    Guards compose explicitly through [`RequiredFields::wrap`].
//!
//! 3. **Guard tables** ([`table`]). Guards declared per operation in a
//!    YAML or JSON document.
//!
//! ## Crate Policy
//!
//! - No I/O outside [`document`] and [`GuardTable::from_path`].
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Everything is synchronous and immutable after construction.

pub mod document;
pub mod error;
pub mod property;
pub mod required;
pub mod table;
pub mod truthy;

// Re-export primary types for ergonomic imports.
pub use document::{load_document, parse_document, DocumentError, DocumentFormat};
pub use error::{ValidationError, ValidationErrorKind};
pub use property::{get_dict_property, list_has_index, list_has_index_str, PropertyPath};
pub use required::{required_fields, Guarded, RequiredFields};
pub use table::{GuardTable, TableError};
pub use truthy::is_truthy;
