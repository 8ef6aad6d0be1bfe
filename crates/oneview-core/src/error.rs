//! # Error Types: Guard Failures
//!
//! Errors raised when a required-fields guard rejects an operation's
//! structured argument. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - A path that does not resolve is never an error. The resolver returns
//!   `None` and the guard decides what that means.
//! - The three call-time failure causes (argument absent, argument of the
//!   wrong shape, required paths unsatisfied) are separate variants with
//!   separate messages, so a caller can tell them apart either way.

use thiserror::Error;

/// Failure raised by [`RequiredFields`](crate::RequiredFields).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The guarded operation received no structured argument (absent or `null`).
    #[error("argument not found: expected a structured argument to validate")]
    ArgumentNotFound,

    /// The structured argument is present but is not an object.
    #[error("invalid argument type: expected an object, got {actual}")]
    InvalidArgumentType {
        /// JSON type name of the value that was supplied.
        actual: &'static str,
    },

    /// One or more required paths resolved to an absent or falsy value.
    #[error("missing required fields: {}", join_missing(.missing))]
    MissingRequiredFields {
        /// Unsatisfied paths, in declaration order.
        missing: Vec<String>,
    },

    /// A guard was declared with no required paths.
    #[error("required-fields guard declared with no paths")]
    EmptyRequirement,
}

/// Discriminant of [`ValidationError`], for callers that branch on the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    ArgumentNotFound,
    InvalidArgumentType,
    MissingRequiredFields,
    EmptyRequirement,
}

impl ValidationError {
    /// Returns the failure cause without its payload.
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::ArgumentNotFound => ValidationErrorKind::ArgumentNotFound,
            Self::InvalidArgumentType { .. } => ValidationErrorKind::InvalidArgumentType,
            Self::MissingRequiredFields { .. } => ValidationErrorKind::MissingRequiredFields,
            Self::EmptyRequirement => ValidationErrorKind::EmptyRequirement,
        }
    }

    /// Paths reported as missing. Empty for every other variant.
    pub fn missing_paths(&self) -> &[String] {
        match self {
            Self::MissingRequiredFields { missing } => missing,
            _ => &[],
        }
    }
}

/// Each path followed by `;`, declaration order kept.
fn join_missing(missing: &[String]) -> String {
    missing.iter().map(|path| format!("{path};")).collect()
}
