//! This module defines the problem format consumed by the normalization pipeline, the solution
//! format produced after optimization and the format error registry.

use serde::Serialize;
use std::fmt;

pub mod problem;
pub mod solution;

/// A category of a format error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Wrong shape or type at a required field.
    TypeMismatch,
    /// A mandatory field is absent.
    MissingRequiredField,
    /// An entity has no identifier.
    MissingIdentifier,
    /// A mandatory collection is absent or empty.
    MissingCollection,
    /// Input requests a routing feature which cannot be represented.
    UnsupportedFeature,
    /// Array or matrix dimensions are inconsistent.
    ShapeMismatch,
    /// A matrix or entity reference exceeds bounds.
    IndexOutOfRange,
    /// A reference to an unknown entity id.
    DanglingReference,
}

/// A format error.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormatError {
    /// An error code in registry.
    pub code: String,
    /// An error category.
    pub kind: ErrorKind,
    /// A possible error cause.
    pub cause: String,
    /// An action to take in order to recover from error.
    pub action: String,
    /// A details about exception.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl FormatError {
    /// Creates a new instance of `FormatError` without details.
    pub fn new(code: &str, kind: ErrorKind, cause: String, action: String) -> Self {
        Self { code: code.to_string(), kind, cause, action, details: None }
    }

    /// Creates a new instance of `FormatError` with details.
    pub fn new_with_details(code: &str, kind: ErrorKind, cause: String, action: String, details: String) -> Self {
        Self { code: code.to_string(), kind, cause, action, details: Some(details) }
    }

    /// Serializes error into json string.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_string())
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, cause: '{}', action: '{}'.", self.code, self.cause, self.action)
    }
}

impl std::error::Error for FormatError {}

/// Keeps track of multiple `FormatError`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MultiFormatError {
    /// Inner errors.
    pub errors: Vec<FormatError>,
}

impl MultiFormatError {
    /// Formats multiple format errors into json string.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_string())
    }

    /// Returns true if any inner error has given code.
    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|err| err.code == code)
    }

    /// Returns codes of inner errors.
    pub fn codes(&self) -> Vec<&str> {
        self.errors.iter().map(|err| err.code.as_str()).collect()
    }
}

impl fmt::Display for MultiFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.errors.iter().map(|err| err.to_string()).collect::<Vec<_>>().join("\n"))
    }
}

impl std::error::Error for MultiFormatError {}

impl From<Vec<FormatError>> for MultiFormatError {
    fn from(errors: Vec<FormatError>) -> Self {
        MultiFormatError { errors }
    }
}

impl From<FormatError> for MultiFormatError {
    fn from(error: FormatError) -> Self {
        MultiFormatError { errors: vec![error] }
    }
}

impl IntoIterator for MultiFormatError {
    type Item = FormatError;
    type IntoIter = <Vec<FormatError> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
