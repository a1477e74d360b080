//! Validation error types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which rule rejected a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Wrong JSON type (e.g. number where a string was expected)
    Base,
    Required,
    Unknown,
    Min,
    Max,
    Integer,
    Pattern,
    Alphanum,
    Email,
    /// Value not in the `valid()` allow-list
    Only,
    /// No alternative matched
    Alternatives,
}

/// One rejected value, located by its path from the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub path: Vec<String>,
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorDetail {
    pub(crate) fn new(path: &[String], kind: ErrorKind, rule: impl fmt::Display) -> Self {
        let label = path.last().map(String::as_str).unwrap_or("value");
        Self {
            path: path.to_vec(),
            kind,
            message: format!("\"{}\" {}", label, rule),
        }
    }

    /// Dotted path, `"value"` for the root
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            "value".to_string()
        } else {
            self.path.join(".")
        }
    }
}

/// Validation failure returned by [`Schema::validate`](super::Schema::validate)
///
/// Holds one detail when validation aborts early, every detail otherwise.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    pub details: Vec<ErrorDetail>,
}

impl ValidationError {
    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.details.iter().any(|d| d.kind == kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .details
            .iter()
            .map(|d| d.message.as_str())
            .collect::<Vec<_>>()
            .join(". ");
        f.write_str(&joined)
    }
}

/// Library handle could not be resolved from a reference string
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Invalid library reference '{0}': expected '.' or a version like '2.1.0'")]
    InvalidReference(String),
}
