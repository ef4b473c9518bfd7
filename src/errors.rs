//! Error taxonomy for the scoring core
//!
//! Every failure the core can surface maps to exactly one variant, so callers
//! branch on [`CredenceError::kind`] instead of matching message text.
//! Degraded-but-usable input (missing optional fields, absent citation data,
//! unknown indexers) never produces an error; it lowers the assessment
//! confidence instead.

use serde::Serialize;
use thiserror::Error;

/// Errors produced by the fingerprint, heuristic, citation and scoring stages
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CredenceError {
    /// Malformed or missing mandatory input, or a misconfigured weight table
    #[error("validation error: {0}")]
    Validation(String),

    /// A citation edge references a node with no attributes while strict node
    /// checking is enabled
    #[error("citation graph construction error: {0}")]
    GraphConstruction(String),

    /// The mandatory signal is entirely absent (no venue id, or neither CFP
    /// nor website data)
    #[error("insufficient data: {0}")]
    InsufficientData(String),
}

/// Discriminant of [`CredenceError`], stable for serialization and branching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    GraphConstruction,
    InsufficientData,
}

impl CredenceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn graph_construction(msg: impl Into<String>) -> Self {
        Self::GraphConstruction(msg.into())
    }

    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Self::InsufficientData(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CredenceError::Validation(_) => ErrorKind::Validation,
            CredenceError::GraphConstruction(_) => ErrorKind::GraphConstruction,
            CredenceError::InsufficientData(_) => ErrorKind::InsufficientData,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::GraphConstruction => write!(f, "graph_construction"),
            ErrorKind::InsufficientData => write!(f, "insufficient_data"),
        }
    }
}

pub type CredenceResult<T> = Result<T, CredenceError>;

/// Reject NaN and infinities; finite values are clamped later.
pub(crate) fn ensure_finite(field: &str, value: f64) -> CredenceResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CredenceError::validation(format!(
            "{field} must be a finite number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            CredenceError::validation("x").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            CredenceError::graph_construction("x").kind(),
            ErrorKind::GraphConstruction
        );
        assert_eq!(
            CredenceError::insufficient_data("x").kind(),
            ErrorKind::InsufficientData
        );
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("score", 0.4), Ok(0.4));
        assert!(ensure_finite("score", f64::NAN).is_err());
        assert!(ensure_finite("score", f64::INFINITY).is_err());
    }
}
