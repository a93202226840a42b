//! Errors returned by content resource operations.

use thiserror::Error;

/// Failure of a content resource operation.
///
/// Status-code mapping happens in the HTTP adapter (`crate::error`).
#[derive(Debug, Error)]
pub enum ContentError {
    /// Malformed payload or missing required field.
    #[error("{0}")]
    InvalidInput(String),

    /// The actor lacks permission on an existing item.
    #[error("Access denied")]
    Forbidden,

    /// The item does not exist (or is outside the resource's scope).
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The store rejected or failed an operation.
    #[error("Error {operation} {label}: {source:#}")]
    Persistence {
        operation: &'static str,
        label: &'static str,
        source: anyhow::Error,
    },
}

impl ContentError {
    /// Create an invalid input error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
