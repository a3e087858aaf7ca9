//! Service error model.

use thiserror::Error;

/// Result type used across the catalog service.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error.
///
/// Deterministic business failures (validation, invariants, conflicts) plus a
/// single `Storage` variant for repository failures surfaced through the
/// service. Collaborator internals stay behind their own error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A value failed validation (e.g. malformed input, empty SKU).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated (e.g. cyclic category chain).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested entity was not found.
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. duplicate SKU within a catalog).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A repository or source operation failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
