//! Errors reported by storage collaborators.

use thiserror::Error;

/// Failure reported by a [`Table`](super::Table) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No record matched the filter.
    #[error("record not found")]
    NotFound,

    /// A write would break a uniqueness constraint.
    #[error("unique constraint violated on '{field}'")]
    UniqueViolation {
        /// Label of the constrained field.
        field: String,
    },

    /// Any other backend failure, passed through untouched.
    #[error("storage backend failure: {0}")]
    Backend(String),
}
