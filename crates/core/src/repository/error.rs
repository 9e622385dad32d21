//! Repository error types.

use nestegg_shared::AppError;
use thiserror::Error;

use crate::auth::CredentialError;
use crate::store::{RecordKind, StorageError};
use crate::validation::ValidationError;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The input broke a validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A uniqueness or referential constraint blocked the write.
    #[error("constraint violated on '{field}'")]
    ConstraintViolation {
        /// Label of the constrained field.
        field: String,
    },

    /// No record matched.
    #[error("{entity} not found")]
    NotFound {
        /// Kind of the missing record.
        entity: RecordKind,
    },

    /// Hashing failed or credentials did not match.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The storage collaborator failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    /// Creates a constraint violation on `field`.
    #[must_use]
    pub fn constraint(field: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            field: field.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub const fn not_found(entity: RecordKind) -> Self {
        Self::NotFound { entity }
    }

    /// Translates a storage failure observed while working on `entity`.
    #[must_use]
    pub fn from_storage(err: StorageError, entity: RecordKind) -> Self {
        match err {
            StorageError::NotFound => Self::NotFound { entity },
            StorageError::UniqueViolation { field } => Self::ConstraintViolation { field },
            StorageError::Backend(msg) => Self::Storage(msg),
        }
    }

    /// Returns a stable machine-readable code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ConstraintViolation { .. } => "CONSTRAINT_VIOLATION",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Credential(CredentialError::Mismatch) => "CREDENTIAL_MISMATCH",
            Self::Credential(CredentialError::Hashing(_)) => "CREDENTIAL_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(err) => Self::Validation {
                field: err.field.to_string(),
                reason: err.reason.to_string(),
            },
            RepositoryError::ConstraintViolation { field } => Self::Conflict { field },
            RepositoryError::NotFound { entity } => Self::NotFound {
                entity: entity.label().to_string(),
            },
            RepositoryError::Credential(CredentialError::Mismatch) => Self::Unauthorized,
            RepositoryError::Credential(CredentialError::Hashing(msg)) => Self::Internal(msg),
            RepositoryError::Storage(msg) => Self::Storage(msg),
        }
    }
}
