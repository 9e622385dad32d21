//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Caller-facing error.
///
/// Library errors (validation, credential, storage) convert into this type at
/// the boundary so outer layers can pick a status without matching on every
/// domain variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Credentials did not match. Carries no detail.
    #[error("authentication failed")]
    Unauthorized,

    /// A record does not exist or is not visible to the caller.
    #[error("{entity} not found")]
    NotFound {
        /// Entity label.
        entity: String,
    },

    /// A field broke a validation rule.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Field label.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A write collided with a uniqueness or referential constraint.
    #[error("conflict on {field}")]
    Conflict {
        /// Field label.
        field: String,
    },

    /// The storage collaborator failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::NotFound { .. } => 404,
            Self::Validation { .. } => 400,
            Self::Conflict { .. } => 409,
            Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Conflict { .. } => "CONFLICT",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the offending field, if the error names one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } | Self::Conflict { field } => Some(field),
            _ => None,
        }
    }
}
