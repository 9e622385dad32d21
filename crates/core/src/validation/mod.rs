//! Field-level validation.
//!
//! Rules run in a fixed order and stop at the first failure, so the reported
//! field is deterministic for a given input. Which rules run depends on the
//! [`Operation`].

mod rules;

#[cfg(test)]
mod validation_props;

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::email::EmailFormatChecker;

pub use rules::MAX_RETIREMENT_AGE;

/// Context a validation runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Creating a record.
    Create,
    /// Updating a record.
    Update,
    /// Authenticating a user (email and secret only).
    Login,
    /// Unspecified context; validates like `Create`.
    Default,
}

impl Operation {
    /// Returns the context name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Login => "login",
            Self::Default => "default",
        }
    }

    /// Parses a context name, case-insensitively. Unknown names map to `Default`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "create" => Self::Create,
            "update" => Self::Update,
            "login" => Self::Login,
            _ => Self::Default,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first rule an input broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// Offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub reason: &'static str,
}

impl ValidationError {
    /// Creates a validation error.
    #[must_use]
    pub const fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

/// Collaborators a validation may consult.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Reference instant for date rules and derived age.
    pub now: DateTime<Utc>,
    /// Email format checker.
    pub email: &'a dyn EmailFormatChecker,
}

impl<'a> ValidationContext<'a> {
    /// Creates a context.
    #[must_use]
    pub fn new(now: DateTime<Utc>, email: &'a dyn EmailFormatChecker) -> Self {
        Self { now, email }
    }
}

/// Types that can be checked before persistence.
pub trait Validate {
    /// Checks the rules for `operation`, reporting the first failure.
    fn validate(
        &self,
        operation: Operation,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_parse() {
        assert_eq!(Operation::parse("create"), Operation::Create);
        assert_eq!(Operation::parse("UPDATE"), Operation::Update);
        assert_eq!(Operation::parse(" Login "), Operation::Login);
        assert_eq!(Operation::parse(""), Operation::Default);
        assert_eq!(Operation::parse("delete"), Operation::Default);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("retirement age", "below current age");
        assert_eq!(err.to_string(), "invalid retirement age: below current age");
    }
}
