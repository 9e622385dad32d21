//! Email address format checking.

use validator::ValidateEmail;

/// Decides whether a string is a well-formed email address.
pub trait EmailFormatChecker: Send + Sync {
    /// Returns true if `email` has a valid format.
    fn is_valid_format(&self, email: &str) -> bool;
}

/// HTML5-style address check backed by the `validator` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEmailChecker;

impl EmailFormatChecker for StandardEmailChecker {
    fn is_valid_format(&self, email: &str) -> bool {
        email.validate_email()
    }
}
