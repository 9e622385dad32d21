//! Repository facade.
//!
//! One repository per entity, all sharing a [`RepositoryContext`] that holds
//! the storage collaborator, the clock, the email checker and the secret
//! hasher. Every write follows the same pipeline:
//!
//! 1. normalise the input (trim free text)
//! 2. validate it for the operation
//! 3. check referenced records exist
//! 4. check uniqueness
//! 5. prepare and persist
//! 6. resolve owning relations for the returned value
//!
//! The facade reads the clock once per call, so every timestamp and derived
//! figure in one write agrees.

mod account;
mod bank;
mod error;
mod expense;
mod investment;
mod relations;
mod user;

use std::sync::Arc;

use chrono::{DateTime, Utc};

pub use account::AccountRepository;
pub use bank::BankRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use expense::ExpenseRepository;
pub use investment::InvestmentRepository;
pub use user::UserRepository;

use crate::auth::SecretHasher;
use crate::clock::Clock;
use crate::email::{EmailFormatChecker, StandardEmailChecker};
use crate::store::Store;
use crate::validation::{Operation, Validate, ValidationContext, ValidationError};

/// A finite listing, consumed once.
pub type Listing<T> = std::vec::IntoIter<T>;

/// Collaborators shared by every repository.
pub struct RepositoryContext<S: Store> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    email: Arc<dyn EmailFormatChecker>,
    hasher: SecretHasher,
}

impl<S: Store> RepositoryContext<S> {
    /// Creates a context with the standard email checker and default hashing cost.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            email: Arc::new(StandardEmailChecker),
            hasher: SecretHasher::default(),
        }
    }

    /// Replaces the email format checker.
    #[must_use]
    pub fn with_email_checker(mut self, email: Arc<dyn EmailFormatChecker>) -> Self {
        self.email = email;
        self
    }

    /// Replaces the secret hasher.
    #[must_use]
    pub fn with_hasher(mut self, hasher: SecretHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Returns the storage collaborator.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the secret hasher.
    #[must_use]
    pub fn hasher(&self) -> &SecretHasher {
        &self.hasher
    }

    /// Reads the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn validate<V: Validate>(
        &self,
        input: &V,
        operation: Operation,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        input.validate(operation, &ValidationContext::new(now, self.email.as_ref()))
    }
}

/// All repositories over one context.
pub struct Repositories<S: Store> {
    /// User repository.
    pub users: UserRepository<S>,
    /// Bank repository.
    pub banks: BankRepository<S>,
    /// Account repository.
    pub accounts: AccountRepository<S>,
    /// Investment repository.
    pub investments: InvestmentRepository<S>,
    /// Monthly expense repository.
    pub expenses: ExpenseRepository<S>,
}

impl<S: Store> Repositories<S> {
    /// Builds every repository over `ctx`.
    #[must_use]
    pub fn new(ctx: RepositoryContext<S>) -> Self {
        let ctx = Arc::new(ctx);
        Self {
            users: UserRepository::new(Arc::clone(&ctx)),
            banks: BankRepository::new(Arc::clone(&ctx)),
            accounts: AccountRepository::new(Arc::clone(&ctx)),
            investments: InvestmentRepository::new(Arc::clone(&ctx)),
            expenses: ExpenseRepository::new(ctx),
        }
    }
}
