//! User profile entity.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use nestegg_shared::types::UserId;
use serde::{Deserialize, Serialize};

use crate::auth::{CredentialError, SecretHasher};
use crate::projection;
use crate::store::{Column, Record, RecordKind, Value};

/// A stored user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity assigned by storage.
    pub id: UserId,
    /// Full name (unique).
    pub full_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Email address (unique).
    pub email: String,
    /// Argon2id digest of the account secret. Never serialized.
    #[serde(skip_serializing, default)]
    pub secret_hash: String,
    /// Age in whole calendar years, derived.
    pub current_age: i32,
    /// Age at which the user plans to retire.
    pub retirement_age: i32,
    /// Income.
    pub income: i64,
    /// Days until retirement, derived. Negative once past retirement.
    pub days_left: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied user fields.
///
/// The same shape serves create, update and login; which fields matter
/// depends on the [`Operation`](crate::validation::Operation).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    /// Full name.
    pub full_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Email address.
    pub email: String,
    /// Plaintext secret.
    pub secret: String,
    /// Income.
    pub income: i64,
    /// Planned retirement age.
    pub retirement_age: i32,
}

impl UserInput {
    /// Builds a login attempt: only email and secret are meaningful.
    #[must_use]
    pub fn login(email: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            full_name: String::new(),
            date_of_birth: NaiveDate::MIN,
            email: email.into(),
            secret: secret.into(),
            income: 0,
            retirement_age: 0,
        }
    }

    /// Trims surrounding whitespace from the free-text fields.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.full_name = self.full_name.trim().to_string();
        self.email = self.email.trim().to_string();
        self
    }
}

impl fmt::Debug for UserInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserInput")
            .field("full_name", &self.full_name)
            .field("date_of_birth", &self.date_of_birth)
            .field("email", &self.email)
            .field("secret", &"<redacted>")
            .field("income", &self.income)
            .field("retirement_age", &self.retirement_age)
            .finish()
    }
}

/// Fields written when a user is updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    /// New full name.
    pub full_name: String,
    /// New email.
    pub email: String,
    /// Fresh digest of the secret.
    pub secret_hash: String,
    /// Recomputed age.
    pub current_age: i32,
    /// Recomputed days until retirement.
    pub days_left: i64,
    /// Modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Prepares a new user for persistence.
    ///
    /// Hashes the secret and derives age and days-left in one step, so a
    /// stored user never carries a digest and derived fields from different
    /// moments.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Hashing` if the secret cannot be hashed.
    pub fn prepare(
        input: &UserInput,
        hasher: &SecretHasher,
        now: DateTime<Utc>,
    ) -> Result<Self, CredentialError> {
        let secret_hash = hasher.hash(&input.secret)?;
        let current_age = projection::current_age(input.date_of_birth, now);

        Ok(Self {
            id: UserId::UNASSIGNED,
            full_name: input.full_name.clone(),
            date_of_birth: input.date_of_birth,
            email: input.email.clone(),
            secret_hash,
            current_age,
            retirement_age: input.retirement_age,
            income: input.income,
            days_left: projection::days_left_to_retirement(input.retirement_age, current_age),
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns the snapshot that results from applying `input` to this user.
    ///
    /// Only the secret, full name and email are taken from `input`; birth
    /// date, income and retirement age keep their stored values. The secret
    /// is rehashed and derived fields are recomputed together.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Hashing` if the secret cannot be hashed.
    pub fn revise(
        &self,
        input: &UserInput,
        hasher: &SecretHasher,
        now: DateTime<Utc>,
    ) -> Result<Self, CredentialError> {
        let secret_hash = hasher.hash(&input.secret)?;
        let current_age = projection::current_age(self.date_of_birth, now);

        Ok(Self {
            full_name: input.full_name.clone(),
            email: input.email.clone(),
            secret_hash,
            current_age,
            days_left: projection::days_left_to_retirement(self.retirement_age, current_age),
            updated_at: now,
            ..self.clone()
        })
    }

    /// Returns `input` with this user's stored birth date, income and
    /// retirement age in place of the supplied ones.
    ///
    /// An update keeps those three fields, so its rules must see them.
    #[must_use]
    pub fn carry_over(&self, input: UserInput) -> UserInput {
        UserInput {
            date_of_birth: self.date_of_birth,
            income: self.income,
            retirement_age: self.retirement_age,
            ..input
        }
    }

    /// Returns the field set that turns the stored row into this snapshot.
    #[must_use]
    pub fn changes(&self) -> UserChanges {
        UserChanges {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            secret_hash: self.secret_hash.clone(),
            current_age: self.current_age,
            days_left: self.days_left,
            updated_at: self.updated_at,
        }
    }

    /// Whole years until retirement. Negative once past retirement.
    #[must_use]
    pub fn years_to_retirement(&self) -> i32 {
        projection::years_to_retirement(self.retirement_age, self.current_age)
    }

    /// Returns true once the user has reached retirement age.
    #[must_use]
    pub fn is_past_retirement(&self) -> bool {
        self.days_left <= 0
    }
}

impl Record for User {
    const KIND: RecordKind = RecordKind::User;
    const UNIQUE: &'static [&'static [Column]] = &[&[Column::FullName], &[Column::Email]];

    type Changes = UserChanges;

    fn id(&self) -> u32 {
        self.id.into_inner()
    }

    fn assign_id(&mut self, id: u32) {
        self.id = UserId::new(id);
    }

    fn value(&self, column: Column) -> Option<Value> {
        match column {
            Column::Id => Some(self.id.into()),
            Column::FullName => Some(self.full_name.as_str().into()),
            Column::Email => Some(self.email.as_str().into()),
            _ => None,
        }
    }

    fn apply(&mut self, changes: UserChanges) {
        self.full_name = changes.full_name;
        self.email = changes.email;
        self.secret_hash = changes.secret_hash;
        self.current_age = changes.current_age;
        self.days_left = changes.days_left;
        self.updated_at = changes.updated_at;
    }
}
