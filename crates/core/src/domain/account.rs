//! Bank account entity.

use chrono::{DateTime, Utc};
use nestegg_shared::types::{AccountId, BankId, UserId};
use serde::{Deserialize, Serialize};

use crate::store::{Column, Record, RecordKind, Value};

/// A stored bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Identity assigned by storage.
    pub id: AccountId,
    /// Owning user.
    pub user_id: UserId,
    /// Bank holding the account.
    pub bank_id: BankId,
    /// Account number (unique).
    pub number: String,
    /// Balance. Negative for an overdraft.
    pub balance: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied account fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInput {
    /// Owning user.
    pub user_id: UserId,
    /// Bank holding the account.
    pub bank_id: BankId,
    /// Account number.
    pub number: String,
    /// Balance.
    pub balance: i64,
}

impl AccountInput {
    /// Trims surrounding whitespace from the account number.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.number = self.number.trim().to_string();
        self
    }
}

/// Fields written when an account is updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountChanges {
    /// New account number.
    pub number: String,
    /// New balance.
    pub balance: i64,
    /// Modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Builds a new account record stamped at `now`.
    #[must_use]
    pub fn prepare(input: &AccountInput, now: DateTime<Utc>) -> Self {
        Self {
            id: AccountId::UNASSIGNED,
            user_id: input.user_id,
            bank_id: input.bank_id,
            number: input.number.clone(),
            balance: input.balance,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the snapshot after applying the mutable fields of `input`.
    ///
    /// Ownership (user and bank) never changes after creation.
    #[must_use]
    pub fn revise(&self, input: &AccountInput, now: DateTime<Utc>) -> Self {
        Self {
            number: input.number.clone(),
            balance: input.balance,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Returns the field set that turns the stored row into this snapshot.
    #[must_use]
    pub fn changes(&self) -> AccountChanges {
        AccountChanges {
            number: self.number.clone(),
            balance: self.balance,
            updated_at: self.updated_at,
        }
    }

    /// Returns true if the account is overdrawn.
    #[must_use]
    pub const fn is_overdrawn(&self) -> bool {
        self.balance < 0
    }
}

impl Record for Account {
    const KIND: RecordKind = RecordKind::Account;
    const UNIQUE: &'static [&'static [Column]] = &[&[Column::Number]];

    type Changes = AccountChanges;

    fn id(&self) -> u32 {
        self.id.into_inner()
    }

    fn assign_id(&mut self, id: u32) {
        self.id = AccountId::new(id);
    }

    fn value(&self, column: Column) -> Option<Value> {
        match column {
            Column::Id => Some(self.id.into()),
            Column::UserId => Some(self.user_id.into()),
            Column::BankId => Some(self.bank_id.into()),
            Column::Number => Some(self.number.as_str().into()),
            _ => None,
        }
    }

    fn apply(&mut self, changes: AccountChanges) {
        self.number = changes.number;
        self.balance = changes.balance;
        self.updated_at = changes.updated_at;
    }
}
