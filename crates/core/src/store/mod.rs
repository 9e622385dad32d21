//! Storage port.
//!
//! The durable store is an external collaborator. This module fixes the
//! contract the repositories rely on:
//!
//! - [`Record`]: what an entity exposes to a table (identity, columns,
//!   uniqueness keys, partial updates)
//! - [`Filter`]: equality conditions over [`Column`]s
//! - [`Table`]: the five primitive operations per entity
//! - [`Store`]: one table per entity
//!
//! Implementations must enforce the [`Record::UNIQUE`] keys themselves and
//! must report [`StorageError::NotFound`] from `find_one` distinctly from a
//! zero row count.

mod error;

use std::fmt;
use std::future::Future;

use nestegg_shared::types::{AccountId, BankId, ExpenseId, InvestmentId, UserId};

use crate::domain::{Account, Bank, Investment, MonthlyExpense, User};

pub use error::StorageError;

/// Entity kinds known to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A user profile.
    User,
    /// A bank.
    Bank,
    /// A bank account.
    Account,
    /// An investment.
    Investment,
    /// A recurring monthly expense.
    MonthlyExpense,
}

impl RecordKind {
    /// Returns the table name for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Bank => "banks",
            Self::Account => "accounts",
            Self::Investment => "investments",
            Self::MonthlyExpense => "monthly_expenses",
        }
    }

    /// Returns a human-readable entity name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Bank => "Bank",
            Self::Account => "Account",
            Self::Investment => "Investment",
            Self::MonthlyExpense => "Monthly expense",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Columns that may appear in filters and uniqueness keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Record identity.
    Id,
    /// Owning user.
    UserId,
    /// Owning bank.
    BankId,
    /// Owning account.
    AccountId,
    /// User full name.
    FullName,
    /// User email.
    Email,
    /// Bank name.
    Name,
    /// Account number.
    Number,
    /// Expense reason.
    Reason,
}

impl Column {
    /// Returns the column name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UserId => "user_id",
            Self::BankId => "bank_id",
            Self::AccountId => "account_id",
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Name => "name",
            Self::Number => "number",
            Self::Reason => "reason",
        }
    }

    /// Returns the field label used in error reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UserId => "user",
            Self::BankId => "bank",
            Self::AccountId => "account",
            Self::FullName => "full name",
            Self::Email => "email",
            Self::Name => "name",
            Self::Number => "number",
            Self::Reason => "reason",
        }
    }
}

/// A column value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A raw identity.
    Id(u32),
    /// A text value, compared exactly.
    Text(String),
}

impl From<u32> for Value {
    fn from(id: u32) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

macro_rules! id_value {
    ($($id:ty),*) => {
        $(
            impl From<$id> for Value {
                fn from(id: $id) -> Self {
                    Self::Id(id.into_inner())
                }
            }
        )*
    };
}

id_value!(UserId, BankId, AccountId, InvestmentId, ExpenseId);

/// Conjunction of equality conditions. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(Column, Value)>,
}

impl Filter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter on record identity.
    #[must_use]
    pub fn by_id(id: impl Into<Value>) -> Self {
        Self::new().where_eq(Column::Id, id)
    }

    /// Adds an equality condition.
    #[must_use]
    pub fn where_eq(mut self, column: Column, value: impl Into<Value>) -> Self {
        self.conditions.push((column, value.into()));
        self
    }

    /// Returns the conditions.
    #[must_use]
    pub fn conditions(&self) -> &[(Column, Value)] {
        &self.conditions
    }

    /// Returns true if every condition holds for `record`.
    #[must_use]
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.conditions
            .iter()
            .all(|(column, value)| record.value(*column).as_ref() == Some(value))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return f.write_str("*");
        }
        for (i, (column, value)) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            match value {
                Value::Id(id) => write!(f, "{} = {id}", column.as_str())?,
                Value::Text(text) => write!(f, "{} = {text:?}", column.as_str())?,
            }
        }
        Ok(())
    }
}

/// An entity as seen by a table.
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity kind.
    const KIND: RecordKind;

    /// Uniqueness keys. A key with several columns is a composite key;
    /// violations are reported against its last column.
    const UNIQUE: &'static [&'static [Column]];

    /// Field set written by [`Table::update_fields`].
    type Changes: Clone + Send + Sync + 'static;

    /// Raw identity, `0` before insert.
    fn id(&self) -> u32;

    /// Stores the identity assigned on insert.
    fn assign_id(&mut self, id: u32);

    /// Value of `column`, or `None` if the entity has no such column.
    fn value(&self, column: Column) -> Option<Value>;

    /// Applies a partial update.
    fn apply(&mut self, changes: Self::Changes);
}

/// Storage operations for one entity type.
pub trait Table<R: Record>: Send + Sync {
    /// Inserts a record and returns its assigned identity.
    fn insert(&self, record: R) -> impl Future<Output = Result<u32, StorageError>> + Send;

    /// Returns the first record matching `filter`, or `StorageError::NotFound`.
    fn find_one(&self, filter: &Filter) -> impl Future<Output = Result<R, StorageError>> + Send;

    /// Returns at most `limit` matching records in identity order.
    fn find_many(
        &self,
        filter: &Filter,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<R>, StorageError>> + Send;

    /// Applies `changes` to the record with identity `id`; returns rows affected.
    fn update_fields(
        &self,
        id: u32,
        changes: R::Changes,
    ) -> impl Future<Output = Result<u64, StorageError>> + Send;

    /// Deletes every record matching `filter`; returns rows affected.
    fn delete(&self, filter: &Filter) -> impl Future<Output = Result<u64, StorageError>> + Send;
}

/// A storage collaborator holding one table per entity.
pub trait Store: Send + Sync + 'static {
    /// User table.
    type Users: Table<User>;
    /// Bank table.
    type Banks: Table<Bank>;
    /// Account table.
    type Accounts: Table<Account>;
    /// Investment table.
    type Investments: Table<Investment>;
    /// Monthly expense table.
    type Expenses: Table<MonthlyExpense>;

    /// Returns the user table.
    fn users(&self) -> &Self::Users;
    /// Returns the bank table.
    fn banks(&self) -> &Self::Banks;
    /// Returns the account table.
    fn accounts(&self) -> &Self::Accounts;
    /// Returns the investment table.
    fn investments(&self) -> &Self::Investments;
    /// Returns the monthly expense table.
    fn expenses(&self) -> &Self::Expenses;
}
