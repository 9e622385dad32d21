//! In-memory implementation of the storage port.
//!
//! Each table keeps its rows in a `BTreeMap` keyed by identity behind a
//! `tokio::sync::RwLock`. Uniqueness checks and the write they guard happen
//! under the same write lock, so concurrent inserts cannot both claim a key.

use std::collections::BTreeMap;

use nestegg_core::domain::{Account, Bank, Investment, MonthlyExpense, User};
use nestegg_core::store::{Filter, Record, StorageError, Store, Table};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug)]
struct Rows<R> {
    next_id: u32,
    rows: BTreeMap<u32, R>,
}

impl<R: Record> Rows<R> {
    /// Returns the label of the first uniqueness key `candidate` would break.
    fn conflict(&self, candidate: &R, skip: Option<u32>) -> Option<&'static str> {
        R::UNIQUE.iter().find_map(|key| {
            let values: Option<Vec<_>> = key.iter().map(|column| candidate.value(*column)).collect();
            let values = values?;

            let taken = self
                .rows
                .iter()
                .filter(|(id, _)| Some(**id) != skip)
                .any(|(_, row)| {
                    key.iter()
                        .zip(&values)
                        .all(|(column, value)| row.value(*column).as_ref() == Some(value))
                });

            taken.then(|| key.last().map_or("id", |column| column.label()))
        })
    }
}

/// One in-memory table.
#[derive(Debug)]
pub struct MemoryTable<R> {
    inner: RwLock<Rows<R>>,
}

impl<R: Record> Default for MemoryTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> MemoryTable<R> {
    /// Creates an empty table. Identities start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Returns the number of stored rows.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    /// Returns true if the table holds no rows.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.rows.is_empty()
    }
}

impl<R: Record> Table<R> for MemoryTable<R> {
    async fn insert(&self, mut record: R) -> Result<u32, StorageError> {
        let mut guard = self.inner.write().await;

        if let Some(field) = guard.conflict(&record, None) {
            debug!(table = R::KIND.as_str(), field, "insert rejected by unique key");
            return Err(StorageError::UniqueViolation {
                field: field.to_string(),
            });
        }

        let id = guard.next_id;
        guard.next_id = id
            .checked_add(1)
            .ok_or_else(|| StorageError::Backend(format!("{} identity space exhausted", R::KIND.as_str())))?;

        record.assign_id(id);
        guard.rows.insert(id, record);

        debug!(table = R::KIND.as_str(), id, "inserted record");
        Ok(id)
    }

    async fn find_one(&self, filter: &Filter) -> Result<R, StorageError> {
        let guard = self.inner.read().await;
        let found = guard.rows.values().find(|row| filter.matches(*row)).cloned();

        debug!(table = R::KIND.as_str(), %filter, found = found.is_some(), "find one");
        found.ok_or(StorageError::NotFound)
    }

    async fn find_many(&self, filter: &Filter, limit: usize) -> Result<Vec<R>, StorageError> {
        let guard = self.inner.read().await;
        let rows: Vec<R> = guard
            .rows
            .values()
            .filter(|row| filter.matches(*row))
            .take(limit)
            .cloned()
            .collect();

        debug!(table = R::KIND.as_str(), %filter, limit, returned = rows.len(), "find many");
        Ok(rows)
    }

    async fn update_fields(&self, id: u32, changes: R::Changes) -> Result<u64, StorageError> {
        let mut guard = self.inner.write().await;

        let Some(current) = guard.rows.get(&id) else {
            debug!(table = R::KIND.as_str(), id, "update matched no row");
            return Ok(0);
        };

        let mut updated = current.clone();
        updated.apply(changes);

        if let Some(field) = guard.conflict(&updated, Some(id)) {
            debug!(table = R::KIND.as_str(), id, field, "update rejected by unique key");
            return Err(StorageError::UniqueViolation {
                field: field.to_string(),
            });
        }

        guard.rows.insert(id, updated);
        debug!(table = R::KIND.as_str(), id, "updated record");
        Ok(1)
    }

    async fn delete(&self, filter: &Filter) -> Result<u64, StorageError> {
        let mut guard = self.inner.write().await;
        let before = guard.rows.len();
        guard.rows.retain(|_, row| !filter.matches::<R>(row));
        let removed = before - guard.rows.len();

        debug!(table = R::KIND.as_str(), %filter, removed, "deleted records");
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}

/// In-memory store for development and testing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: MemoryTable<User>,
    banks: MemoryTable<Bank>,
    accounts: MemoryTable<Account>,
    investments: MemoryTable<Investment>,
    expenses: MemoryTable<MonthlyExpense>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    type Users = MemoryTable<User>;
    type Banks = MemoryTable<Bank>;
    type Accounts = MemoryTable<Account>;
    type Investments = MemoryTable<Investment>;
    type Expenses = MemoryTable<MonthlyExpense>;

    fn users(&self) -> &Self::Users {
        &self.users
    }

    fn banks(&self) -> &Self::Banks {
        &self.banks
    }

    fn accounts(&self) -> &Self::Accounts {
        &self.accounts
    }

    fn investments(&self) -> &Self::Investments {
        &self.investments
    }

    fn expenses(&self) -> &Self::Expenses {
        &self.expenses
    }
}
