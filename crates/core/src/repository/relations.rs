//! Lookup helpers shared by the repositories.

use std::collections::HashMap;

use nestegg_shared::types::{AccountId, BankId, UserId};

use super::error::{RepositoryError, RepositoryResult};
use crate::domain::{Account, Bank, User};
use crate::store::{Column, Filter, Record, StorageError, Store, Table, Value};
use crate::validation::ValidationError;

/// Limit for internal sweeps that must see every matching row.
pub(crate) const UNBOUNDED: usize = usize::MAX;

/// Filter matching one record owned by `owner`.
pub(crate) fn scoped(id: impl Into<Value>, owner: UserId) -> Filter {
    Filter::by_id(id).where_eq(Column::UserId, owner)
}

/// Returns the first match, or `None` when nothing matches.
pub(crate) async fn lookup<R, T>(table: &T, filter: &Filter) -> RepositoryResult<Option<R>>
where
    R: Record,
    T: Table<R>,
{
    match table.find_one(filter).await {
        Ok(record) => Ok(Some(record)),
        Err(StorageError::NotFound) => Ok(None),
        Err(err) => Err(RepositoryError::from_storage(err, R::KIND)),
    }
}

/// Returns the first match, or `NotFound` for the record's kind.
pub(crate) async fn fetch<R, T>(table: &T, filter: &Filter) -> RepositoryResult<R>
where
    R: Record,
    T: Table<R>,
{
    table
        .find_one(filter)
        .await
        .map_err(|err| RepositoryError::from_storage(err, R::KIND))
}

/// Returns every match up to `limit`.
pub(crate) async fn fetch_many<R, T>(table: &T, filter: &Filter, limit: usize) -> RepositoryResult<Vec<R>>
where
    R: Record,
    T: Table<R>,
{
    table
        .find_many(filter, limit)
        .await
        .map_err(|err| RepositoryError::from_storage(err, R::KIND))
}

/// Loads a record an input refers to. A dangling reference is a validation
/// failure on `field`.
pub(crate) async fn require<R, T>(
    table: &T,
    id: impl Into<Value>,
    field: &'static str,
) -> RepositoryResult<R>
where
    R: Record,
    T: Table<R>,
{
    lookup(table, &Filter::by_id(id))
        .await?
        .ok_or_else(|| ValidationError::new(field, "does not exist").into())
}

/// Fails with `ConstraintViolation` on `column` if a record other than
/// `exclude` matches `filter`.
pub(crate) async fn ensure_unique<R, T>(
    table: &T,
    filter: &Filter,
    column: Column,
    exclude: Option<u32>,
) -> RepositoryResult<()>
where
    R: Record,
    T: Table<R>,
{
    let matches: Vec<R> = fetch_many(table, filter, 2).await?;
    let taken = matches.iter().any(|record| Some(record.id()) != exclude);

    if taken {
        return Err(RepositoryError::constraint(column.label()));
    }
    Ok(())
}

/// Runs `delete` and maps an empty match to `NotFound`.
pub(crate) async fn delete_matching<R, T>(table: &T, filter: &Filter) -> RepositoryResult<u64>
where
    R: Record,
    T: Table<R>,
{
    let rows = table
        .delete(filter)
        .await
        .map_err(|err| RepositoryError::from_storage(err, R::KIND))?;

    if rows == 0 {
        return Err(RepositoryError::not_found(R::KIND));
    }
    Ok(rows)
}

/// Deletes every match; an empty match is not an error.
pub(crate) async fn sweep<R, T>(table: &T, filter: &Filter) -> RepositoryResult<u64>
where
    R: Record,
    T: Table<R>,
{
    table
        .delete(filter)
        .await
        .map_err(|err| RepositoryError::from_storage(err, R::KIND))
}

/// Applies `changes` to record `id` and maps zero rows to `NotFound`.
pub(crate) async fn update_one<R, T>(table: &T, id: u32, changes: R::Changes) -> RepositoryResult<()>
where
    R: Record,
    T: Table<R>,
{
    let rows = table
        .update_fields(id, changes)
        .await
        .map_err(|err| RepositoryError::from_storage(err, R::KIND))?;

    if rows == 0 {
        return Err(RepositoryError::not_found(R::KIND));
    }
    Ok(())
}

/// Resolves owning relations, loading each related record once per call.
pub(crate) struct Resolver<'a, S: Store> {
    store: &'a S,
    users: HashMap<UserId, Option<User>>,
    banks: HashMap<BankId, Option<Bank>>,
    accounts: HashMap<AccountId, Option<Account>>,
}

impl<'a, S: Store> Resolver<'a, S> {
    pub(crate) fn new(store: &'a S) -> Self {
        Self {
            store,
            users: HashMap::new(),
            banks: HashMap::new(),
            accounts: HashMap::new(),
        }
    }

    pub(crate) async fn user(&mut self, id: UserId) -> RepositoryResult<Option<User>> {
        if let Some(hit) = self.users.get(&id) {
            return Ok(hit.clone());
        }
        let found = lookup(self.store.users(), &Filter::by_id(id)).await?;
        self.users.insert(id, found.clone());
        Ok(found)
    }

    pub(crate) async fn bank(&mut self, id: BankId) -> RepositoryResult<Option<Bank>> {
        if let Some(hit) = self.banks.get(&id) {
            return Ok(hit.clone());
        }
        let found = lookup(self.store.banks(), &Filter::by_id(id)).await?;
        self.banks.insert(id, found.clone());
        Ok(found)
    }

    pub(crate) async fn account(&mut self, id: AccountId) -> RepositoryResult<Option<Account>> {
        if let Some(hit) = self.accounts.get(&id) {
            return Ok(hit.clone());
        }
        let found = lookup(self.store.accounts(), &Filter::by_id(id)).await?;
        self.accounts.insert(id, found.clone());
        Ok(found)
    }
}
