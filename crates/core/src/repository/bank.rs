//! Bank repository.

use std::sync::Arc;

use nestegg_shared::types::{BankId, FIND_ALL_LIMIT, UserId};

use super::error::{RepositoryError, RepositoryResult};
use super::relations::{self, Resolver};
use super::{Listing, RepositoryContext};
use crate::domain::{Account, Bank, BankInput, BankView, Touched, User};
use crate::store::{Column, Filter, Record, Store, Table};
use crate::validation::Operation;

/// Reads and writes banks.
pub struct BankRepository<S: Store> {
    ctx: Arc<RepositoryContext<S>>,
}

impl<S: Store> BankRepository<S> {
    /// Creates a repository over `ctx`.
    #[must_use]
    pub fn new(ctx: Arc<RepositoryContext<S>>) -> Self {
        Self { ctx }
    }

    /// Registers a bank for a user.
    ///
    /// # Errors
    ///
    /// - `Validation` if a rule fails or the user does not exist
    /// - `ConstraintViolation` on `name` if the bank is already registered
    pub async fn create(&self, input: BankInput) -> RepositoryResult<BankView> {
        let now = self.ctx.now();
        self.ctx.validate(&input, Operation::Create, now)?;

        let store = self.ctx.store();
        let user: User = relations::require(store.users(), input.user_id, "user").await?;

        let by_name = Filter::new().where_eq(Column::Name, input.name.as_str());
        relations::ensure_unique::<Bank, _>(store.banks(), &by_name, Column::Name, None).await?;

        let mut bank = Bank::prepare(&input, now);
        let id = store
            .banks()
            .insert(bank.clone())
            .await
            .map_err(|err| RepositoryError::from_storage(err, Bank::KIND))?;
        bank.id = BankId::new(id);

        Ok(BankView {
            bank,
            user: Some(user),
        })
    }

    /// Lists up to [`FIND_ALL_LIMIT`] banks in id order.
    pub async fn find_all(&self) -> RepositoryResult<Listing<BankView>> {
        self.list(&Filter::new()).await
    }

    /// Lists the banks registered by `owner`.
    pub async fn list_for_owner(&self, owner: UserId) -> RepositoryResult<Listing<BankView>> {
        self.list(&Filter::new().where_eq(Column::UserId, owner)).await
    }

    /// Loads one bank.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no bank has this id.
    pub async fn find_by_id(&self, id: BankId) -> RepositoryResult<BankView> {
        let bank = relations::fetch(self.ctx.store().banks(), &Filter::by_id(id)).await?;
        resolve(&mut Resolver::new(self.ctx.store()), bank).await
    }

    /// Re-validates `input` and stamps bank `id` as modified.
    ///
    /// Registered fields are fixed after creation.
    ///
    /// # Errors
    ///
    /// - `Validation` if a rule fails
    /// - `NotFound` unless bank `id` belongs to `input.user_id`
    pub async fn update(&self, id: BankId, input: BankInput) -> RepositoryResult<BankView> {
        let now = self.ctx.now();
        self.ctx.validate(&input, Operation::Update, now)?;

        let banks = self.ctx.store().banks();
        let scope = relations::scoped(id, input.user_id);
        let _: Bank = relations::fetch(banks, &scope).await?;
        relations::update_one::<Bank, _>(banks, id.into_inner(), Touched { updated_at: now }).await?;

        self.find_by_id(id).await
    }

    /// Deletes bank `id` owned by `owner`.
    ///
    /// # Errors
    ///
    /// - `NotFound` unless bank `id` belongs to `owner`
    /// - `ConstraintViolation` on `bank` while any account is held at it
    pub async fn delete(&self, id: BankId, owner: UserId) -> RepositoryResult<u64> {
        let store = self.ctx.store();
        let scope = relations::scoped(id, owner);
        let _: Bank = relations::fetch(store.banks(), &scope).await?;

        let held_at = Filter::new().where_eq(Column::BankId, id);
        let accounts: Vec<Account> = relations::fetch_many(store.accounts(), &held_at, 1).await?;
        if !accounts.is_empty() {
            return Err(RepositoryError::constraint(Column::BankId.label()));
        }

        relations::delete_matching::<Bank, _>(store.banks(), &scope).await
    }

    async fn list(&self, filter: &Filter) -> RepositoryResult<Listing<BankView>> {
        let store = self.ctx.store();
        let banks: Vec<Bank> = relations::fetch_many(store.banks(), filter, FIND_ALL_LIMIT).await?;

        let mut resolver = Resolver::new(store);
        let mut views = Vec::with_capacity(banks.len());
        for bank in banks {
            views.push(resolve(&mut resolver, bank).await?);
        }
        Ok(views.into_iter())
    }
}

async fn resolve<S: Store>(resolver: &mut Resolver<'_, S>, bank: Bank) -> RepositoryResult<BankView> {
    let user = resolver.user(bank.user_id).await?;
    Ok(BankView { bank, user })
}
