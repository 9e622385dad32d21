//! Account repository.

use std::sync::Arc;

use nestegg_shared::types::{AccountId, FIND_ALL_LIMIT, UserId};

use super::error::{RepositoryError, RepositoryResult};
use super::relations::{self, Resolver};
use super::{Listing, RepositoryContext};
use crate::domain::{Account, AccountInput, AccountView, Bank, Investment, User};
use crate::store::{Column, Filter, Record, Store, Table};
use crate::validation::Operation;

/// Reads and writes bank accounts.
pub struct AccountRepository<S: Store> {
    ctx: Arc<RepositoryContext<S>>,
}

impl<S: Store> AccountRepository<S> {
    /// Creates a repository over `ctx`.
    #[must_use]
    pub fn new(ctx: Arc<RepositoryContext<S>>) -> Self {
        Self { ctx }
    }

    /// Opens an account for a user at a bank.
    ///
    /// # Errors
    ///
    /// - `Validation` if a rule fails or the user or bank does not exist
    /// - `ConstraintViolation` on `number` if the number is already in use
    pub async fn create(&self, input: AccountInput) -> RepositoryResult<AccountView> {
        let input = input.normalized();
        let now = self.ctx.now();
        self.ctx.validate(&input, Operation::Create, now)?;

        let store = self.ctx.store();
        let user: User = relations::require(store.users(), input.user_id, "user").await?;
        let bank: Bank = relations::require(store.banks(), input.bank_id, "bank").await?;
        self.ensure_number_free(&input.number, None).await?;

        let mut account = Account::prepare(&input, now);
        let id = store
            .accounts()
            .insert(account.clone())
            .await
            .map_err(|err| RepositoryError::from_storage(err, Account::KIND))?;
        account.id = AccountId::new(id);

        Ok(AccountView {
            account,
            user: Some(user),
            bank: Some(bank),
        })
    }

    /// Lists up to [`FIND_ALL_LIMIT`] accounts in id order.
    pub async fn find_all(&self) -> RepositoryResult<Listing<AccountView>> {
        self.list(&Filter::new()).await
    }

    /// Lists the accounts owned by `owner`.
    pub async fn list_for_owner(&self, owner: UserId) -> RepositoryResult<Listing<AccountView>> {
        self.list(&Filter::new().where_eq(Column::UserId, owner)).await
    }

    /// Loads one account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has this id.
    pub async fn find_by_id(&self, id: AccountId) -> RepositoryResult<AccountView> {
        let account = relations::fetch(self.ctx.store().accounts(), &Filter::by_id(id)).await?;
        resolve(&mut Resolver::new(self.ctx.store()), account).await
    }

    /// Changes the number and balance of account `id`.
    ///
    /// The account is matched by id and owner together; user and bank never
    /// change.
    ///
    /// # Errors
    ///
    /// - `Validation` if a rule fails
    /// - `NotFound` unless account `id` belongs to `input.user_id`
    /// - `ConstraintViolation` on `number` if another account uses the new number
    pub async fn update(&self, id: AccountId, input: AccountInput) -> RepositoryResult<AccountView> {
        let input = input.normalized();
        let now = self.ctx.now();
        self.ctx.validate(&input, Operation::Update, now)?;

        let accounts = self.ctx.store().accounts();
        let existing: Account = relations::fetch(accounts, &relations::scoped(id, input.user_id)).await?;
        self.ensure_number_free(&input.number, Some(id)).await?;

        let revised = existing.revise(&input, now);
        relations::update_one::<Account, _>(accounts, id.into_inner(), revised.changes()).await?;

        self.find_by_id(id).await
    }

    /// Deletes account `id` owned by `owner`, with its investments.
    ///
    /// Returns the number of account rows removed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` unless account `id` belongs to `owner`.
    pub async fn delete(&self, id: AccountId, owner: UserId) -> RepositoryResult<u64> {
        let store = self.ctx.store();
        let scope = relations::scoped(id, owner);
        let _: Account = relations::fetch(store.accounts(), &scope).await?;

        let held = Filter::new().where_eq(Column::AccountId, id);
        relations::sweep::<Investment, _>(store.investments(), &held).await?;

        relations::delete_matching::<Account, _>(store.accounts(), &scope).await
    }

    async fn ensure_number_free(&self, number: &str, exclude: Option<AccountId>) -> RepositoryResult<()> {
        let by_number = Filter::new().where_eq(Column::Number, number);
        relations::ensure_unique::<Account, _>(
            self.ctx.store().accounts(),
            &by_number,
            Column::Number,
            exclude.map(AccountId::into_inner),
        )
        .await
    }

    async fn list(&self, filter: &Filter) -> RepositoryResult<Listing<AccountView>> {
        let store = self.ctx.store();
        let accounts: Vec<Account> =
            relations::fetch_many(store.accounts(), filter, FIND_ALL_LIMIT).await?;

        let mut resolver = Resolver::new(store);
        let mut views = Vec::with_capacity(accounts.len());
        for account in accounts {
            views.push(resolve(&mut resolver, account).await?);
        }
        Ok(views.into_iter())
    }
}

async fn resolve<S: Store>(
    resolver: &mut Resolver<'_, S>,
    account: Account,
) -> RepositoryResult<AccountView> {
    let user = resolver.user(account.user_id).await?;
    let bank = resolver.bank(account.bank_id).await?;
    Ok(AccountView {
        account,
        user,
        bank,
    })
}
