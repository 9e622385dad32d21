//! User repository.

use std::sync::Arc;

use nestegg_shared::types::{FIND_ALL_LIMIT, UserId};

use super::error::{RepositoryError, RepositoryResult};
use super::relations::{self, UNBOUNDED};
use super::{Listing, RepositoryContext};
use crate::domain::{Account, Bank, Investment, MonthlyExpense, User, UserInput};
use crate::store::{Column, Filter, Record, Store, Table};
use crate::validation::Operation;

/// Reads and writes user profiles.
pub struct UserRepository<S: Store> {
    ctx: Arc<RepositoryContext<S>>,
}

impl<S: Store> UserRepository<S> {
    /// Creates a repository over `ctx`.
    #[must_use]
    pub fn new(ctx: Arc<RepositoryContext<S>>) -> Self {
        Self { ctx }
    }

    /// Registers a user.
    ///
    /// The secret is hashed and age and days-left are derived in the same
    /// step, against a single clock reading.
    ///
    /// # Errors
    ///
    /// - `Validation` if a rule fails
    /// - `ConstraintViolation` on `full name` or `email` if already taken
    /// - `Credential` if hashing fails
    pub async fn create(&self, input: UserInput) -> RepositoryResult<User> {
        let input = input.normalized();
        let now = self.ctx.now();
        self.ctx.validate(&input, Operation::Create, now)?;

        let users = self.ctx.store().users();
        self.ensure_available(&input, None).await?;

        let mut user = User::prepare(&input, self.ctx.hasher(), now)?;
        let id = users
            .insert(user.clone())
            .await
            .map_err(|err| RepositoryError::from_storage(err, User::KIND))?;
        user.id = UserId::new(id);

        Ok(user)
    }

    /// Lists up to [`FIND_ALL_LIMIT`] users in id order.
    pub async fn find_all(&self) -> RepositoryResult<Listing<User>> {
        let users: Vec<User> =
            relations::fetch_many(self.ctx.store().users(), &Filter::new(), FIND_ALL_LIMIT).await?;
        Ok(users.into_iter())
    }

    /// Loads one user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no user has this id.
    pub async fn find_by_id(&self, id: UserId) -> RepositoryResult<User> {
        relations::fetch(self.ctx.store().users(), &Filter::by_id(id)).await
    }

    /// Loads a user by email.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no user has this email.
    pub async fn find_by_email(&self, email: &str) -> RepositoryResult<User> {
        let filter = Filter::new().where_eq(Column::Email, email.trim());
        relations::fetch(self.ctx.store().users(), &filter).await
    }

    /// Replaces the secret, full name and email of user `id`.
    ///
    /// The input is validated in full, then validated again with the stored
    /// birth date, income and retirement age, since those keep their stored
    /// values. Age and days-left are recomputed from them, so a user whose
    /// age has passed the stored retirement age can no longer be updated.
    ///
    /// # Errors
    ///
    /// - `Validation` if a rule fails
    /// - `NotFound` if no user has this id
    /// - `ConstraintViolation` if the new full name or email belongs to another user
    pub async fn update(&self, id: UserId, input: UserInput) -> RepositoryResult<User> {
        let input = input.normalized();
        let now = self.ctx.now();
        self.ctx.validate(&input, Operation::Update, now)?;

        let users = self.ctx.store().users();
        let existing: User = relations::fetch(users, &Filter::by_id(id)).await?;
        let input = existing.carry_over(input);
        self.ctx.validate(&input, Operation::Update, now)?;
        self.ensure_available(&input, Some(id)).await?;

        let revised = existing.revise(&input, self.ctx.hasher(), now)?;
        relations::update_one::<User, _>(users, id.into_inner(), revised.changes()).await?;

        relations::fetch(users, &Filter::by_id(id)).await
    }

    /// Deletes user `id` together with everything the user owns.
    ///
    /// Investments, expenses, accounts and banks are swept before the user
    /// row. Returns the number of user rows removed.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no user has this id
    /// - `ConstraintViolation` on `bank` if another user's account is held
    ///   at one of this user's banks; nothing is deleted in that case
    pub async fn delete(&self, id: UserId) -> RepositoryResult<u64> {
        let store = self.ctx.store();
        let _: User = relations::fetch(store.users(), &Filter::by_id(id)).await?;

        let owned = Filter::new().where_eq(Column::UserId, id);
        let banks: Vec<Bank> = relations::fetch_many(store.banks(), &owned, UNBOUNDED).await?;
        for bank in &banks {
            let held_at = Filter::new().where_eq(Column::BankId, bank.id);
            let accounts: Vec<Account> =
                relations::fetch_many(store.accounts(), &held_at, UNBOUNDED).await?;
            if accounts.iter().any(|account| account.user_id != id) {
                return Err(RepositoryError::constraint(Column::BankId.label()));
            }
        }

        relations::sweep::<Investment, _>(store.investments(), &owned).await?;
        relations::sweep::<MonthlyExpense, _>(store.expenses(), &owned).await?;
        relations::sweep::<Account, _>(store.accounts(), &owned).await?;
        relations::sweep::<Bank, _>(store.banks(), &owned).await?;

        relations::delete_matching::<User, _>(store.users(), &Filter::by_id(id)).await
    }

    /// Checks an email and secret against the stored digest.
    ///
    /// # Errors
    ///
    /// - `Validation` if the email or secret is missing or malformed
    /// - `Credential(Mismatch)` for an unknown email or a wrong secret
    pub async fn authenticate(&self, input: UserInput) -> RepositoryResult<User> {
        let input = input.normalized();
        let now = self.ctx.now();
        self.ctx.validate(&input, Operation::Login, now)?;

        let filter = Filter::new().where_eq(Column::Email, input.email.as_str());
        let Some(user) = relations::lookup::<User, _>(self.ctx.store().users(), &filter).await?
        else {
            return Err(self.ctx.hasher().reject(&input.secret).into());
        };

        self.ctx.hasher().verify(&user.secret_hash, &input.secret)?;
        Ok(user)
    }

    async fn ensure_available(
        &self,
        input: &UserInput,
        exclude: Option<UserId>,
    ) -> RepositoryResult<()> {
        let users = self.ctx.store().users();
        let exclude = exclude.map(UserId::into_inner);

        let by_name = Filter::new().where_eq(Column::FullName, input.full_name.as_str());
        relations::ensure_unique::<User, _>(users, &by_name, Column::FullName, exclude).await?;

        let by_email = Filter::new().where_eq(Column::Email, input.email.as_str());
        relations::ensure_unique::<User, _>(users, &by_email, Column::Email, exclude).await
    }
}
