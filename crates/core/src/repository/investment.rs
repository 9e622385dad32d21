//! Investment repository.

use std::sync::Arc;

use nestegg_shared::types::{FIND_ALL_LIMIT, InvestmentId, UserId};
use rust_decimal::Decimal;

use super::error::{RepositoryError, RepositoryResult};
use super::relations::{self, Resolver};
use super::{Listing, RepositoryContext};
use crate::domain::{Account, Bank, Investment, InvestmentInput, InvestmentView, Touched, User};
use crate::projection::{self, MAX_PROJECTION_YEARS};
use crate::store::{Column, Filter, Record, Store, Table};
use crate::validation::{Operation, ValidationError};

/// Reads and writes investments.
pub struct InvestmentRepository<S: Store> {
    ctx: Arc<RepositoryContext<S>>,
}

impl<S: Store> InvestmentRepository<S> {
    /// Creates a repository over `ctx`.
    #[must_use]
    pub fn new(ctx: Arc<RepositoryContext<S>>) -> Self {
        Self { ctx }
    }

    /// Records an investment held against one of the user's accounts.
    ///
    /// # Errors
    ///
    /// - `Validation` if a rule fails, the user or account does not exist, or
    ///   the account belongs to another user
    pub async fn create(&self, input: InvestmentInput) -> RepositoryResult<InvestmentView> {
        let input = input.normalized();
        let now = self.ctx.now();
        self.ctx.validate(&input, Operation::Create, now)?;

        let store = self.ctx.store();
        let user: User = relations::require(store.users(), input.user_id, "user").await?;
        let account: Account =
            relations::require(store.accounts(), input.account_id, "account").await?;
        if account.user_id != input.user_id {
            return Err(ValidationError::new("account", "belongs to another user").into());
        }

        let mut investment = Investment::prepare(&input, now);
        let id = store
            .investments()
            .insert(investment.clone())
            .await
            .map_err(|err| RepositoryError::from_storage(err, Investment::KIND))?;
        investment.id = InvestmentId::new(id);

        Ok(InvestmentView {
            investment,
            user: Some(user),
            account: Some(account),
        })
    }

    /// Lists up to [`FIND_ALL_LIMIT`] investments in id order.
    pub async fn find_all(&self) -> RepositoryResult<Listing<InvestmentView>> {
        self.list(&Filter::new()).await
    }

    /// Lists the investments owned by `owner`.
    pub async fn list_for_owner(&self, owner: UserId) -> RepositoryResult<Listing<InvestmentView>> {
        self.list(&Filter::new().where_eq(Column::UserId, owner)).await
    }

    /// Loads one investment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no investment has this id.
    pub async fn find_by_id(&self, id: InvestmentId) -> RepositoryResult<InvestmentView> {
        let investment = relations::fetch(self.ctx.store().investments(), &Filter::by_id(id)).await?;
        resolve(&mut Resolver::new(self.ctx.store()), investment).await
    }

    /// Re-validates `input` and stamps investment `id` as modified.
    ///
    /// # Errors
    ///
    /// - `Validation` if a rule fails
    /// - `NotFound` unless investment `id` belongs to `input.user_id`
    pub async fn update(
        &self,
        id: InvestmentId,
        input: InvestmentInput,
    ) -> RepositoryResult<InvestmentView> {
        let input = input.normalized();
        let now = self.ctx.now();
        self.ctx.validate(&input, Operation::Update, now)?;

        let investments = self.ctx.store().investments();
        let _: Investment = relations::fetch(investments, &relations::scoped(id, input.user_id)).await?;
        relations::update_one::<Investment, _>(investments, id.into_inner(), Touched { updated_at: now })
            .await?;

        self.find_by_id(id).await
    }

    /// Deletes investment `id` owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` unless investment `id` belongs to `owner`.
    pub async fn delete(&self, id: InvestmentId, owner: UserId) -> RepositoryResult<u64> {
        let scope = relations::scoped(id, owner);
        relations::delete_matching::<Investment, _>(self.ctx.store().investments(), &scope).await
    }

    /// Year-end values of investment `id` over `years` years at the rate its
    /// bank pays for the investment's kind.
    ///
    /// Returns `None` for kinds without a bank rate (stocks, mutual funds).
    ///
    /// # Errors
    ///
    /// - `Validation` on `years` if it exceeds [`MAX_PROJECTION_YEARS`]
    /// - `NotFound` unless investment `id` belongs to `owner` and its
    ///   account and bank still exist
    pub async fn projected_value(
        &self,
        id: InvestmentId,
        owner: UserId,
        years: u32,
    ) -> RepositoryResult<Option<Vec<Decimal>>> {
        if years > MAX_PROJECTION_YEARS {
            return Err(ValidationError::new("years", "too far ahead").into());
        }

        let store = self.ctx.store();
        let investment: Investment =
            relations::fetch(store.investments(), &relations::scoped(id, owner)).await?;
        let account: Account =
            relations::fetch(store.accounts(), &Filter::by_id(investment.account_id)).await?;
        let bank: Bank = relations::fetch(store.banks(), &Filter::by_id(account.bank_id)).await?;

        Ok(bank
            .rate_for(investment.kind)
            .map(|rate| projection::value_trajectory(investment.amount, rate, years)))
    }

    async fn list(&self, filter: &Filter) -> RepositoryResult<Listing<InvestmentView>> {
        let store = self.ctx.store();
        let investments: Vec<Investment> =
            relations::fetch_many(store.investments(), filter, FIND_ALL_LIMIT).await?;

        let mut resolver = Resolver::new(store);
        let mut views = Vec::with_capacity(investments.len());
        for investment in investments {
            views.push(resolve(&mut resolver, investment).await?);
        }
        Ok(views.into_iter())
    }
}

async fn resolve<S: Store>(
    resolver: &mut Resolver<'_, S>,
    investment: Investment,
) -> RepositoryResult<InvestmentView> {
    let user = resolver.user(investment.user_id).await?;
    let account = resolver.account(investment.account_id).await?;
    Ok(InvestmentView {
        investment,
        user,
        account,
    })
}
