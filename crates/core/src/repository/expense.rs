//! Monthly expense repository.

use std::sync::Arc;

use nestegg_shared::types::{ExpenseId, FIND_ALL_LIMIT, UserId};

use super::error::{RepositoryError, RepositoryResult};
use super::relations::{self, Resolver};
use super::{Listing, RepositoryContext};
use crate::domain::{ExpenseInput, ExpenseView, MonthlyExpense, Touched, User};
use crate::store::{Column, Filter, Record, Store, Table};
use crate::validation::Operation;

/// Reads and writes recurring monthly expenses.
pub struct ExpenseRepository<S: Store> {
    ctx: Arc<RepositoryContext<S>>,
}

impl<S: Store> ExpenseRepository<S> {
    /// Creates a repository over `ctx`.
    #[must_use]
    pub fn new(ctx: Arc<RepositoryContext<S>>) -> Self {
        Self { ctx }
    }

    /// Records a monthly expense.
    ///
    /// # Errors
    ///
    /// - `Validation` if a rule fails or the user does not exist
    /// - `ConstraintViolation` on `reason` if the user already has an expense
    ///   with that reason
    pub async fn create(&self, input: ExpenseInput) -> RepositoryResult<ExpenseView> {
        let input = input.normalized();
        let now = self.ctx.now();
        self.ctx.validate(&input, Operation::Create, now)?;

        let store = self.ctx.store();
        let user: User = relations::require(store.users(), input.user_id, "user").await?;

        let by_reason = Filter::new()
            .where_eq(Column::UserId, input.user_id)
            .where_eq(Column::Reason, input.reason.as_str());
        relations::ensure_unique::<MonthlyExpense, _>(store.expenses(), &by_reason, Column::Reason, None)
            .await?;

        let mut expense = MonthlyExpense::prepare(&input, now);
        let id = store
            .expenses()
            .insert(expense.clone())
            .await
            .map_err(|err| RepositoryError::from_storage(err, MonthlyExpense::KIND))?;
        expense.id = ExpenseId::new(id);

        Ok(ExpenseView {
            expense,
            user: Some(user),
        })
    }

    /// Lists up to [`FIND_ALL_LIMIT`] expenses in id order.
    pub async fn find_all(&self) -> RepositoryResult<Listing<ExpenseView>> {
        self.list(&Filter::new()).await
    }

    /// Lists the expenses of `owner`.
    pub async fn list_for_owner(&self, owner: UserId) -> RepositoryResult<Listing<ExpenseView>> {
        self.list(&Filter::new().where_eq(Column::UserId, owner)).await
    }

    /// Loads one expense.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no expense has this id.
    pub async fn find_by_id(&self, id: ExpenseId) -> RepositoryResult<ExpenseView> {
        let expense = relations::fetch(self.ctx.store().expenses(), &Filter::by_id(id)).await?;
        resolve(&mut Resolver::new(self.ctx.store()), expense).await
    }

    /// Re-validates `input` and stamps expense `id` as modified.
    ///
    /// # Errors
    ///
    /// - `Validation` if a rule fails
    /// - `NotFound` unless expense `id` belongs to `input.user_id`
    pub async fn update(&self, id: ExpenseId, input: ExpenseInput) -> RepositoryResult<ExpenseView> {
        let input = input.normalized();
        let now = self.ctx.now();
        self.ctx.validate(&input, Operation::Update, now)?;

        let expenses = self.ctx.store().expenses();
        let _: MonthlyExpense = relations::fetch(expenses, &relations::scoped(id, input.user_id)).await?;
        relations::update_one::<MonthlyExpense, _>(expenses, id.into_inner(), Touched { updated_at: now })
            .await?;

        self.find_by_id(id).await
    }

    /// Deletes expense `id` owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` unless expense `id` belongs to `owner`.
    pub async fn delete(&self, id: ExpenseId, owner: UserId) -> RepositoryResult<u64> {
        let scope = relations::scoped(id, owner);
        relations::delete_matching::<MonthlyExpense, _>(self.ctx.store().expenses(), &scope).await
    }

    async fn list(&self, filter: &Filter) -> RepositoryResult<Listing<ExpenseView>> {
        let store = self.ctx.store();
        let expenses: Vec<MonthlyExpense> =
            relations::fetch_many(store.expenses(), filter, FIND_ALL_LIMIT).await?;

        let mut resolver = Resolver::new(store);
        let mut views = Vec::with_capacity(expenses.len());
        for expense in expenses {
            views.push(resolve(&mut resolver, expense).await?);
        }
        Ok(views.into_iter())
    }
}

async fn resolve<S: Store>(
    resolver: &mut Resolver<'_, S>,
    expense: MonthlyExpense,
) -> RepositoryResult<ExpenseView> {
    let user = resolver.user(expense.user_id).await?;
    Ok(ExpenseView { expense, user })
}
