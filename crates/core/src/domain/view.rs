//! Entities with their owning relations resolved.
//!
//! Relations are `None` when the referenced record no longer exists in
//! storage. Serialization flattens the entity and nests each relation under
//! its own key.

use serde::Serialize;

use super::{Account, Bank, Investment, MonthlyExpense, User};

/// A bank with its registering user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankView {
    /// The bank.
    #[serde(flatten)]
    pub bank: Bank,
    /// Registering user.
    pub user: Option<User>,
}

/// An account with its owner and bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    /// The account.
    #[serde(flatten)]
    pub account: Account,
    /// Owning user.
    pub user: Option<User>,
    /// Holding bank.
    pub bank: Option<Bank>,
}

/// An investment with its owner and account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestmentView {
    /// The investment.
    #[serde(flatten)]
    pub investment: Investment,
    /// Owning user.
    pub user: Option<User>,
    /// Account the investment is held against.
    pub account: Option<Account>,
}

/// An expense with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseView {
    /// The expense.
    #[serde(flatten)]
    pub expense: MonthlyExpense,
    /// Owning user.
    pub user: Option<User>,
}
