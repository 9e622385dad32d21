//! Record-keeping entities.
//!
//! - `User` - identity, income and retirement plan
//! - `Bank` - supported bank and its published rates
//! - `Account` - bank account owned by a user
//! - `Investment` - holding against an account
//! - `MonthlyExpense` - recurring outgoing per user
//!
//! Entities reference each other by typed id only; resolved views live in
//! [`view`].

pub mod account;
pub mod bank;
pub mod enums;
pub mod expense;
pub mod investment;
pub mod user;
pub mod view;

use chrono::{DateTime, Utc};

pub use account::{Account, AccountChanges, AccountInput};
pub use bank::{Bank, BankInput};
pub use enums::{BankName, InvestmentType};
pub use expense::{ExpenseInput, MonthlyExpense};
pub use investment::{Investment, InvestmentInput};
pub use user::{User, UserChanges, UserInput};
pub use view::{AccountView, BankView, ExpenseView, InvestmentView};

/// Update for entities whose fields are fixed after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Touched {
    /// Modification timestamp.
    pub updated_at: DateTime<Utc>,
}
