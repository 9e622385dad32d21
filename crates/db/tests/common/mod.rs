//! Shared fixtures for facade integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use nestegg_core::auth::SecretHasher;
use nestegg_core::domain::{
    AccountInput, AccountView, BankInput, BankName, BankView, ExpenseInput, InvestmentInput,
    InvestmentType, User, UserInput,
};
use nestegg_core::{FixedClock, Repositories, RepositoryContext};
use nestegg_db::MemoryStore;
use nestegg_shared::config::CredentialConfig;
use nestegg_shared::types::{AccountId, BankId, UserId};
use rust_decimal_macros::dec;

/// Reference instant for every test.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Cheap hashing parameters so tests stay fast.
pub fn fast_hasher() -> SecretHasher {
    SecretHasher::from_config(&CredentialConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}

/// A fresh store with every repository wired to it.
pub fn setup() -> (Arc<MemoryStore>, Repositories<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let ctx = RepositoryContext::new(Arc::clone(&store), Arc::new(FixedClock::new(now())))
        .with_hasher(fast_hasher());
    (store, Repositories::new(ctx))
}

/// Repositories over an existing store whose clock reads `at`.
pub fn repos_at(store: &Arc<MemoryStore>, at: DateTime<Utc>) -> Repositories<MemoryStore> {
    let ctx = RepositoryContext::new(Arc::clone(store), Arc::new(FixedClock::new(at)))
        .with_hasher(fast_hasher());
    Repositories::new(ctx)
}

/// A valid registration for user number `n`. Born 1984, so 40 years old.
pub fn user_input(n: u32) -> UserInput {
    UserInput {
        full_name: format!("User {n}"),
        date_of_birth: NaiveDate::from_ymd_opt(1984, 5, 20).unwrap(),
        email: format!("user{n}@example.com"),
        secret: format!("secret-{n}"),
        income: 80_000,
        retirement_age: 60,
    }
}

pub async fn create_user(repos: &Repositories<MemoryStore>, n: u32) -> User {
    repos.users.create(user_input(n)).await.unwrap()
}

pub fn bank_input(user_id: UserId, name: BankName) -> BankInput {
    BankInput {
        user_id,
        name,
        interest: dec!(3.00),
        interest_on_fd: dec!(7.00),
        interest_on_rd: dec!(6.50),
    }
}

pub async fn create_bank(repos: &Repositories<MemoryStore>, user_id: UserId, name: BankName) -> BankView {
    repos.banks.create(bank_input(user_id, name)).await.unwrap()
}

pub fn account_input(user_id: UserId, bank_id: BankId, number: &str) -> AccountInput {
    AccountInput {
        user_id,
        bank_id,
        number: number.to_string(),
        balance: 10_000,
    }
}

pub async fn create_account(
    repos: &Repositories<MemoryStore>,
    user_id: UserId,
    bank_id: BankId,
    number: &str,
) -> AccountView {
    repos
        .accounts
        .create(account_input(user_id, bank_id, number))
        .await
        .unwrap()
}

pub fn investment_input(user_id: UserId, account_id: AccountId, kind: InvestmentType) -> InvestmentInput {
    InvestmentInput {
        user_id,
        account_id,
        kind,
        amount: 1_000,
        end_date: NaiveDate::from_ymd_opt(2029, 6, 1).unwrap(),
        total_return: 0,
        total_profit: 0,
        description: "five year deposit".to_string(),
    }
}

pub fn expense_input(user_id: UserId, reason: &str) -> ExpenseInput {
    ExpenseInput {
        user_id,
        reason: reason.to_string(),
        amount: 2_500,
        end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
    }
}
