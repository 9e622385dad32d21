//! Integration tests for cascading user deletion.

mod common;

use nestegg_core::RepositoryError;
use nestegg_core::domain::{BankName, InvestmentType};
use nestegg_core::store::{Filter, RecordKind, Store, Table};
use nestegg_shared::types::UserId;

use common::{create_account, create_bank, create_user, expense_input, investment_input, setup};

#[tokio::test]
async fn test_user_delete_sweeps_owned_records() {
    let (store, repos) = setup();
    let user = create_user(&repos, 1).await;
    let survivor = create_user(&repos, 2).await;
    let bank = create_bank(&repos, user.id, BankName::Hdfc).await;
    let account = create_account(&repos, user.id, bank.bank.id, "HDFC-1").await;
    repos
        .investments
        .create(investment_input(user.id, account.account.id, InvestmentType::FixedDeposit))
        .await
        .unwrap();
    repos.expenses.create(expense_input(user.id, "Rent")).await.unwrap();
    repos.expenses.create(expense_input(survivor.id, "Rent")).await.unwrap();

    let rows = repos.users.delete(user.id).await.unwrap();

    assert_eq!(rows, 1);
    assert!(store.banks().is_empty().await);
    assert!(store.accounts().is_empty().await);
    assert!(store.investments().is_empty().await);
    assert_eq!(store.expenses().len().await, 1);
    assert_eq!(store.users().len().await, 1);
    assert_eq!(
        repos.users.find_by_id(user.id).await.unwrap_err(),
        RepositoryError::not_found(RecordKind::User)
    );
}

#[tokio::test]
async fn test_user_delete_refused_when_bank_shared() {
    let (store, repos) = setup();
    let registrar = create_user(&repos, 1).await;
    let customer = create_user(&repos, 2).await;
    let bank = create_bank(&repos, registrar.id, BankName::Sbi).await;
    create_account(&repos, registrar.id, bank.bank.id, "SBI-1").await;
    create_account(&repos, customer.id, bank.bank.id, "SBI-2").await;
    repos.expenses.create(expense_input(registrar.id, "Rent")).await.unwrap();

    let err = repos.users.delete(registrar.id).await.unwrap_err();

    assert_eq!(err, RepositoryError::constraint("bank"));
    // Nothing was removed.
    assert_eq!(store.users().len().await, 2);
    assert_eq!(store.banks().len().await, 1);
    assert_eq!(store.accounts().len().await, 2);
    assert_eq!(store.expenses().len().await, 1);
}

#[tokio::test]
async fn test_customer_delete_leaves_shared_bank() {
    let (store, repos) = setup();
    let registrar = create_user(&repos, 1).await;
    let customer = create_user(&repos, 2).await;
    let bank = create_bank(&repos, registrar.id, BankName::Sbi).await;
    create_account(&repos, customer.id, bank.bank.id, "SBI-2").await;

    repos.users.delete(customer.id).await.unwrap();

    assert_eq!(store.banks().len().await, 1);
    assert!(store.accounts().is_empty().await);
    repos.users.delete(registrar.id).await.unwrap();
    assert!(store.banks().is_empty().await);
}

#[tokio::test]
async fn test_delete_unknown_user() {
    let (_store, repos) = setup();

    let err = repos.users.delete(UserId::new(7)).await.unwrap_err();
    assert_eq!(err, RepositoryError::not_found(RecordKind::User));
}

#[tokio::test]
async fn test_relations_resolve_to_none_when_owner_gone() {
    let (store, repos) = setup();
    let user = create_user(&repos, 1).await;
    let expense = repos.expenses.create(expense_input(user.id, "Rent")).await.unwrap();

    // Remove the owner behind the facade's back.
    store
        .users()
        .delete(&Filter::by_id(user.id))
        .await
        .unwrap();

    let view = repos.expenses.find_by_id(expense.expense.id).await.unwrap();
    assert!(view.user.is_none());
}
