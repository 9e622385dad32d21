//! Integration tests for the bank repository.

mod common;

use nestegg_core::RepositoryError;
use nestegg_core::domain::BankName;
use nestegg_core::store::RecordKind;
use nestegg_core::validation::ValidationError;
use nestegg_shared::types::{BankId, UserId};
use rust_decimal_macros::dec;

use common::{bank_input, create_account, create_bank, create_user, setup};

#[tokio::test]
async fn test_create_resolves_user() {
    let (_store, repos) = setup();
    let user = create_user(&repos, 1).await;

    let view = repos.banks.create(bank_input(user.id, BankName::Hdfc)).await.unwrap();

    assert_eq!(view.bank.id, BankId::new(1));
    assert_eq!(view.bank.name, BankName::Hdfc);
    assert_eq!(view.bank.interest_on_fd, dec!(7.00));
    assert_eq!(view.user.map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_create_requires_existing_user() {
    let (_store, repos) = setup();

    let err = repos
        .banks
        .create(bank_input(UserId::new(3), BankName::Sbi))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RepositoryError::Validation(ValidationError::new("user", "does not exist"))
    );
}

#[tokio::test]
async fn test_negative_rate_rejected() {
    let (_store, repos) = setup();
    let user = create_user(&repos, 1).await;
    let mut input = bank_input(user.id, BankName::Sbi);
    input.interest_on_rd = dec!(-1);

    let err = repos.banks.create(input).await.unwrap_err();
    assert_eq!(
        err,
        RepositoryError::Validation(ValidationError::new("interest on rd", "must not be negative"))
    );
}

#[tokio::test]
async fn test_bank_name_is_unique() {
    let (_store, repos) = setup();
    let first = create_user(&repos, 1).await;
    let second = create_user(&repos, 2).await;
    create_bank(&repos, first.id, BankName::Sbi).await;

    let err = repos
        .banks
        .create(bank_input(second.id, BankName::Sbi))
        .await
        .unwrap_err();

    assert_eq!(err, RepositoryError::constraint("name"));
}

#[tokio::test]
async fn test_update_is_scoped_to_owner() {
    let (_store, repos) = setup();
    let owner = create_user(&repos, 1).await;
    let other = create_user(&repos, 2).await;
    let bank = create_bank(&repos, owner.id, BankName::Hdfc).await;

    let err = repos
        .banks
        .update(bank.bank.id, bank_input(other.id, BankName::Hdfc))
        .await
        .unwrap_err();
    assert_eq!(err, RepositoryError::not_found(RecordKind::Bank));

    let updated = repos
        .banks
        .update(bank.bank.id, bank_input(owner.id, BankName::Hdfc))
        .await
        .unwrap();
    assert_eq!(updated.bank, bank.bank);
}

#[tokio::test]
async fn test_delete_refused_while_accounts_exist() {
    let (_store, repos) = setup();
    let user = create_user(&repos, 1).await;
    let bank = create_bank(&repos, user.id, BankName::Hdfc).await;
    let account = create_account(&repos, user.id, bank.bank.id, "HDFC-0001").await;

    let err = repos.banks.delete(bank.bank.id, user.id).await.unwrap_err();
    assert_eq!(err, RepositoryError::constraint("bank"));

    repos.accounts.delete(account.account.id, user.id).await.unwrap();
    assert_eq!(repos.banks.delete(bank.bank.id, user.id).await.unwrap(), 1);
    assert_eq!(
        repos.banks.find_by_id(bank.bank.id).await.unwrap_err(),
        RepositoryError::not_found(RecordKind::Bank)
    );
}

#[tokio::test]
async fn test_list_for_owner() {
    let (_store, repos) = setup();
    let first = create_user(&repos, 1).await;
    let second = create_user(&repos, 2).await;
    create_bank(&repos, first.id, BankName::Hdfc).await;
    create_bank(&repos, second.id, BankName::Sbi).await;

    let banks: Vec<_> = repos.banks.list_for_owner(second.id).await.unwrap().collect();

    assert_eq!(banks.len(), 1);
    assert_eq!(banks[0].bank.name, BankName::Sbi);
    assert_eq!(banks[0].user.as_ref().map(|u| u.id), Some(second.id));
}

#[tokio::test]
async fn test_view_serializes_flat_with_nested_user() {
    let (_store, repos) = setup();
    let user = create_user(&repos, 1).await;
    let view = create_bank(&repos, user.id, BankName::Sbi).await;

    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["name"], "State Bank of India");
    assert_eq!(json["user_id"], 1);
    assert_eq!(json["user"]["full_name"], "User 1");
    assert!(json["user"].get("secret_hash").is_none());
}
