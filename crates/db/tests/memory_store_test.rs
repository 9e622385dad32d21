//! Integration tests for the in-memory store.

mod common;

use std::sync::Arc;

use futures::future::join_all;
use nestegg_core::domain::{Account, AccountChanges, AccountInput, BankName};
use nestegg_core::store::{Column, Filter, StorageError, Store, Table};
use nestegg_core::{FixedClock, Repositories, RepositoryContext, RepositoryError};
use nestegg_db::{MemoryStore, MemoryTable};
use nestegg_shared::types::{BankId, UserId};
use rstest::rstest;

use common::{account_input, create_bank, create_user, fast_hasher, now, setup};

fn account(number: &str, user: u32) -> Account {
    Account::prepare(
        &AccountInput {
            user_id: UserId::new(user),
            bank_id: BankId::new(1),
            number: number.to_string(),
            balance: 0,
        },
        now(),
    )
}

#[tokio::test]
async fn test_identities_are_sequential() {
    let table = MemoryTable::<Account>::new();

    assert_eq!(table.insert(account("A", 1)).await.unwrap(), 1);
    assert_eq!(table.insert(account("B", 1)).await.unwrap(), 2);
    table.delete(&Filter::by_id(2u32)).await.unwrap();
    assert_eq!(table.insert(account("C", 1)).await.unwrap(), 3);
}

#[tokio::test]
async fn test_unique_key_enforced_on_insert_and_update() {
    let table = MemoryTable::<Account>::new();
    table.insert(account("A", 1)).await.unwrap();
    let second = table.insert(account("B", 1)).await.unwrap();

    let err = table.insert(account("A", 2)).await.unwrap_err();
    assert_eq!(
        err,
        StorageError::UniqueViolation {
            field: "number".to_string()
        }
    );

    let changes = AccountChanges {
        number: "A".to_string(),
        balance: 5,
        updated_at: now(),
    };
    let err = table.update_fields(second, changes).await.unwrap_err();
    assert!(matches!(err, StorageError::UniqueViolation { .. }));
}

#[tokio::test]
async fn test_update_missing_row_affects_nothing() {
    let table = MemoryTable::<Account>::new();
    let changes = AccountChanges {
        number: "Z".to_string(),
        balance: 0,
        updated_at: now(),
    };

    assert_eq!(table.update_fields(99, changes).await.unwrap(), 0);
}

#[rstest]
#[case(Filter::new(), 3)]
#[case(Filter::new().where_eq(Column::UserId, UserId::new(1)), 2)]
#[case(Filter::by_id(2u32).where_eq(Column::UserId, UserId::new(2)), 0)]
#[case(Filter::new().where_eq(Column::Number, "C"), 1)]
#[tokio::test]
async fn test_filters(#[case] filter: Filter, #[case] expected: usize) {
    let table = MemoryTable::<Account>::new();
    table.insert(account("A", 1)).await.unwrap();
    table.insert(account("B", 1)).await.unwrap();
    table.insert(account("C", 2)).await.unwrap();

    assert_eq!(table.find_many(&filter, 100).await.unwrap().len(), expected);
}

#[tokio::test]
async fn test_find_one_reports_not_found() {
    let table = MemoryTable::<Account>::new();

    let err = table.find_one(&Filter::by_id(1u32)).await.unwrap_err();
    assert_eq!(err, StorageError::NotFound);
}

#[tokio::test]
async fn test_find_many_respects_limit_and_order() {
    let table = MemoryTable::<Account>::new();
    for n in 0..10 {
        table.insert(account(&format!("N{n}"), 1)).await.unwrap();
    }

    let rows = table.find_many(&Filter::new(), 3).await.unwrap();
    let ids: Vec<u32> = rows.iter().map(|row| row.id.into_inner()).collect();
    assert_eq!(ids, [1, 2, 3]);
}

#[tokio::test]
async fn test_concurrent_creates_claim_number_once() {
    let (store, repos) = setup();
    let user = create_user(&repos, 1).await;
    let bank = create_bank(&repos, user.id, BankName::Hdfc).await;

    let attempts = (0..20).map(|_| {
        repos
            .accounts
            .create(account_input(user.id, bank.bank.id, "HDFC-RACE"))
    });
    let results = join_all(attempts).await;

    let created = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(created, 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|err| *err == RepositoryError::constraint("number"))
    );
    assert_eq!(store.accounts().len().await, 1);
}

#[tokio::test]
async fn test_parallel_tasks_share_store() {
    let store = Arc::new(MemoryStore::new());
    let ctx = RepositoryContext::new(Arc::clone(&store), Arc::new(FixedClock::new(now())))
        .with_hasher(fast_hasher());
    let repos = Arc::new(Repositories::new(ctx));

    let handles: Vec<_> = (1..=8)
        .map(|n| {
            let repos = Arc::clone(&repos);
            tokio::spawn(async move { repos.users.create(common::user_input(n)).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut ids: Vec<u32> = repos
        .users
        .find_all()
        .await
        .unwrap()
        .map(|user| user.id.into_inner())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
}
