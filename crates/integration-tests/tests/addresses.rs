//! Integration tests for the address book.

use orchard_integration_tests::{address_input, create_address, create_user, test_pool};
use orchard_server::db::{AddressRepository, RepositoryError};

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_new_default_clears_previous_default() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let repo = AddressRepository::new(&pool);

    let first = create_address(&pool, user, true).await;
    let second = create_address(&pool, user, true).await;

    let addresses = repo.list(user).await.expect("list");
    let defaults: Vec<_> = addresses.iter().filter(|a| a.is_default).collect();
    assert_eq!(defaults.len(), 1, "at most one default per user");
    assert_eq!(defaults[0].id, second.id);

    let first = repo.get(user, first.id).await.expect("reload first");
    assert!(!first.is_default);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_update_to_default_keeps_the_updated_row_default() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let repo = AddressRepository::new(&pool);

    let first = create_address(&pool, user, true).await;
    let second = create_address(&pool, user, false).await;

    let updated = repo
        .update(user, second.id, &address_input(true))
        .await
        .expect("update");
    assert!(updated.is_default);

    let first = repo.get(user, first.id).await.expect("reload first");
    assert!(!first.is_default);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_defaults_are_scoped_per_user() {
    let pool = test_pool().await;
    let alice = create_user(&pool).await;
    let bob = create_user(&pool).await;
    let repo = AddressRepository::new(&pool);

    let alices = create_address(&pool, alice, true).await;
    create_address(&pool, bob, true).await;

    let reloaded = repo.get(alice, alices.id).await.expect("reload");
    assert!(reloaded.is_default, "another user's default must not clear mine");
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_foreign_address_is_indistinguishable_from_missing() {
    let pool = test_pool().await;
    let owner = create_user(&pool).await;
    let intruder = create_user(&pool).await;
    let repo = AddressRepository::new(&pool);

    let address = create_address(&pool, owner, false).await;

    let get_err = repo
        .get(intruder, address.id)
        .await
        .expect_err("foreign get");
    assert!(matches!(get_err, RepositoryError::NotFound));

    let delete_err = repo
        .delete(intruder, address.id)
        .await
        .expect_err("foreign delete");
    assert!(matches!(delete_err, RepositoryError::NotFound));

    // Still there for the owner.
    repo.get(owner, address.id).await.expect("owner get");
}
