//! Integration tests for cart behavior.
//!
//! These tests require a migrated `PostgreSQL` database; see the crate docs
//! for how to run them.

use orchard_integration_tests::{create_category, create_product, create_user, test_pool};
use orchard_server::db::{CartRepository, RepositoryError};

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_cart_is_created_once_per_user() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let repo = CartRepository::new(&pool);

    let first = repo.get_or_create(user).await.expect("first access");
    let second = repo.get_or_create(user).await.expect("second access");

    assert_eq!(first, second);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_adding_same_product_merges_quantities() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let category = create_category(&pool).await;
    let product = create_product(&pool, category, "10.00", 100).await;
    let repo = CartRepository::new(&pool);

    repo.add_item(user, product.id, 2).await.expect("first add");
    repo.add_item(user, product.id, 3).await.expect("second add");

    let cart = repo.contents(user).await.expect("load cart");
    assert_eq!(cart.lines.len(), 1, "duplicate adds must not create lines");
    assert_eq!(cart.lines[0].quantity, 5);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_set_quantity_overwrites_instead_of_adding() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let category = create_category(&pool).await;
    let product = create_product(&pool, category, "10.00", 100).await;
    let repo = CartRepository::new(&pool);

    repo.add_item(user, product.id, 4).await.expect("add");
    let cart = repo.contents(user).await.expect("load cart");
    let line_id = cart.lines[0].id;

    repo.set_item_quantity(user, line_id, 2)
        .await
        .expect("set quantity");

    let cart = repo.contents(user).await.expect("reload cart");
    assert_eq!(cart.lines[0].quantity, 2);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_set_quantity_zero_removes_the_line() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let category = create_category(&pool).await;
    let product = create_product(&pool, category, "10.00", 100).await;
    let repo = CartRepository::new(&pool);

    repo.add_item(user, product.id, 4).await.expect("add");
    let cart = repo.contents(user).await.expect("load cart");
    let line_id = cart.lines[0].id;

    repo.set_item_quantity(user, line_id, 0)
        .await
        .expect("set quantity to zero");

    let cart = repo.contents(user).await.expect("reload cart");
    assert!(cart.lines.is_empty());
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_cannot_touch_another_users_cart_line() {
    let pool = test_pool().await;
    let owner = create_user(&pool).await;
    let intruder = create_user(&pool).await;
    let category = create_category(&pool).await;
    let product = create_product(&pool, category, "10.00", 100).await;
    let repo = CartRepository::new(&pool);

    repo.add_item(owner, product.id, 1).await.expect("add");
    let cart = repo.contents(owner).await.expect("load cart");
    let line_id = cart.lines[0].id;

    let err = repo
        .remove_item(intruder, line_id)
        .await
        .expect_err("foreign line must look missing");
    assert!(matches!(err, RepositoryError::NotFound));

    // The owner's line is untouched.
    let cart = repo.contents(owner).await.expect("reload cart");
    assert_eq!(cart.lines.len(), 1);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_subtotal_reflects_live_prices() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let category = create_category(&pool).await;
    let a = create_product(&pool, category, "10.00", 100).await;
    let b = create_product(&pool, category, "20.00", 100).await;
    let repo = CartRepository::new(&pool);

    repo.add_item(user, a.id, 3).await.expect("add a");
    repo.add_item(user, b.id, 2).await.expect("add b");

    let cart = repo.contents(user).await.expect("load cart");
    assert_eq!(cart.subtotal(), "70.00".parse().expect("decimal"));
}
