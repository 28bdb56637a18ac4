//! Integration tests for the checkout transaction.
//!
//! Checkout is all-or-nothing: these tests pin both the success path (stock
//! decremented, prices snapshotted, cart emptied, total exact) and the
//! failure paths (no partial writes survive).

use rust_decimal::Decimal;

use orchard_core::OrderStatus;
use orchard_integration_tests::{
    create_address, create_category, create_product, create_user, product_stock, test_pool,
};
use orchard_server::db::orders::CheckoutError;
use orchard_server::db::{CartRepository, OrderRepository};

fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_checkout_snapshots_prices_decrements_stock_and_empties_cart() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let address = create_address(&pool, user, true).await;
    let category = create_category(&pool).await;
    let a = create_product(&pool, category, "10.00", 5).await;
    let b = create_product(&pool, category, "20.00", 2).await;

    let carts = CartRepository::new(&pool);
    carts.add_item(user, a.id, 3).await.expect("add a");
    carts.add_item(user, b.id, 2).await.expect("add b");

    let orders = OrderRepository::new(&pool);
    let receipt = orders.checkout(user, address.id).await.expect("checkout");
    assert_eq!(receipt.total, dec("70.00"));

    assert_eq!(product_stock(&pool, &a).await, 2);
    assert_eq!(product_stock(&pool, &b).await, 0);

    let cart = carts.contents(user).await.expect("reload cart");
    assert!(cart.lines.is_empty(), "checkout must empty the cart");

    let detail = orders
        .get_for_user(user, receipt.order_id)
        .await
        .expect("order detail");
    assert_eq!(detail.order.status, OrderStatus::Pending);
    assert_eq!(detail.order.total, dec("70.00"));
    assert_eq!(detail.items.len(), 2);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_checkout_with_empty_cart_creates_nothing() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let address = create_address(&pool, user, true).await;

    let orders = OrderRepository::new(&pool);
    let err = orders
        .checkout(user, address.id)
        .await
        .expect_err("empty cart");
    assert!(matches!(err, CheckoutError::EmptyCart));

    let history = orders.list_for_user(user).await.expect("history");
    assert!(history.is_empty(), "no order row may survive a failed checkout");
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_insufficient_stock_rolls_back_everything() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let address = create_address(&pool, user, true).await;
    let category = create_category(&pool).await;
    // First line is satisfiable, the second is not; the first line's writes
    // must be rolled back with the rest.
    let a = create_product(&pool, category, "10.00", 5).await;
    let b = create_product(&pool, category, "20.00", 1).await;

    let carts = CartRepository::new(&pool);
    carts.add_item(user, a.id, 3).await.expect("add a");
    carts.add_item(user, b.id, 2).await.expect("add b");

    let orders = OrderRepository::new(&pool);
    let err = orders
        .checkout(user, address.id)
        .await
        .expect_err("stock exceeded");
    match err {
        CheckoutError::InsufficientStock {
            requested,
            available,
            ..
        } => {
            assert_eq!(requested, 2);
            assert_eq!(available, 1);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    assert_eq!(product_stock(&pool, &a).await, 5, "stock must be untouched");
    assert_eq!(product_stock(&pool, &b).await, 1);

    let cart = carts.contents(user).await.expect("reload cart");
    assert_eq!(cart.lines.len(), 2, "cart must be untouched");

    let history = orders.list_for_user(user).await.expect("history");
    assert!(history.is_empty());
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_checkout_requires_own_address() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let other = create_user(&pool).await;
    let foreign_address = create_address(&pool, other, true).await;
    let category = create_category(&pool).await;
    let product = create_product(&pool, category, "10.00", 5).await;

    CartRepository::new(&pool)
        .add_item(user, product.id, 1)
        .await
        .expect("add");

    let err = OrderRepository::new(&pool)
        .checkout(user, foreign_address.id)
        .await
        .expect_err("foreign address");
    assert!(matches!(err, CheckoutError::AddressNotFound));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_order_items_keep_the_price_paid() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let address = create_address(&pool, user, true).await;
    let category = create_category(&pool).await;
    let product = create_product(&pool, category, "10.00", 5).await;

    CartRepository::new(&pool)
        .add_item(user, product.id, 1)
        .await
        .expect("add");

    let orders = OrderRepository::new(&pool);
    let receipt = orders.checkout(user, address.id).await.expect("checkout");

    // Reprice the product after the sale.
    sqlx::query("UPDATE products SET price = $2 WHERE id = $1")
        .bind(product.id)
        .bind(dec("99.00"))
        .execute(&pool)
        .await
        .expect("reprice");

    let detail = orders
        .get_for_user(user, receipt.order_id)
        .await
        .expect("order detail");
    assert_eq!(detail.items[0].price, dec("10.00"), "snapshot, not live price");
    assert_eq!(detail.order.total, dec("10.00"), "total unchanged");
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_orders_are_scoped_per_user() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let other = create_user(&pool).await;
    let address = create_address(&pool, user, true).await;
    let category = create_category(&pool).await;
    let product = create_product(&pool, category, "10.00", 5).await;

    CartRepository::new(&pool)
        .add_item(user, product.id, 1)
        .await
        .expect("add");

    let orders = OrderRepository::new(&pool);
    let receipt = orders.checkout(user, address.id).await.expect("checkout");

    let err = orders
        .get_for_user(other, receipt.order_id)
        .await
        .expect_err("foreign order");
    assert!(matches!(
        err,
        orchard_server::db::RepositoryError::NotFound
    ));
}
