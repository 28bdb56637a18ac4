//! Integration tests for the payment ledger.

use rust_decimal::Decimal;
use uuid::Uuid;

use orchard_core::{OrderId, PaymentMethod, PaymentStatus};
use orchard_integration_tests::{
    create_address, create_category, create_product, create_user, test_pool,
};
use orchard_server::db::orders::PaymentError;
use orchard_server::db::{CartRepository, OrderRepository};

fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

async fn place_order(pool: &sqlx::PgPool) -> OrderId {
    let user = create_user(pool).await;
    let address = create_address(pool, user, true).await;
    let category = create_category(pool).await;
    let product = create_product(pool, category, "10.00", 5).await;

    CartRepository::new(pool)
        .add_item(user, product.id, 1)
        .await
        .expect("add");

    OrderRepository::new(pool)
        .checkout(user, address.id)
        .await
        .expect("checkout")
        .order_id
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_payment_is_recorded_once() {
    let pool = test_pool().await;
    let order_id = place_order(&pool).await;
    let repo = OrderRepository::new(&pool);
    let payment_id = format!("pay_{}", Uuid::new_v4());

    let record = repo
        .record_payment(
            order_id,
            &payment_id,
            PaymentMethod::Card,
            PaymentStatus::Success,
            dec("10.00"),
        )
        .await
        .expect("record payment");
    assert_eq!(record.order_id, order_id);
    assert_eq!(record.payment_id, payment_id);

    // Same external id again: a retried webhook must not duplicate the row.
    let err = repo
        .record_payment(
            order_id,
            &payment_id,
            PaymentMethod::Card,
            PaymentStatus::Success,
            dec("10.00"),
        )
        .await
        .expect_err("duplicate payment");
    assert!(matches!(err, PaymentError::Duplicate(id) if id == payment_id));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_payment_for_unknown_order_is_rejected() {
    let pool = test_pool().await;
    let repo = OrderRepository::new(&pool);

    let err = repo
        .record_payment(
            OrderId::new(i32::MAX),
            &format!("pay_{}", Uuid::new_v4()),
            PaymentMethod::Upi,
            PaymentStatus::Failed,
            dec("1.00"),
        )
        .await
        .expect_err("unknown order");
    assert!(matches!(err, PaymentError::OrderNotFound));
}
