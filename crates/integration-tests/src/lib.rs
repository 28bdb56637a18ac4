//! Integration test support for Orchard.
//!
//! # Running Tests
//!
//! The database-backed tests are `#[ignore]`d by default. To run them, point
//! `ORCHARD_TEST_DATABASE_URL` (or `DATABASE_URL`) at a migrated `PostgreSQL`
//! database and run:
//!
//! ```bash
//! cargo run -p orchard-cli -- migrate
//! cargo test -p orchard-integration-tests -- --ignored
//! ```
//!
//! Fixtures created here use random identifiers so tests can share a database
//! and run repeatedly without cleanup.

#![cfg_attr(not(test), forbid(unsafe_code))]

use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;
use uuid::Uuid;

use orchard_core::{CategoryId, UserId};
use orchard_server::db::{self, AddressRepository, CatalogRepository};
use orchard_server::models::{Address, AddressInput, NewProduct, Product};

/// Connect to the test database.
///
/// # Panics
///
/// Panics if no database URL is configured or the connection fails; the
/// callers are all `#[ignore]`d tests that opted in to needing a database.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("ORCHARD_TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .expect("ORCHARD_TEST_DATABASE_URL or DATABASE_URL must be set");

    db::create_pool(&url)
        .await
        .expect("Failed to connect to test database")
}

/// Insert a fresh user with a random email.
pub async fn create_user(pool: &PgPool) -> UserId {
    sqlx::query_scalar::<_, UserId>("INSERT INTO users (email) VALUES ($1) RETURNING id")
        .bind(format!("test-{}@example.com", Uuid::new_v4()))
        .fetch_one(pool)
        .await
        .expect("Failed to insert test user")
}

/// Create a category with a random, collision-free name.
pub async fn create_category(pool: &PgPool) -> CategoryId {
    CatalogRepository::new(pool)
        .create_category(&format!("Test Category {}", Uuid::new_v4()))
        .await
        .expect("Failed to create test category")
        .id
}

/// Create a product under `category` with the given price and stock.
pub async fn create_product(
    pool: &PgPool,
    category_id: CategoryId,
    price: &str,
    stock: i32,
) -> Product {
    CatalogRepository::new(pool)
        .create_product(&NewProduct {
            category_id,
            title: format!("Test Product {}", Uuid::new_v4()),
            price: price.parse::<Decimal>().expect("invalid test price"),
            old_price: None,
            description: "integration test fixture".to_owned(),
            stock,
        })
        .await
        .expect("Failed to create test product")
}

/// A minimal valid address payload.
#[must_use]
pub fn address_input(is_default: bool) -> AddressInput {
    AddressInput {
        full_name: "Test User".to_owned(),
        phone: "+15550100".to_owned(),
        address_line1: "1 Test Street".to_owned(),
        address_line2: String::new(),
        city: "Testville".to_owned(),
        state: "TS".to_owned(),
        postal_code: "00100".to_owned(),
        is_default,
    }
}

/// Create an address for `user`.
pub async fn create_address(pool: &PgPool, user: UserId, is_default: bool) -> Address {
    AddressRepository::new(pool)
        .create(user, &address_input(is_default))
        .await
        .expect("Failed to create test address")
}

/// Current stock of a product, read directly.
pub async fn product_stock(pool: &PgPool, product: &Product) -> i32 {
    sqlx::query_scalar::<_, i32>("SELECT stock FROM products WHERE id = $1")
        .bind(product.id)
        .fetch_one(pool)
        .await
        .expect("Failed to read product stock")
}
