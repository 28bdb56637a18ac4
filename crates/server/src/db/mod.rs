//! Database operations for the store's `PostgreSQL` schema.
//!
//! # Tables
//!
//! - `users` - Foreign-key target for identities owned by the upstream auth layer
//! - `categories`, `products`, `product_images` - Catalog
//! - `addresses` - Per-user address book with a single default flag
//! - `carts`, `cart_items` - One cart per user, lines unique per product
//! - `wishlists`, `wishlist_products` - Per-user product set
//! - `orders`, `order_items` - Checkout output; item prices are snapshots
//! - `payment_records` - Append-mostly payment ledger
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p orchard-cli -- migrate
//! ```
//!
//! All queries use the sqlx runtime API; repositories borrow the pool and
//! return domain models from `crate::models`.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod wishlist;

pub use addresses::AddressRepository;
pub use cart::CartRepository;
pub use catalog::CatalogRepository;
pub use orders::OrderRepository;
pub use wishlist::WishlistRepository;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The row does not exist, or is not owned by the requesting user.
    /// The two cases are deliberately indistinguishable.
    #[error("not found")]
    NotFound,

    /// A uniqueness or referential-integrity constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored value could not be interpreted (e.g. unknown status text).
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
