//! HTTP route handlers for the store backend.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the database)
//!
//! # Catalog (public)
//! GET  /products               - Product listing (?category=<slug>)
//! GET  /products/{slug}        - Product detail with images
//! GET  /categories             - Category listing
//!
//! # Cart (authenticated)
//! GET  /cart                   - Cart with computed subtotal
//! POST /cart/add               - Add item (merges quantity on duplicate)
//! POST /cart/update_item       - Overwrite quantity (<= 0 deletes)
//! POST /cart/remove            - Remove item
//!
//! # Wishlist (authenticated)
//! GET  /wishlist               - Wishlisted products
//! POST /wishlist/toggle        - Toggle membership -> {status: added|removed}
//!
//! # Addresses (authenticated, owner-scoped)
//! GET    /addresses            - List
//! POST   /addresses            - Create
//! GET    /addresses/{id}       - Detail
//! PUT    /addresses/{id}       - Update
//! DELETE /addresses/{id}       - Delete
//!
//! # Checkout & orders (authenticated)
//! POST /checkout               - Convert cart into an order (201)
//! GET  /orders                 - Order history
//! GET  /orders/{id}            - Order detail with items
//!
//! # Payments (external collaborator)
//! POST /payments               - Append a payment-result event (201)
//! ```

pub mod addresses;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod payments;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update_item", post(cart::update_item))
        .route("/remove", post(cart::remove))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
}

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(addresses::index).post(addresses::create))
        .route(
            "/{id}",
            get(addresses::show)
                .put(addresses::update)
                .delete(addresses::remove),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create all routes for the store backend.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .route("/categories", get(products::categories))
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/addresses", address_routes())
        .route("/checkout", post(checkout::checkout))
        .nest("/orders", order_routes())
        .route("/payments", post(payments::record))
}
