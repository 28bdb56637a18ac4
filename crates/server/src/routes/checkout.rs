//! Checkout route handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use orchard_core::AddressId;

use crate::db::OrderRepository;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::CheckoutReceipt;
use crate::state::AppState;

/// Checkout payload: the address the order ships to.
#[derive(Debug, Deserialize)]
pub struct CheckoutPayload {
    pub address_id: AddressId,
}

/// Convert the user's cart into an order.
///
/// Succeeds with 201 and `{order_id, total}`; fails with 400 on an empty
/// cart, 404 on a foreign address and 409 when any line exceeds the
/// product's stock. Failures leave every row untouched.
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CheckoutPayload>,
) -> Result<(StatusCode, Json<CheckoutReceipt>)> {
    let receipt = OrderRepository::new(state.pool())
        .checkout(user, payload.address_id)
        .await?;

    tracing::info!(
        order_id = %receipt.order_id,
        total = %receipt.total,
        "checkout completed"
    );

    Ok((StatusCode::CREATED, Json(receipt)))
}
