//! Order history route handlers.
//!
//! Read-only: orders are created by checkout and their statuses advance via
//! external fulfillment/payment collaborators, not through this API.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use orchard_core::OrderId;

use crate::db::{OrderRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::{Order, OrderDetail};
use crate::state::AppState;

/// List the user's orders, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list_for_user(user).await?;

    Ok(Json(orders))
}

/// Show one of the user's orders with its line items.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDetail>> {
    let order = OrderRepository::new(state.pool())
        .get_for_user(user, id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("no order {id}")),
            other => other.into(),
        })?;

    Ok(Json(order))
}
