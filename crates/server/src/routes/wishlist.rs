//! Wishlist route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use orchard_core::ProductId;

use crate::db::{CatalogRepository, RepositoryError, WishlistRepository};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::ProductDetail;
use crate::state::AppState;

/// Toggle payload.
#[derive(Debug, Deserialize)]
pub struct TogglePayload {
    pub product_id: ProductId,
}

/// Toggle response: which way the membership flipped.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub status: &'static str,
}

/// Show the user's wishlisted products.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<ProductDetail>>> {
    let ids = WishlistRepository::new(state.pool()).product_ids(user).await?;
    let products = CatalogRepository::new(state.pool()).list_by_ids(&ids).await?;

    Ok(Json(products))
}

/// Toggle a product in or out of the wishlist.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<TogglePayload>,
) -> Result<Json<ToggleResponse>> {
    let outcome = WishlistRepository::new(state.pool())
        .toggle(user, payload.product_id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound(format!("no product {}", payload.product_id))
            }
            other => other.into(),
        })?;

    Ok(Json(ToggleResponse {
        status: outcome.as_str(),
    }))
}
