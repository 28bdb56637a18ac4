//! Cart route handlers.
//!
//! Every mutation responds with `{ok: true, subtotal}` where the subtotal is
//! recomputed from the surviving lines at their live product prices.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use orchard_core::{CartId, CartItemId, ProductId};

use crate::db::{CartRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::{CartContents, CartLine};
use crate::state::AppState;

/// Cart line as served to clients, with its computed subtotal.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub title: String,
    pub slug: String,
    pub price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

impl From<CartLine> for CartLineView {
    fn from(line: CartLine) -> Self {
        let subtotal = line.subtotal();
        Self {
            id: line.id,
            product_id: line.product_id,
            title: line.title,
            slug: line.slug,
            price: line.price,
            quantity: line.quantity,
            subtotal,
        }
    }
}

/// Cart as served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub id: CartId,
    pub items: Vec<CartLineView>,
    pub subtotal: Decimal,
}

impl From<CartContents> for CartView {
    fn from(cart: CartContents) -> Self {
        let subtotal = cart.subtotal();
        Self {
            id: cart.id,
            items: cart.lines.into_iter().map(CartLineView::from).collect(),
            subtotal,
        }
    }
}

/// Response to a cart mutation.
#[derive(Debug, Serialize)]
pub struct CartMutationResponse {
    pub ok: bool,
    pub subtotal: Decimal,
}

/// Add-to-cart payload.
#[derive(Debug, Deserialize)]
pub struct AddToCartPayload {
    pub product_id: ProductId,
    pub quantity: Option<i32>,
}

/// Update-item payload.
#[derive(Debug, Deserialize)]
pub struct UpdateCartItemPayload {
    pub item_id: CartItemId,
    pub quantity: i32,
}

/// Remove-item payload.
#[derive(Debug, Deserialize)]
pub struct RemoveCartItemPayload {
    pub item_id: CartItemId,
}

/// Show the user's cart with its computed subtotal.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<CartView>> {
    let cart = CartRepository::new(state.pool()).contents(user).await?;

    Ok(Json(CartView::from(cart)))
}

/// Add a product to the cart, merging quantities on duplicate.
///
/// Stock is deliberately not checked here; only checkout validates stock.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<AddToCartPayload>,
) -> Result<Json<CartMutationResponse>> {
    let quantity = payload.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(AppError::Validation("quantity must be at least 1".to_owned()));
    }

    let repo = CartRepository::new(state.pool());
    repo.add_item(user, payload.product_id, quantity)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound(format!("no product {}", payload.product_id))
            }
            other => other.into(),
        })?;

    mutation_response(&repo, user).await
}

/// Overwrite a line's quantity; zero or negative removes the line.
#[instrument(skip(state))]
pub async fn update_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<UpdateCartItemPayload>,
) -> Result<Json<CartMutationResponse>> {
    let repo = CartRepository::new(state.pool());
    repo.set_item_quantity(user, payload.item_id, payload.quantity)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound(format!("no cart item {}", payload.item_id))
            }
            other => other.into(),
        })?;

    mutation_response(&repo, user).await
}

/// Remove a line from the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<RemoveCartItemPayload>,
) -> Result<Json<CartMutationResponse>> {
    let repo = CartRepository::new(state.pool());
    repo.remove_item(user, payload.item_id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound(format!("no cart item {}", payload.item_id))
            }
            other => other.into(),
        })?;

    mutation_response(&repo, user).await
}

/// Recompute the subtotal after a mutation.
async fn mutation_response(
    repo: &CartRepository<'_>,
    user: orchard_core::UserId,
) -> Result<Json<CartMutationResponse>> {
    let cart = repo.contents(user).await?;

    Ok(Json(CartMutationResponse {
        ok: true,
        subtotal: cart.subtotal(),
    }))
}
