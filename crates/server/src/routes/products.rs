//! Catalog route handlers (public, no authentication).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::{CatalogRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::models::{Category, ProductDetail};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Restrict to one category by its slug.
    pub category: Option<String>,
}

/// List products, newest first, optionally filtered by category slug.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<ProductDetail>>> {
    let products = CatalogRepository::new(state.pool())
        .list_products(query.category.as_deref())
        .await?;

    Ok(Json(products))
}

/// Product detail by slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetail>> {
    let product = CatalogRepository::new(state.pool())
        .get_by_slug(&slug)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("no product '{slug}'")),
            other => other.into(),
        })?;

    Ok(Json(product))
}

/// List all categories.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CatalogRepository::new(state.pool()).list_categories().await?;

    Ok(Json(categories))
}
