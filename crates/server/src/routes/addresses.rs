//! Address book route handlers.
//!
//! All operations are scoped to the requesting user; an address owned by
//! someone else yields the same 404 as a missing one.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use orchard_core::AddressId;

use crate::db::{AddressRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::{Address, AddressInput};
use crate::state::AppState;

fn address_not_found(e: RepositoryError, id: AddressId) -> AppError {
    match e {
        RepositoryError::NotFound => AppError::NotFound(format!("no address {id}")),
        other => other.into(),
    }
}

/// List the user's addresses.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Address>>> {
    let addresses = AddressRepository::new(state.pool()).list(user).await?;

    Ok(Json(addresses))
}

/// Create an address. Marking it default clears the user's other defaults.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<AddressInput>,
) -> Result<(StatusCode, Json<Address>)> {
    let address = AddressRepository::new(state.pool()).create(user, &input).await?;

    Ok((StatusCode::CREATED, Json(address)))
}

/// Show one of the user's addresses.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<AddressId>,
) -> Result<Json<Address>> {
    let address = AddressRepository::new(state.pool())
        .get(user, id)
        .await
        .map_err(|e| address_not_found(e, id))?;

    Ok(Json(address))
}

/// Update one of the user's addresses.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<AddressId>,
    Json(input): Json<AddressInput>,
) -> Result<Json<Address>> {
    let address = AddressRepository::new(state.pool())
        .update(user, id, &input)
        .await
        .map_err(|e| address_not_found(e, id))?;

    Ok(Json(address))
}

/// Delete one of the user's addresses.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<AddressId>,
) -> Result<StatusCode> {
    AddressRepository::new(state.pool())
        .delete(user, id)
        .await
        .map_err(|e| address_not_found(e, id))?;

    Ok(StatusCode::NO_CONTENT)
}
