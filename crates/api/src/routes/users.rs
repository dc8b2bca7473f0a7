//! User profile CRUD handlers.
//!
//! Each handler validates its input and passes straight through to the
//! record store. Field formats are checked with the same rules the client
//! applies.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use profile_directory_core::{UserFields, UserId, UserProfile};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Parse a path identifier; anything that is not a UUID names no record.
fn parse_id(raw: &str) -> Result<UserId> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("user {raw}")))
}

/// List every profile in store order.
///
/// GET /api/users
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserProfile>>> {
    let profiles = state.store().list().await?;
    tracing::debug!(count = profiles.len(), "Listed users");
    Ok(Json(profiles))
}

/// Create a profile and return it with its new identifier.
///
/// POST /api/users
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UserFields>, JsonRejection>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let Json(fields) = payload?;
    let data = fields.validate()?;

    let profile = state.store().insert(data).await?;
    tracing::info!(user_id = %profile.id, "User created");

    Ok((StatusCode::CREATED, Json(profile)))
}

/// Replace every field of an existing profile.
///
/// PUT /api/users/{id}
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UserFields>, JsonRejection>,
) -> Result<Json<UserProfile>> {
    let id = parse_id(&id)?;
    let Json(fields) = payload?;
    let data = fields.validate()?;

    let profile = state.store().replace(id, data).await?;
    tracing::info!(user_id = %profile.id, "User updated");

    Ok(Json(profile))
}

/// Delete a profile.
///
/// DELETE /api/users/{id}
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = parse_id(&id)?;

    state.store().delete(id).await?;
    tracing::info!(user_id = %id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
