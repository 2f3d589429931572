use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::auth::password::hash_password;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::{ListQuery, UserList, UserPayload, UserPublic};
use crate::users::repo::User;

const CONFLICT_ERROR: &str = "Email Or Username Already Exist";
const PERMISSION_ERROR: &str = "Not enough permissions";

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn validate_payload(payload: &UserPayload) -> Result<(), ApiError> {
    if !is_valid_email(&payload.email) {
        return Err(ApiError::Validation("Invalid email address".into()));
    }
    Ok(())
}

/// POST /users/ — open registration.
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, Json<UserPublic>), ApiError> {
    validate_payload(&payload)?;

    if User::find_by_username_or_email(&state.db, &payload.username, &payload.email)
        .await?
        .is_some()
    {
        warn!("registration conflict");
        return Err(ApiError::Conflict(CONFLICT_ERROR.into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.username, &payload.email, &hash).await?;

    info!(user_id = user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/ — any authenticated user may list all users. Coarse by
/// design; the policy is intentional, not an oversight.
#[instrument(skip(state, _current))]
pub async fn list_users(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<UserList>, ApiError> {
    let users = User::list(&state.db, query.skip, query.limit).await?;
    Ok(Json(UserList {
        users: users.into_iter().map(UserPublic::from).collect(),
    }))
}

/// GET /users/:id — public lookup.
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserPublic>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User Not Found".into()))?;
    Ok(Json(user.into()))
}

/// PUT /users/:id — self-service full replacement. The password is rehashed
/// on every update.
#[instrument(skip(state, current, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<UserPublic>, ApiError> {
    if current.id != id {
        return Err(ApiError::Forbidden(PERMISSION_ERROR.into()));
    }

    validate_payload(&payload)?;

    if User::find_conflicting(&state.db, &payload.username, &payload.email, current.id)
        .await?
        .is_some()
    {
        warn!(user_id = current.id, "update conflict");
        return Err(ApiError::Conflict(CONFLICT_ERROR.into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::update(&state.db, id, &payload.username, &payload.email, &hash).await?;

    info!(user_id = user.id, "user updated");
    Ok(Json(user.into()))
}

/// DELETE /users/:id — self-service only; returns the deleted projection.
#[instrument(skip(state, current))]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<UserPublic>, ApiError> {
    if current.id != id {
        return Err(ApiError::Forbidden(PERMISSION_ERROR.into()));
    }

    let user = User::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User Not Found".into()))?;

    info!(user_id = user.id, "user deleted");
    Ok(Json(user.into()))
}
