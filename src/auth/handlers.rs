use axum::extract::{FromRef, State};
use axum::{Form, Json};
use tracing::{info, instrument, warn};

use crate::auth::dto::{AccessTokenForm, Token};
use crate::auth::{password::verify_password, CurrentUser, JwtKeys};
use crate::error::ApiError;
use crate::state::AppState;

const LOGIN_ERROR: &str = "Incorrect email or password";

/// POST /auth/token/ — issue an access token against form credentials.
/// Unknown email and wrong password share one failure message.
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<AccessTokenForm>,
) -> Result<Json<Token>, ApiError> {
    let user = crate::users::repo::User::find_by_email(&state.db, &form.username)
        .await?
        .ok_or_else(|| {
            warn!("login unknown email");
            ApiError::Unauthorized(LOGIN_ERROR.into())
        })?;

    if !verify_password(&form.password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::Unauthorized(LOGIN_ERROR.into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&user.email)?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(Token {
        access_token,
        token_type: "Bearer".into(),
    }))
}

/// POST /auth/refresh_token/ — a still-valid token buys a fresh one for the
/// same subject. Expired tokens fail extraction; refresh is not a grace
/// period.
#[instrument(skip(state, user))]
pub async fn refresh(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Token>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&user.email)?;

    info!(user_id = user.id, "token refreshed");
    Ok(Json(Token {
        access_token,
        token_type: "Bearer".into(),
    }))
}
