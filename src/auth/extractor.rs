use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use tracing::warn;

use crate::auth::{JwtKeys, CREDENTIALS_ERROR};
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

/// Resolves the bearer token on a request to a persisted user. Protected
/// handlers take this as an argument; unprotected ones simply omit it.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized(CREDENTIALS_ERROR.into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized(CREDENTIALS_ERROR.into()))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::Unauthorized(CREDENTIALS_ERROR.into())
        })?;

        // A token whose subject no longer exists is rejected with the same
        // message as a malformed one.
        let user = User::find_by_email(&state.db, &claims.sub)
            .await?
            .ok_or_else(|| {
                warn!("token subject does not match any user");
                ApiError::Unauthorized(CREDENTIALS_ERROR.into())
            })?;

        Ok(CurrentUser(user))
    }
}
