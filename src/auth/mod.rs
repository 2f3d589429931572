use axum::routing::post;
use axum::Router;

use crate::state::AppState;

mod dto;
pub mod extractor;
pub mod handlers;
pub mod jwt;
pub mod password;

pub use extractor::CurrentUser;
pub use jwt::{Claims, JwtKeys};

/// One generic message for every credential failure so clients cannot tell
/// a bad signature from an expired token or an unknown subject.
pub const CREDENTIALS_ERROR: &str = "Could not validate credentials";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/token/", post(handlers::login))
        .route("/auth/refresh_token/", post(handlers::refresh))
}
