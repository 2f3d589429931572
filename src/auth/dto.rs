use serde::{Deserialize, Serialize};

/// Form body for `POST /auth/token/`. The `username` field carries an email,
/// matching standard bearer-auth tooling.
#[derive(Debug, Deserialize)]
pub struct AccessTokenForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}
