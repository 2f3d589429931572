#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use todo_api::app::build_app;
use todo_api::config::{AppConfig, JwtConfig};
use todo_api::state::AppState;

pub const TEST_SECRET: &str = "test-secret";

/// Build the full router over a fresh in-memory database with migrations
/// applied. One connection, because every in-memory SQLite connection is its
/// own database.
pub async fn test_app() -> Router {
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("run migrations");

    let config = Arc::new(AppConfig {
        database_url: "sqlite::memory:".into(),
        jwt: JwtConfig {
            secret: TEST_SECRET.into(),
            ttl_minutes: 30,
        },
    });
    build_app(AppState::from_parts(db, config))
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn register_user(app: &Router, username: &str, email: &str, password: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/",
            None,
            &json!({ "username": username, "email": email, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let form = format!(
        "username={}&password={}",
        urlencode(email),
        urlencode(password)
    );
    let request = Request::builder()
        .method("POST")
        .uri("/auth/token/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Minimal percent-encoding for form values used in tests.
fn urlencode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

/// Registers a user and returns (id, token).
pub async fn register_and_login(
    app: &Router,
    username: &str,
    email: &str,
    password: &str,
) -> (i64, String) {
    let user = register_user(app, username, email, password).await;
    let token = login(app, email, password).await;
    (user["id"].as_i64().unwrap(), token)
}
