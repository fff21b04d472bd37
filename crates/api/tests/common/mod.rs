//! Shared harness for HTTP-level integration tests.
//!
//! Builds the application through [`build_app_router`] so tests exercise
//! the same middleware stack (CORS, request ID, timeout, tracing, panic
//! recovery) that production uses.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use storyforge_api::config::ServerConfig;
use storyforge_api::router::build_app_router;
use storyforge_api::state::AppState;
use storyforge_core::artifacts::ArtifactStore;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        artifact_dir: "uploads".to_string(),
    }
}

/// Build the full application router over the given pool, storing
/// artifacts under `artifact_dir`.
pub fn build_test_app(pool: PgPool, artifact_dir: &Path) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        store: Arc::new(ArtifactStore::new(artifact_dir)),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// GET without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET with an `x-user-id` header.
pub async fn get_auth(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("x-user-id", user_id)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body with an `x-user-id` header.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    user_id: i64,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("x-user-id", user_id)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an empty body with an `x-user-id` header.
pub async fn post_auth(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("x-user-id", user_id)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// PATCH a JSON body with an `x-user-id` header.
pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    user_id: i64,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header("x-user-id", user_id)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Insert a user and return its id.
pub async fn seed_user(pool: &PgPool, email: &str, plan: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (email, plan) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(plan)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Insert one active complex with one room type; returns their ids.
pub async fn seed_catalog(pool: &PgPool) -> (i64, i64) {
    let complex_id: i64 = sqlx::query_scalar(
        "INSERT INTO residential_complexes (name, developer_name) \
         VALUES ('Северный парк', 'Группа Мост') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    let room_type_id: i64 = sqlx::query_scalar(
        "INSERT INTO room_types (complex_id, label, rooms) \
         VALUES ($1, '2-комнатная', 2) RETURNING id",
    )
    .bind(complex_id)
    .fetch_one(pool)
    .await
    .unwrap();

    (complex_id, room_type_id)
}
