//! HTTP-level integration tests for the admission path and its backing
//! reads: quota gating, input validation, and catalog lookups.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth, seed_catalog, seed_user};
use sqlx::PgPool;
use storyforge_db::repositories::JobRepo;

fn offer_body(complex_id: i64, room_type_id: i64) -> serde_json::Value {
    serde_json::json!({
        "complexId": complex_id,
        "roomTypeId": room_type_id,
        "offerText": "Рассрочка без первоначального взноса до конца года",
    })
}

// ---------------------------------------------------------------------------
// Admission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_generation_returns_queued_request(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = seed_user(&pool, "u@example.com", "FREE").await;
    let (complex_id, room_type_id) = seed_catalog(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json_auth(
        app,
        "/generations",
        user_id,
        offer_body(complex_id, room_type_id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "QUEUED");
    assert_eq!(json["userId"], user_id);
    assert!(json["error"].is_null());

    // Admission also enqueued a job carrying the generation id.
    let claimed = JobRepo::claim_next(&pool).await.unwrap();
    assert_eq!(claimed, Some(json["id"].as_i64().unwrap()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn short_offer_text_is_rejected(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = seed_user(&pool, "u@example.com", "FREE").await;
    let (complex_id, room_type_id) = seed_catalog(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let body = serde_json::json!({
        "complexId": complex_id,
        "roomTypeId": room_type_id,
        "offerText": "too short",
    });
    let response = post_json_auth(app, "/generations", user_id, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // Nothing was admitted or enqueued.
    assert_eq!(JobRepo::claim_next(&pool).await.unwrap(), None);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mismatched_room_type_is_rejected(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = seed_user(&pool, "u@example.com", "FREE").await;
    let (complex_id, _) = seed_catalog(&pool).await;
    let (_, other_room_type) = seed_catalog_named(&pool, "Речной квартал").await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json_auth(
        app,
        "/generations",
        user_id,
        offer_body(complex_id, other_room_type),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_user_header_is_unauthorized(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (complex_id, room_type_id) = seed_catalog(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri("/generations")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            offer_body(complex_id, room_type_id).to_string(),
        ))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sixth_admission_of_a_free_user_hits_quota(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = seed_user(&pool, "free@example.com", "FREE").await;
    let (complex_id, room_type_id) = seed_catalog(&pool).await;

    for _ in 0..5 {
        let app = common::build_test_app(pool.clone(), dir.path());
        let response = post_json_auth(
            app,
            "/generations",
            user_id,
            offer_body(complex_id, room_type_id),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json_auth(
        app,
        "/generations",
        user_id,
        offer_body(complex_id, room_type_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(response).await;
    assert_eq!(json["code"], "QUOTA_EXCEEDED");

    // The refused admission left no request behind.
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM generation_requests WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 5);
}

// ---------------------------------------------------------------------------
// Quota status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn limit_endpoint_counts_down_for_free_users(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = seed_user(&pool, "free@example.com", "FREE").await;
    let (complex_id, room_type_id) = seed_catalog(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json_auth(
        app,
        "/generations",
        user_id,
        offer_body(complex_id, room_type_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get_auth(app, "/generations/limit", user_id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["plan"], "FREE");
    assert_eq!(json["used"], 1);
    assert_eq!(json["total"], 5);
    assert_eq!(json["remaining"], 4);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn limit_endpoint_reports_unlimited_for_pro(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = seed_user(&pool, "pro@example.com", "PRO").await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get_auth(app, "/generations/limit", user_id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["plan"], "PRO");
    assert_eq!(json["total"], -1);
    assert_eq!(json["remaining"], -1);
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_generation_is_scoped_to_its_owner(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let owner = seed_user(&pool, "owner@example.com", "FREE").await;
    let stranger = seed_user(&pool, "stranger@example.com", "FREE").await;
    let (complex_id, room_type_id) = seed_catalog(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json_auth(
        app,
        "/generations",
        owner,
        offer_body(complex_id, room_type_id),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get_auth(app, &format!("/generations/{id}"), owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["variants"], serde_json::json!([]));

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get_auth(app, &format!("/generations/{id}"), stranger).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_endpoints_back_the_request_form(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (complex_id, room_type_id) = seed_catalog(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(app, "/generations/complexes").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Северный парк");

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(
        app,
        &format!("/generations/complexes/{complex_id}/room-types"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["id"], room_type_id);

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(app, "/generations/complexes/999999/room-types").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Seed a second complex with its own room type.
async fn seed_catalog_named(pool: &PgPool, name: &str) -> (i64, i64) {
    let complex_id: i64 = sqlx::query_scalar(
        "INSERT INTO residential_complexes (name, developer_name) \
         VALUES ($1, 'СтройИнвест') RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap();
    let room_type_id: i64 = sqlx::query_scalar(
        "INSERT INTO room_types (complex_id, label, rooms) \
         VALUES ($1, 'Студия', 0) RETURNING id",
    )
    .bind(complex_id)
    .fetch_one(pool)
    .await
    .unwrap();
    (complex_id, room_type_id)
}
