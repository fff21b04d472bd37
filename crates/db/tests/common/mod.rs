//! Shared seeding helpers for db integration tests.

#![allow(dead_code)]

use sqlx::PgPool;

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
