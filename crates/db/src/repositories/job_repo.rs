//! Repository for the `generation_jobs` durable queue.
//!
//! Claiming uses `FOR UPDATE SKIP LOCKED` so concurrent workers never
//! double-dispatch a job; the generation-level compare-and-swap in
//! `GenerationRepo::mark_processing` covers the remaining duplicate-id
//! window.

use sqlx::PgPool;
use storyforge_core::types::DbId;

use crate::models::job::QueuedJob;

/// Column list for `generation_jobs` queries.
const COLUMNS: &str = "id, generation_id, created_at";

/// Durable job queue operations.
pub struct JobRepo;

impl JobRepo {
    /// Enqueue a job carrying only the generation id.
    pub async fn enqueue(pool: &PgPool, generation_id: DbId) -> Result<QueuedJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO generation_jobs (generation_id) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QueuedJob>(&query)
            .bind(generation_id)
            .fetch_one(pool)
            .await
    }

    /// Atomically claim and remove the oldest queued job.
    ///
    /// Returns the generation id to process, or `None` when the queue is
    /// empty. Safe under concurrent workers.
    pub async fn claim_next(pool: &PgPool) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "DELETE FROM generation_jobs \
             WHERE id = ( \
                 SELECT id FROM generation_jobs \
                 ORDER BY created_at ASC, id ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING generation_id",
        )
        .fetch_optional(pool)
        .await
    }
}
