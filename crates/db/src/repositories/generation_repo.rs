//! Repository for the `generation_requests` table.
//!
//! Status transitions go through [`GenerationStatus`] constants and are
//! conditional where concurrency demands it: `mark_processing` is a
//! compare-and-swap on `QUEUED` so a duplicate dequeue of the same
//! generation becomes a safe no-op.

use sqlx::PgPool;
use storyforge_core::types::DbId;

use crate::models::generation::{CreateGeneration, GenerationJobContext, GenerationRequest};
use crate::models::status::GenerationStatus;

/// Column list for `generation_requests` queries.
const COLUMNS: &str = "\
    id, user_id, complex_id, room_type_id, offer_text, \
    status, error, created_at, updated_at";

/// Provides CRUD and state-machine operations for generation requests.
pub struct GenerationRepo;

impl GenerationRepo {
    /// Persist a new request in `QUEUED` state.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateGeneration,
    ) -> Result<GenerationRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO generation_requests \
                 (user_id, complex_id, room_type_id, offer_text, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenerationRequest>(&query)
            .bind(user_id)
            .bind(input.complex_id)
            .bind(input.room_type_id)
            .bind(&input.offer_text)
            .bind(GenerationStatus::Queued.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a request by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GenerationRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generation_requests WHERE id = $1");
        sqlx::query_as::<_, GenerationRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a request only if it is owned by `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<GenerationRequest>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM generation_requests WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, GenerationRequest>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Load the request together with the copy inputs from its complex and
    /// room type. `None` means the request was deleted out-of-band and the
    /// job should be dropped silently.
    pub async fn load_job_context(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GenerationJobContext>, sqlx::Error> {
        sqlx::query_as::<_, GenerationJobContext>(
            "SELECT g.id, g.user_id, g.offer_text, g.status, \
                    rt.label AS room_label, \
                    rc.name AS complex_name, rc.developer_name \
             FROM generation_requests g \
             JOIN residential_complexes rc ON rc.id = g.complex_id \
             JOIN room_types rt ON rt.id = g.room_type_id \
             WHERE g.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Compare-and-swap `QUEUED -> PROCESSING`, clearing any prior error.
    ///
    /// Returns `false` when the request was not in `QUEUED` state — either
    /// another worker already claimed it or it has finished; the caller
    /// must treat that as a no-op.
    pub async fn mark_processing(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE generation_requests \
             SET status = $2, error = NULL, updated_at = NOW() \
             WHERE id = $1 AND status = $3",
        )
        .bind(id)
        .bind(GenerationStatus::Processing.as_str())
        .bind(GenerationStatus::Queued.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Transition to terminal `DONE`.
    pub async fn complete(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE generation_requests SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(GenerationStatus::Done.as_str())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Transition to terminal `FAILED`, recording the error message.
    ///
    /// No automatic retry happens; `status` and `error` are the only
    /// failure channel visible to the user.
    pub async fn fail(pool: &PgPool, id: DbId, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE generation_requests \
             SET status = $2, error = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(GenerationStatus::Failed.as_str())
        .bind(error)
        .execute(pool)
        .await?;
        Ok(())
    }
}
