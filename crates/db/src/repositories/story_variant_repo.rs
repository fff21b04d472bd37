//! Repository for the `story_variants` table.

use sqlx::PgPool;
use storyforge_core::types::DbId;

use crate::models::story_variant::StoryVariant;

/// Column list for `story_variants` queries.
const COLUMNS: &str = "\
    id, generation_request_id, template_key, lines_json, \
    preview_png_url, final_png_url, created_at";

/// Same columns qualified with the `v` alias for joined queries.
const V_COLUMNS: &str = "\
    v.id, v.generation_request_id, v.template_key, v.lines_json, \
    v.preview_png_url, v.final_png_url, v.created_at";

/// Number of recent variants returned by the dashboard feed.
const RECENT_LIMIT: i64 = 20;

/// Provides CRUD operations for story variants.
pub struct StoryVariantRepo;

impl StoryVariantRepo {
    /// Insert one rendered variant. Preview and final URL start out equal.
    pub async fn insert(
        pool: &PgPool,
        generation_request_id: DbId,
        template_key: &str,
        lines_json: &serde_json::Value,
        url: &str,
    ) -> Result<StoryVariant, sqlx::Error> {
        let query = format!(
            "INSERT INTO story_variants \
                 (generation_request_id, template_key, lines_json, \
                  preview_png_url, final_png_url) \
             VALUES ($1, $2, $3, $4, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryVariant>(&query)
            .bind(generation_request_id)
            .bind(template_key)
            .bind(lines_json)
            .bind(url)
            .fetch_one(pool)
            .await
    }

    /// Delete every variant of a request. Regeneration clears prior
    /// variants, which is what keeps reprocessing idempotent.
    pub async fn delete_for_generation(
        pool: &PgPool,
        generation_request_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM story_variants WHERE generation_request_id = $1")
            .bind(generation_request_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// List a request's variants in template order.
    pub async fn list_for_generation(
        pool: &PgPool,
        generation_request_id: DbId,
    ) -> Result<Vec<StoryVariant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM story_variants \
             WHERE generation_request_id = $1 \
             ORDER BY template_key"
        );
        sqlx::query_as::<_, StoryVariant>(&query)
            .bind(generation_request_id)
            .fetch_all(pool)
            .await
    }

    /// Find a variant only if its parent request is owned by `user_id`.
    ///
    /// Ownership failures are indistinguishable from missing ids.
    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<StoryVariant>, sqlx::Error> {
        let query = format!(
            "SELECT {V_COLUMNS} FROM story_variants v \
             JOIN generation_requests g ON g.id = v.generation_request_id \
             WHERE v.id = $1 AND g.user_id = $2"
        );
        sqlx::query_as::<_, StoryVariant>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a variant's copy lines without touching its artifacts.
    pub async fn update_lines(
        pool: &PgPool,
        id: DbId,
        lines_json: &serde_json::Value,
    ) -> Result<StoryVariant, sqlx::Error> {
        let query = format!(
            "UPDATE story_variants SET lines_json = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryVariant>(&query)
            .bind(id)
            .bind(lines_json)
            .fetch_one(pool)
            .await
    }

    /// Point both URLs at a freshly rendered artifact. The old artifact
    /// becomes an orphan; no cleanup is performed.
    pub async fn update_urls(
        pool: &PgPool,
        id: DbId,
        url: &str,
    ) -> Result<StoryVariant, sqlx::Error> {
        let query = format!(
            "UPDATE story_variants \
             SET preview_png_url = $2, final_png_url = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryVariant>(&query)
            .bind(id)
            .bind(url)
            .fetch_one(pool)
            .await
    }

    /// The user's most recent variants across all their generations.
    pub async fn list_recent_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<StoryVariant>, sqlx::Error> {
        let query = format!(
            "SELECT {V_COLUMNS} FROM story_variants v \
             JOIN generation_requests g ON g.id = v.generation_request_id \
             WHERE g.user_id = $1 \
             ORDER BY v.created_at DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, StoryVariant>(&query)
            .bind(user_id)
            .bind(RECENT_LIMIT)
            .fetch_all(pool)
            .await
    }
}
