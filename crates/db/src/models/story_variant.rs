//! Story variant entity.

use serde::Serialize;
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `story_variants` table: one rendered result for a fixed
/// template key.
///
/// Bulk-created (6 rows) by the worker on success; individually mutated by
/// the story editor; bulk-deleted at the start of any (re)processing of the
/// owning request, so regeneration is idempotent.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryVariant {
    pub id: DbId,
    pub generation_request_id: DbId,
    /// `T1`..`T6`; exactly one variant per key per generation.
    pub template_key: String,
    /// A `StoryLines` value, validated before every write.
    pub lines_json: serde_json::Value,
    pub preview_png_url: String,
    pub final_png_url: String,
    pub created_at: Timestamp,
}
