use serde::Serialize;
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `generation_jobs` queue table.
///
/// Carries only the generation id; the worker always re-reads the
/// authoritative request state on dequeue.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedJob {
    pub id: DbId,
    pub generation_id: DbId,
    pub created_at: Timestamp,
}
