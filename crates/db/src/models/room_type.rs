use serde::Serialize;
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `room_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub id: DbId,
    pub complex_id: DbId,
    /// Human-readable label used in generated copy, e.g. `2-комнатная`.
    pub label: String,
    pub rooms: i32,
    pub created_at: Timestamp,
}
