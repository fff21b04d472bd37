use serde::Serialize;
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `usage_daily` table: one generation counter per user per
/// business day. Incremented atomically on admission; never decremented.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageDaily {
    pub user_id: DbId,
    /// Start of the business day (00:00 in UTC+3, stored as a UTC instant).
    pub date: Timestamp,
    pub count: i32,
}
