use serde::Serialize;
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// Account issuance and authentication are external collaborators; this
/// layer only needs the subscription plan for quota gating.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub email: String,
    /// `FREE` or `PRO`; parse via `storyforge_core::quota::Plan`.
    pub plan: String,
    pub created_at: Timestamp,
}
