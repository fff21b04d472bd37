use serde::Serialize;
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `residential_complexes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentialComplex {
    pub id: DbId,
    pub name: String,
    pub developer_name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}
