//! Generation request entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `generation_requests` table.
///
/// Created by the admission path with status `QUEUED`; mutated only by the
/// worker; never deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub complex_id: DbId,
    pub room_type_id: DbId,
    pub offer_text: String,
    /// `QUEUED` | `PROCESSING` | `DONE` | `FAILED`.
    pub status: String,
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /generations`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeneration {
    #[validate(range(min = 1, message = "complexId must be a positive id"))]
    pub complex_id: DbId,
    #[validate(range(min = 1, message = "roomTypeId must be a positive id"))]
    pub room_type_id: DbId,
    #[validate(length(min = 20, max = 500, message = "offerText must be 20-500 characters"))]
    pub offer_text: String,
}

/// Denormalized context the worker needs to run one job: the request plus
/// the copy inputs from its complex and room type.
#[derive(Debug, Clone, FromRow)]
pub struct GenerationJobContext {
    pub id: DbId,
    pub user_id: DbId,
    pub offer_text: String,
    pub status: String,
    pub room_label: String,
    pub complex_name: String,
    pub developer_name: String,
}
