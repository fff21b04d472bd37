//! Handlers for the `/stories` resource: the edit and re-render loop over
//! individual variants.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use storyforge_core::error::CoreError;
use storyforge_core::lines::StoryLines;
use storyforge_core::render;
use storyforge_core::template::TemplateKey;
use storyforge_core::types::DbId;
use storyforge_db::models::story_variant::StoryVariant;
use storyforge_db::repositories::StoryVariantRepo;

use crate::error::AppResult;
use crate::extract::CurrentUser;
use crate::state::AppState;

/// Descriptor returned by the download endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadDescriptor {
    pub story_id: DbId,
    pub url: String,
    pub format: &'static str,
    pub size: &'static str,
}

/// Load a variant owned by the caller or return 404.
async fn find_owned(
    state: &AppState,
    user_id: DbId,
    id: DbId,
) -> Result<StoryVariant, crate::error::AppError> {
    Ok(StoryVariantRepo::find_owned(&state.pool, user_id, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Story", id))?)
}

/// PATCH /stories/{id}/lines
///
/// Persists edited copy without touching the rendered artifacts; the
/// caller re-renders explicitly when ready.
pub async fn update_lines(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<DbId>,
    Json(lines): Json<StoryLines>,
) -> AppResult<Json<StoryVariant>> {
    lines.validate()?;
    find_owned(&state, user_id, id).await?;

    let lines_json = serde_json::to_value(&lines)
        .map_err(|e| CoreError::Internal(format!("Failed to serialize story lines: {e}")))?;
    let variant = StoryVariantRepo::update_lines(&state.pool, id, &lines_json).await?;
    Ok(Json(variant))
}

/// POST /stories/{id}/render
///
/// Re-renders the current lines with the variant's original template and
/// points both URLs at the fresh artifact. The old artifact is orphaned.
pub async fn rerender(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<StoryVariant>> {
    let variant = find_owned(&state, user_id, id).await?;

    let template = TemplateKey::from_str(&variant.template_key)?;
    let lines = StoryLines::parse_untrusted(&variant.lines_json).ok_or_else(|| {
        CoreError::Internal(format!("Stored lines of story {id} are not valid"))
    })?;

    let png = render::render_png(&lines, template)?;
    let stored = state.store.save(&png).await?;
    let updated = StoryVariantRepo::update_urls(&state.pool, id, &stored.url).await?;
    tracing::info!(story_id = id, url = %stored.url, "Story re-rendered");
    Ok(Json(updated))
}

/// GET /stories/{id}/download
pub async fn download(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DownloadDescriptor>> {
    let variant = find_owned(&state, user_id, id).await?;
    Ok(Json(DownloadDescriptor {
        story_id: variant.id,
        url: variant.final_png_url,
        format: "png",
        size: render::IMAGE_SIZE,
    }))
}

/// GET /stories/recent
pub async fn recent(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> AppResult<Json<Vec<StoryVariant>>> {
    let variants = StoryVariantRepo::list_recent_for_user(&state.pool, user_id).await?;
    Ok(Json(variants))
}
