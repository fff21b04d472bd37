//! Handlers for the `/generations` resource: admission, quota status, and
//! the thin reads backing the request form.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use storyforge_core::error::CoreError;
use storyforge_core::quota::{self, Plan, QuotaStatus, UNLIMITED};
use storyforge_core::types::DbId;
use storyforge_db::models::complex::ResidentialComplex;
use storyforge_db::models::generation::{CreateGeneration, GenerationRequest};
use storyforge_db::models::room_type::RoomType;
use storyforge_db::models::story_variant::StoryVariant;
use storyforge_db::repositories::{
    ComplexRepo, GenerationRepo, JobRepo, RoomTypeRepo, StoryVariantRepo, UsageRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::extract::CurrentUser;
use crate::state::AppState;

/// A generation request together with its rendered variants.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationWithVariants {
    #[serde(flatten)]
    pub request: GenerationRequest,
    pub variants: Vec<StoryVariant>,
}

/// Resolve the caller's subscription plan.
async fn resolve_plan(state: &AppState, user_id: DbId) -> Result<Plan, AppError> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(format!("Unknown user {user_id}")))?;
    Ok(Plan::from_str(&user.plan)?)
}

/// POST /generations
///
/// Admission: validate the input, take a quota slot atomically, persist
/// the request in `QUEUED` state, and enqueue a job for the worker. A
/// refused reservation leaves no side effects behind.
pub async fn create_generation(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(input): Json<CreateGeneration>,
) -> AppResult<(StatusCode, Json<GenerationRequest>)> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    RoomTypeRepo::find_for_complex(&state.pool, input.room_type_id, input.complex_id)
        .await?
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Room type {} does not belong to complex {}",
                input.room_type_id, input.complex_id
            ))
        })?;

    let plan = resolve_plan(&state, user_id).await?;
    let day = quota::current_business_day();
    let cap = match plan.daily_limit() {
        UNLIMITED => None,
        limit => Some(limit),
    };
    if !UsageRepo::reserve(&state.pool, user_id, day, cap).await? {
        return Err(CoreError::QuotaExceeded.into());
    }

    let request = GenerationRepo::create(&state.pool, user_id, &input).await?;
    JobRepo::enqueue(&state.pool, request.id).await?;
    tracing::info!(
        generation_id = request.id,
        user_id,
        plan = plan.as_str(),
        "Generation admitted",
    );

    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /generations/limit
pub async fn today_limit(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> AppResult<Json<QuotaStatus>> {
    let plan = resolve_plan(&state, user_id).await?;
    let day = quota::current_business_day();
    let used = UsageRepo::used_on(&state.pool, user_id, day).await?;
    Ok(Json(QuotaStatus::new(plan, used)))
}

/// GET /generations/{id}
///
/// Ownership failures are indistinguishable from missing ids.
pub async fn get_generation(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<GenerationWithVariants>> {
    let request = GenerationRepo::find_owned(&state.pool, user_id, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Generation", id))?;
    let variants = StoryVariantRepo::list_for_generation(&state.pool, id).await?;
    Ok(Json(GenerationWithVariants { request, variants }))
}

/// GET /generations/complexes
pub async fn list_complexes(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ResidentialComplex>>> {
    let complexes = ComplexRepo::list_active(&state.pool).await?;
    Ok(Json(complexes))
}

/// GET /generations/complexes/{id}/room-types
pub async fn list_room_types(
    State(state): State<AppState>,
    Path(complex_id): Path<DbId>,
) -> AppResult<Json<Vec<RoomType>>> {
    ComplexRepo::find_by_id(&state.pool, complex_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Complex", complex_id))?;
    let room_types = RoomTypeRepo::list_by_complex(&state.pool, complex_id).await?;
    Ok(Json(room_types))
}
