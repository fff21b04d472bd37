//! Handler serving stored artifacts.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /files/{name}
///
/// Streams a stored PNG. Name validation and the 404 mapping live in the
/// artifact store.
pub async fn get_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let bytes = state.store.read(&name).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}
