pub mod files;
pub mod generations;
pub mod health;
pub mod stories;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// /generations                            create (POST)
/// /generations/limit                      today's quota status
/// /generations/complexes                  active complexes
/// /generations/complexes/{id}/room-types  room types of a complex
/// /generations/{id}                       owned request with variants
///
/// /stories/recent                         20 most recent variants
/// /stories/{id}/lines                     edit copy (PATCH)
/// /stories/{id}/render                    re-render (POST)
/// /stories/{id}/download                  download descriptor
///
/// /files/{name}                           stored PNG bytes
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/generations", generations::router())
        .nest("/stories", stories::router())
        .merge(files::router())
}
