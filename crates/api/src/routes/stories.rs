//! Route definitions for the `/stories` nest.
//!
//! ```text
//! GET   /recent          recent
//! PATCH /{id}/lines      update_lines
//! POST  /{id}/render     rerender
//! GET   /{id}/download   download
//! ```

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::stories;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recent", get(stories::recent))
        .route("/{id}/lines", patch(stories::update_lines))
        .route("/{id}/render", post(stories::rerender))
        .route("/{id}/download", get(stories::download))
}
