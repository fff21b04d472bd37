//! Route definitions for the `/generations` nest.
//!
//! ```text
//! POST /                              create_generation
//! GET  /limit                         today_limit
//! GET  /complexes                     list_complexes
//! GET  /complexes/{id}/room-types     list_room_types
//! GET  /{id}                          get_generation
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::generations;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(generations::create_generation))
        .route("/limit", get(generations::today_limit))
        .route("/complexes", get(generations::list_complexes))
        .route(
            "/complexes/{id}/room-types",
            get(generations::list_room_types),
        )
        .route("/{id}", get(generations::get_generation))
}
