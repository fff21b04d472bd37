//! Route definitions for stored artifact serving.

use axum::routing::get;
use axum::Router;

use crate::handlers::files;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/files/{name}", get(files::get_file))
}
