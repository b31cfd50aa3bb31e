//! Route definitions for the `/drawings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::drawings;
use crate::state::AppState;

/// Routes mounted at `/drawings`.
///
/// ```text
/// GET    /?project_number=N                 -> list
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(drawings::list))
        .route("/{id}", get(drawings::get_by_id).put(drawings::update))
}
