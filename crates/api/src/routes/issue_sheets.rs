//! Route definitions for the `/issue-sheets` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::issue_sheets;
use crate::state::AppState;

/// Routes mounted at `/issue-sheets`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// POST   /{id}/drawings                     -> add_drawing
/// DELETE /{id}/drawings/{entry_id}          -> remove_drawing
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(issue_sheets::list).post(issue_sheets::create))
        .route(
            "/{id}",
            get(issue_sheets::get_by_id)
                .put(issue_sheets::update)
                .delete(issue_sheets::delete),
        )
        .route("/{id}/drawings", post(issue_sheets::add_drawing))
        .route(
            "/{id}/drawings/{entry_id}",
            delete(issue_sheets::remove_drawing),
        )
}
