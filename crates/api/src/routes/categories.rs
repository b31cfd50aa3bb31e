//! Route definitions for the `/categories` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// Categories are created through their register, so there is no `POST /`.
///
/// ```text
/// GET    /                                  -> list
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// POST   /{id}/drawings                     -> add_drawing
/// DELETE /{id}/drawings/{drawing_id}        -> remove_drawing
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list))
        .route(
            "/{id}",
            get(categories::get_by_id)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route("/{id}/drawings", post(categories::add_drawing))
        .route(
            "/{id}/drawings/{drawing_id}",
            delete(categories::remove_drawing),
        )
}
