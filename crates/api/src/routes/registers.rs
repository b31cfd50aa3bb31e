//! Route definitions for the `/registers` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::registers;
use crate::state::AppState;

/// Routes mounted at `/registers`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// POST   /{id}/categories                   -> add_categories
/// DELETE /{id}/categories/{category_id}     -> remove_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(registers::list).post(registers::create))
        .route(
            "/{id}",
            get(registers::get_by_id)
                .put(registers::update)
                .delete(registers::delete),
        )
        .route("/{id}/categories", post(registers::add_categories))
        .route(
            "/{id}/categories/{category_id}",
            delete(registers::remove_category),
        )
}
