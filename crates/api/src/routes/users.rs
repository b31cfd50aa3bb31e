//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /me                                -> me (auth required)
/// POST   /login                             -> login
/// POST   /refresh                           -> refresh
/// GET    /{id}                              -> get_by_id
/// PATCH  /{id}                              -> update
/// DELETE /{id}                              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/me", get(users::me))
        .route("/login", post(users::login))
        .route("/refresh", post(users::refresh))
        .route(
            "/{id}",
            get(users::get_by_id)
                .patch(users::update)
                .delete(users::delete),
        )
}
