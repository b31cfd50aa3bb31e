pub mod categories;
pub mod drawings;
pub mod health;
pub mod issue_sheets;
pub mod registers;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /registers                                       list, create
/// /registers/{id}                                  get, update, delete
/// /registers/{id}/categories                       add categories (POST)
/// /registers/{id}/categories/{category_id}         remove category (DELETE)
///
/// /categories                                      list
/// /categories/{id}                                 get, update, delete
/// /categories/{id}/drawings                        add drawing (POST)
/// /categories/{id}/drawings/{drawing_id}           remove drawing (DELETE)
///
/// /drawings?project_number=N                       drawings of a project
/// /drawings/{id}                                   get, update
///
/// /issue-sheets                                    list, create
/// /issue-sheets/{id}                               get, update, delete
/// /issue-sheets/{id}/drawings                      issue drawing (POST)
/// /issue-sheets/{id}/drawings/{entry_id}           remove entry (DELETE)
///
/// /users                                           list, create
/// /users/me                                        current user (auth required)
/// /users/login                                     login (POST)
/// /users/refresh                                   refresh access token (POST)
/// /users/{id}                                      get, update (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/registers", registers::router())
        .nest("/categories", categories::router())
        .nest("/drawings", drawings::router())
        .nest("/issue-sheets", issue_sheets::router())
        .nest("/users", users::router())
}
