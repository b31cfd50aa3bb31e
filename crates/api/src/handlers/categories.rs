//! Handlers for the `/categories` resource and the drawings inside a category.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use drawreg_core::types::DbId;
use drawreg_db::models::category::{Category, UpdateCategory};
use drawreg_db::models::drawing::{CreateDrawing, Drawing};
use drawreg_db::services::categories;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::{created, ok};
use crate::state::AppState;

/// Response for `POST /categories/{id}/drawings`.
#[derive(Debug, Serialize)]
pub struct DrawingAdded {
    pub category: Category,
    pub drawing: Drawing,
}

/// GET /api/v1/categories
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = categories::list_categories(state.store()).await?;
    Ok(ok(categories))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = categories::get_category(state.store(), id).await?;
    Ok(ok(category))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    let category = categories::update_category(state.store(), id, &input).await?;
    Ok(ok(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Detaches the category from every register before deleting it.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    categories::delete_category(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/categories/{id}/drawings
///
/// Create a drawing and append it to the category.
pub async fn add_drawing(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateDrawing>,
) -> AppResult<impl IntoResponse> {
    let (category, drawing) = categories::add_drawing(state.store(), id, &input).await?;
    Ok(created(DrawingAdded { category, drawing }))
}

/// DELETE /api/v1/categories/{id}/drawings/{drawing_id}
///
/// Detach the drawing from the category, then delete it.
pub async fn remove_drawing(
    State(state): State<AppState>,
    Path((id, drawing_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let category = categories::remove_drawing(state.store(), id, drawing_id).await?;
    Ok(ok(category))
}
