//! Handlers for the `/drawings` resource.
//!
//! Drawings are created and deleted through their category; here they can
//! only be read and edited.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use drawreg_core::types::DbId;
use drawreg_db::models::drawing::UpdateDrawing;
use drawreg_db::services::drawings;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::ok;
use crate::state::AppState;

/// Query parameters for `GET /drawings`.
#[derive(Debug, Deserialize)]
pub struct DrawingListParams {
    pub project_number: Option<i64>,
}

/// GET /api/v1/drawings?project_number=N
///
/// All drawings of all categories of all registers with that project number.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<DrawingListParams>,
) -> AppResult<impl IntoResponse> {
    let project_number = params
        .project_number
        .ok_or_else(|| AppError::BadRequest("project_number query parameter is required".into()))?;
    let drawings = drawings::drawings_for_project(state.store(), project_number).await?;
    Ok(ok(drawings))
}

/// GET /api/v1/drawings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let drawing = drawings::get_drawing(state.store(), id).await?;
    Ok(ok(drawing))
}

/// PUT /api/v1/drawings/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDrawing>,
) -> AppResult<impl IntoResponse> {
    let drawing = drawings::update_drawing(state.store(), id, &input).await?;
    Ok(ok(drawing))
}
