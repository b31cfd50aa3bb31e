//! Handlers for the `/issue-sheets` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use drawreg_core::types::DbId;
use drawreg_db::models::issue_sheet::{CreateIssueSheet, IssueDrawingRequest, UpdateIssueSheet};
use drawreg_db::services::issue_sheets;
use uuid::Uuid;

use crate::error::AppResult;
use crate::response::{created, ok};
use crate::state::AppState;

/// POST /api/v1/issue-sheets
///
/// Create an issue sheet. The sequence number is allocated server-side.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateIssueSheet>,
) -> AppResult<impl IntoResponse> {
    let sheet = issue_sheets::create_issue_sheet(state.store(), &input).await?;
    Ok(created(sheet))
}

/// GET /api/v1/issue-sheets
///
/// Newest first, with drawings resolved.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let sheets = issue_sheets::list_issue_sheets(state.store()).await?;
    Ok(ok(sheets))
}

/// GET /api/v1/issue-sheets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sheet = issue_sheets::get_issue_sheet(state.store(), id).await?;
    Ok(ok(sheet))
}

/// PUT /api/v1/issue-sheets/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIssueSheet>,
) -> AppResult<impl IntoResponse> {
    let sheet = issue_sheets::update_issue_sheet(state.store(), id, &input).await?;
    Ok(ok(sheet))
}

/// DELETE /api/v1/issue-sheets/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    issue_sheets::delete_issue_sheet(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/issue-sheets/{id}/drawings
///
/// Issue copies of a drawing; repeats add to the existing entry.
pub async fn add_drawing(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<IssueDrawingRequest>,
) -> AppResult<impl IntoResponse> {
    let sheet =
        issue_sheets::add_drawing(state.store(), id, input.drawing_id, input.copies).await?;
    Ok(ok(sheet))
}

/// DELETE /api/v1/issue-sheets/{id}/drawings/{entry_id}
pub async fn remove_drawing(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(DbId, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let sheet = issue_sheets::remove_drawing(state.store(), id, entry_id).await?;
    Ok(ok(sheet))
}
