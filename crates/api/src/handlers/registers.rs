//! Handlers for the `/registers` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use drawreg_core::types::DbId;
use drawreg_db::models::register::{CategoryBatch, CreateRegister, UpdateRegister};
use drawreg_db::services::registers;

use crate::error::AppResult;
use crate::response::{created, ok};
use crate::state::AppState;

/// POST /api/v1/registers
///
/// Create a register. Inline categories are created first and referenced.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRegister>,
) -> AppResult<impl IntoResponse> {
    let register = registers::create_register(state.store(), &input).await?;
    Ok(created(register))
}

/// GET /api/v1/registers
///
/// List all registers with categories and drawings resolved.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let registers = registers::list_registers(state.store()).await?;
    Ok(ok(registers))
}

/// GET /api/v1/registers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let register = registers::get_register(state.store(), id).await?;
    Ok(ok(register))
}

/// PUT /api/v1/registers/{id}
///
/// Update register fields. Inline categories are added in front of the
/// existing ones.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRegister>,
) -> AppResult<impl IntoResponse> {
    let register = registers::update_register(state.store(), id, &input).await?;
    Ok(ok(register))
}

/// DELETE /api/v1/registers/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    registers::delete_register(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/registers/{id}/categories
///
/// Create one or more categories and append them to the register.
pub async fn add_categories(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CategoryBatch>,
) -> AppResult<impl IntoResponse> {
    let categories = input.into_vec();
    let register = registers::add_categories(state.store(), id, &categories).await?;
    Ok(created(register))
}

/// DELETE /api/v1/registers/{id}/categories/{category_id}
///
/// Detach the category from the register, then delete it.
pub async fn remove_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let register = registers::remove_category(state.store(), id, category_id).await?;
    Ok(ok(register))
}
