//! Drawing reads that go through registers and categories.

use drawreg_core::error::CoreError;
use drawreg_core::references::resolve_in_order;
use drawreg_core::types::DbId;
use drawreg_core::validation::{validate_required, validate_revision_count};

use crate::error::StoreResult;
use crate::models::drawing::{CreateDrawing, Drawing, UpdateDrawing};
use crate::store::{CategoryStore, DrawingStore, RegisterStore};
use crate::Store;

/// Check the fields of a new drawing before anything is written.
pub fn validate_new_drawing(input: &CreateDrawing) -> Result<(), CoreError> {
    validate_required("number", &input.number)?;
    if let Some(revision_count) = input.revision_count {
        validate_revision_count(revision_count)?;
    }
    Ok(())
}

pub async fn get_drawing(store: &dyn Store, id: DbId) -> StoreResult<Drawing> {
    store
        .find_drawing(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Drawing", id).into())
}

pub async fn update_drawing(
    store: &dyn Store,
    id: DbId,
    input: &UpdateDrawing,
) -> StoreResult<Drawing> {
    if let Some(number) = &input.number {
        validate_required("number", number)?;
    }
    if let Some(revision_count) = input.revision_count {
        validate_revision_count(revision_count)?;
    }

    let drawing = store
        .update_drawing(id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("Drawing", id))?;

    tracing::info!(drawing_id = id, "Drawing updated");
    Ok(drawing)
}

/// Every drawing reachable from the registers of `project_number`, in
/// register, then category, then drawing-list order.
///
/// Dangling category or drawing references are skipped.
pub async fn drawings_for_project(
    store: &dyn Store,
    project_number: i64,
) -> StoreResult<Vec<Drawing>> {
    let registers = store.list_registers_by_project(project_number).await?;

    let category_ids: Vec<DbId> = registers
        .iter()
        .flat_map(|r| r.category_ids.iter().copied())
        .collect();
    let found = store.find_categories(&category_ids).await?;
    let categories = resolve_in_order(&category_ids, found, |c| c.id);

    let drawing_ids: Vec<DbId> = categories
        .iter()
        .flat_map(|c| c.drawing_ids.iter().copied())
        .collect();
    let found = store.find_drawings(&drawing_ids).await?;
    Ok(resolve_in_order(&drawing_ids, found, |d| d.id))
}
