//! Category reads with their drawings, and the category-drawing glue.

use std::collections::HashMap;

use drawreg_core::error::CoreError;
use drawreg_core::types::DbId;
use drawreg_core::validation::validate_required;

use crate::error::StoreResult;
use crate::models::category::{Category, CategoryWithDrawings, UpdateCategory};
use crate::models::drawing::{CreateDrawing, Drawing};
use crate::services::drawings::validate_new_drawing;
use crate::store::{CategoryStore, DrawingStore, RegisterStore};
use crate::Store;

/// Resolve the drawing lists of several categories with one drawing fetch.
pub async fn populate_categories(
    store: &dyn Store,
    categories: Vec<Category>,
) -> StoreResult<Vec<CategoryWithDrawings>> {
    let drawing_ids: Vec<DbId> = categories
        .iter()
        .flat_map(|c| c.drawing_ids.iter().copied())
        .collect();
    let by_id: HashMap<DbId, Drawing> = store
        .find_drawings(&drawing_ids)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();

    Ok(categories
        .into_iter()
        .map(|category| {
            let drawings = category
                .drawing_ids
                .iter()
                .filter_map(|id| by_id.get(id).cloned())
                .collect();
            CategoryWithDrawings { category, drawings }
        })
        .collect())
}

pub async fn get_category(store: &dyn Store, id: DbId) -> StoreResult<CategoryWithDrawings> {
    let category = store
        .find_category(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Category", id))?;
    let mut populated = populate_categories(store, vec![category]).await?;
    populated
        .pop()
        .ok_or_else(|| CoreError::Internal("populated category missing".into()).into())
}

pub async fn list_categories(store: &dyn Store) -> StoreResult<Vec<CategoryWithDrawings>> {
    let categories = store.list_categories().await?;
    populate_categories(store, categories).await
}

pub async fn update_category(
    store: &dyn Store,
    id: DbId,
    input: &UpdateCategory,
) -> StoreResult<Category> {
    if let Some(title) = &input.title {
        validate_required("title", title)?;
    }
    let category = store
        .update_category(id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("Category", id))?;

    tracing::info!(category_id = id, "Category updated");
    Ok(category)
}

/// Create a drawing and append it to the category's drawing list.
///
/// Returns the updated category and the new drawing.
pub async fn add_drawing(
    store: &dyn Store,
    category_id: DbId,
    input: &CreateDrawing,
) -> StoreResult<(Category, Drawing)> {
    validate_new_drawing(input)?;
    if store.find_category(category_id).await?.is_none() {
        return Err(CoreError::not_found("Category", category_id).into());
    }

    let drawing = store.create_drawing(input).await?;

    // The category can vanish between the check and the append; the drawing
    // is then an orphan.
    let category = store
        .attach_drawing_ref(category_id, drawing.id)
        .await?
        .ok_or_else(|| CoreError::not_found("Category", category_id))?;

    tracing::info!(
        category_id,
        drawing_id = drawing.id,
        "Drawing added to category"
    );
    Ok((category, drawing))
}

/// Detach a drawing from the category, then delete the drawing.
pub async fn remove_drawing(
    store: &dyn Store,
    category_id: DbId,
    drawing_id: DbId,
) -> StoreResult<Category> {
    let category = store
        .find_category(category_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Category", category_id))?;
    if !category.drawing_ids.contains(&drawing_id) {
        return Err(CoreError::not_found("Drawing", drawing_id).into());
    }

    let category = store
        .detach_drawing_ref(category_id, drawing_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Category", category_id))?;
    store.delete_drawing(drawing_id).await?;

    tracing::info!(category_id, drawing_id, "Drawing removed from category");
    Ok(category)
}

/// Delete a category after detaching it from every register that lists it.
///
/// The category's drawings are left in place.
pub async fn delete_category(store: &dyn Store, id: DbId) -> StoreResult<()> {
    if store.find_category(id).await?.is_none() {
        return Err(CoreError::not_found("Category", id).into());
    }

    let registers = store.list_registers_referencing(id).await?;
    for register in &registers {
        store.detach_category_ref(register.id, id).await?;
    }
    store.delete_category(id).await?;

    tracing::info!(
        category_id = id,
        detached_from = registers.len(),
        "Category deleted"
    );
    Ok(())
}
