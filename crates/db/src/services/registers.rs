//! Register reads with categories resolved, inline category creation, and
//! the register-category glue.

use std::collections::HashMap;

use drawreg_core::error::CoreError;
use drawreg_core::references::RefPosition;
use drawreg_core::types::DbId;
use drawreg_core::validation::{validate_date_range, validate_required};

use crate::error::StoreResult;
use crate::models::category::{CategoryWithDrawings, CreateCategory};
use crate::models::register::{
    CreateRegister, InlineCategory, Register, RegisterWithCategories, UpdateRegister,
};
use crate::services::categories::populate_categories;
use crate::store::{CategoryStore, RegisterStore};
use crate::Store;

/// Turn inline category data into category ids, in request order.
///
/// Titles are checked and existing ids looked up before anything is
/// created, so a bad entry does not leave half the batch behind. An existing
/// id already in `attached`, or repeated within `inline`, is dropped.
pub async fn resolve_inline_categories(
    store: &dyn Store,
    inline: &[InlineCategory],
    attached: &[DbId],
) -> StoreResult<Vec<DbId>> {
    for entry in inline {
        match entry {
            InlineCategory::Existing(id) => {
                if store.find_category(*id).await?.is_none() {
                    return Err(CoreError::not_found("Category", id).into());
                }
            }
            InlineCategory::Title(title) => validate_required("title", title)?,
            InlineCategory::New(category) => validate_required("title", &category.title)?,
        }
    }

    let mut ids = Vec::with_capacity(inline.len());
    for entry in inline {
        let id = match entry {
            InlineCategory::Existing(id) => {
                if attached.contains(id) || ids.contains(id) {
                    continue;
                }
                *id
            }
            InlineCategory::Title(title) => {
                let input = CreateCategory {
                    title: title.clone(),
                    description: String::new(),
                };
                store.create_category(&input).await?.id
            }
            InlineCategory::New(input) => store.create_category(input).await?.id,
        };
        ids.push(id);
    }
    Ok(ids)
}

/// Resolve the categories (and their drawings) of several registers.
pub async fn populate_registers(
    store: &dyn Store,
    registers: Vec<Register>,
) -> StoreResult<Vec<RegisterWithCategories>> {
    let category_ids: Vec<DbId> = registers
        .iter()
        .flat_map(|r| r.category_ids.iter().copied())
        .collect();
    let categories = store.find_categories(&category_ids).await?;
    let by_id: HashMap<DbId, CategoryWithDrawings> = populate_categories(store, categories)
        .await?
        .into_iter()
        .map(|c| (c.category.id, c))
        .collect();

    Ok(registers
        .into_iter()
        .map(|register| {
            let categories = register
                .category_ids
                .iter()
                .filter_map(|id| by_id.get(id).cloned())
                .collect();
            RegisterWithCategories {
                register,
                categories,
            }
        })
        .collect())
}

async fn require_register(store: &dyn Store, id: DbId) -> StoreResult<Register> {
    store
        .find_register(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Register", id).into())
}

pub async fn get_register(store: &dyn Store, id: DbId) -> StoreResult<RegisterWithCategories> {
    let register = require_register(store, id).await?;
    let mut populated = populate_registers(store, vec![register]).await?;
    populated
        .pop()
        .ok_or_else(|| CoreError::Internal("populated register missing".into()).into())
}

pub async fn list_registers(store: &dyn Store) -> StoreResult<Vec<RegisterWithCategories>> {
    let registers = store.list_registers().await?;
    populate_registers(store, registers).await
}

/// Create a register, persisting any inline categories first.
pub async fn create_register(store: &dyn Store, input: &CreateRegister) -> StoreResult<Register> {
    validate_date_range(input.start_date, input.end_date)?;

    let category_ids = resolve_inline_categories(store, &input.categories, &[]).await?;
    let register = store.create_register(input, &category_ids).await?;

    tracing::info!(
        register_id = register.id,
        project_number = register.project_number,
        categories = category_ids.len(),
        "Register created"
    );
    Ok(register)
}

/// Update a register's fields. Inline categories are created and placed in
/// front of the existing ones; nothing already referenced is removed.
pub async fn update_register(
    store: &dyn Store,
    id: DbId,
    input: &UpdateRegister,
) -> StoreResult<Register> {
    let current = require_register(store, id).await?;
    validate_date_range(
        input.start_date.or(current.start_date),
        input.end_date.or(current.end_date),
    )?;

    let new_ids =
        resolve_inline_categories(store, &input.categories, &current.category_ids).await?;

    let mut register = store
        .update_register(id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("Register", id))?;
    if !new_ids.is_empty() {
        register = store
            .attach_category_refs(id, &new_ids, RefPosition::Front)
            .await?
            .ok_or_else(|| CoreError::not_found("Register", id))?;
    }

    tracing::info!(
        register_id = id,
        new_categories = new_ids.len(),
        "Register updated"
    );
    Ok(register)
}

/// Create categories and append them to the register's list.
pub async fn add_categories(
    store: &dyn Store,
    register_id: DbId,
    categories: &[CreateCategory],
) -> StoreResult<Register> {
    for category in categories {
        validate_required("title", &category.title)?;
    }
    require_register(store, register_id).await?;

    let mut ids = Vec::with_capacity(categories.len());
    for category in categories {
        ids.push(store.create_category(category).await?.id);
    }

    let register = store
        .attach_category_refs(register_id, &ids, RefPosition::Back)
        .await?
        .ok_or_else(|| CoreError::not_found("Register", register_id))?;

    tracing::info!(register_id, added = ids.len(), "Categories added to register");
    Ok(register)
}

/// Detach a category from the register, then delete the category.
///
/// A category that another register still lists is only detached.
pub async fn remove_category(
    store: &dyn Store,
    register_id: DbId,
    category_id: DbId,
) -> StoreResult<Register> {
    let register = require_register(store, register_id).await?;
    if !register.category_ids.contains(&category_id) {
        return Err(CoreError::not_found("Category", category_id).into());
    }

    let register = store
        .detach_category_ref(register_id, category_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Register", register_id))?;

    let still_listed = store.list_registers_referencing(category_id).await?;
    if still_listed.is_empty() {
        store.delete_category(category_id).await?;
        tracing::info!(register_id, category_id, "Category removed from register");
    } else {
        tracing::info!(
            register_id,
            category_id,
            other_registers = still_listed.len(),
            "Category detached from register; kept for other registers"
        );
    }
    Ok(register)
}

/// Delete a register. Its categories and their drawings are kept.
pub async fn delete_register(store: &dyn Store, id: DbId) -> StoreResult<()> {
    if !store.delete_register(id).await? {
        return Err(CoreError::not_found("Register", id).into());
    }
    tracing::info!(register_id = id, "Register deleted");
    Ok(())
}
