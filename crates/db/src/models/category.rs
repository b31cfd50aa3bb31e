//! Category entity model and DTOs.

use drawreg_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::drawing::Drawing;

/// A category row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Ordered references into `drawings`.
    pub drawing_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category. New categories start with no drawings.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// DTO for updating a category's own fields. The drawing list is changed
/// only through the add / remove drawing operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A category with its drawing references resolved.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithDrawings {
    #[serde(flatten)]
    pub category: Category,
    pub drawings: Vec<Drawing>,
}
