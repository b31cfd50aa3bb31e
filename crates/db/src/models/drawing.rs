//! Drawing entity model and DTOs.

use drawreg_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A drawing row from the `drawings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Drawing {
    pub id: DbId,
    pub number: String,
    pub project_number: String,
    pub description: String,
    pub title: String,
    pub size: String,
    pub revision_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a drawing (always inside a category).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDrawing {
    pub number: String,
    #[serde(default)]
    pub project_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub size: String,
    /// Defaults to 0 if omitted.
    pub revision_count: Option<i32>,
}

/// DTO for updating an existing drawing. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDrawing {
    pub number: Option<String>,
    pub project_number: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub size: Option<String>,
    pub revision_count: Option<i32>,
}
