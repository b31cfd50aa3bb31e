//! Register entity model and DTOs.

use drawreg_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::{CategoryWithDrawings, CreateCategory};

/// A register row from the `registers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Register {
    pub id: DbId,
    pub project_name: String,
    pub project_number: i64,
    pub discipline: String,
    pub engineers: Vec<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// Ordered references into `categories`.
    pub category_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category supplied inline with a register create or update.
///
/// Accepts a bare title (`"Electrical"`), a full category object, or the id
/// of a category that already exists.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InlineCategory {
    Existing(DbId),
    Title(String),
    New(CreateCategory),
}

/// DTO for creating a register.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRegister {
    #[serde(default)]
    pub project_name: String,
    pub project_number: i64,
    #[serde(default)]
    pub discipline: String,
    #[serde(default)]
    pub engineers: Vec<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[serde(default)]
    pub categories: Vec<InlineCategory>,
}

/// DTO for updating a register. All fields are optional.
///
/// `categories` is additive: anything listed is placed in front of the
/// register's existing category references.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRegister {
    pub project_name: Option<String>,
    pub project_number: Option<i64>,
    pub discipline: Option<String>,
    pub engineers: Option<Vec<String>>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[serde(default)]
    pub categories: Vec<InlineCategory>,
}

/// Request body for adding categories to an existing register: a single
/// category object or an array of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryBatch {
    One(CreateCategory),
    Many(Vec<CreateCategory>),
}

impl CategoryBatch {
    pub fn into_vec(self) -> Vec<CreateCategory> {
        match self {
            Self::One(category) => vec![category],
            Self::Many(categories) => categories,
        }
    }
}

/// A register with categories (and their drawings) resolved.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterWithCategories {
    #[serde(flatten)]
    pub register: Register,
    pub categories: Vec<CategoryWithDrawings>,
}
