//! Repository for the `drawings` table.

use drawreg_core::types::DbId;
use sqlx::PgPool;

use crate::models::drawing::{CreateDrawing, Drawing, UpdateDrawing};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, number, project_number, description, title, size, \
    revision_count, created_at, updated_at";

/// Provides CRUD operations for drawings.
pub struct DrawingRepo;

impl DrawingRepo {
    /// Insert a new drawing, returning the created row.
    ///
    /// If `revision_count` is `None` in the input, defaults to 0.
    pub async fn create(pool: &PgPool, input: &CreateDrawing) -> Result<Drawing, sqlx::Error> {
        let query = format!(
            "INSERT INTO drawings (number, project_number, description, title, size, revision_count)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Drawing>(&query)
            .bind(&input.number)
            .bind(&input.project_number)
            .bind(&input.description)
            .bind(&input.title)
            .bind(&input.size)
            .bind(input.revision_count)
            .fetch_one(pool)
            .await
    }

    /// Find a drawing by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Drawing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drawings WHERE id = $1");
        sqlx::query_as::<_, Drawing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find every drawing whose id is in `ids`. Missing ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Drawing>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM drawings WHERE id = ANY($1)");
        sqlx::query_as::<_, Drawing>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Update a drawing. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDrawing,
    ) -> Result<Option<Drawing>, sqlx::Error> {
        let query = format!(
            "UPDATE drawings SET
                number = COALESCE($2, number),
                project_number = COALESCE($3, project_number),
                description = COALESCE($4, description),
                title = COALESCE($5, title),
                size = COALESCE($6, size),
                revision_count = COALESCE($7, revision_count),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Drawing>(&query)
            .bind(id)
            .bind(&input.number)
            .bind(&input.project_number)
            .bind(&input.description)
            .bind(&input.title)
            .bind(&input.size)
            .bind(input.revision_count)
            .fetch_optional(pool)
            .await
    }

    /// Delete a drawing by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drawings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
