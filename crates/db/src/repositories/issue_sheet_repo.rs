//! Repository for the `issue_sheets` table.

use drawreg_core::issued::IssuedDrawing;
use drawreg_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::issue_sheet::{CreateIssueSheet, IssueSheet, UpdateIssueSheet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sequence_number, recipient, attention_to, client, project_name, \
    project_number, issued_drawings, remarks, purpose, media, issued_by, received_by, \
    is_saved, created_at, updated_at";

/// Provides CRUD operations for issue sheets.
pub struct IssueSheetRepo;

impl IssueSheetRepo {
    /// Insert a new issue sheet with an already-allocated sequence number.
    pub async fn create(
        pool: &PgPool,
        sequence_number: i64,
        input: &CreateIssueSheet,
        issued: &[IssuedDrawing],
    ) -> Result<IssueSheet, sqlx::Error> {
        let query = format!(
            "INSERT INTO issue_sheets
                (sequence_number, recipient, attention_to, client, project_name, project_number,
                 issued_drawings, remarks, purpose, media, issued_by, received_by, is_saved)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IssueSheet>(&query)
            .bind(sequence_number)
            .bind(&input.recipient)
            .bind(&input.attention_to)
            .bind(&input.client)
            .bind(&input.project_name)
            .bind(input.project_number)
            .bind(Json(issued))
            .bind(&input.remarks)
            .bind(&input.purpose)
            .bind(input.media.as_str())
            .bind(Json(&input.issued_by))
            .bind(Json(&input.received_by))
            .bind(input.is_saved)
            .fetch_one(pool)
            .await
    }

    /// Find an issue sheet by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<IssueSheet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM issue_sheets WHERE id = $1");
        sqlx::query_as::<_, IssueSheet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all issue sheets, newest sequence number first.
    pub async fn list(pool: &PgPool) -> Result<Vec<IssueSheet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM issue_sheets ORDER BY sequence_number DESC");
        sqlx::query_as::<_, IssueSheet>(&query).fetch_all(pool).await
    }

    /// Update an issue sheet. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIssueSheet,
    ) -> Result<Option<IssueSheet>, sqlx::Error> {
        let query = format!(
            "UPDATE issue_sheets SET
                recipient = COALESCE($2, recipient),
                attention_to = COALESCE($3, attention_to),
                client = COALESCE($4, client),
                project_name = COALESCE($5, project_name),
                project_number = COALESCE($6, project_number),
                remarks = COALESCE($7, remarks),
                purpose = COALESCE($8, purpose),
                media = COALESCE($9, media),
                issued_by = COALESCE($10, issued_by),
                received_by = COALESCE($11, received_by),
                is_saved = COALESCE($12, is_saved),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IssueSheet>(&query)
            .bind(id)
            .bind(&input.recipient)
            .bind(&input.attention_to)
            .bind(&input.client)
            .bind(&input.project_name)
            .bind(input.project_number)
            .bind(&input.remarks)
            .bind(&input.purpose)
            .bind(input.media.map(|m| m.as_str()))
            .bind(input.issued_by.as_ref().map(Json))
            .bind(input.received_by.as_ref().map(Json))
            .bind(input.is_saved)
            .fetch_optional(pool)
            .await
    }

    /// Replace the issued-drawing list.
    pub async fn set_issued_drawings(
        pool: &PgPool,
        id: DbId,
        issued: &[IssuedDrawing],
    ) -> Result<Option<IssueSheet>, sqlx::Error> {
        let query = format!(
            "UPDATE issue_sheets SET
                issued_drawings = $2,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IssueSheet>(&query)
            .bind(id)
            .bind(Json(issued))
            .fetch_optional(pool)
            .await
    }

    /// Delete an issue sheet by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM issue_sheets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
