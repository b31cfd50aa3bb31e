//! Repository for the `registers` table.

use drawreg_core::references::RefPosition;
use drawreg_core::types::DbId;
use sqlx::PgPool;

use crate::models::register::{CreateRegister, Register, UpdateRegister};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_name, project_number, discipline, engineers, \
    start_date, end_date, category_ids, created_at, updated_at";

/// Provides CRUD and category-reference operations for registers.
pub struct RegisterRepo;

impl RegisterRepo {
    /// Insert a new register referencing `category_ids`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRegister,
        category_ids: &[DbId],
    ) -> Result<Register, sqlx::Error> {
        let query = format!(
            "INSERT INTO registers
                (project_name, project_number, discipline, engineers, start_date, end_date, category_ids)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Register>(&query)
            .bind(&input.project_name)
            .bind(input.project_number)
            .bind(&input.discipline)
            .bind(&input.engineers)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(category_ids)
            .fetch_one(pool)
            .await
    }

    /// Find a register by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Register>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM registers WHERE id = $1");
        sqlx::query_as::<_, Register>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all registers in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Register>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM registers ORDER BY id");
        sqlx::query_as::<_, Register>(&query).fetch_all(pool).await
    }

    /// List registers for one project number.
    pub async fn list_by_project_number(
        pool: &PgPool,
        project_number: i64,
    ) -> Result<Vec<Register>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM registers WHERE project_number = $1 ORDER BY id");
        sqlx::query_as::<_, Register>(&query)
            .bind(project_number)
            .fetch_all(pool)
            .await
    }

    /// List registers whose category list contains `category_id`.
    pub async fn list_referencing_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Register>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM registers WHERE $1 = ANY(category_ids) ORDER BY id");
        sqlx::query_as::<_, Register>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Update a register. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRegister,
    ) -> Result<Option<Register>, sqlx::Error> {
        let query = format!(
            "UPDATE registers SET
                project_name = COALESCE($2, project_name),
                project_number = COALESCE($3, project_number),
                discipline = COALESCE($4, discipline),
                engineers = COALESCE($5, engineers),
                start_date = COALESCE($6, start_date),
                end_date = COALESCE($7, end_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Register>(&query)
            .bind(id)
            .bind(&input.project_name)
            .bind(input.project_number)
            .bind(&input.discipline)
            .bind(&input.engineers)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Add category ids to the register's list in one statement.
    pub async fn attach_categories(
        pool: &PgPool,
        id: DbId,
        category_ids: &[DbId],
        position: RefPosition,
    ) -> Result<Option<Register>, sqlx::Error> {
        let concat = match position {
            RefPosition::Front => "$2 || category_ids",
            RefPosition::Back => "category_ids || $2",
        };
        let query = format!(
            "UPDATE registers SET
                category_ids = {concat},
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Register>(&query)
            .bind(id)
            .bind(category_ids)
            .fetch_optional(pool)
            .await
    }

    /// Remove every occurrence of a category id from the register's list.
    pub async fn pull_category(
        pool: &PgPool,
        id: DbId,
        category_id: DbId,
    ) -> Result<Option<Register>, sqlx::Error> {
        let query = format!(
            "UPDATE registers SET
                category_ids = array_remove(category_ids, $2),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Register>(&query)
            .bind(id)
            .bind(category_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a register by ID. Categories it referenced are left in place.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM registers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
