//! Repository for the singleton `issue_sheet_counter` table.

use sqlx::PgPool;

/// Value the counter holds when first created. The first issue sheet is
/// numbered one above this.
pub const INITIAL_SEQUENCE_VALUE: i64 = 1;

/// Create-if-absent and increment-and-fetch on the issue-sheet counter.
pub struct CounterRepo;

impl CounterRepo {
    /// Insert the counter row unless it already exists.
    ///
    /// Returns `true` if this call created it.
    pub async fn ensure(pool: &PgPool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO issue_sheet_counter (id, sequence_value) VALUES (1, $1)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(INITIAL_SEQUENCE_VALUE)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the counter in a single statement and return the new value.
    ///
    /// Returns `None` if the counter row does not exist.
    pub async fn increment(pool: &PgPool) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE issue_sheet_counter SET sequence_value = sequence_value + 1
             WHERE id = 1
             RETURNING sequence_value",
        )
        .fetch_optional(pool)
        .await
    }
}
