//! Persistence for the drawing register service.
//!
//! - [`models`] -- row structs and DTOs.
//! - [`repositories`] -- PostgreSQL queries, one zero-sized repo per table.
//! - [`store`] -- the [`Store`] trait seam with PostgreSQL and in-memory
//!   implementations.
//! - [`services`] -- the sequence allocator's callers and the
//!   referential-integrity operations that span more than one table.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{memory::MemoryStore, postgres::PgStore, Store};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
