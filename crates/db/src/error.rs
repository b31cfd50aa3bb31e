use drawreg_core::error::CoreError;

/// Error returned by every [`Store`](crate::Store) operation and service.
///
/// Domain failures (`NotFound`, `NotInitialized`, `Conflict`, ...) travel as
/// [`CoreError`]; driver failures keep their `sqlx::Error` so the HTTP layer
/// can classify constraint violations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
