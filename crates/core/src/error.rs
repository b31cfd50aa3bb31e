#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `id` is the textual form of whatever key addressed the entity
    /// (a database id, or an issued-drawing entry UUID).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A process-wide singleton (the issue-sheet counter) has not been
    /// created yet.
    #[error("Not initialized: {0}")]
    NotInitialized(&'static str),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
