use std::sync::Arc;

use drawreg_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (PostgreSQL or in-memory).
    pub store: Arc<dyn Store>,
    /// Server configuration, including JWT secrets.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Borrow the store as the trait object the services expect.
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}
