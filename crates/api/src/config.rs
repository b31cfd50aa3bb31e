use crate::auth::jwt::JwtConfig;

/// Which [`Store`](drawreg_db::Store) implementation the server runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL at `database_url`.
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    /// Process memory; everything is lost on restart.
    Memory,
}

impl StorageBackend {
    /// Read `STORAGE_BACKEND`, `DATABASE_URL` and `DB_MAX_CONNECTIONS`.
    ///
    /// # Panics
    ///
    /// Panics on an unknown backend name, or if the `postgres` backend is
    /// selected without `DATABASE_URL`.
    pub fn from_env() -> Self {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "postgres".into());
        match backend.as_str() {
            "postgres" => {
                let database_url =
                    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
                let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "20".into())
                    .parse()
                    .expect("DB_MAX_CONNECTIONS must be a valid u32");
                Self::Postgres {
                    database_url,
                    max_connections,
                }
            }
            "memory" => Self::Memory,
            other => panic!("Unknown STORAGE_BACKEND '{other}'. Must be one of: postgres, memory"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres { .. } => "postgres",
            Self::Memory => "memory",
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the token secrets (and `DATABASE_URL` for the
/// PostgreSQL backend) have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub storage: StorageBackend,
    /// JWT token configuration (secrets, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORAGE_BACKEND`      | `postgres`                 |
    /// | `DATABASE_URL`         | -- (required for postgres) |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    ///
    /// Token settings are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage: StorageBackend::from_env(),
            jwt: JwtConfig::from_env(),
        }
    }
}
