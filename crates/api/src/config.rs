use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Public snapshot of historical queries, imported once into an empty table.
pub const DEFAULT_SEED_CSV_URL: &str =
    "https://drive.google.com/uc?id=1KNDcf56n6gUf_zla4uLJqELVFb_c8mDi&export=download";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum pooled database connections (default: `10`).
    pub db_max_connections: u32,
    /// Seed CSV location; `None` disables the first-run import.
    pub seed_csv_url: Option<String>,
    /// Directory holding the browser UI (default: `web`).
    pub static_dir: PathBuf,
    /// JWT session token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DB_MAX_CONNECTIONS`   | `10`                       |
    /// | `SEED_CSV_URL`         | public snapshot (empty disables) |
    /// | `STATIC_DIR`           | `web`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let seed_csv_url = parse_seed_url(std::env::var("SEED_CSV_URL").ok());

        let static_dir =
            PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "web".into()));

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            seed_csv_url,
            static_dir,
            jwt,
        }
    }
}

/// Unset means the default snapshot; an explicitly empty value disables seeding.
fn parse_seed_url(raw: Option<String>) -> Option<String> {
    match raw {
        None => Some(DEFAULT_SEED_CSV_URL.to_string()),
        Some(url) if url.trim().is_empty() => None,
        Some(url) => Some(url.trim().to_string()),
    }
}
