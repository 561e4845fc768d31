//! Environment configuration for store embedders.

use std::env;

use tracing_subscriber::EnvFilter;
use userstore_core::{AppError, AppResult};

/// Runtime configuration for the Postgres-backed store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

impl StoreConfig {
    /// Loads configuration from the process environment.
    ///
    /// Reads a `.env` file first when one is present. `DATABASE_URL` is
    /// required; `DATABASE_MAX_CONNECTIONS` defaults to 10.
    pub fn load() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = required_env("DATABASE_URL")?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(10);

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

/// Installs the global tracing subscriber, honoring `RUST_LOG` with an
/// `info` default.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
