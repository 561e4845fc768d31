//! Connection pool bootstrap for the Postgres adapter.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use userstore_core::{AppError, AppResult};

use crate::StoreConfig;

/// Connects to Postgres and applies the embedded schema migrations.
///
/// Each repository call checks a connection out of the returned pool for
/// the duration of the call; release is guaranteed on all exit paths.
pub async fn connect_and_migrate(config: &StoreConfig) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    info!(max_connections = config.max_connections, "database pool ready");

    Ok(pool)
}
