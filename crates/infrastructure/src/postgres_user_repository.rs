//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use userstore_application::{UserRecord, UserRepository};
use userstore_core::{AppError, AppResult};
use userstore_domain::UserId;

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    display_name: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_i64(row.id),
            email: row.email,
            display_name: row.display_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

mod account;
mod lookup;


#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        self.find_by_email_impl(email).await
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        self.find_by_id_impl(user_id).await
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        self.list_impl().await
    }

    async fn create(&self, email: &str, display_name: &str) -> AppResult<UserId> {
        self.create_impl(email, display_name).await
    }

    async fn update(&self, user_id: UserId, email: &str, display_name: &str) -> AppResult<()> {
        self.update_impl(user_id, email, display_name).await
    }

    async fn delete(&self, user_id: UserId) -> AppResult<()> {
        self.delete_impl(user_id).await
    }
}

fn email_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("an account with this email already exists".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
