//! In-memory user repository implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use userstore_application::{UserRecord, UserRepository};
use userstore_core::{AppError, AppResult};
use userstore_domain::UserId;

/// In-memory user repository implementation.
///
/// Observable contract matches the Postgres adapter, including the unique
/// email constraint; intended for tests and embedders that run without a
/// database.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, UserRecord>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}


#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self.users.read().await.get(&user_id.as_i64()).cloned())
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        let users = self.users.read().await;

        let mut values: Vec<UserRecord> = users.values().cloned().collect();
        values.sort_by_key(|user| user.id);

        Ok(values)
    }

    async fn create(&self, email: &str, display_name: &str) -> AppResult<UserId> {
        let canonical = email.to_lowercase();
        let mut users = self.users.write().await;

        if users.values().any(|user| user.email == canonical) {
            return Err(AppError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let now = Utc::now();
        users.insert(
            id,
            UserRecord {
                id: UserId::from_i64(id),
                email: canonical,
                display_name: display_name.to_owned(),
                created_at: now,
                updated_at: now,
            },
        );

        Ok(UserId::from_i64(id))
    }

    async fn update(&self, user_id: UserId, email: &str, display_name: &str) -> AppResult<()> {
        let canonical = email.to_lowercase();
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|user| user.id != user_id && user.email == canonical)
        {
            return Err(AppError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        let Some(user) = users.get_mut(&user_id.as_i64()) else {
            return Err(AppError::NotFound(format!("user {user_id}")));
        };

        user.email = canonical;
        user.display_name = display_name.to_owned();
        user.updated_at = Utc::now();

        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> AppResult<()> {
        if self
            .users
            .write()
            .await
            .remove(&user_id.as_i64())
            .is_none()
        {
            return Err(AppError::NotFound(format!("user {user_id}")));
        }

        Ok(())
    }
}
