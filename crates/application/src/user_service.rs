//! User store port and application service.
//!
//! Owns typed access to persisted user accounts: generic CRUD plus a
//! specialized lookup by email address. The port is implemented by concrete
//! storage adapters; this layer holds no entity data itself.

use std::sync::Arc;

use async_trait::async_trait;

use userstore_core::{AppResult, NonEmptyString};
use userstore_domain::{EmailAddress, UserId};

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// User record returned by repository queries.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Canonical email address.
    pub email: String,
    /// Human-readable display name.
    pub display_name: String,
    /// When the record was created.
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// When the record was last modified.
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by email (case-insensitive).
    ///
    /// Absence is a normal outcome, never an error. At most one record is
    /// returned even if the underlying store holds duplicates; which one is
    /// unspecified.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Finds a user by their unique identifier.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>>;

    /// Lists all user records ordered by identifier.
    async fn list(&self) -> AppResult<Vec<UserRecord>>;

    /// Creates a new user record. Returns the assigned user ID.
    async fn create(&self, email: &str, display_name: &str) -> AppResult<UserId>;

    /// Replaces the attributes of an existing user record.
    async fn update(&self, user_id: UserId, email: &str, display_name: &str) -> AppResult<()>;

    /// Removes a user record by identifier.
    async fn delete(&self, user_id: UserId) -> AppResult<()>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for user account access.
///
/// Validates write-path input and delegates everything else to the
/// repository port. Stateless between calls.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Registers a new user account.
    ///
    /// The email is validated and canonicalized before it reaches storage;
    /// a duplicate email surfaces as a conflict from the repository.
    pub async fn register(&self, email: &str, display_name: &str) -> AppResult<UserId> {
        let email_address = EmailAddress::new(email)?;
        let display_name = NonEmptyString::new(display_name)?;

        self.user_repository
            .create(email_address.as_str(), display_name.as_str())
            .await
    }

    /// Returns a user record by email, if it exists.
    ///
    /// The input is matched verbatim (case-insensitively) with no format
    /// validation; a malformed string simply matches nothing.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        self.user_repository.find_by_email(email).await
    }

    /// Returns a user record by ID, if it exists.
    pub async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        self.user_repository.find_by_id(user_id).await
    }

    /// Returns all user records ordered by identifier.
    pub async fn list(&self) -> AppResult<Vec<UserRecord>> {
        self.user_repository.list().await
    }

    /// Replaces the attributes of an existing account.
    pub async fn update_account(
        &self,
        user_id: UserId,
        email: &str,
        display_name: &str,
    ) -> AppResult<()> {
        let email_address = EmailAddress::new(email)?;
        let display_name = NonEmptyString::new(display_name)?;

        self.user_repository
            .update(user_id, email_address.as_str(), display_name.as_str())
            .await
    }

    /// Removes an account by identifier.
    pub async fn remove(&self, user_id: UserId) -> AppResult<()> {
        self.user_repository.delete(user_id).await
    }

    /// Returns a reference to the user repository for use by other services.
    #[must_use]
    pub fn user_repository(&self) -> &Arc<dyn UserRepository> {
        &self.user_repository
    }
}

#[cfg(test)]
mod tests;
