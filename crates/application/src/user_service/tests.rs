use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use userstore_core::{AppError, AppResult};
use userstore_domain::UserId;

use super::{UserRecord, UserRepository, UserService};

#[derive(Default)]
struct FakeUserRepository {
    users: Mutex<Vec<UserRecord>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.id == user_id)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        Ok(self.users.lock().await.clone())
    }

    async fn create(&self, email: &str, display_name: &str) -> AppResult<UserId> {
        let mut users = self.users.lock().await;
        if users.iter().any(|user| user.email.eq_ignore_ascii_case(email)) {
            return Err(AppError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        let mut next_id = self.next_id.lock().await;
        *next_id += 1;
        let id = UserId::from_i64(*next_id);

        let now = Utc::now();
        users.push(UserRecord {
            id,
            email: email.to_owned(),
            display_name: display_name.to_owned(),
            created_at: now,
            updated_at: now,
        });

        Ok(id)
    }

    async fn update(&self, user_id: UserId, email: &str, display_name: &str) -> AppResult<()> {
        let mut users = self.users.lock().await;
        let Some(user) = users.iter_mut().find(|user| user.id == user_id) else {
            return Err(AppError::NotFound(format!("user {user_id}")));
        };

        user.email = email.to_owned();
        user.display_name = display_name.to_owned();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> AppResult<()> {
        let mut users = self.users.lock().await;
        let before = users.len();
        users.retain(|user| user.id != user_id);

        if users.len() == before {
            return Err(AppError::NotFound(format!("user {user_id}")));
        }

        Ok(())
    }
}

/// Repository whose backing store is unreachable.
struct UnreachableUserRepository;

#[async_trait]
impl UserRepository for UnreachableUserRepository {
    async fn find_by_email(&self, _email: &str) -> AppResult<Option<UserRecord>> {
        Err(AppError::Internal("connection refused".to_owned()))
    }

    async fn find_by_id(&self, _user_id: UserId) -> AppResult<Option<UserRecord>> {
        Err(AppError::Internal("connection refused".to_owned()))
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        Err(AppError::Internal("connection refused".to_owned()))
    }

    async fn create(&self, _email: &str, _display_name: &str) -> AppResult<UserId> {
        Err(AppError::Internal("connection refused".to_owned()))
    }

    async fn update(&self, _user_id: UserId, _email: &str, _display_name: &str) -> AppResult<()> {
        Err(AppError::Internal("connection refused".to_owned()))
    }

    async fn delete(&self, _user_id: UserId) -> AppResult<()> {
        Err(AppError::Internal("connection refused".to_owned()))
    }
}

fn service() -> UserService {
    UserService::new(Arc::new(FakeUserRepository::default()))
}

#[tokio::test]
async fn register_canonicalizes_email_before_storage() {
    let service = service();

    let user_id = service.register("Ada@Example.COM", "Ada").await;
    assert!(user_id.is_ok());

    let found = service.find_by_email("ada@example.com").await;
    assert!(found.is_ok());
    let found = found.unwrap_or_else(|_| unreachable!());
    assert!(found.is_some());
    assert_eq!(
        found.unwrap_or_else(|| unreachable!()).email,
        "ada@example.com"
    );
}

#[tokio::test]
async fn register_rejects_malformed_email_without_touching_storage() {
    let repository = Arc::new(FakeUserRepository::default());
    let service = UserService::new(repository.clone());

    let result = service.register("not-an-email", "Ada").await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let stored = repository.users.lock().await;
    assert!(stored.is_empty());
}

#[tokio::test]
async fn register_rejects_blank_display_name() {
    let service = service();

    let result = service.register("ada@example.com", "   ").await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let service = service();

    assert!(service.register("ada@example.com", "Ada").await.is_ok());
    let duplicate = service.register("ADA@example.com", "Ada Again").await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn find_by_email_returns_the_matching_record() {
    let service = service();

    let user_id = service.register("ada@example.com", "Ada").await;
    assert!(user_id.is_ok());
    let user_id = user_id.unwrap_or_else(|_| unreachable!());

    let found = service.find_by_email("ada@example.com").await;
    assert!(found.is_ok());
    let found = found.unwrap_or_else(|_| unreachable!());
    assert!(found.is_some());

    let record = found.unwrap_or_else(|| unreachable!());
    assert_eq!(record.id, user_id);
    assert_eq!(record.email, "ada@example.com");
}

#[tokio::test]
async fn find_by_email_miss_is_none_not_an_error() {
    let service = service();

    assert!(service.register("ada@example.com", "Ada").await.is_ok());

    let missing = service.find_by_email("grace@example.com").await;
    assert!(missing.is_ok());
    assert!(missing.unwrap_or_else(|_| unreachable!()).is_none());
}

#[tokio::test]
async fn find_by_email_accepts_unvalidated_input() {
    let service = service();

    // Malformed input is matched verbatim, never rejected.
    let missing = service.find_by_email("not-an-email").await;
    assert!(missing.is_ok());
    assert!(missing.unwrap_or_else(|_| unreachable!()).is_none());
}

#[tokio::test]
async fn find_by_email_does_not_mutate_the_store() {
    let service = service();

    assert!(service.register("ada@example.com", "Ada").await.is_ok());
    assert!(service.register("grace@example.com", "Grace").await.is_ok());

    let before = service.list().await;
    assert!(before.is_ok());
    let before = before.unwrap_or_else(|_| unreachable!());

    assert!(service.find_by_email("ada@example.com").await.is_ok());
    assert!(service.find_by_email("absent@example.com").await.is_ok());

    let after = service.list().await;
    assert!(after.is_ok());
    assert_eq!(before, after.unwrap_or_else(|_| unreachable!()));
}

#[tokio::test]
async fn find_by_email_is_idempotent_between_writes() {
    let service = service();

    assert!(service.register("ada@example.com", "Ada").await.is_ok());

    let first = service.find_by_email("ada@example.com").await;
    let second = service.find_by_email("ada@example.com").await;
    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(
        first.unwrap_or_else(|_| unreachable!()),
        second.unwrap_or_else(|_| unreachable!())
    );
}

#[tokio::test]
async fn update_account_replaces_attributes() {
    let service = service();

    let user_id = service.register("ada@example.com", "Ada").await;
    assert!(user_id.is_ok());
    let user_id = user_id.unwrap_or_else(|_| unreachable!());

    let updated = service
        .update_account(user_id, "countess@example.com", "Countess of Lovelace")
        .await;
    assert!(updated.is_ok());

    let found = service.find_by_id(user_id).await;
    assert!(found.is_ok());
    let record = found
        .unwrap_or_else(|_| unreachable!())
        .unwrap_or_else(|| unreachable!());
    assert_eq!(record.email, "countess@example.com");
    assert_eq!(record.display_name, "Countess of Lovelace");
}

#[tokio::test]
async fn update_of_unknown_account_is_not_found() {
    let service = service();

    let result = service
        .update_account(UserId::from_i64(99), "ada@example.com", "Ada")
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn remove_of_unknown_account_is_not_found() {
    let service = service();

    let result = service.remove(UserId::from_i64(99)).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn storage_failures_surface_unmodified() {
    let service = UserService::new(Arc::new(UnreachableUserRepository));

    let result = service.find_by_email("ada@example.com").await;
    assert!(matches!(result, Err(AppError::Internal(_))));
}
