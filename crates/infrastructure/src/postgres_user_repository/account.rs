use super::*;

impl PostgresUserRepository {
    pub(super) async fn create_impl(&self, email: &str, display_name: &str) -> AppResult<UserId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, display_name)
            VALUES (LOWER($1), $2)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| email_conflict_or_internal(error, "create user"))?;

        Ok(UserId::from_i64(id))
    }

    pub(super) async fn update_impl(
        &self,
        user_id: UserId,
        email: &str,
        display_name: &str,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = LOWER($2), display_name = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .bind(email)
        .bind(display_name)
        .execute(&self.pool)
        .await
        .map_err(|error| email_conflict_or_internal(error, "update user"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("user {user_id}")));
        }

        Ok(())
    }

    pub(super) async fn delete_impl(&self, user_id: UserId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete user: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("user {user_id}")));
        }

        Ok(())
    }
}
