//! MySQL implementation of the UserRepository trait.
//!
//! Users live in `users`; their issued tokens live one per row in
//! `user_tokens`. Appending or removing a token is a single statement, so
//! concurrent logins and logouts for one user never overwrite each other.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use todo_core::domain::entities::{IssuedToken, TokenPurpose, User};
use todo_core::errors::DomainError;
use todo_core::repositories::UserRepository;

use crate::database::{column_error, insert_error, storage_error};

const USER_COLUMNS: &str = "id, email, password_hash, created_at, updated_at";

/// MySQL implementation of UserRepository
#[derive(Clone)]
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Load the issued tokens of a user in issuance order
    async fn load_tokens(&self, user_id: &str) -> Result<Vec<IssuedToken>, DomainError> {
        let rows = sqlx::query("SELECT purpose, token FROM user_tokens WHERE user_id = ? ORDER BY seq")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to load user tokens", e))?;

        rows.iter().map(Self::row_to_token).collect()
    }

    /// Build a full user from its `users` row plus its tokens
    async fn hydrate(&self, row: Option<MySqlRow>) -> Result<Option<User>, DomainError> {
        let Some(row) = row else {
            return Ok(None);
        };

        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let tokens = self.load_tokens(&id).await?;
        Self::row_to_user(&row, tokens).map(Some)
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow, tokens: Vec<IssuedToken>) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        Ok(User::from_stored(
            Uuid::parse_str(&id).map_err(|e| column_error("id", e))?,
            row.try_get("email").map_err(|e| column_error("email", e))?,
            row.try_get("password_hash")
                .map_err(|e| column_error("password_hash", e))?,
            tokens,
            row.try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            row.try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        ))
    }

    fn row_to_token(row: &MySqlRow) -> Result<IssuedToken, DomainError> {
        let purpose: String = row.try_get("purpose").map_err(|e| column_error("purpose", e))?;
        let token: String = row.try_get("token").map_err(|e| column_error("token", e))?;

        Ok(IssuedToken::new(
            purpose.parse::<TokenPurpose>().map_err(|e| column_error("purpose", e))?,
            token,
        ))
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find user by id", e))?;

        self.hydrate(row).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find user by email", e))?;

        self.hydrate(row).await
    }

    async fn find_by_token(
        &self,
        id: Uuid,
        token: &str,
        purpose: TokenPurpose,
    ) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT u.id, u.email, u.password_hash, u.created_at, u.updated_at
            FROM users u
            INNER JOIN user_tokens t ON t.user_id = u.id
            WHERE u.id = ? AND t.token = ? AND t.purpose = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .bind(token)
            .bind(purpose.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find user by token", e))?;

        self.hydrate(row).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let password_hash = user.password_hash().ok_or_else(|| DomainError::Internal {
            message: "Refusing to persist an unhashed credential".to_string(),
        })?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| insert_error("Failed to create user", e))?;

        for issued in user.tokens() {
            sqlx::query(
                "INSERT INTO user_tokens (user_id, purpose, token, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(user.id.to_string())
            .bind(issued.purpose.as_str())
            .bind(&issued.token)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to store user token", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit user", e))?;

        Ok(user)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to update password", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }
        Ok(())
    }

    async fn push_token(&self, id: Uuid, token: &IssuedToken) -> Result<bool, DomainError> {
        // Inserting through a SELECT on users makes the append a no-op for a
        // vanished user instead of a foreign-key error.
        let result = sqlx::query(
            r#"
            INSERT INTO user_tokens (user_id, purpose, token, created_at)
            SELECT id, ?, ?, ? FROM users WHERE id = ?
            "#,
        )
        .bind(token.purpose.as_str())
        .bind(&token.token)
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to append token", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn pull_token(&self, id: Uuid, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM user_tokens WHERE user_id = ? AND token = ?")
            .bind(id.to_string())
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to remove token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        // user_tokens and todos rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}
