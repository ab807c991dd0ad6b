use super::password::{self, PasswordScheme};
use super::{AccountStore, UserId, async_trait};
use crate::error::StorageError;
use sqlx::{Row, SqlitePool};

#[derive(Clone)]
pub struct SqliteAccounts {
    pool: SqlitePool,
    scheme: PasswordScheme,
}

impl SqliteAccounts {
    /// Create an account store over an already initialized pool.
    #[must_use]
    pub fn new(pool: SqlitePool, scheme: PasswordScheme) -> Self {
        Self { pool, scheme }
    }
}

#[async_trait]
impl AccountStore for SqliteAccounts {
    #[tracing::instrument(skip_all)]
    async fn user_exists(&self, username: &str, email: &str) -> Result<bool, StorageError> {
        let row = sqlx::query("SELECT id FROM users WHERE username = ? OR email = ?")
            .bind(username)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    #[tracing::instrument(skip_all)]
    async fn add_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, StorageError> {
        let digest = self.scheme.digest(password)?;
        let result = sqlx::query("INSERT INTO users (username, email, password) VALUES (?, ?, ?)")
            .bind(username)
            .bind(email)
            .bind(digest)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    #[tracing::instrument(skip_all)]
    async fn verify_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserId>, StorageError> {
        if let Some(row) = sqlx::query("SELECT id, password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
        {
            let id: UserId = row.try_get("id")?;
            let stored: String = row.try_get("password")?;
            Ok(password::verify(password, &stored).then_some(id))
        } else {
            Ok(None)
        }
    }

    #[tracing::instrument(skip_all)]
    async fn username(&self, id: UserId) -> Result<Option<String>, StorageError> {
        let name = sqlx::query_scalar("SELECT username FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(name)
    }
}
