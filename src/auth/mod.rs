use crate::error::StorageError;
use async_trait::async_trait;
use std::sync::Arc;

pub type UserId = i64;

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// True if any user has this username or this email.
    async fn user_exists(&self, username: &str, email: &str) -> Result<bool, StorageError>;

    /// Store a new user, digesting `password` first. Returns the new id.
    async fn add_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, StorageError>;

    /// Resolve credentials to a user id. `Ok(None)` means no match.
    async fn verify_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserId>, StorageError>;

    async fn username(&self, id: UserId) -> Result<Option<String>, StorageError>;
}

pub type DynAccounts = Arc<dyn AccountStore>;

pub mod password;
pub mod sqlite;
