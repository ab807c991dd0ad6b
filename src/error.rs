//! Domain error types for the inventory tracker
//!
//! Store implementations return structured errors so they can be logged with
//! their cause. The service layer turns them into plain success/failure
//! results and never hands them to callers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error("Owning user does not exist")]
    MissingOwner,

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Unknown storage backend: {0}")]
    UnsupportedBackend(String),

    #[error("Password digest error: {0}")]
    Digest(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StorageError::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return StorageError::MissingOwner;
            }
            if db_err.is_check_violation() {
                return StorageError::Constraint(db_err.message().to_string());
            }
        }
        StorageError::Database(err)
    }
}

impl StorageError {
    /// Whether this error came from a uniqueness constraint.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StorageError::Duplicate(_))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Price must be a finite, non-negative number, got {0}")]
    InvalidPrice(f64),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Unknown environment variable: {0}")]
    MissingEnv(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
