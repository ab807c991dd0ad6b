//! Connection pool and schema bootstrap.

use crate::error::StorageError;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use std::time::Duration;

/// SQL schemas shared by the account and inventory stores.
pub mod sql {
    /// Schema for the users table (credentials are password digests).
    pub const USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )";

    /// Schema for the materials table (one row per user and material name).
    pub const MATERIALS_TABLE: &str = "CREATE TABLE IF NOT EXISTS materials (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            material_name TEXT NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity >= 0),
            price REAL NOT NULL CHECK (price >= 0),
            UNIQUE(user_id, material_name),
            FOREIGN KEY (user_id) REFERENCES users(id)
        )";
}

/// Open a pool for `uri` and make sure the schema exists.
///
/// In-memory databases get a single connection that is kept open for the
/// life of the pool, so every caller sees the same tables.
///
/// # Errors
///
/// Returns an error if the URI is not a SQLite URI, the database cannot be
/// opened, or the schema cannot be created.
#[tracing::instrument(skip_all)]
pub async fn open(uri: &str, max_connections: u32) -> Result<SqlitePool, StorageError> {
    if !uri.starts_with("sqlite:") {
        return Err(StorageError::UnsupportedBackend(uri.to_string()));
    }
    let options = SqliteConnectOptions::from_str(uri)?
        .create_if_missing(true)
        .foreign_keys(true);

    // The in-memory database lives only as long as its one connection, so
    // that connection is never reaped.
    let pool_options = if uri.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };
    let max_connections = pool_options.get_max_connections();

    let pool = pool_options.connect_with(options).await?;

    init_schema(&pool).await?;
    tracing::debug!(max_connections, "Database ready");
    Ok(pool)
}

/// Create the tables if they are missing. Safe to run repeatedly.
///
/// # Errors
///
/// Returns an error if a DDL statement fails.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(sql::USERS_TABLE).execute(pool).await?;
    sqlx::query(sql::MATERIALS_TABLE).execute(pool).await?;
    Ok(())
}
