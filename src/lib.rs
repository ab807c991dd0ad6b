pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod service;

pub use error::StorageError;
pub use service::{AccountService, InventoryService, Outcome};

use crate::auth::sqlite::SqliteAccounts;
use crate::config::Config;
use crate::inventory::sqlite::SqliteInventory;
use std::sync::Arc;

/// Open the configured database and build both services over one pool.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or initialized.
pub async fn connect(cfg: &Config) -> Result<(AccountService, InventoryService), StorageError> {
    let pool = db::open(&cfg.db_path, cfg.max_connections).await?;
    let accounts = AccountService::new(Arc::new(SqliteAccounts::new(
        pool.clone(),
        cfg.password_scheme,
    )));
    let inventory = InventoryService::new(Arc::new(SqliteInventory::new(pool)));
    Ok((accounts, inventory))
}
