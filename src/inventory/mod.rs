use crate::auth::UserId;
use crate::error::StorageError;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub type MaterialId = i64;

/// A stored material row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRecord {
    pub id: MaterialId,
    pub user_id: UserId,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

/// One line of a user's inventory; `total` is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InventoryEntry {
    pub id: MaterialId,
    pub quantity: u32,
    pub price: f64,
    pub total: f64,
}

impl InventoryEntry {
    #[must_use]
    pub fn new(id: MaterialId, quantity: u32, price: f64) -> Self {
        Self {
            id,
            quantity,
            price,
            total: f64::from(quantity) * price,
        }
    }
}

/// Snapshot of a user's materials keyed by name.
pub type Inventory = BTreeMap<String, InventoryEntry>;

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Insert a material. Fails with [`StorageError::Duplicate`] if the user
    /// already has one with this name.
    async fn add_material(
        &self,
        user_id: UserId,
        name: &str,
        quantity: u32,
        price: f64,
    ) -> Result<MaterialId, StorageError>;

    async fn material_by_id(&self, id: MaterialId)
    -> Result<Option<MaterialRecord>, StorageError>;

    /// Overwrite name, quantity and price. Returns the number of rows touched.
    async fn update_material(
        &self,
        id: MaterialId,
        name: &str,
        quantity: u32,
        price: f64,
    ) -> Result<u64, StorageError>;

    async fn rename_material(&self, id: MaterialId, name: &str) -> Result<u64, StorageError>;

    async fn set_price(&self, user_id: UserId, name: &str, price: f64)
    -> Result<u64, StorageError>;

    async fn set_quantity(
        &self,
        user_id: UserId,
        name: &str,
        quantity: u32,
    ) -> Result<u64, StorageError>;

    /// Names of the user's materials in storage order.
    async fn material_names(&self, user_id: UserId) -> Result<Vec<String>, StorageError>;

    async fn price(&self, user_id: UserId, name: &str) -> Result<Option<f64>, StorageError>;

    async fn quantity(&self, user_id: UserId, name: &str) -> Result<Option<u32>, StorageError>;

    async fn material_id(
        &self,
        user_id: UserId,
        name: &str,
    ) -> Result<Option<MaterialId>, StorageError>;

    /// Every material of the user in one pass.
    async fn inventory(&self, user_id: UserId) -> Result<Inventory, StorageError>;

    /// Remove by natural key. Returns the number of rows removed.
    async fn delete_material(&self, user_id: UserId, name: &str) -> Result<u64, StorageError>;
}

pub type DynInventory = Arc<dyn InventoryStore>;

pub mod sqlite;
