use super::{AccountService, Outcome, check_price, or_log, rejected, require};
use crate::auth::UserId;
use crate::error::ValidationError;
use crate::inventory::{DynInventory, Inventory, MaterialId, MaterialRecord};
use serde::Serialize;

/// Everything the dashboard view shows for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub username: String,
    pub materials: Inventory,
    pub total_value: f64,
}

#[derive(Clone)]
pub struct InventoryService {
    store: DynInventory,
}

impl InventoryService {
    #[must_use]
    pub fn new(store: DynInventory) -> Self {
        Self { store }
    }

    pub async fn add_material(&self, user_id: UserId, name: &str, quantity: u32, price: f64) -> bool {
        self.add_material_outcome(user_id, name, quantity, price)
            .await
            .is_done()
    }

    /// Never overwrites: an existing `(user_id, name)` yields
    /// [`Outcome::Duplicate`].
    pub async fn add_material_outcome(
        &self,
        user_id: UserId,
        name: &str,
        quantity: u32,
        price: f64,
    ) -> Outcome {
        if let Err(err) = validate_material(name, price) {
            return rejected("add_material", &err);
        }
        let result = self.store.add_material(user_id, name, quantity, price).await;
        if let Ok(id) = &result {
            tracing::info!(user_id, material_id = *id, "Material added");
        }
        Outcome::from_store("add_material", result)
    }

    pub async fn material_by_id(&self, material_id: MaterialId) -> Option<MaterialRecord> {
        or_log(
            "material_by_id",
            self.store.material_by_id(material_id).await,
            None,
        )
    }

    /// Overwrite a material by id. Ownership is the caller's concern.
    pub async fn update_material(
        &self,
        material_id: MaterialId,
        name: &str,
        quantity: u32,
        price: f64,
    ) -> bool {
        self.update_material_outcome(material_id, name, quantity, price)
            .await
            .is_done()
    }

    pub async fn update_material_outcome(
        &self,
        material_id: MaterialId,
        name: &str,
        quantity: u32,
        price: f64,
    ) -> Outcome {
        if let Err(err) = validate_material(name, price) {
            return rejected("update_material", &err);
        }
        let result = self
            .store
            .update_material(material_id, name, quantity, price)
            .await;
        if let Ok(rows) = &result {
            tracing::debug!(material_id, rows = *rows, "Material updated");
        }
        Outcome::from_store("update_material", result)
    }

    pub async fn rename_material(&self, material_id: MaterialId, name: &str) -> bool {
        if let Err(err) = require("name", name) {
            return rejected("rename_material", &err).is_done();
        }
        Outcome::from_store(
            "rename_material",
            self.store.rename_material(material_id, name).await,
        )
        .is_done()
    }

    pub async fn set_price(&self, user_id: UserId, name: &str, price: f64) -> bool {
        if let Err(err) = check_price(price) {
            return rejected("set_price", &err).is_done();
        }
        Outcome::from_store("set_price", self.store.set_price(user_id, name, price).await)
            .is_done()
    }

    pub async fn set_quantity(&self, user_id: UserId, name: &str, quantity: u32) -> bool {
        Outcome::from_store(
            "set_quantity",
            self.store.set_quantity(user_id, name, quantity).await,
        )
        .is_done()
    }

    pub async fn material_names(&self, user_id: UserId) -> Vec<String> {
        or_log(
            "material_names",
            self.store.material_names(user_id).await,
            Vec::new(),
        )
    }

    pub async fn price(&self, user_id: UserId, name: &str) -> Option<f64> {
        or_log("price", self.store.price(user_id, name).await, None)
    }

    pub async fn quantity(&self, user_id: UserId, name: &str) -> Option<u32> {
        or_log("quantity", self.store.quantity(user_id, name).await, None)
    }

    pub async fn material_id(&self, user_id: UserId, name: &str) -> Option<MaterialId> {
        or_log("material_id", self.store.material_id(user_id, name).await, None)
    }

    /// Name to `{id, quantity, price, total}` for every material the user owns.
    pub async fn inventory(&self, user_id: UserId) -> Inventory {
        or_log(
            "inventory",
            self.store.inventory(user_id).await,
            Inventory::new(),
        )
    }

    pub async fn delete_material(&self, user_id: UserId, name: &str) -> bool {
        let result = self.store.delete_material(user_id, name).await;
        if let Ok(rows) = &result {
            tracing::info!(user_id, rows = *rows, "Material deleted");
        }
        Outcome::from_store("delete_material", result).is_done()
    }

    /// Username plus inventory snapshot; `None` if the user does not exist.
    pub async fn dashboard(&self, accounts: &AccountService, user_id: UserId) -> Option<Dashboard> {
        let username = accounts.username(user_id).await?;
        let materials = self.inventory(user_id).await;
        let total_value: f64 = materials.values().map(|entry| entry.total).sum();
        Some(Dashboard {
            username,
            materials,
            total_value,
        })
    }
}

fn validate_material(name: &str, price: f64) -> Result<(), ValidationError> {
    require("name", name)?;
    check_price(price)
}
