use super::{
    Inventory, InventoryEntry, InventoryStore, MaterialId, MaterialRecord, async_trait,
};
use crate::auth::UserId;
use crate::error::StorageError;
use sqlx::{Row, SqlitePool};

#[derive(Clone)]
pub struct SqliteInventory {
    pool: SqlitePool,
}

impl SqliteInventory {
    /// Create an inventory store over an already initialized pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for SqliteInventory {
    #[tracing::instrument(skip_all)]
    async fn add_material(
        &self,
        user_id: UserId,
        name: &str,
        quantity: u32,
        price: f64,
    ) -> Result<MaterialId, StorageError> {
        // Report duplicates before relying on the UNIQUE constraint so the
        // error names the material.
        if self.material_id(user_id, name).await?.is_some() {
            return Err(StorageError::Duplicate(format!(
                "material '{name}' already exists"
            )));
        }
        let result = sqlx::query(
            "INSERT INTO materials (user_id, material_name, quantity, price) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(name)
        .bind(quantity)
        .bind(price)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    #[tracing::instrument(skip_all)]
    async fn material_by_id(
        &self,
        id: MaterialId,
    ) -> Result<Option<MaterialRecord>, StorageError> {
        if let Some(row) = sqlx::query(
            "SELECT id, user_id, material_name, quantity, price FROM materials WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        {
            Ok(Some(MaterialRecord {
                id: row.try_get("id")?,
                user_id: row.try_get("user_id")?,
                name: row.try_get("material_name")?,
                quantity: row.try_get("quantity")?,
                price: row.try_get("price")?,
            }))
        } else {
            Ok(None)
        }
    }

    #[tracing::instrument(skip_all)]
    async fn update_material(
        &self,
        id: MaterialId,
        name: &str,
        quantity: u32,
        price: f64,
    ) -> Result<u64, StorageError> {
        let result = sqlx::query(
            "UPDATE materials SET material_name = ?, quantity = ?, price = ? WHERE id = ?",
        )
        .bind(name)
        .bind(quantity)
        .bind(price)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all)]
    async fn rename_material(&self, id: MaterialId, name: &str) -> Result<u64, StorageError> {
        let result = sqlx::query("UPDATE materials SET material_name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all)]
    async fn set_price(
        &self,
        user_id: UserId,
        name: &str,
        price: f64,
    ) -> Result<u64, StorageError> {
        let result =
            sqlx::query("UPDATE materials SET price = ? WHERE user_id = ? AND material_name = ?")
                .bind(price)
                .bind(user_id)
                .bind(name)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all)]
    async fn set_quantity(
        &self,
        user_id: UserId,
        name: &str,
        quantity: u32,
    ) -> Result<u64, StorageError> {
        let result = sqlx::query(
            "UPDATE materials SET quantity = ? WHERE user_id = ? AND material_name = ?",
        )
        .bind(quantity)
        .bind(user_id)
        .bind(name)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all)]
    async fn material_names(&self, user_id: UserId) -> Result<Vec<String>, StorageError> {
        let names = sqlx::query_scalar("SELECT material_name FROM materials WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    #[tracing::instrument(skip_all)]
    async fn price(&self, user_id: UserId, name: &str) -> Result<Option<f64>, StorageError> {
        let price =
            sqlx::query_scalar("SELECT price FROM materials WHERE user_id = ? AND material_name = ?")
                .bind(user_id)
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(price)
    }

    #[tracing::instrument(skip_all)]
    async fn quantity(&self, user_id: UserId, name: &str) -> Result<Option<u32>, StorageError> {
        let quantity = sqlx::query_scalar(
            "SELECT quantity FROM materials WHERE user_id = ? AND material_name = ?",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(quantity)
    }

    #[tracing::instrument(skip_all)]
    async fn material_id(
        &self,
        user_id: UserId,
        name: &str,
    ) -> Result<Option<MaterialId>, StorageError> {
        let id =
            sqlx::query_scalar("SELECT id FROM materials WHERE user_id = ? AND material_name = ?")
                .bind(user_id)
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(id)
    }

    #[tracing::instrument(skip_all)]
    async fn inventory(&self, user_id: UserId) -> Result<Inventory, StorageError> {
        let rows = sqlx::query(
            "SELECT id, material_name, quantity, price FROM materials WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut inventory = Inventory::new();
        for row in rows {
            let name: String = row.try_get("material_name")?;
            let entry = InventoryEntry::new(
                row.try_get("id")?,
                row.try_get("quantity")?,
                row.try_get("price")?,
            );
            inventory.insert(name, entry);
        }
        Ok(inventory)
    }

    #[tracing::instrument(skip_all)]
    async fn delete_material(&self, user_id: UserId, name: &str) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM materials WHERE user_id = ? AND material_name = ?")
            .bind(user_id)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
