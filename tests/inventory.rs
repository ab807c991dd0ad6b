mod common;

use stockpile::Outcome;
use stockpile::inventory::{InventoryEntry, MaterialRecord};

#[tokio::test]
async fn duplicate_material_names_are_per_user() {
    let (accounts, inventory) = common::services().await;
    let u = common::user(&accounts, "u").await;
    let v = common::user(&accounts, "v").await;

    assert!(inventory.add_material(u, "Steel", 10, 2.5).await);
    assert_eq!(
        inventory.add_material_outcome(u, "Steel", 99, 9.9).await,
        Outcome::Duplicate
    );
    assert!(inventory.add_material(v, "Steel", 1, 1.0).await);

    // the rejected add must not have overwritten anything
    assert_eq!(inventory.quantity(u, "Steel").await, Some(10));
    assert_eq!(inventory.price(u, "Steel").await, Some(2.5));
}

#[tokio::test]
async fn inventory_snapshot_includes_totals() {
    let (accounts, inventory) = common::services().await;
    let u = common::user(&accounts, "u").await;
    assert!(inventory.add_material(u, "Steel", 10, 2.5).await);
    assert!(inventory.add_material(u, "Wood", 4, 3.0).await);

    let steel_id = inventory.material_id(u, "Steel").await.unwrap();
    let wood_id = inventory.material_id(u, "Wood").await.unwrap();

    let snapshot = inventory.inventory(u).await;
    assert_eq!(snapshot.len(), 2);
    assert_eq!(
        snapshot["Steel"],
        InventoryEntry {
            id: steel_id,
            quantity: 10,
            price: 2.5,
            total: 25.0
        }
    );
    assert_eq!(
        snapshot["Wood"],
        InventoryEntry {
            id: wood_id,
            quantity: 4,
            price: 3.0,
            total: 12.0
        }
    );
}

#[tokio::test]
async fn snapshot_matches_point_lookups() {
    let (accounts, inventory) = common::services().await;
    let u = common::user(&accounts, "u").await;
    for (name, qty, price) in [("Brick", 500, 0.4), ("Cement", 12, 8.75), ("Sand", 0, 30.0)] {
        assert!(inventory.add_material(u, name, qty, price).await);
    }

    let snapshot = inventory.inventory(u).await;
    let mut names = inventory.material_names(u).await;
    names.sort();
    assert_eq!(names, snapshot.keys().cloned().collect::<Vec<_>>());

    for name in names {
        let entry = snapshot[&name];
        assert_eq!(Some(entry.id), inventory.material_id(u, &name).await);
        assert_eq!(Some(entry.quantity), inventory.quantity(u, &name).await);
        assert_eq!(Some(entry.price), inventory.price(u, &name).await);
    }
}

#[tokio::test]
async fn add_then_fetch_by_id_round_trips() {
    let (accounts, inventory) = common::services().await;
    let u = common::user(&accounts, "u").await;
    assert!(inventory.add_material(u, "Copper wire", 7, 12.125).await);
    let id = inventory.material_id(u, "Copper wire").await.unwrap();

    assert_eq!(
        inventory.material_by_id(id).await,
        Some(MaterialRecord {
            id,
            user_id: u,
            name: "Copper wire".into(),
            quantity: 7,
            price: 12.125,
        })
    );
    assert_eq!(inventory.material_by_id(id + 100).await, None);
}

#[tokio::test]
async fn update_by_id_leaves_other_materials_alone() {
    let (accounts, inventory) = common::services().await;
    let u = common::user(&accounts, "u").await;
    assert!(inventory.add_material(u, "Steel", 10, 2.5).await);
    assert!(inventory.add_material(u, "Wood", 4, 3.0).await);
    let steel = inventory.material_id(u, "Steel").await.unwrap();

    assert!(inventory.update_material(steel, "Iron", 20, 1.75).await);

    let record = inventory.material_by_id(steel).await.unwrap();
    assert_eq!(record.name, "Iron");
    assert_eq!(record.quantity, 20);
    assert_eq!(record.price, 1.75);
    assert_eq!(inventory.material_id(u, "Steel").await, None);

    let snapshot = inventory.inventory(u).await;
    assert_eq!(snapshot["Wood"].quantity, 4);
    assert_eq!(snapshot["Wood"].price, 3.0);
}

#[tokio::test]
async fn update_into_an_existing_name_fails() {
    let (accounts, inventory) = common::services().await;
    let u = common::user(&accounts, "u").await;
    assert!(inventory.add_material(u, "Steel", 10, 2.5).await);
    assert!(inventory.add_material(u, "Wood", 4, 3.0).await);
    let wood = inventory.material_id(u, "Wood").await.unwrap();

    assert_eq!(
        inventory.update_material_outcome(wood, "Steel", 1, 1.0).await,
        Outcome::Duplicate
    );
    assert!(!inventory.rename_material(wood, "Steel").await);
    assert!(inventory.rename_material(wood, "Oak").await);
    assert_eq!(inventory.material_id(u, "Oak").await, Some(wood));
}

#[tokio::test]
async fn per_field_updates_by_name() {
    let (accounts, inventory) = common::services().await;
    let u = common::user(&accounts, "u").await;
    assert!(inventory.add_material(u, "Steel", 10, 2.5).await);

    assert!(inventory.set_price(u, "Steel", 3.0).await);
    assert!(inventory.set_quantity(u, "Steel", 2).await);
    assert_eq!(inventory.inventory(u).await["Steel"].total, 6.0);

    assert!(!inventory.set_price(u, "Steel", -1.0).await);
    assert_eq!(inventory.price(u, "Steel").await, Some(3.0));
}

#[tokio::test]
async fn delete_removes_from_lookups_and_snapshot() {
    let (accounts, inventory) = common::services().await;
    let u = common::user(&accounts, "u").await;
    assert!(inventory.add_material(u, "Steel", 10, 2.5).await);
    assert!(inventory.add_material(u, "Wood", 4, 3.0).await);

    assert!(inventory.delete_material(u, "Steel").await);

    assert_eq!(inventory.material_id(u, "Steel").await, None);
    assert_eq!(inventory.price(u, "Steel").await, None);
    assert_eq!(inventory.quantity(u, "Steel").await, None);
    let snapshot = inventory.inventory(u).await;
    assert!(!snapshot.contains_key("Steel"));
    assert!(snapshot.contains_key("Wood"));

    // the name is free again
    assert!(inventory.add_material(u, "Steel", 1, 1.0).await);
}

#[tokio::test]
async fn invalid_input_never_reaches_the_store() {
    let (accounts, inventory) = common::services().await;
    let u = common::user(&accounts, "u").await;
    assert_eq!(
        inventory.add_material_outcome(u, "  ", 1, 1.0).await,
        Outcome::Rejected
    );
    assert_eq!(
        inventory.add_material_outcome(u, "Steel", 1, -2.0).await,
        Outcome::Rejected
    );
    assert_eq!(
        inventory.add_material_outcome(u, "Steel", 1, f64::NAN).await,
        Outcome::Rejected
    );
    assert!(inventory.material_names(u).await.is_empty());

    assert!(inventory.add_material(u, "Steel", 1, 1.0).await);
    let id = inventory.material_id(u, "Steel").await.unwrap();
    assert!(!inventory.rename_material(id, "  ").await);
    assert!(!inventory.set_price(u, "Steel", -2.0).await);
    assert_eq!(inventory.material_names(u).await, vec!["Steel".to_string()]);
    assert_eq!(inventory.price(u, "Steel").await, Some(1.0));
}

#[tokio::test]
async fn materials_need_an_existing_owner() {
    let (_, inventory) = common::services().await;
    assert_eq!(
        inventory.add_material_outcome(404, "Steel", 1, 1.0).await,
        Outcome::Failed
    );
    assert!(inventory.inventory(404).await.is_empty());
}

#[tokio::test]
async fn dashboard_combines_username_and_inventory() {
    let (accounts, inventory) = common::services().await;
    let u = common::user(&accounts, "erin").await;
    assert!(inventory.add_material(u, "Steel", 10, 2.5).await);
    assert!(inventory.add_material(u, "Wood", 4, 3.0).await);

    let dashboard = inventory.dashboard(&accounts, u).await.unwrap();
    assert_eq!(dashboard.username, "erin");
    assert_eq!(dashboard.materials.len(), 2);
    assert_eq!(dashboard.total_value, 37.0);

    assert!(inventory.dashboard(&accounts, u + 1).await.is_none());
}
