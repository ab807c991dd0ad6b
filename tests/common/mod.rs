#![allow(dead_code)]

use stockpile::auth::UserId;
use stockpile::config::Config;
use stockpile::{AccountService, InventoryService};

pub async fn services() -> (AccountService, InventoryService) {
    let cfg = Config {
        db_path: "sqlite::memory:".into(),
        ..Config::default()
    };
    stockpile::connect(&cfg).await.expect("open in-memory db")
}

pub async fn user(accounts: &AccountService, name: &str) -> UserId {
    assert!(
        accounts
            .register(name, &format!("{name}@example.com"), "pass")
            .await
    );
    accounts.authenticate(name, "pass").await.expect("login")
}
