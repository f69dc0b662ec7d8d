#![allow(dead_code)]

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use printdesk::db;
use printdesk::db::orders::NewOrder;
use printdesk::structs::{Order, Role, Service, User};

/// Fresh in-memory database with the full schema applied. Single connection
/// so the memory database survives for the whole test.
pub async fn setup_pool() -> SqlitePool {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:").expect("Failed to parse options");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await
        .expect("Failed to open in-memory database");
    sqlx::migrate!().run(&pool).await.expect("Migrate Error");
    pool
}

pub async fn create_customer(pool: &SqlitePool, name: &str, email: &str) -> User {
    db::users::create_user(pool, name, email, "testpass", Role::Customer, None)
        .await
        .expect("Failed to create customer")
}

pub async fn create_shopkeeper(pool: &SqlitePool, name: &str, email: &str, shop: &str) -> User {
    db::users::create_user(pool, name, email, "testpass", Role::Shopkeeper, Some(shop))
        .await
        .expect("Failed to create shopkeeper")
}

pub async fn create_admin(pool: &SqlitePool, email: &str) -> User {
    db::users::create_user(pool, "Admin", email, "testpass", Role::Admin, None)
        .await
        .expect("Failed to create admin")
}

pub async fn add_service(pool: &SqlitePool, shop: &User, name: &str, cost: f64) -> Service {
    db::services::add_service(pool, shop, name, cost)
        .await
        .expect("Failed to add service")
}

pub async fn place_order(
    pool: &SqlitePool,
    customer: &User,
    shop: &User,
    service_id: Option<i64>,
) -> Order {
    db::orders::place_order(
        pool,
        customer,
        NewOrder {
            shop_id: shop.id,
            service_id,
            ..NewOrder::default()
        },
    )
    .await
    .expect("Failed to place order")
}
