use sqlx::SqlitePool;

use crate::errors::CatalogError;
use crate::structs::{Service, User};

pub async fn add_service(
    pool: &SqlitePool,
    shopkeeper: &User,
    name: &str,
    cost: f64,
) -> Result<Service, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::EmptyName);
    }
    if cost < 0.0 {
        return Err(CatalogError::NegativeCost);
    }
    let service = sqlx::query_as::<_, Service>(
        "INSERT INTO services (shop_id, name, cost) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(shopkeeper.id)
    .bind(name)
    .bind(cost)
    .fetch_one(pool)
    .await?;
    log::info!("Shop {} added service {}", shopkeeper.id, service.id);
    Ok(service)
}

pub async fn get_service(pool: &SqlitePool, id: i64) -> Result<Option<Service>, sqlx::Error> {
    sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Everything the shop owns, disabled entries included. Dashboard view.
pub async fn list_services(pool: &SqlitePool, shop_id: i64) -> Result<Vec<Service>, sqlx::Error> {
    sqlx::query_as::<_, Service>("SELECT * FROM services WHERE shop_id = $1 ORDER BY id")
        .bind(shop_id)
        .fetch_all(pool)
        .await
}

/// The catalog offered to customers: active services only.
pub async fn list_active_services(
    pool: &SqlitePool,
    shop_id: i64,
) -> Result<Vec<Service>, sqlx::Error> {
    sqlx::query_as::<_, Service>(
        "SELECT * FROM services WHERE shop_id = $1 AND active = 1 ORDER BY id",
    )
    .bind(shop_id)
    .fetch_all(pool)
    .await
}

/// Soft-disables a service. Orders already referencing it keep their row;
/// the service just stops appearing in new-order catalogs.
pub async fn disable_service(
    pool: &SqlitePool,
    shopkeeper: &User,
    service_id: i64,
) -> Result<Service, CatalogError> {
    let service = get_service(pool, service_id)
        .await?
        .ok_or(CatalogError::NotFound)?;
    if service.shop_id != shopkeeper.id {
        return Err(CatalogError::NotOwner);
    }
    let service = sqlx::query_as::<_, Service>(
        "UPDATE services SET active = 0 WHERE id = $1 RETURNING *",
    )
    .bind(service_id)
    .fetch_one(pool)
    .await?;
    log::info!("Shop {} disabled service {}", shopkeeper.id, service.id);
    Ok(service)
}
