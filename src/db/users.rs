use sqlx::SqlitePool;

use crate::errors::UserError;
use crate::structs::{Role, ShopSummary, User};
use crate::utils::hash_password;

/// Creates a user with a hashed credential. The UNIQUE constraint on `email`
/// is the duplicate check; a violation surfaces as `UserError::EmailTaken`
/// with no row written.
pub async fn create_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
    shop_name: Option<&str>,
) -> Result<User, UserError> {
    let pwd_hash = hash_password(password).map_err(|e| {
        log::error!("Failed to hash password: {}", e);
        UserError::Password(e.to_string())
    })?;
    let created_at = super::utc_now();
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, pwd_hash, role, shop_name, created_at)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(name)
    .bind(email.to_lowercase())
    .bind(pwd_hash)
    .bind(role)
    .bind(shop_name)
    .bind(&created_at)
    .fetch_one(pool)
    .await?;
    log::info!("User {} registered as {}", user.id, user.role);
    Ok(user)
}

pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await
}

/// Registered shops, i.e. every user with the shopkeeper role.
pub async fn list_shops(pool: &SqlitePool) -> Result<Vec<ShopSummary>, sqlx::Error> {
    sqlx::query_as::<_, ShopSummary>(
        "SELECT id, name, email, shop_name FROM users WHERE role = 'shopkeeper' ORDER BY id",
    )
    .fetch_all(pool)
    .await
}
