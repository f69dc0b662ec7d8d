use sqlx::SqlitePool;

use crate::structs::QrCode;

/// One payment QR per shop: re-uploads replace the existing binding.
pub async fn upsert_qr(
    pool: &SqlitePool,
    shop_id: i64,
    qr_filename: &str,
) -> Result<QrCode, sqlx::Error> {
    sqlx::query_as::<_, QrCode>(
        "INSERT INTO qr (shop_id, qr_filename) VALUES ($1, $2)
         ON CONFLICT (shop_id) DO UPDATE SET qr_filename = excluded.qr_filename
         RETURNING *",
    )
    .bind(shop_id)
    .bind(qr_filename)
    .fetch_one(pool)
    .await
}

pub async fn get_qr(pool: &SqlitePool, shop_id: i64) -> Result<Option<QrCode>, sqlx::Error> {
    sqlx::query_as::<_, QrCode>("SELECT * FROM qr WHERE shop_id = $1")
        .bind(shop_id)
        .fetch_optional(pool)
        .await
}
