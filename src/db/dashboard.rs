use serde::Serialize;
use sqlx::SqlitePool;

use super::{orders, qr, services, users};
use crate::structs::{CustomerSummary, OrderView, QrCode, Service, ShopOrderCount, ShopSummary};

/// Admin overview: every shop and customer, per-shop order volume, and the
/// order count for the current UTC calendar day. Re-read from storage on
/// every call.
#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub shopkeepers: Vec<ShopSummary>,
    pub customers: Vec<CustomerSummary>,
    pub shop_orders: Vec<ShopOrderCount>,
    pub daily_orders: i64,
}

pub async fn admin_dashboard(pool: &SqlitePool) -> Result<AdminDashboard, sqlx::Error> {
    let shopkeepers = sqlx::query_as::<_, ShopSummary>(
        "SELECT id, name, email, shop_name FROM users WHERE role = 'shopkeeper' ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let customers = sqlx::query_as::<_, CustomerSummary>(
        "SELECT id, name, email FROM users WHERE role = 'customer' ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let shop_orders = sqlx::query_as::<_, ShopOrderCount>(
        "SELECT sh.id AS shop_id,
                COALESCE(sh.shop_name, sh.name) AS shop_name,
                COUNT(o.id) AS order_count
         FROM users sh
         LEFT JOIN orders o ON sh.id = o.shop_id
         WHERE sh.role = 'shopkeeper'
         GROUP BY sh.id
         ORDER BY order_count DESC, sh.id ASC",
    )
    .fetch_all(pool)
    .await?;

    let today = chrono::Utc::now().date_naive().to_string();
    let daily_orders =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE DATE(created_at) = $1")
            .bind(today)
            .fetch_one(pool)
            .await?;

    Ok(AdminDashboard {
        shopkeepers,
        customers,
        shop_orders,
        daily_orders,
    })
}

#[derive(Debug, Serialize)]
pub struct ShopDashboard {
    pub services: Vec<Service>,
    pub orders: Vec<OrderView>,
    pub qr: Option<QrCode>,
}

pub async fn shop_dashboard(pool: &SqlitePool, shop_id: i64) -> Result<ShopDashboard, sqlx::Error> {
    Ok(ShopDashboard {
        services: services::list_services(pool, shop_id).await?,
        orders: orders::orders_for_shop(pool, shop_id).await?,
        qr: qr::get_qr(pool, shop_id).await?,
    })
}

#[derive(Debug, Serialize)]
pub struct CustomerDashboard {
    pub orders: Vec<OrderView>,
    pub shops: Vec<ShopSummary>,
}

pub async fn customer_dashboard(
    pool: &SqlitePool,
    customer_id: i64,
) -> Result<CustomerDashboard, sqlx::Error> {
    Ok(CustomerDashboard {
        orders: orders::orders_for_customer(pool, customer_id).await?,
        shops: users::list_shops(pool).await?,
    })
}
