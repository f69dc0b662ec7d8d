use sqlx::SqlitePool;

use super::{services, users};
use crate::errors::OrderError;
use crate::structs::{Order, OrderStatus, OrderView, Role, User};

/// Print parameters as they arrive from the order form. Absent copies default
/// to 1; an absent color becomes the "Not required" sentinel.
#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub shop_id: i64,
    pub service_id: Option<i64>,
    pub doc_filename: Option<String>,
    pub paper_size: Option<String>,
    pub sides: Option<String>,
    pub color: Option<String>,
    pub copies: Option<i64>,
    pub additional: Option<String>,
}

/// Creates an order with status `pending`. Foreign keys are validated before
/// the insert: the shop must be a shopkeeper and the service, if any, must be
/// an active offering of that shop.
pub async fn place_order(
    pool: &SqlitePool,
    customer: &User,
    new: NewOrder,
) -> Result<Order, OrderError> {
    if customer.role != Role::Customer {
        return Err(OrderError::NotCustomer);
    }
    let shop = users::get_user_by_id(pool, new.shop_id)
        .await?
        .filter(|u| u.role == Role::Shopkeeper)
        .ok_or(OrderError::ShopNotFound)?;
    if let Some(service_id) = new.service_id {
        let offered = services::get_service(pool, service_id)
            .await?
            .map(|s| s.shop_id == shop.id && s.active)
            .unwrap_or(false);
        if !offered {
            return Err(OrderError::ServiceNotOffered);
        }
    }
    let copies = new.copies.unwrap_or(1);
    if copies < 1 {
        return Err(OrderError::InvalidCopies);
    }
    let color = new
        .color
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| "Not required".to_owned());
    let created_at = super::utc_now();

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (customer_id, shop_id, service_id, doc_filename, paper_size,
                             sides, color, copies, additional, status, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
    )
    .bind(customer.id)
    .bind(shop.id)
    .bind(new.service_id)
    .bind(new.doc_filename)
    .bind(new.paper_size)
    .bind(new.sides)
    .bind(color)
    .bind(copies)
    .bind(new.additional.unwrap_or_default())
    .bind(OrderStatus::Pending)
    .bind(&created_at)
    .fetch_one(pool)
    .await?;
    log::info!(
        "Order {} placed by customer {} against shop {}",
        order.id,
        customer.id,
        shop.id
    );
    Ok(order)
}

pub async fn get_order(pool: &SqlitePool, id: i64) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Applies a status change on behalf of a shopkeeper. Only the owning shop
/// may touch the order, and the move must be permitted by the workflow.
/// Re-applying the current terminal status is a no-op.
pub async fn update_status(
    pool: &SqlitePool,
    shopkeeper: &User,
    order_id: i64,
    new_status: OrderStatus,
) -> Result<Order, OrderError> {
    let order = get_order(pool, order_id).await?.ok_or(OrderError::NotFound)?;
    if order.shop_id != shopkeeper.id {
        return Err(OrderError::NotOwner);
    }
    if order.status == new_status && order.status.is_terminal() {
        return Ok(order);
    }
    if !order.status.allows(new_status) {
        return Err(OrderError::InvalidTransition {
            from: order.status,
            to: new_status,
        });
    }
    let order =
        sqlx::query_as::<_, Order>("UPDATE orders SET status = $1 WHERE id = $2 RETURNING *")
            .bind(new_status)
            .bind(order_id)
            .fetch_one(pool)
            .await?;
    log::info!("Order {} moved to {}", order.id, order.status);
    Ok(order)
}

/// Orders visible to the actor: customers see their own, shopkeepers their
/// shop's, admins everything. Newest first.
pub async fn list_orders_for(
    pool: &SqlitePool,
    actor: &User,
) -> Result<Vec<OrderView>, sqlx::Error> {
    match actor.role {
        Role::Customer => orders_for_customer(pool, actor.id).await,
        Role::Shopkeeper => orders_for_shop(pool, actor.id).await,
        Role::Admin => all_orders(pool).await,
    }
}

pub async fn orders_for_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> Result<Vec<OrderView>, sqlx::Error> {
    sqlx::query_as::<_, OrderView>(
        "SELECT o.*,
                NULL AS customer_name,
                s.name AS service_name,
                COALESCE(sh.shop_name, sh.name) AS shop_name,
                sh.name AS shopkeeper_name,
                q.qr_filename AS qr_filename
         FROM orders o
         LEFT JOIN services s ON o.service_id = s.id
         LEFT JOIN users sh ON o.shop_id = sh.id
         LEFT JOIN qr q ON sh.id = q.shop_id
         WHERE o.customer_id = $1
         ORDER BY o.created_at DESC, o.id DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await
}

pub async fn orders_for_shop(
    pool: &SqlitePool,
    shop_id: i64,
) -> Result<Vec<OrderView>, sqlx::Error> {
    sqlx::query_as::<_, OrderView>(
        "SELECT o.*,
                c.name AS customer_name,
                s.name AS service_name,
                NULL AS shop_name,
                NULL AS shopkeeper_name,
                NULL AS qr_filename
         FROM orders o
         LEFT JOIN users c ON o.customer_id = c.id
         LEFT JOIN services s ON o.service_id = s.id
         WHERE o.shop_id = $1
         ORDER BY o.created_at DESC, o.id DESC",
    )
    .bind(shop_id)
    .fetch_all(pool)
    .await
}

pub async fn all_orders(pool: &SqlitePool) -> Result<Vec<OrderView>, sqlx::Error> {
    sqlx::query_as::<_, OrderView>(
        "SELECT o.*,
                c.name AS customer_name,
                s.name AS service_name,
                COALESCE(sh.shop_name, sh.name) AS shop_name,
                sh.name AS shopkeeper_name,
                NULL AS qr_filename
         FROM orders o
         LEFT JOIN users c ON o.customer_id = c.id
         LEFT JOIN services s ON o.service_id = s.id
         LEFT JOIN users sh ON o.shop_id = sh.id
         ORDER BY o.created_at DESC, o.id DESC",
    )
    .fetch_all(pool)
    .await
}
