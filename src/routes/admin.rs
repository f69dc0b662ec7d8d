use actix_identity::Identity;
use actix_session::Session;
use actix_web::{get, web::Data, Responder};

use super::{base_context, render};
use crate::db;
use crate::errors::AppError;
use crate::guard::{self, Gate};
use crate::structs::Role;
use crate::AppState;

#[get("/admin/dashboard")]
pub async fn admin_dashboard_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
    session: Session,
) -> Result<impl Responder, AppError> {
    let resolved = guard::resolve_identity(&state.db_pool, identity).await?;
    let user = match guard::require_role(resolved, Role::Admin) {
        Gate::Authorized(user) => user,
        gate => return Ok(gate.deny(&session)),
    };

    let dashboard = db::dashboard::admin_dashboard(&state.db_pool).await?;

    let mut context = base_context(Some(&user), &session);
    context.insert("title", "Admin dashboard");
    context.insert("shopkeepers", &dashboard.shopkeepers);
    context.insert("customers", &dashboard.customers);
    context.insert("shop_orders", &dashboard.shop_orders);
    context.insert("daily_orders", &dashboard.daily_orders);
    render("dashboard_admin.html", &context)
}

#[get("/admin/orders")]
pub async fn admin_orders_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
    session: Session,
) -> Result<impl Responder, AppError> {
    let resolved = guard::resolve_identity(&state.db_pool, identity).await?;
    let user = match guard::require_role(resolved, Role::Admin) {
        Gate::Authorized(user) => user,
        gate => return Ok(gate.deny(&session)),
    };

    let orders = db::orders::list_orders_for(&state.db_pool, &user).await?;

    let mut context = base_context(Some(&user), &session);
    context.insert("title", "All orders");
    context.insert("orders", &orders);
    render("admin_orders.html", &context)
}
