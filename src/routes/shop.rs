use std::str::FromStr;

use actix_identity::Identity;
use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_session::Session;
use actix_web::{
    get, post,
    web::{self, Data},
    Responder,
};
use serde::Deserialize;

use super::{base_context, render};
use crate::db;
use crate::errors::{AppError, CatalogError, OrderError};
use crate::guard::{self, Gate};
use crate::structs::{OrderStatus, Role};
use crate::utils::{flash, persist_upload, see_other};
use crate::AppState;

#[get("/shop/dashboard")]
pub async fn shop_dashboard_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
    session: Session,
) -> Result<impl Responder, AppError> {
    let resolved = guard::resolve_identity(&state.db_pool, identity).await?;
    let user = match guard::require_role(resolved, Role::Shopkeeper) {
        Gate::Authorized(user) => user,
        gate => return Ok(gate.deny(&session)),
    };

    let dashboard = db::dashboard::shop_dashboard(&state.db_pool, user.id).await?;

    let mut context = base_context(Some(&user), &session);
    context.insert("title", "Shop dashboard");
    context.insert("services", &dashboard.services);
    context.insert("orders", &dashboard.orders);
    context.insert("qr", &dashboard.qr);
    render("dashboard_shopkeeper.html", &context)
}

#[derive(Deserialize)]
pub struct AddServiceForm {
    name: Option<String>,
    cost: Option<String>,
}

#[post("/shop/add_service")]
pub async fn add_service_handler(
    web::Form(form): web::Form<AddServiceForm>,
    state: Data<AppState>,
    identity: Option<Identity>,
    session: Session,
) -> Result<impl Responder, AppError> {
    let resolved = guard::resolve_identity(&state.db_pool, identity).await?;
    let user = match guard::require_role(resolved, Role::Shopkeeper) {
        Gate::Authorized(user) => user,
        gate => return Ok(gate.deny(&session)),
    };

    let name = form.name.as_deref().unwrap_or("");
    let cost = match form.cost.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        None => 0.0,
        Some(raw) => match raw.parse::<f64>() {
            Ok(cost) => cost,
            Err(_) => {
                flash(&session, "Cost must be a number.");
                return Ok(see_other("/shop/dashboard"));
            }
        },
    };

    match db::services::add_service(&state.db_pool, &user, name, cost).await {
        Ok(_) => flash(&session, "Service added."),
        Err(CatalogError::Database(e)) => return Err(AppError::Database(e)),
        Err(e) => flash(&session, &e.to_string()),
    }
    Ok(see_other("/shop/dashboard"))
}

#[post("/shop/disable_service/{service_id}")]
pub async fn disable_service_handler(
    path: web::Path<i64>,
    state: Data<AppState>,
    identity: Option<Identity>,
    session: Session,
) -> Result<impl Responder, AppError> {
    let resolved = guard::resolve_identity(&state.db_pool, identity).await?;
    let user = match guard::require_role(resolved, Role::Shopkeeper) {
        Gate::Authorized(user) => user,
        gate => return Ok(gate.deny(&session)),
    };

    match db::services::disable_service(&state.db_pool, &user, path.into_inner()).await {
        Ok(_) => flash(&session, "Service disabled."),
        Err(CatalogError::Database(e)) => return Err(AppError::Database(e)),
        Err(e) => flash(&session, &e.to_string()),
    }
    Ok(see_other("/shop/dashboard"))
}

#[derive(MultipartForm)]
pub struct QrUploadForm {
    #[multipart(limit = "5MB")]
    qr: Option<TempFile>,
}

#[post("/shop/upload_qr")]
pub async fn upload_qr_handler(
    MultipartForm(form): MultipartForm<QrUploadForm>,
    state: Data<AppState>,
    identity: Option<Identity>,
    session: Session,
) -> Result<impl Responder, AppError> {
    let resolved = guard::resolve_identity(&state.db_pool, identity).await?;
    let user = match guard::require_role(resolved, Role::Shopkeeper) {
        Gate::Authorized(user) => user,
        gate => return Ok(gate.deny(&session)),
    };

    let Some(file) = form.qr.filter(|f| f.size > 0) else {
        flash(&session, "No file selected.");
        return Ok(see_other("/shop/dashboard"));
    };

    // Stable name per shop: the image is replaced in place, the row upserted.
    let filename = format!("{}_qr.png", user.id);
    let dest = state.config.qr_dir.join(&filename);
    persist_upload(file.file.path(), &dest)?;
    db::qr::upsert_qr(&state.db_pool, user.id, &filename).await?;

    flash(&session, "QR uploaded.");
    Ok(see_other("/shop/dashboard"))
}

#[derive(Deserialize)]
pub struct UpdateOrderForm {
    status: Option<String>,
}

#[post("/shop/update_order/{order_id}")]
pub async fn update_order_handler(
    path: web::Path<i64>,
    web::Form(form): web::Form<UpdateOrderForm>,
    state: Data<AppState>,
    identity: Option<Identity>,
    session: Session,
) -> Result<impl Responder, AppError> {
    let resolved = guard::resolve_identity(&state.db_pool, identity).await?;
    let user = match guard::require_role(resolved, Role::Shopkeeper) {
        Gate::Authorized(user) => user,
        gate => return Ok(gate.deny(&session)),
    };

    let status = form
        .status
        .as_deref()
        .and_then(|s| OrderStatus::from_str(s).ok());
    let Some(status) = status else {
        flash(&session, "Invalid status.");
        return Ok(see_other("/shop/dashboard"));
    };

    match db::orders::update_status(&state.db_pool, &user, path.into_inner(), status).await {
        Ok(order) => flash(&session, &format!("Order #{} is now {}.", order.id, order.status)),
        Err(OrderError::Database(e)) => return Err(AppError::Database(e)),
        Err(e) => flash(&session, &e.to_string()),
    }
    Ok(see_other("/shop/dashboard"))
}
