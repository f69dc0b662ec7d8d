use actix_identity::Identity;
use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_session::Session;
use actix_web::{get, post, web::Data, Responder};

use super::{base_context, render};
use crate::db::{self, orders::NewOrder};
use crate::errors::{AppError, OrderError};
use crate::guard::{self, Gate};
use crate::structs::Role;
use crate::utils::{flash, persist_upload, see_other, stored_upload_name};
use crate::AppState;

#[get("/customer/dashboard")]
pub async fn customer_dashboard_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
    session: Session,
) -> Result<impl Responder, AppError> {
    let resolved = guard::resolve_identity(&state.db_pool, identity).await?;
    let user = match guard::require_role(resolved, Role::Customer) {
        Gate::Authorized(user) => user,
        gate => return Ok(gate.deny(&session)),
    };

    let dashboard = db::dashboard::customer_dashboard(&state.db_pool, user.id).await?;

    let mut context = base_context(Some(&user), &session);
    context.insert("title", "My orders");
    context.insert("orders", &dashboard.orders);
    context.insert("shops", &dashboard.shops);
    render("dashboard_customer.html", &context)
}

#[get("/customer/new_order")]
pub async fn new_order_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
    session: Session,
) -> Result<impl Responder, AppError> {
    let resolved = guard::resolve_identity(&state.db_pool, identity).await?;
    let user = match guard::require_role(resolved, Role::Customer) {
        Gate::Authorized(user) => user,
        gate => return Ok(gate.deny(&session)),
    };

    let shops = db::users::list_shops(&state.db_pool).await?;

    let mut context = base_context(Some(&user), &session);
    context.insert("title", "New order");
    context.insert("shops", &shops);
    render("new_order.html", &context)
}

#[derive(MultipartForm)]
pub struct NewOrderForm {
    shop_id: Option<Text<String>>,
    service_id: Option<Text<String>>,
    paper_size: Option<Text<String>>,
    sides: Option<Text<String>>,
    color: Option<Text<String>>,
    copies: Option<Text<String>>,
    additional: Option<Text<String>>,
    #[multipart(limit = "25MB")]
    document: Option<TempFile>,
}

fn opt_text(field: &Option<Text<String>>) -> Option<String> {
    field
        .as_ref()
        .map(|t| t.0.trim().to_owned())
        .filter(|s| !s.is_empty())
}

#[post("/customer/new_order")]
pub async fn new_order_form_handler(
    MultipartForm(form): MultipartForm<NewOrderForm>,
    state: Data<AppState>,
    identity: Option<Identity>,
    session: Session,
) -> Result<impl Responder, AppError> {
    let resolved = guard::resolve_identity(&state.db_pool, identity).await?;
    let user = match guard::require_role(resolved, Role::Customer) {
        Gate::Authorized(user) => user,
        gate => return Ok(gate.deny(&session)),
    };

    let Some(shop_id) = opt_text(&form.shop_id).and_then(|s| s.parse::<i64>().ok()) else {
        flash(&session, "Select a shop.");
        return Ok(see_other("/customer/new_order"));
    };
    let service_id = match opt_text(&form.service_id) {
        None => None,
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                flash(&session, "Select a valid service.");
                return Ok(see_other("/customer/new_order"));
            }
        },
    };
    let copies = match opt_text(&form.copies) {
        None => None,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                flash(&session, "Copies must be at least 1.");
                return Ok(see_other("/customer/new_order"));
            }
        },
    };

    // The document hits disk before the order row exists; a visible order
    // never points at a missing file.
    let mut doc_filename = None;
    if let Some(file) = form.document.as_ref().filter(|f| f.size > 0) {
        let original = file.file_name.as_deref().unwrap_or("");
        let stored = stored_upload_name(original);
        persist_upload(file.file.path(), &state.config.upload_dir.join(&stored))?;
        doc_filename = Some(stored);
    }

    let new_order = NewOrder {
        shop_id,
        service_id,
        doc_filename: doc_filename.clone(),
        paper_size: opt_text(&form.paper_size),
        sides: opt_text(&form.sides),
        color: opt_text(&form.color),
        copies,
        additional: opt_text(&form.additional),
    };

    match db::orders::place_order(&state.db_pool, &user, new_order).await {
        Ok(_) => {
            flash(&session, "Order placed.");
            Ok(see_other("/customer/dashboard"))
        }
        Err(e) => {
            if let Some(stored) = &doc_filename {
                let _ = std::fs::remove_file(state.config.upload_dir.join(stored));
            }
            match e {
                OrderError::Database(e) => Err(AppError::Database(e)),
                e => {
                    flash(&session, &e.to_string());
                    Ok(see_other("/customer/new_order"))
                }
            }
        }
    }
}
