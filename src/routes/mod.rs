pub mod admin;
pub mod auth;
pub mod customer;
pub mod shop;

use actix_files::NamedFile;
use actix_identity::Identity;
use actix_session::Session;
use actix_web::{
    get,
    web::{self, Data},
    HttpResponse, Responder,
};
use serde::Serialize;
use tera::Context;

use crate::db;
use crate::errors::AppError;
use crate::guard;
use crate::structs::{CurrentUser, User};
use crate::utils::take_flash;
use crate::{AppState, TEMPLATES};

/// Context pre-loaded with what every page shows: the resolved identity (or
/// null) and the pending flash message, consumed here.
pub(crate) fn base_context(user: Option<&User>, session: &Session) -> Context {
    let mut context = Context::new();
    context.insert("user", &user.map(CurrentUser::from));
    context.insert("flash", &take_flash(session));
    context.insert("version", env!("CARGO_PKG_VERSION"));
    context
}

pub(crate) fn render(template: &str, context: &Context) -> Result<HttpResponse, AppError> {
    let rendered = TEMPLATES.render(template, context).map_err(|e| {
        log::error!("Failed to render template: {}", e);
        AppError::Template(e)
    })?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(rendered))
}

#[get("/")]
pub async fn index_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
    session: Session,
) -> Result<impl Responder, AppError> {
    let user = guard::resolve_identity(&state.db_pool, identity).await?;
    let mut context = base_context(user.as_ref(), &session);
    context.insert("title", "PrintDesk");
    render("index.html", &context)
}

#[derive(Serialize)]
struct ServiceItem {
    id: i64,
    name: String,
    cost: f64,
}

#[derive(Serialize)]
struct ServicesPayload {
    services: Vec<ServiceItem>,
}

/// Public JSON catalog for one shop; the new-order form fetches this to fill
/// its service dropdown.
#[get("/get_services/{shop_id}")]
pub async fn get_services_handler(
    state: Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let shop_id = path.into_inner();
    let services = db::services::list_active_services(&state.db_pool, shop_id).await?;
    let payload = ServicesPayload {
        services: services
            .into_iter()
            .map(|s| ServiceItem {
                id: s.id,
                name: s.name,
                cost: s.cost,
            })
            .collect(),
    };
    Ok(HttpResponse::Ok().json(payload))
}

fn safe_filename(name: &str) -> Result<&str, AppError> {
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return Err(AppError::NotFound);
    }
    Ok(name)
}

#[get("/static/uploads/{filename}")]
pub async fn uploaded_file_handler(
    state: Data<AppState>,
    path: web::Path<String>,
) -> Result<NamedFile, AppError> {
    let filename = path.into_inner();
    let name = safe_filename(&filename)?;
    NamedFile::open(state.config.upload_dir.join(name)).map_err(|_| AppError::NotFound)
}

#[get("/static/qr/{filename}")]
pub async fn qr_file_handler(
    state: Data<AppState>,
    path: web::Path<String>,
) -> Result<NamedFile, AppError> {
    let filename = path.into_inner();
    let name = safe_filename(&filename)?;
    NamedFile::open(state.config.qr_dir.join(name)).map_err(|_| AppError::NotFound)
}
