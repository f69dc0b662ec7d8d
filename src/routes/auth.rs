use std::str::FromStr;

use actix_identity::Identity;
use actix_session::Session;
use actix_web::{
    get, post,
    web::{self, Data},
    HttpMessage, HttpRequest, Responder,
};
use serde::Deserialize;

use super::{base_context, render};
use crate::db;
use crate::errors::{AppError, UserError};
use crate::structs::Role;
use crate::utils::{flash, see_other, verify_password};
use crate::AppState;

#[get("/register")]
pub async fn register_handler(session: Session) -> Result<impl Responder, AppError> {
    let mut context = base_context(None, &session);
    context.insert("title", "Register");
    render("register.html", &context)
}

#[derive(Deserialize)]
pub struct RegisterForm {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
    shop_name: Option<String>,
}

#[post("/register")]
pub async fn register_form_handler(
    web::Form(form): web::Form<RegisterForm>,
    state: Data<AppState>,
    session: Session,
) -> Result<impl Responder, AppError> {
    let email = form.email.as_deref().unwrap_or("").trim().to_owned();
    let password = form.password.as_deref().unwrap_or("");
    let role = form
        .role
        .as_deref()
        .and_then(|r| Role::from_str(r).ok());

    let Some(role) = role else {
        flash(&session, "Fill all fields properly.");
        return Ok(see_other("/register"));
    };
    if email.is_empty() || password.is_empty() {
        flash(&session, "Fill all fields properly.");
        return Ok(see_other("/register"));
    }

    let name = form.name.as_deref().unwrap_or("").trim().to_owned();
    let shop_name = form
        .shop_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match db::users::create_user(&state.db_pool, &name, &email, password, role, shop_name).await {
        Ok(_) => {
            flash(&session, "Registered successfully.");
            Ok(see_other("/login"))
        }
        Err(UserError::EmailTaken) => {
            flash(&session, &UserError::EmailTaken.to_string());
            Ok(see_other("/register"))
        }
        Err(UserError::Password(e)) => Err(AppError::Password(e)),
        Err(UserError::Database(e)) => Err(AppError::Database(e)),
    }
}

#[get("/login")]
pub async fn login_handler(session: Session) -> Result<impl Responder, AppError> {
    let mut context = base_context(None, &session);
    context.insert("title", "Login");
    render("login.html", &context)
}

#[derive(Deserialize)]
pub struct LoginForm {
    email: Option<String>,
    password: Option<String>,
}

#[post("/login")]
pub async fn login_form_handler(
    web::Form(form): web::Form<LoginForm>,
    state: Data<AppState>,
    session: Session,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    let email = form.email.as_deref().unwrap_or("").trim();
    let password = form.password.as_deref().unwrap_or("");

    let user = db::users::get_user_by_email(&state.db_pool, email).await?;
    match user {
        Some(user) if verify_password(password, &user.pwd_hash) => {
            Identity::login(&request.extensions(), user.id.to_string())?;
            log::info!("User {} logged in", user.id);
            Ok(see_other("/"))
        }
        _ => {
            flash(&session, "Invalid credentials.");
            Ok(see_other("/login"))
        }
    }
}

#[get("/logout")]
pub async fn logout_handler(
    identity: Option<Identity>,
    session: Session,
) -> Result<impl Responder, AppError> {
    if let Some(identity) = identity {
        identity.logout();
    }
    session.purge();
    Ok(see_other("/"))
}
