use actix_identity::error::LoginError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sqlx::Error as SqlxError;
use thiserror::Error;

use crate::structs::OrderStatus;

/// Infrastructure failures. Anything reaching the client through this type is
/// an error response, not a flash message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Login error: {0}")]
    Login(#[from] LoginError),

    #[error("Password error: {0}")]
    Password(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

impl From<AppError> for std::io::Error {
    fn from(err: AppError) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    }
}

/// Registration outcomes the handler reacts to individually. The display
/// strings double as flash messages.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Error: Email already in use.")]
    EmailTaken,

    #[error("Password error: {0}")]
    Password(String),

    #[error("Database error: {0}")]
    Database(SqlxError),
}

impl From<SqlxError> for UserError {
    fn from(err: SqlxError) -> Self {
        if is_unique_violation(&err) {
            UserError::EmailTaken
        } else {
            UserError::Database(err)
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Service name must not be empty.")]
    EmptyName,

    #[error("Cost must not be negative.")]
    NegativeCost,

    #[error("Service not found.")]
    NotFound,

    #[error("That service belongs to another shop.")]
    NotOwner,

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),
}

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Only customers can place orders.")]
    NotCustomer,

    #[error("Selected shop does not exist.")]
    ShopNotFound,

    #[error("Selected service is not offered by this shop.")]
    ServiceNotOffered,

    #[error("Copies must be at least 1.")]
    InvalidCopies,

    #[error("Order not found.")]
    NotFound,

    #[error("That order belongs to another shop.")]
    NotOwner,

    #[error("An order cannot move from {from} to {to}.")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),
}

fn is_unique_violation(err: &SqlxError) -> bool {
    matches!(
        err,
        SqlxError::Database(db) if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
    )
}
