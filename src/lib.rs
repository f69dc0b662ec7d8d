#[macro_use]
extern crate lazy_static;

use sqlx::SqlitePool;
use tera::Tera;

pub mod config;
pub mod db;
pub mod errors;
pub mod guard;
pub mod routes;
pub mod structs;
pub mod utils;

#[derive(Debug, Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: config::Config,
}

lazy_static! {
    pub static ref TEMPLATES: Tera = {
        let mut tera = match Tera::new("templates/**/*") {
            Ok(t) => t,
            Err(e) => {
                log::error!("Parsing error(s): {}", e);
                ::std::process::exit(1);
            }
        };
        tera.autoescape_on(vec![".html", ".sql"]);
        tera
    };
}
