use std::{env, fs, str::FromStr};

use actix_files::{Files, NamedFile};
use actix_identity::IdentityMiddleware;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{
    cookie::Key,
    http::{Method, StatusCode},
    middleware,
    web::{self, Data},
    App, Either, HttpResponse, HttpServer, Responder,
};
use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
    SqlitePool,
};

use printdesk::{config::Config, routes, AppState};

fn get_session_key() -> Key {
    let key_str = env::var("SESSION_KEY").unwrap_or_else(|_| {
        log::error!("FATAL: SESSION_KEY environment variable not set");
        std::process::exit(1);
    });
    Key::from(key_str.as_bytes())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    fs::create_dir_all(&config.upload_dir)?;
    fs::create_dir_all(&config.qr_dir)?;

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .read_only(false)
        .busy_timeout(std::time::Duration::from_secs(5));

    let db_pool = SqlitePool::connect_with(opts)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    sqlx::migrate!().run(&db_pool).await.expect("Migrate Error");

    info!("Database migrated successfully");

    info!("Starting HTTP server on http://{}/", config.bind_addr);

    let bind_addr = config.bind_addr.clone();

    HttpServer::new(move || {
        App::new()
            // enable automatic response compression - usually register this first
            .wrap(middleware::Compress::default())
            .wrap(IdentityMiddleware::default())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                get_session_key(),
            ))
            // enable logger - always register Actix Web Logger middleware last
            .wrap(middleware::Logger::default())
            .service(routes::index_handler)
            .service(routes::get_services_handler)
            .service(routes::uploaded_file_handler)
            .service(routes::qr_file_handler)
            .service(routes::auth::register_handler)
            .service(routes::auth::register_form_handler)
            .service(routes::auth::login_handler)
            .service(routes::auth::login_form_handler)
            .service(routes::auth::logout_handler)
            .service(routes::admin::admin_dashboard_handler)
            .service(routes::admin::admin_orders_handler)
            .service(routes::shop::shop_dashboard_handler)
            .service(routes::shop::add_service_handler)
            .service(routes::shop::disable_service_handler)
            .service(routes::shop::upload_qr_handler)
            .service(routes::shop::update_order_handler)
            .service(routes::customer::customer_dashboard_handler)
            .service(routes::customer::new_order_handler)
            .service(routes::customer::new_order_form_handler)
            .service(Files::new("/static", "static"))
            .app_data(Data::new(AppState {
                db_pool: db_pool.clone(),
                config: config.clone(),
            }))
            .default_service(web::to(default_handler))
    })
    .bind(bind_addr)?
    .run()
    .await
}

async fn default_handler(req_method: Method) -> Result<impl Responder, std::io::Error> {
    match req_method {
        Method::GET => {
            let file = NamedFile::open("static/404.html")?
                .customize()
                .with_status(StatusCode::NOT_FOUND);
            Ok(Either::Left(file))
        }
        _ => Ok(Either::Right(HttpResponse::MethodNotAllowed().finish())),
    }
}
