mod common;

use actix_identity::IdentityMiddleware;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, http::StatusCode, test, web::Data, App};

use printdesk::{config::Config, routes, AppState};

#[actix_web::test]
async fn anonymous_admin_request_redirects_to_login() {
    let pool = common::setup_pool().await;
    common::create_shopkeeper(&pool, "Sam", "sam@example.com", "Shop A").await;
    let state = AppState {
        db_pool: pool,
        config: Config::from_env(),
    };

    let app = test::init_service(
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                Key::from(&[7u8; 64]),
            ))
            .service(routes::admin::admin_dashboard_handler)
            .app_data(Data::new(state)),
    )
    .await;

    let req = test::TestRequest::get().uri("/admin/dashboard").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/login");
}

#[actix_web::test]
async fn anonymous_shop_mutation_redirects_to_login() {
    let pool = common::setup_pool().await;
    let state = AppState {
        db_pool: pool,
        config: Config::from_env(),
    };

    let app = test::init_service(
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                Key::from(&[7u8; 64]),
            ))
            .service(routes::shop::add_service_handler)
            .app_data(Data::new(state)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/shop/add_service")
        .set_form([("name", "Scan"), ("cost", "1.0")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/login");
}

#[actix_web::test]
async fn get_services_returns_the_active_catalog_as_json() {
    let pool = common::setup_pool().await;
    let shop = common::create_shopkeeper(&pool, "Sam", "sam@example.com", "Shop A").await;
    common::add_service(&pool, &shop, "B/W Print", 2.0).await;
    let hidden = common::add_service(&pool, &shop, "Lamination", 3.0).await;
    printdesk::db::services::disable_service(&pool, &shop, hidden.id)
        .await
        .unwrap();

    let state = AppState {
        db_pool: pool,
        config: Config::from_env(),
    };
    let app = test::init_service(
        App::new()
            .service(routes::get_services_handler)
            .app_data(Data::new(state)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/get_services/{}", shop.id))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let services = body["services"].as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["name"], "B/W Print");
    assert_eq!(services[0]["cost"], 2.0);
}
