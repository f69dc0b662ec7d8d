mod common;

use printdesk::db;
use printdesk::errors::UserError;
use printdesk::structs::Role;
use printdesk::utils::verify_password;

#[tokio::test]
async fn distinct_emails_never_collide() {
    let pool = common::setup_pool().await;

    let a = common::create_customer(&pool, "Ann", "ann@example.com").await;
    let b = common::create_customer(&pool, "Ben", "ben@example.com").await;
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn duplicate_email_rejected_with_no_new_row() {
    let pool = common::setup_pool().await;

    common::create_customer(&pool, "Ann", "ann@example.com").await;
    let second = db::users::create_user(
        &pool,
        "Impostor",
        "ann@example.com",
        "otherpass",
        Role::Customer,
        None,
    )
    .await;
    assert!(matches!(second, Err(UserError::EmailTaken)));

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn duplicate_email_detection_ignores_case() {
    let pool = common::setup_pool().await;

    common::create_customer(&pool, "Ann", "Ann@Example.com").await;
    let second = db::users::create_user(
        &pool,
        "Impostor",
        "ann@example.com",
        "otherpass",
        Role::Customer,
        None,
    )
    .await;
    assert!(matches!(second, Err(UserError::EmailTaken)));
}

#[tokio::test]
async fn credentials_are_stored_hashed() {
    let pool = common::setup_pool().await;

    let user = common::create_customer(&pool, "Ann", "ann@example.com").await;
    assert_ne!(user.pwd_hash, "testpass");
    assert!(verify_password("testpass", &user.pwd_hash));
    assert!(!verify_password("not-the-password", &user.pwd_hash));
}

#[tokio::test]
async fn lookup_by_email_is_case_insensitive() {
    let pool = common::setup_pool().await;

    common::create_shopkeeper(&pool, "Sam", "Sam@Example.com", "Copy Corner").await;
    let found = db::users::get_user_by_email(&pool, "sam@example.com")
        .await
        .unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().role, Role::Shopkeeper);
}

#[tokio::test]
async fn unknown_identity_resolves_to_none() {
    let pool = common::setup_pool().await;

    let user = db::users::get_user_by_id(&pool, 9999).await.unwrap();
    assert!(user.is_none());
}
