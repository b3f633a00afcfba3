mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    block_admin, create_test_admin, generate_unique_email, setup_test_app, soft_delete_admin,
};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success_returns_token_and_admin(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_admin(&mut tx, &email, "testpass123", &["students:read"]).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(login_request(&email, "testpass123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["admin"]["email"], email);
    assert_eq!(body["admin"]["permissions"], json!(["students:read"]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password_unauthorized(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_admin(&mut tx, &email, "testpass123", &[]).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(login_request(&email, "wrong-password"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_email_unauthorized(pool: PgPool) {
    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(login_request(&generate_unique_email(), "whatever123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_blocked_admin_unauthorized(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let admin = create_test_admin(&mut tx, &email, "testpass123", &[]).await;
    block_admin(&mut tx, admin.id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(login_request(&email, "testpass123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_soft_deleted_admin_unauthorized(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let admin = create_test_admin(&mut tx, &email, "testpass123", &[]).await;
    soft_delete_admin(&mut tx, admin.id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(login_request(&email, "testpass123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_invalid_email_format_unprocessable(pool: PgPool) {
    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(login_request("not-an-email", "whatever123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_protected_route_without_token_unauthorized(pool: PgPool) {
    let app = setup_test_app(pool).await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/students")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
