use axum::body::Body;
use axum::http::Request;
use coachdesk::config::cors::CorsConfig;
use coachdesk::config::jwt::JwtConfig;
use coachdesk::router::init_router;
use coachdesk::state::AppState;
use coachdesk::utils::password::hash_password;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestAdmin {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub permissions: Vec<String>,
}

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

/// Insert an active administrator holding the given grants.
pub async fn create_test_admin(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
    permissions: &[&str],
) -> TestAdmin {
    let hashed = hash_password(password).unwrap();
    let grants: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO admins (name, email, password, phone_number, permissions, added_by) \
         VALUES ($1, $2, $3, $4, $5, 'tests') \
         RETURNING id",
    )
    .bind("Test Admin")
    .bind(email)
    .bind(&hashed)
    .bind("01700000000")
    .bind(&grants)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestAdmin {
        id,
        email: email.to_string(),
        password: password.to_string(),
        permissions: grants,
    }
}

#[allow(dead_code)]
pub async fn block_admin(tx: &mut Transaction<'_, Postgres>, id: Uuid) {
    sqlx::query("UPDATE admins SET is_active = FALSE WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await
        .unwrap();
}

#[allow(dead_code)]
pub async fn soft_delete_admin(tx: &mut Transaction<'_, Postgres>, id: Uuid) {
    sqlx::query("UPDATE admins SET deleted_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await
        .unwrap();
}

#[allow(dead_code)]
pub async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
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
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_preset_name() -> String {
    format!("Preset {}", Uuid::new_v4())
}
