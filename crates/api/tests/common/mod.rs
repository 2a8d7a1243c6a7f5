#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use thesis_api::auth::jwt::{generate_access_token, JwtConfig};
use thesis_api::auth::password::hash_password;
use thesis_api::config::ServerConfig;
use thesis_api::middleware::auth::TOKEN_HEADER;
use thesis_api::router::build_app_router;
use thesis_api::state::AppState;
use thesis_core::roles::Role;
use thesis_db::models::person::{CreatePerson, Person};
use thesis_db::repositories::PersonRepo;

/// Password used for every seeded person.
pub const TEST_PASSWORD: &str = "test_password_123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-key".to_string(),
            expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Same stack as production via [`build_app_router`].
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A complete person payload whose unique fields derive from `code`.
pub fn new_person(code: &str) -> CreatePerson {
    CreatePerson {
        code: Some(code.to_string()),
        first_name: Some("Test".to_string()),
        last_name: Some(code.to_string()),
        full_name: Some(format!("Test {code}")),
        email: Some(format!("{}@test.com", code.to_lowercase())),
        phone_number: Some("0900000000".to_string()),
        birthday: Some("2000-01-01".to_string()),
        address: Some("Test address".to_string()),
        gender: Some("F".to_string()),
        password: Some(TEST_PASSWORD.to_string()),
        image: None,
        status: None,
    }
}

/// Insert a person directly through the repository layer.
pub async fn seed_person(pool: &PgPool, role: Role, code: &str) -> Person {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let mut tx = pool.begin().await.unwrap();
    let person = PersonRepo::create(&mut tx, role, &new_person(code), &hashed, "seed")
        .await
        .expect("person creation should succeed");
    tx.commit().await.unwrap();
    person
}

/// Issue a valid session token for `person`.
pub fn token_for(person: &Person, role: Role) -> String {
    generate_access_token(
        person.uuid,
        &person.full_name,
        &person.code,
        role,
        &test_config().jwt,
    )
    .expect("token generation should succeed")
}

/// Seed a faculty-office account and return its token.
pub async fn staff_token(pool: &PgPool) -> String {
    let staff = seed_person(pool, Role::FacultyOffice, "FO001").await;
    token_for(&staff, Role::FacultyOffice)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(TOKEN_HEADER, bearer(token))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body, None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_json(app, "POST", uri, body, Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_json(app, "PUT", uri, body, Some(token)).await
}

/// Send a request without a body to a route that takes none (POST/PUT/DELETE).
pub async fn send_auth(app: Router, method: &str, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(TOKEN_HEADER, bearer(token))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send_auth(app, "DELETE", uri, token).await
}

async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(TOKEN_HEADER, bearer(token));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}
