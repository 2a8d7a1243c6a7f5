mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_database(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}

/// The request-id layer stamps every response.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_responses_carry_request_id(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}

/// Browsers may send the session token header cross-origin.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cors_preflight_allows_token_header(pool: PgPool) {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = build_test_app(pool);
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/student")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "GET")
        .header("access-control-request-headers", "bku-token")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    let allowed = response
        .headers()
        .get("access-control-allow-headers")
        .unwrap()
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("bku-token"), "{allowed}");
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
}
