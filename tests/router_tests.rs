//! In-process router tests
//!
//! The pool connects lazily and every request here is rejected before a
//! query runs, so no database is needed.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use buildtrack_server::{
    config::AppConfig,
    create_router,
    models::auth::AuthClaims,
    repository::Repository,
    services::{email::EmailService, Services},
    AppState,
};

fn app() -> Router {
    let config = AppConfig::default();
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("lazy pool");
    let mailer = Arc::new(EmailService::new(config.email.clone()));
    let services = Services::new(Repository::new(pool), &config, mailer);

    create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

fn token_with(role: &str, audience: &str) -> String {
    let config = AppConfig::default();
    AuthClaims {
        sub: "2b7d4f0e-1c3a-4e5b-8f9d-0a1b2c3d4e5f".to_string(),
        aud: audience.to_string(),
        exp: Utc::now().timestamp() + 600,
        iat: Some(Utc::now().timestamp()),
        email: Some("foreman@example.com".to_string()),
        role: Some(role.to_string()),
    }
    .create_token(&config.auth.jwt_secret)
    .expect("token")
}

fn token() -> String {
    token_with("authenticated", "authenticated")
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let request = Request::builder().uri("/api/tools").body(Body::empty()).unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2);
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let request = Request::builder()
        .uri("/api/projects")
        .header(header::AUTHORIZATION, "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_audience_is_unauthorized() {
    let request = Request::builder()
        .uri("/api/dashboard")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", token_with("authenticated", "someone-else")),
        )
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_field_is_a_validation_error() {
    let request = post_json("/api/tool-assignments", &token(), json!({ "project_id": 1 }));
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert!(body["message"].as_str().unwrap().contains("serial_number"));
}

#[tokio::test]
async fn test_zero_horizon_is_rejected() {
    let request = post_json(
        "/api/forecasting/forecast",
        &token(),
        json!({ "name": "Next quarter", "horizon": 0 }),
    );
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
}

#[tokio::test]
async fn test_horizon_above_limit_is_rejected() {
    let request = post_json(
        "/api/forecasting/forecast",
        &token(),
        json!({ "name": "Decade", "horizon": 120 }),
    );
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_parameters_and_model_are_exclusive() {
    let request = post_json(
        "/api/forecasting/forecast",
        &token(),
        json!({ "name": "Mixed", "horizon": 3, "parameters": {"alpha": 0.3}, "model_id": 1 }),
    );
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_serials_are_rejected() {
    let request = post_json(
        "/api/tools",
        &token(),
        json!({ "name": "Drill", "serial_numbers": ["D-001", " D-001 "] }),
    );
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("D-001"));
}

#[tokio::test]
async fn test_blank_tool_name_is_rejected() {
    let request = post_json(
        "/api/tools",
        &token(),
        json!({ "name": "   ", "serial_numbers": ["S-1"] }),
    );
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Tool name is required");
}

#[tokio::test]
async fn test_renaming_tool_to_blank_is_rejected() {
    let request = Request::builder()
        .method("PATCH")
        .uri("/api/tools/1")
        .header(header::AUTHORIZATION, format!("Bearer {}", token()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "name": "  " }).to_string()))
        .unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Tool name cannot be empty");
}

#[tokio::test]
async fn test_blank_forecast_name_is_rejected() {
    let request = post_json(
        "/api/forecasting/forecast",
        &token(),
        json!({ "name": " \t ", "horizon": 3 }),
    );
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Forecast name is required");
}

#[tokio::test]
async fn test_invalid_recipient_is_rejected() {
    let request = post_json(
        "/api/forecasting/email-report",
        &token(),
        json!({ "forecast_id": 1, "recipient": "nobody" }),
    );
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_anonymous_token_cannot_write() {
    let request = post_json(
        "/api/tools",
        &token_with("anon", "authenticated"),
        json!({ "name": "Ladder", "serial_numbers": ["L-1"] }),
    );
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/tools"].is_object());
}
