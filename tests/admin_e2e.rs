//! End-to-end tests for the admin API

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;
use tower::util::ServiceExt;

use common::{body_json, generate_expired_token, ErrorResponse, TestApp, AUTHOR_NAME};

const AUTHOR_PATH: &str = "/admin/authors/Slavoj%20Zizek";

fn profile() -> serde_json::Value {
    json!({
        "conversation_style": { "tone": "provocative", "tics": ["and so on", "sniff"] },
        "bio": "Slovenian philosopher",
        "author_metadata": { "nationality": "Slovenian" },
        "whatsapp_number": "whatsapp:+15559999"
    })
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_missing_token_returns_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri(AUTHOR_PATH).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let request_id = response.headers()["x-request-id"].to_str().unwrap().to_string();
    let error: ErrorResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(error.error.code, "UNAUTHORIZED");
    assert_eq!(error.request_id, Some(request_id));
}

#[tokio::test]
async fn test_expired_token_returns_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(AUTHOR_PATH)
                .header(header::AUTHORIZATION, format!("Bearer {}", generate_expired_token()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_scheme_returns_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(AUTHOR_PATH)
                .header(header::AUTHORIZATION, format!("Basic {}", app.jwt_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// PUT /admin/authors/:name
// ============================================================================

#[tokio::test]
async fn test_put_author_creates_then_updates() {
    let app = TestApp::new().await;

    let response = app.admin_request(Method::PUT, AUTHOR_PATH, Some(profile())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let author = body_json(response).await;
    assert_eq!(author["name"], AUTHOR_NAME);
    assert_eq!(author["whatsapp_number"], "+15559999");
    assert_eq!(author["conversation_style"]["tone"], "provocative");
    assert_eq!(author["metadata"]["nationality"], "Slovenian");

    let mut changed = profile();
    changed["bio"] = json!("Philosopher and cultural critic");
    let response = app.admin_request(Method::PUT, AUTHOR_PATH, Some(changed)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["bio"], "Philosopher and cultural critic");
}

#[tokio::test]
async fn test_put_author_rejects_invalid_number() {
    let app = TestApp::new().await;

    let mut invalid = profile();
    invalid["whatsapp_number"] = json!("call me maybe");
    let response = app.admin_request(Method::PUT, AUTHOR_PATH, Some(invalid)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");
    assert!(error.error.details.is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn test_put_author_number_must_be_unique() {
    let app = TestApp::new().await;

    let response = app.admin_request(Method::PUT, AUTHOR_PATH, Some(profile())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .admin_request(Method::PUT, "/admin/authors/Alenka%20Zupancic", Some(profile()))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(error.error.message, "Internal server error");
}

// ============================================================================
// GET /admin/authors/:name
// ============================================================================

#[tokio::test]
async fn test_get_author_lists_books() {
    let app = TestApp::new().await;
    app.seed_author_with_books(&["The Parallax View", "Less Than Nothing"]).await;

    let response = app.admin_request(Method::GET, AUTHOR_PATH, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let author = body_json(response).await;
    assert_eq!(author["books"], json!(["Less Than Nothing", "The Parallax View"]));
}

#[tokio::test]
async fn test_get_unknown_author_returns_not_found() {
    let app = TestApp::new().await;

    let response = app.admin_request(Method::GET, "/admin/authors/Nobody", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(error.error.code, "NOT_FOUND");
}

// ============================================================================
// GET /admin/conversations/:id
// ============================================================================

#[tokio::test]
async fn test_get_unknown_conversation_returns_not_found() {
    let app = TestApp::new().await;

    let response = app
        .admin_request(Method::GET, "/admin/conversations/+15550001:+15559999", None)
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
