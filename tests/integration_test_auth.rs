mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_register_and_login_round_trip() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "alice@example.com",
                "password": "correct-horse",
                "name": "Alice"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["system_role"], "USER");
    assert!(body.get("password_hash").is_none(), "hash must not leak");

    let auth = app.login("alice@example.com", "correct-horse").await;
    assert!(!auth.access_token.is_empty());
    assert!(!auth.csrf_token.is_empty());

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/auth/me")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let me = parse_body(res).await;
    assert_eq!(me["email"], "alice@example.com");
    assert_eq!(me["name"], "Alice");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.register("bob@example.com", "Bob", "test-password").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "bob@example.com",
                "password": "another-pass",
                "name": "Bob Again"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "carl@example.com",
                "password": "short",
                "name": "Carl"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let app = TestApp::new().await;
    app.register("dora@example.com", "Dora", "test-password").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "dora@example.com",
                "password": "wrong-password"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/auth/me")
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mutation_without_csrf_header_forbidden() {
    let app = TestApp::new().await;
    let (_, auth) = app.register_and_login("erin@example.com", "Erin").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/clubs")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"name": "No CSRF Club"}).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    let app = TestApp::new().await;
    app.register("fay@example.com", "Fay", "test-password").await;

    let login_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "fay@example.com",
                "password": "test-password"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(login_res.status(), StatusCode::OK);

    let refresh_cookie = login_res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|h| h.to_str().unwrap().to_string())
        .find(|c| c.contains("refresh_token="))
        .expect("No refresh_token cookie returned");

    let start = refresh_cookie.find("refresh_token=").unwrap() + 14;
    let end = refresh_cookie[start..].find(';').unwrap_or(refresh_cookie.len() - start);
    let refresh_token = refresh_cookie[start..start+end].to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", refresh_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["user"]["email"], "fay@example.com");

    // The old refresh token was rotated out and cannot be replayed.
    let replay = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", refresh_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}
