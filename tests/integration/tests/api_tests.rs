//! API Integration Tests
//!
//! Most tests run against the in-memory token store and need nothing external.
//! The Redis-backed tests at the bottom run only when `REDIS_URL` is set.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, assert_text, fixtures::*, redis_url, set_cookie, set_cookies,
    TestServer,
};
use reqwest::StatusCode;
use serde_json::Value;
use session_core::{Token, TokenStore, UserId};
use uuid::Uuid;

/// Log in with the demo account and return (session, refresh) cookie values
async fn login(server: &TestServer) -> (String, String) {
    let response = server.post("/login", &LoginRequest::demo()).await.unwrap();
    let session = set_cookie(&response, "session").expect("session cookie");
    let refresh = set_cookie(&response, "refresh").expect("refresh cookie");
    assert_text(response, StatusCode::OK).await.unwrap();
    (session.value, refresh.value)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["token_store"], "healthy");
}

#[tokio::test]
async fn test_request_id_header() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/health").await.unwrap();
    let id = response.headers().get("x-request-id").expect("request id");
    assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());

    let response = server
        .client
        .get(format!("{}/health", server.base_url()))
        .header("x-request-id", "caller-supplied")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "caller-supplied");
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_sets_both_cookies() {
    let server = TestServer::start().await.unwrap();

    let response = server.post("/login", &LoginRequest::demo()).await.unwrap();
    let cookies = set_cookies(&response);
    let body = assert_text(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, "auth success");
    assert_eq!(cookies.len(), 2);

    let session = cookies.iter().find(|c| c.name == "session").unwrap();
    let refresh = cookies.iter().find(|c| c.name == "refresh").unwrap();

    assert!(Uuid::parse_str(&session.value).is_ok());
    assert!(Uuid::parse_str(&refresh.value).is_ok());
    assert_ne!(session.value, refresh.value);

    for cookie in [session, refresh] {
        assert!(cookie.has("HttpOnly"));
        assert!(cookie.has("Secure"));
        assert_eq!(cookie.attribute("SameSite"), Some("Strict"));
        assert_eq!(cookie.attribute("Path"), Some("/"));
        assert!(cookie.attribute("Expires").is_some());
    }

    let store = server.memory_store();
    for token in [&session.value, &refresh.value] {
        let user_id = store.get(&Token::new(token.as_str())).await.unwrap();
        assert_eq!(user_id, Some(UserId::new(1)));
    }
    assert!(
        store.ttl(&Token::new(refresh.value.as_str())).unwrap()
            > store.ttl(&Token::new(session.value.as_str())).unwrap()
    );
}

#[tokio::test]
async fn test_login_with_wrong_credentials() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/login", &LoginRequest::new("wrong", "wrong"))
        .await
        .unwrap();
    assert!(set_cookies(&response).is_empty());

    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_CREDENTIALS");
    assert!(!body.error.message.is_empty());
    assert!(server.memory_store().is_empty());
}

#[tokio::test]
async fn test_login_when_already_authenticated() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_with_cookies("/login", &LoginRequest::demo(), &[("session", "anything")])
        .await
        .unwrap();
    assert!(set_cookies(&response).is_empty());

    let body = assert_text(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, "already authenticated");
    assert!(server.memory_store().is_empty());
}

#[tokio::test]
async fn test_login_with_malformed_json() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_raw("/login", "application/json", "{\"email\": ")
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PAYLOAD");
    assert!(server.memory_store().is_empty());
}

#[tokio::test]
async fn test_login_with_missing_field_is_unauthorized() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_raw("/login", "application/json", r#"{"email":"demo"}"#)
        .await
        .unwrap();
    assert!(set_cookies(&response).is_empty());

    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_CREDENTIALS");
    assert!(server.memory_store().is_empty());
}

#[tokio::test]
async fn test_login_with_wrong_content_type() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_raw("/login", "text/plain", "email=demo&password=demo")
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_storage_failure() {
    let server = TestServer::start().await.unwrap();
    server.memory_store().set_fail_writes(true);

    let response = server.post("/login", &LoginRequest::demo()).await.unwrap();
    assert!(set_cookies(&response).is_empty());

    let body: ErrorBody = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
    assert_eq!(body.error.code, "STORAGE_ERROR");
}

#[tokio::test]
async fn test_concurrent_logins_are_independent() {
    let server = TestServer::start().await.unwrap();

    let (a, b) = tokio::join!(login(&server), login(&server));
    assert_ne!(a.0, b.0);
    assert_ne!(a.1, b.1);
    assert_eq!(server.memory_store().len(), 4);
}

// ============================================================================
// Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_refresh_issues_new_session_cookie() {
    let server = TestServer::start().await.unwrap();
    let (session, refresh) = login(&server).await;

    let response = server
        .post_empty_with_cookies("/refresh", &[("refresh", &refresh)])
        .await
        .unwrap();
    let cookies = set_cookies(&response);
    let body = assert_text(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, "session refreshed");

    // Only the session cookie is rewritten
    assert_eq!(cookies.len(), 1);
    let renewed = &cookies[0];
    assert_eq!(renewed.name, "session");
    assert_ne!(renewed.value, session);
    assert!(renewed.has("HttpOnly"));

    let store = server.memory_store();
    for token in [&renewed.value, &refresh, &session] {
        let user_id = store.get(&Token::new(token.as_str())).await.unwrap();
        assert_eq!(user_id, Some(UserId::new(1)));
    }
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    let server = TestServer::start().await.unwrap();

    let response = server.post_empty_with_cookies("/refresh", &[]).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_TOKEN");
}

#[tokio::test]
async fn test_refresh_with_unknown_token() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_empty_with_cookies("/refresh", &[("refresh", "never-issued")])
        .await
        .unwrap();
    assert!(set_cookies(&response).is_empty());
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_refresh_with_expired_token() {
    let server = TestServer::start().await.unwrap();
    let (_session, refresh) = login(&server).await;
    server.memory_store().expire(&Token::new(refresh.as_str()));

    let response = server
        .post_empty_with_cookies("/refresh", &[("refresh", &refresh)])
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Protected Route Tests
// ============================================================================

#[tokio::test]
async fn test_protected_with_session() {
    let server = TestServer::start().await.unwrap();
    let (session, _refresh) = login(&server).await;

    let response = server
        .get_with_cookies("/protected", &[("session", &session)])
        .await
        .unwrap();
    let body = assert_text(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, "userId from session: 1");
}

#[tokio::test]
async fn test_protected_with_refreshed_session() {
    let server = TestServer::start().await.unwrap();
    let (_session, refresh) = login(&server).await;

    let response = server
        .post_empty_with_cookies("/refresh", &[("refresh", &refresh)])
        .await
        .unwrap();
    let renewed = set_cookie(&response, "session").unwrap();

    let response = server
        .get_with_cookies("/protected", &[("session", &renewed.value)])
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_protected_without_session() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/protected").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_TOKEN");
}

#[tokio::test]
async fn test_protected_with_expired_session() {
    let server = TestServer::start().await.unwrap();
    let (session, _refresh) = login(&server).await;
    server.memory_store().expire(&Token::new(session.as_str()));

    let response = server
        .get_with_cookies("/protected", &[("session", &session)])
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_TOKEN");
}

// ============================================================================
// Cookie Clearing Tests
// ============================================================================

#[tokio::test]
async fn test_clear_cookies_keeps_store_entries() {
    let server = TestServer::start().await.unwrap();
    let (session, refresh) = login(&server).await;

    let response = server
        .get_with_cookies("/clear-cookies", &[("session", &session), ("refresh", &refresh)])
        .await
        .unwrap();
    let cookies = set_cookies(&response);
    let body = assert_text(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, "all cookies cleared");

    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.is_removal()));
    assert!(cookies.iter().all(|c| c.attribute("Path") == Some("/")));

    // Clearing is client-side only; the old session still authorizes
    let response = server
        .get_with_cookies("/protected", &[("session", &session)])
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert_eq!(server.memory_store().len(), 2);
}

#[tokio::test]
async fn test_clear_session_only() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/clear-session").await.unwrap();
    let cookies = set_cookies(&response);
    let body = assert_text(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, "session cookie cleared");
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "session");
    assert!(cookies[0].is_removal());
}

#[tokio::test]
async fn test_clear_refresh_only() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/clear-refresh").await.unwrap();
    let cookies = set_cookies(&response);
    let body = assert_text(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, "refresh cookie cleared");
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "refresh");
    assert!(cookies[0].is_removal());
}

// ============================================================================
// Static Files
// ============================================================================

#[tokio::test]
async fn test_static_index() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/").await.unwrap();
    let body = assert_text(response, StatusCode::OK).await.unwrap();
    assert!(body.contains("<html"));
}

#[tokio::test]
async fn test_static_missing_file() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/no-such-file.txt").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_custom_cookie_names() {
    let mut config = integration_tests::test_config();
    config.session.session_cookie = "sid".to_string();
    config.session.refresh_cookie = "rid".to_string();
    let server = TestServer::start_with_config(config).await.unwrap();

    let response = server.post("/login", &LoginRequest::demo()).await.unwrap();
    let sid = set_cookie(&response, "sid").expect("sid cookie");
    assert!(set_cookie(&response, "rid").is_some());
    assert!(set_cookie(&response, "session").is_none());

    let response = server
        .get_with_cookies("/protected", &[("sid", &sid.value)])
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Redis-backed
// ============================================================================

#[tokio::test]
async fn test_redis_login_refresh_protected() {
    let Some(url) = redis_url() else {
        return;
    };

    let server = TestServer::start_redis(url).await.expect("Failed to start server");

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let (session, refresh) = login(&server).await;

    let response = server
        .get_with_cookies("/protected", &[("session", &session)])
        .await
        .unwrap();
    assert_eq!(
        assert_text(response, StatusCode::OK).await.unwrap(),
        "userId from session: 1"
    );

    let response = server
        .post_empty_with_cookies("/refresh", &[("refresh", &refresh)])
        .await
        .unwrap();
    let renewed = set_cookie(&response, "session").unwrap();
    assert_ne!(renewed.value, session);
}
