//! Client tests against a mock gateway.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{ConsoleApi, ConsoleClient, FetchError, RetryStrategy};

fn fast_retry() -> RetryStrategy {
    RetryStrategy::new(3).with_base_delay(Duration::from_millis(5))
}

fn client(server: &MockServer) -> ConsoleClient {
    ConsoleClient::new(&server.uri())
        .unwrap()
        .with_retry_strategy(fast_retry())
}

fn authed(server: &MockServer) -> ConsoleClient {
    client(server).with_credentials("secret-token", Some(42))
}

// ============================================================================
// Public endpoints
// ============================================================================

#[tokio::test]
async fn test_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "",
            "data": {
                "system_name": "Gateway",
                "version": "v1.2.3",
                "docs_link": "https://docs.example.com",
                "HeaderNavModules": "{\"wallet\":false}"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client(&server).status().await.unwrap();
    assert_eq!(status.system_name, "Gateway");
    assert_eq!(status.docs_link(), Some("https://docs.example.com"));
    assert_eq!(status.header_nav_modules.as_deref(), Some("{\"wallet\":false}"));
}

#[tokio::test]
async fn test_pricing_reads_side_tables() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pricing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"model_name": "gpt-4o", "vendor_name": "OpenAI", "quota_type": 0},
                {"model_name": "mj", "quota_type": 1}
            ],
            "group_ratio": {"default": 1, "vip": 0.5},
            "usable_group": {"default": "Default", "vip": "VIP"}
        })))
        .mount(&server)
        .await;

    let catalog = client(&server).pricing().await.unwrap();
    assert_eq!(catalog.models.len(), 2);
    assert_eq!(catalog.groups.ratio_text("vip"), "x0.5");
    assert_eq!(catalog.groups.keys().collect::<Vec<_>>(), vec!["default", "vip"]);
}

#[tokio::test]
async fn test_pricing_failure_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pricing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "pricing disabled"
        })))
        .mount(&server)
        .await;

    let err = client(&server).pricing().await.unwrap_err();
    assert!(matches!(err, FetchError::Api { ref message } if message == "pricing disabled"));
}

#[tokio::test]
async fn test_notice_empty_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": null
        })))
        .mount(&server)
        .await;

    assert_eq!(client(&server).notice().await.unwrap(), "");
}

// ============================================================================
// Authenticated endpoints
// ============================================================================

#[tokio::test]
async fn test_auth_headers_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/self"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(header("New-Api-User", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 42, "username": "root", "display_name": "Root", "role": 100}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = authed(&server).user_self().await.unwrap();
    assert_eq!(user.id, 42);
    assert_eq!(user.role, 100);
}

#[tokio::test]
async fn test_missing_credentials_short_circuit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/option/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).options().await.unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_unauthorized_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/self"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = authed(&server).user_self().await.unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_option_lookup_and_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/option/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"key": "Notice", "value": "hi"},
                {"key": "HeaderNavModules", "value": "{\"docs\":false}"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/option/"))
        .and(body_json(json!({"key": "HeaderNavModules", "value": "{}"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = authed(&server);
    assert_eq!(
        api.option("HeaderNavModules").await.unwrap().as_deref(),
        Some("{\"docs\":false}")
    );
    assert_eq!(api.option("Missing").await.unwrap(), None);
    api.update_option("HeaderNavModules", "{}").await.unwrap();
}

#[tokio::test]
async fn test_update_option_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/option/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "permission denied"
        })))
        .mount(&server)
        .await;

    let err = authed(&server).update_option("k", "v").await.unwrap_err();
    assert!(matches!(err, FetchError::Api { .. }));
}

#[tokio::test]
async fn test_tokens_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/token/"))
        .and(query_param("p", "2"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "items": [{"id": 11, "name": "ci", "key": "abcd1234efgh5678", "status": 1}],
                "total": 11,
                "page": 2,
                "page_size": 10
            }
        })))
        .mount(&server)
        .await;

    let page = authed(&server).tokens(2, 10).await.unwrap();
    assert_eq!(page.total, 11);
    assert_eq!(page.items[0].id, 11);
    assert_eq!(page.items[0].expired_time, -1);
}

// ============================================================================
// Retries
// ============================================================================

#[tokio::test]
async fn test_retries_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/home_page_content"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/home_page_content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": "# Welcome"
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client(&server).home_page_content().await.unwrap(), "# Welcome");
}

#[tokio::test]
async fn test_rate_limit_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .with_retry_strategy(RetryStrategy::no_retry())
        .status()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::RateLimited { retry_after: Some(7) }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_client_error_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).status().await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidResponse(_)));
}
