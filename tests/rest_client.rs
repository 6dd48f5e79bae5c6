//! Integration tests for the request pipeline.
//!
//! Every test runs against a local wiremock server, so no credentials or
//! network access are needed.
//!
//! Run with: cargo test --test rest_client

use std::sync::Once;
use std::time::{Duration, Instant};

use reqwest::Method;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{basic_auth, bearer_token, body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paca_rs::prelude::*;

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn fast_retry() -> RetryConfig {
    RetryConfig::default().with_retry_wait(Duration::ZERO)
}

fn client_with(server: &MockServer, credentials: Credentials, config: ClientConfig) -> RestClient {
    init_logging();
    RestClient::new(server.uri(), credentials, config).unwrap()
}

fn client(server: &MockServer) -> RestClient {
    client_with(
        server,
        Credentials::key_pair("AKTEST", "SKTEST").unwrap(),
        ClientConfig::default().with_retry(fast_retry()),
    )
}

// =============================================================================
// Request construction
// =============================================================================

#[tokio::test]
async fn test_get_sends_key_headers_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/orders"))
        .and(header("APCA-API-KEY-ID", "AKTEST"))
        .and(header("APCA-API-SECRET-KEY", "SKTEST"))
        .and(header_exists("user-agent"))
        .and(query_param("status", "all"))
        .and(query_param("limit", "5"))
        .and(query_param("symbols", "AAPL,TSLA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .request(
            Method::GET,
            "/orders",
            Some(json!({"status": "all", "limit": 5, "symbols": ["AAPL", "TSLA"], "after": null})),
        )
        .await
        .unwrap();
    assert_eq!(result, Some(json!([])));
}

#[tokio::test]
async fn test_raw_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/orders"))
        .and(query_param("status", "closed"))
        .and(query_param("direction", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .request(Method::GET, "/orders", Some(json!("?status=closed&direction=asc")))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    let order = json!({"symbol": "AAPL", "qty": "1", "side": "buy", "type": "market", "time_in_force": "day"});
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .and(body_json(&order))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc"})))
        .expect(1)
        .mount(&server)
        .await;

    let result: serde_json::Value = client(&server).post("/orders", &order).await.unwrap();
    assert_eq!(result["id"], "abc");
}

#[tokio::test]
async fn test_oauth_uses_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .and(bearer_token("oauth-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(
        &server,
        Credentials::oauth("oauth-token").unwrap(),
        ClientConfig::default(),
    );
    let result = client.request(Method::GET, "/account", None).await.unwrap();
    assert_eq!(result, Some(json!({"ok": true})));
}

#[tokio::test]
async fn test_basic_auth_mode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .and(basic_auth("AKTEST", "SKTEST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(
        &server,
        Credentials::key_pair("AKTEST", "SKTEST").unwrap(),
        ClientConfig::default().with_basic_auth(true).with_api_version("v1"),
    );
    client.request(Method::GET, "/accounts", None).await.unwrap();
}

#[tokio::test]
async fn test_call_with_verb_name() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v2/account/configurations"))
        .and(body_json(json!({"no_shorting": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"no_shorting": true})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .call("patch", "/account/configurations", Some(json!({"no_shorting": true})))
        .await
        .unwrap();
    assert_eq!(result, Some(json!({"no_shorting": true})));
}

#[tokio::test]
async fn test_call_rejects_unknown_verb() {
    let server = MockServer::start().await;
    Mock::given(method("TRACE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client(&server).call("TRACE", "/account", None).await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[tokio::test]
async fn test_per_call_api_version_override() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta3/crypto/us/latest/bars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bars": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .request_with(Method::GET, "/crypto/us/latest/bars", None, None, Some("v1beta3"))
        .await
        .unwrap();
    assert!(result.is_some());
}

// =============================================================================
// Responses
// =============================================================================

#[tokio::test]
async fn test_empty_body_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/orders"))
        .respond_with(ResponseTemplate::new(207))
        .mount(&server)
        .await;

    let result = client(&server).request(Method::DELETE, "/orders", None).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_invalid_json_on_success_is_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/clock"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client(&server).request(Method::GET, "/clock", None).await;
    assert!(matches!(result, Err(Error::Json(_))));
}

#[tokio::test]
async fn test_typed_get_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let result: Result<TradeAccount> = client(&server).get("/account").await;
    match result {
        Err(Error::Validation { target, .. }) => assert!(target.ends_with("TradeAccount")),
        other => panic!("Expected Validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_redirect_is_not_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "https://example.com/"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).request(Method::GET, "/account", None).await;
    match result {
        Err(Error::Api(e)) => assert_eq!(e.status_code(), 301),
        other => panic!("Expected API error, got {other:?}"),
    }
}

// =============================================================================
// Error classification
// =============================================================================

#[tokio::test]
async fn test_generic_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/orders/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"code": 40410000, "message": "order not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .request(Method::GET, "/orders/missing", None)
        .await
        .unwrap_err();
    assert_eq!(err.api_code(), Some(40410000));
    assert!(err.is_client_error());

    let Error::Api(api) = err else {
        panic!("Expected API error");
    };
    assert_eq!(api.status_code(), 404);
    assert_eq!(api.message(), Some("order not found"));
    assert!(matches!(api.body(), ErrorBody::Generic(_)));
}

#[tokio::test]
async fn test_buying_power_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": 40310000,
            "message": "insufficient buying power",
            "buying_power": "100.5",
            "cost_basis": "250",
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .request(Method::POST, "/orders", Some(json!({"symbol": "AAPL"})))
        .await
        .unwrap_err();
    let Error::Api(api) = err else {
        panic!("Expected API error");
    };
    match api.body() {
        ErrorBody::BuyingPower(body) => {
            assert_eq!(body.code, 40310000);
            assert_eq!(body.cost_basis.to_string(), "250");
        }
        other => panic!("Expected BuyingPower body, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .request(Method::GET, "/account", None)
        .await
        .unwrap_err();
    assert!(err.is_server_error());
    let Error::Api(api) = err else {
        panic!("Expected API error");
    };
    assert_eq!(api.raw_body(), "internal failure");
    assert!(api.code().is_err());
}

// =============================================================================
// Retries
// =============================================================================

#[tokio::test]
async fn test_retry_exhaustion_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"code": 42910000, "message": "rate limit exceeded"})))
        // One initial attempt plus three retries
        .expect(4)
        .mount(&server)
        .await;

    let result = client(&server).request(Method::GET, "/account", None).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_retry_exhaustion_can_raise() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"code": 42910000, "message": "rate limit exceeded"})))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_with(
        &server,
        Credentials::key_pair("AKTEST", "SKTEST").unwrap(),
        ClientConfig::default().with_retry(
            fast_retry().with_retry_attempts(2).with_raise_on_exhaustion(true),
        ),
    );
    let err = client.request(Method::GET, "/account", None).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.api_code(), Some(42910000));
}

#[tokio::test]
async fn test_retry_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/clock"))
        .respond_with(ResponseTemplate::new(504))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/clock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_open": true})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).request(Method::GET, "/clock", None).await.unwrap();
    assert_eq!(result, Some(json!({"is_open": true})));
}

#[tokio::test]
async fn test_non_retryable_status_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).request(Method::GET, "/account", None).await;
    assert!(matches!(result, Err(Error::Api(ref e)) if e.status_code() == 503));
}

#[tokio::test]
async fn test_custom_retry_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_with(
        &server,
        Credentials::key_pair("AKTEST", "SKTEST").unwrap(),
        ClientConfig::default().with_retry(
            fast_retry().with_retry_attempts(1).with_retry_statuses([503]),
        ),
    );
    let result = client.request(Method::GET, "/account", None).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_no_retry_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(
        &server,
        Credentials::key_pair("AKTEST", "SKTEST").unwrap(),
        ClientConfig::default().with_retry(RetryConfig::no_retry()),
    );
    let result = client.request(Method::GET, "/account", None).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_retry_waits_between_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(429))
        .expect(4)
        .mount(&server)
        .await;

    let wait = Duration::from_millis(100);
    let client = client_with(
        &server,
        Credentials::key_pair("AKTEST", "SKTEST").unwrap(),
        ClientConfig::default().with_retry(RetryConfig::default().with_retry_wait(wait)),
    );

    let started = Instant::now();
    let result = client.request(Method::GET, "/account", None).await.unwrap();
    let elapsed = started.elapsed();

    assert!(result.is_none());
    // One wait before each of the three retries, none after the last attempt
    assert!(elapsed >= wait * 3, "elapsed {elapsed:?}");
    assert!(elapsed < wait * 4 + Duration::from_secs(2), "elapsed {elapsed:?}");
}
