//! Error mapping and retry behavior.
//!
//! # Invariants
//! - 429/502/503/504 are retried up to `max_retries`, then `MaxRetriesExceeded`
//! - Other statuses fail immediately with the body's message
//! - Malformed list bodies surface as `InvalidResponse`

mod common;

use common::*;
use serde_json::json;
use wiremock::matchers::{method, path};

#[tokio::test]
async fn test_not_found_carries_message_and_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/devboxes/dbx_missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-request-id", "req_abc")
                .set_body_json(json!({"message": "Devbox dbx_missing not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .get_devbox("dbx_missing")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    match err {
        ClientError::ApiError {
            status,
            message,
            request_id,
            ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Devbox dbx_missing not found");
            assert_eq!(request_id.as_deref(), Some("req_abc"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_is_auth_error_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secrets"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client_with_retries(&server, 3)
        .list_secrets(&ListParams::new())
        .await
        .unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_transient_failure_is_retried_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/blueprints"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/blueprints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blueprints": [],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client_with_retries(&server, 1)
        .list_blueprints(&ListParams::new())
        .await
        .unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_retries_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/devboxes"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .list_devboxes(&ListParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MaxRetriesExceeded(1)));
}

#[tokio::test]
async fn test_malformed_items_are_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/devboxes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devboxes": "not-a-list"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .list_devboxes(&ListParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}
