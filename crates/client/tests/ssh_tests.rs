//! SSH preparation and readiness polling tests.
//!
//! # Invariants
//! - The login user comes from the devbox's user parameters
//! - Unreachable states fail without waiting for the deadline

mod common;

use std::time::Duration;

use common::*;
use runloop_client::ssh;
use serde_json::json;
use wiremock::matchers::{method, path};

#[tokio::test]
async fn test_prepare_writes_key_and_resolves_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/devboxes/dbx_31xk9a"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("devboxes/devbox_running.json")),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/devboxes/dbx_31xk9a/create_ssh_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "dbx_31xk9a",
            "ssh_private_key": "-----BEGIN KEY-----",
            "url": "dbx_31xk9a.ssh.runloop.ai"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = test_client(&server);
    let target = ssh::prepare(&client, "dbx_31xk9a", "ssh.runloop.ai:443", dir.path())
        .await
        .unwrap();

    assert_eq!(target.user, "dev");
    assert_eq!(target.host, "dbx_31xk9a.ssh.runloop.ai");
    assert_eq!(target.key_path, dir.path().join("dbx_31xk9a.pem"));
    assert_eq!(
        std::fs::read_to_string(&target.key_path).unwrap(),
        "-----BEGIN KEY-----"
    );
}

#[tokio::test]
async fn test_wait_for_running_fails_fast_when_suspended() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/devboxes/dbx_s"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "dbx_s",
            "status": "suspended"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = ssh::wait_for_running(
        &client,
        "dbx_s",
        Duration::from_secs(60),
        Duration::from_millis(10),
        |_, _| {},
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::DevboxNotReady { ref status, .. } if status == "suspended"));
}

#[tokio::test]
async fn test_wait_for_running_polls_until_ready() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/devboxes/dbx_p"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "dbx_p",
            "status": "provisioning"
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/devboxes/dbx_p"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "dbx_p",
            "status": "running"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut waits = 0;
    let devbox = ssh::wait_for_running(
        &client,
        "dbx_p",
        Duration::from_secs(5),
        Duration::from_millis(5),
        |_, _| waits += 1,
    )
    .await
    .unwrap();

    assert_eq!(devbox.id, "dbx_p");
    assert_eq!(waits, 2);
}

#[tokio::test]
async fn test_wait_for_running_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/devboxes/dbx_t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "dbx_t",
            "status": "initializing"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = ssh::wait_for_running(
        &client,
        "dbx_t",
        Duration::from_millis(30),
        Duration::from_millis(10),
        |_, _| {},
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::DevboxNotReady { .. }));
}
