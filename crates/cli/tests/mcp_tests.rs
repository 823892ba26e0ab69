//! Integration tests for `rl mcp start` over stdio.
//!
//! This module tests:
//! - One JSON-RPC response line per request, none for notifications.
//! - Tool calls reaching the API and returning JSON text content.
//!
//! ## Invariants
//! - stdout carries only protocol messages.

mod common;

use common::rl_cmd_with_base_url;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn responses(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line is JSON"))
        .collect()
}

#[tokio::test]
async fn test_handshake_and_tool_listing() {
    let server = MockServer::start().await;
    let input = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2024-11-05"}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    ]
    .iter()
    .map(|m| format!("{m}\n"))
    .collect::<String>();

    let output = rl_cmd_with_base_url(&server.uri())
        .args(["mcp", "start"])
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = responses(&output.stdout);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(lines[1]["id"], 2);
    assert_eq!(lines[1]["result"]["tools"].as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_list_devboxes_tool_coerces_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/devboxes"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devboxes": [{"id": "dbx_1", "status": "running"}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let call = json!({
        "jsonrpc": "2.0",
        "id": "call-1",
        "method": "tools/call",
        "params": {"name": "list_devboxes", "arguments": {"limit": "3"}}
    });

    let output = rl_cmd_with_base_url(&server.uri())
        .args(["mcp", "start"])
        .write_stdin(format!("{call}\n"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = responses(&output.stdout);
    assert_eq!(lines.len(), 1);
    let text = lines[0]["result"]["content"][0]["text"].as_str().unwrap();
    let page: Value = serde_json::from_str(text).unwrap();
    assert_eq!(page["items"][0]["id"], "dbx_1");
}

#[tokio::test]
async fn test_api_failure_is_tool_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/blueprints/bpt_gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let call = json!({
        "jsonrpc": "2.0",
        "id": 9,
        "method": "tools/call",
        "params": {"name": "get_blueprint", "arguments": {"id": "bpt_gone"}}
    });

    let output = rl_cmd_with_base_url(&server.uri())
        .args(["mcp", "start"])
        .write_stdin(format!("{call}\n"))
        .output()
        .unwrap();

    let lines = responses(&output.stdout);
    assert_eq!(lines[0]["result"]["isError"], true);
    assert!(lines[0].get("error").is_none());
}
