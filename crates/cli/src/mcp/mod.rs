//! Model Context Protocol server over stdio.
//!
//! Responsibilities:
//! - Read newline-delimited JSON-RPC requests from stdin and answer on stdout.
//! - Serve `initialize`, `ping`, `tools/list`, and `tools/call`.
//!
//! Does NOT handle:
//! - Tool argument coercion or API mapping (see `tools`).
//!
//! Invariants:
//! - stdout carries protocol messages only; diagnostics go to stderr.
//! - Tool failures are reported as `isError` content; unknown tools and
//!   methods are JSON-RPC errors.
//! - Notifications are consumed silently.

pub mod protocol;
pub mod tools;

use anyhow::{Context, Result};
use runloop_client::{MetricsCollector, RunloopClient};
use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::cancellation::CancellationToken;
use protocol::{Incoming, Request, Response, RpcError};
use tools::ToolError;

/// Protocol revision announced when the client does not ask for one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

pub struct McpServer {
    client: RunloopClient,
    metrics: MetricsCollector,
}

impl McpServer {
    pub fn new(client: RunloopClient, metrics: MetricsCollector) -> Self {
        Self { client, metrics }
    }

    /// Serve until EOF on `input` or cancellation.
    pub async fn serve<R, W>(&self, input: R, mut output: W, cancel: &CancellationToken) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("MCP server listening on stdio");
        let mut lines = input.lines();
        loop {
            let line = tokio::select! {
                line = lines.next_line() => line.context("Failed to read from stdin")?,
                _ = cancel.cancelled() => break,
            };
            let Some(line) = line else {
                debug!("stdin closed");
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut encoded =
                    serde_json::to_string(&response).context("Failed to encode response")?;
                encoded.push('\n');
                output
                    .write_all(encoded.as_bytes())
                    .await
                    .context("Failed to write to stdout")?;
                output.flush().await.context("Failed to flush stdout")?;
            }
        }
        info!("MCP server stopped");
        Ok(())
    }

    /// Answer one input line; `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        match protocol::decode(line) {
            Incoming::Invalid(response) => {
                warn!("Rejected malformed MCP message");
                Some(response)
            }
            Incoming::Request(request) if request.is_notification() => {
                debug!(method = %request.method, "Ignoring notification");
                None
            }
            Incoming::Request(request) => Some(self.handle_request(request).await),
        }
    }

    async fn handle_request(&self, request: Request) -> Response {
        let id = request.id.clone().unwrap_or(Value::Null);
        let outcome = match request.method.as_str() {
            "initialize" => Ok(initialize_result(&request.params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(tools::tool_list()),
            "tools/call" => self.call_tool(&request.params).await,
            other => Err(RpcError::method_not_found(other)),
        };
        match outcome {
            Ok(result) => Response::success(id, result),
            Err(error) => Response::failure(id, error),
        }
    }

    async fn call_tool(&self, params: &Value) -> Result<Value, RpcError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("tools/call requires a tool name"))?;
        if !tools::is_known(name) {
            return Err(RpcError::invalid_params(format!("Unknown tool: {name}")));
        }
        let empty = Map::new();
        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(map)) => map,
            Some(_) => return Err(RpcError::invalid_params("arguments must be an object")),
        };

        info!(tool = name, "MCP tool call");
        let result = tools::call(&self.client, name, arguments).await;
        self.metrics.record_tool_call(name, result.is_ok());
        match result {
            Ok(value) => Ok(text_content(&value, false)),
            Err(ToolError::UnknownTool(tool)) => {
                Err(RpcError::invalid_params(format!("Unknown tool: {tool}")))
            }
            Err(e) => {
                warn!(tool = name, error = %e, "MCP tool failed");
                Ok(text_content(&Value::String(format!("Error: {e}")), true))
            }
        }
    }
}

fn initialize_result(params: &Value) -> Value {
    let version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);
    json!({
        "protocolVersion": version,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": { "name": "runloop", "version": env!("CARGO_PKG_VERSION") },
    })
}

fn text_content(value: &Value, is_error: bool) -> Value {
    let text = match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };
    let mut result = json!({ "content": [{ "type": "text", "text": text }] });
    if is_error {
        result["isError"] = Value::Bool(true);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn server(base_url: &str) -> McpServer {
        let client = RunloopClient::builder()
            .base_url(base_url.to_string())
            .api_key(SecretString::from("ak_test"))
            .max_retries(0)
            .build()
            .unwrap();
        McpServer::new(client, MetricsCollector::disabled())
    }

    async fn roundtrip(server: &McpServer, line: &str) -> Value {
        let response = server.handle_line(line).await.expect("response");
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_echoes_protocol_version() {
        let server = server("http://127.0.0.1:9");
        let response = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26"}}"#,
        )
        .await;
        assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(response["result"]["serverInfo"]["name"], "runloop");
        assert!(response["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let server = server("http://127.0.0.1:9");
        let line = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(server.handle_line(line).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method_and_tool_are_protocol_errors() {
        let server = server("http://127.0.0.1:9");
        let response = roundtrip(&server, r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#).await;
        assert_eq!(response["error"]["code"], protocol::METHOD_NOT_FOUND);

        let response = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"rm_rf"}}"#,
        )
        .await;
        assert_eq!(response["error"]["code"], protocol::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_invalid_arguments_are_tool_errors() {
        let server = server("http://127.0.0.1:9");
        let response = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"get_devbox","arguments":{}}}"#,
        )
        .await;
        assert_eq!(response["result"]["isError"], true);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("'id'"), "{text}");
    }

    #[tokio::test]
    async fn test_tool_call_returns_json_text() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/devboxes/dbx_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "dbx_1",
                "name": "agent",
                "status": "running"
            })))
            .mount(&mock)
            .await;

        let server = server(&mock.uri());
        let response = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"get_devbox","arguments":{"id":"dbx_1"}}}"#,
        )
        .await;
        assert!(response["result"].get("isError").is_none());
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let devbox: Value = serde_json::from_str(text).unwrap();
        assert_eq!(devbox["status"], "running");
    }

    #[tokio::test]
    async fn test_serve_answers_each_line() {
        let server = server("http://127.0.0.1:9");
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n"
        );
        let mut output = Vec::new();
        server
            .serve(input.as_bytes(), &mut output, &CancellationToken::new())
            .await
            .unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["result"]["tools"].as_array().unwrap().len(), 15);
    }
}
