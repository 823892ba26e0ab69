//! JSON-RPC 2.0 message types for the MCP stdio transport.
//!
//! Responsibilities:
//! - Decode one request line and classify malformed input.
//! - Encode responses and error objects.
//!
//! Does NOT handle:
//! - Method semantics (see `mcp::McpServer`).
//!
//! Invariants:
//! - A request without an `id` is a notification and never gets a response.
//! - Every response carries exactly one of `result` or `error`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl Request {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{message} ({code})")]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Outcome of decoding one input line.
#[derive(Debug)]
pub enum Incoming {
    Request(Request),
    /// Undecodable line; answered with `id: null`.
    Invalid(Response),
}

pub fn decode(line: &str) -> Incoming {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            return Incoming::Invalid(Response::failure(
                Value::Null,
                RpcError::new(PARSE_ERROR, format!("Parse error: {e}")),
            ));
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    match serde_json::from_value::<Request>(value) {
        Ok(request) if request.jsonrpc.as_deref().is_none_or(|v| v == JSONRPC_VERSION) => {
            Incoming::Request(request)
        }
        Ok(_) => Incoming::Invalid(Response::failure(
            id,
            RpcError::new(INVALID_REQUEST, "Unsupported jsonrpc version"),
        )),
        Err(e) => Incoming::Invalid(Response::failure(
            id,
            RpcError::new(INVALID_REQUEST, format!("Invalid request: {e}")),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_request_and_notification() {
        let Incoming::Request(request) =
            decode(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#)
        else {
            panic!("expected request");
        };
        assert!(!request.is_notification());
        assert_eq!(request.params, Value::Null);

        let Incoming::Request(note) =
            decode(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        else {
            panic!("expected notification");
        };
        assert!(note.is_notification());
    }

    #[test]
    fn test_decode_garbage_is_parse_error() {
        let Incoming::Invalid(response) = decode("{not json") else {
            panic!("expected error");
        };
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
    }

    #[test]
    fn test_decode_missing_method_keeps_id() {
        let Incoming::Invalid(response) = decode(r#"{"jsonrpc":"2.0","id":7}"#) else {
            panic!("expected error");
        };
        assert_eq!(response.id, json!(7));
        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    }

    #[test]
    fn test_response_serializes_one_of_result_or_error() {
        let ok = serde_json::to_value(Response::success(json!(1), json!({}))).unwrap();
        assert_eq!(ok, json!({"jsonrpc": "2.0", "id": 1, "result": {}}));

        let err = serde_json::to_value(Response::failure(
            json!("a"),
            RpcError::method_not_found("nope"),
        ))
        .unwrap();
        assert_eq!(err["error"]["code"], METHOD_NOT_FOUND);
        assert!(err.get("result").is_none());
    }
}
