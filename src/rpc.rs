//! MCP JSON-RPC over HTTP
//!
//! Request and response envelopes shared by the transport, the response
//! decoder and the session that sequences the `initialize` handshake and the
//! `tools/call` invocation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod decoder;
pub mod session;
pub mod transport;

pub use decoder::{decode, DecodeStrategy};
pub use session::{RpcSession, SessionOptions, SessionState};
pub use transport::{HttpTransport, RawResponse, ScriptedTransport, Transport};

pub const JSONRPC_VERSION: &str = "2.0";
pub const METHOD_INITIALIZE: &str = "initialize";
pub const METHOD_TOOLS_CALL: &str = "tools/call";

/// MCP protocol revision announced during the handshake.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: &str, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.to_string(),
            params,
        }
    }
}

/// Server-reported JSON-RPC error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcFault {
    pub code: i64,
    pub message: String,
}

impl RpcFault {
    /// Lenient read of an `error` member: missing code reads as 0, missing
    /// message as "unknown error".
    pub fn from_value(error: &Value) -> Self {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = match error {
            Value::String(text) => text.clone(),
            _ => error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        };
        Self { code, message }
    }
}

/// One decoded reply: exactly one of result or fault.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalResponse {
    Result(Value),
    Fault(RpcFault),
}

/// Wire envelope. `null` members deserialize as absent.
#[derive(Debug, Deserialize)]
pub(crate) struct RpcEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

impl RpcEnvelope {
    /// `result` wins when a server sends both members.
    pub(crate) fn into_logical(self) -> Option<LogicalResponse> {
        match (self.result, self.error) {
            (Some(result), _) => Some(LogicalResponse::Result(result)),
            (None, Some(error)) => Some(LogicalResponse::Fault(RpcFault::from_value(&error))),
            (None, None) => None,
        }
    }
}
