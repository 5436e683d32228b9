//! RPC session: `initialize` handshake followed by one `tools/call`.
//!
//! The session is linear. It negotiates, then invokes, then ends in `Done` or
//! `Failed`; a failure at any step ends the run and nothing is retried.

use crate::config::ClientConfig;
use crate::dispatch::{dispatch, CapabilityInvocation};
use crate::error::ClientError;
use crate::rpc::decoder::decode;
use crate::rpc::transport::Transport;
use crate::rpc::{
    JsonRpcRequest, LogicalResponse, DEFAULT_PROTOCOL_VERSION, METHOD_INITIALIZE,
    METHOD_TOOLS_CALL,
};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, info};

/// Where a session is in its handshake/invoke sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Negotiating,
    Invoking,
    Done,
    Failed,
}

/// Handshake identity and per-request deadline.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub protocol_version: String,
    pub client_name: String,
    pub client_version: String,
    pub timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
            client_name: env!("CARGO_PKG_NAME").to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            timeout: Duration::from_millis(crate::config::DEFAULT_TIMEOUT_MS),
        }
    }
}

impl From<&ClientConfig> for SessionOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            protocol_version: config.protocol_version.clone(),
            client_name: config.client_name.clone(),
            client_version: config.client_version.clone(),
            timeout: config.timeout(),
        }
    }
}

/// One handshake plus one tool call over a transport.
pub struct RpcSession<T: Transport> {
    transport: T,
    options: SessionOptions,
    next_id: u64,
    state: SessionState,
}

impl<T: Transport> RpcSession<T> {
    pub fn new(transport: T, options: SessionOptions) -> Self {
        Self {
            transport,
            options,
            next_id: 1,
            state: SessionState::Negotiating,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run `command` against `target`, returning the tool's `result` payload.
    pub async fn run(
        &mut self,
        command: &str,
        target: &str,
        extra: &str,
    ) -> Result<Value, ClientError> {
        let outcome = match dispatch(command, target, extra) {
            Ok(invocation) => self.negotiate_and_invoke(&invocation).await,
            Err(e) => Err(e),
        };

        self.state = match &outcome {
            Ok(_) => SessionState::Done,
            Err(e) => {
                error!(command, target, "session failed: {}", e);
                SessionState::Failed
            }
        };
        outcome
    }

    async fn negotiate_and_invoke(
        &mut self,
        invocation: &CapabilityInvocation,
    ) -> Result<Value, ClientError> {
        self.state = SessionState::Negotiating;
        let params = self.handshake_params();
        match self.call(METHOD_INITIALIZE, params).await? {
            LogicalResponse::Result(server) => {
                let server_info = server.get("serverInfo").cloned().unwrap_or_default();
                debug!(server = %server_info, "handshake accepted");
            }
            LogicalResponse::Fault(fault) => {
                return Err(ClientError::Handshake {
                    code: fault.code,
                    message: fault.message,
                });
            }
        }

        self.state = SessionState::Invoking;
        info!(tool = %invocation.name, "invoking tool");
        match self.call(METHOD_TOOLS_CALL, invocation.to_params()).await? {
            LogicalResponse::Result(result) => Ok(result),
            LogicalResponse::Fault(fault) => Err(ClientError::Invocation {
                code: fault.code,
                message: fault.message,
            }),
        }
    }

    fn handshake_params(&self) -> Value {
        json!({
            "protocolVersion": self.options.protocol_version,
            "capabilities": {},
            "clientInfo": {
                "name": self.options.client_name,
                "version": self.options.client_version,
            },
        })
    }

    /// Send one request and decode its reply.
    pub async fn call(
        &mut self,
        method: &str,
        params: Value,
    ) -> Result<LogicalResponse, ClientError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or_else(|| ClientError::Protocol {
            snippet: "request id space exhausted".to_string(),
        })?;

        let request = JsonRpcRequest::new(id, method, params);
        let body = serde_json::to_vec(&request)?;
        debug!(id, method, "sending request");

        let raw = self.transport.send(body, self.options.timeout).await?;
        decode(&raw)
    }
}
