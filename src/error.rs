//! Error types for the DeepWiki MCP client.

use thiserror::Error;

/// Every failure an invocation can end in. None of them are retried; the first
/// one raised ends the run.
#[derive(Debug, Error)]
pub enum ClientError {
    /// DNS, connect, reset, TLS or body-read failure.
    #[error("Request Error: {0}")]
    Network(String),

    #[error("Request Timeout: server took too long to respond (>{timeout_ms}ms)")]
    Timeout { timeout_ms: u64 },

    /// Non-200 status and no recognizable envelope in the body.
    #[error("HTTP {status}: {snippet}")]
    ServerHttp { status: u16, snippet: String },

    /// 200 status but no recognizable envelope in the body.
    #[error("Protocol Error: No valid MCP result found in response. Body sample: {snippet}")]
    Protocol { snippet: String },

    #[error("MCP handshake rejected: {message} (code: {code})")]
    Handshake { code: i64, message: String },

    #[error("MCP Error: {message} (code: {code})")]
    Invocation { code: i64, message: String },

    #[error("Unknown command \"{command}\". Use ask, structure, or contents.")]
    Usage { command: String },

    #[error("Response too large: {actual} bytes exceeds limit of {limit} bytes")]
    ResponseTooLarge { actual: usize, limit: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        ClientError::Config(err.to_string())
    }
}

impl ClientError {
    /// True for the invalid-invocation case that is reported without the
    /// "Execution Failed" prefix.
    pub fn is_usage(&self) -> bool {
        matches!(self, ClientError::Usage { .. })
    }
}
