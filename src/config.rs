//! Configuration System
//!
//! Layered client configuration: built-in defaults, the user config file (or an
//! explicit `--config` file), then `DEEPWIKI_*` environment variables. CLI flags
//! are applied on top by the caller.

use crate::error::ClientError;
use crate::logging::LoggingConfig;
use crate::rpc::DEFAULT_PROTOCOL_VERSION;
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use paths::{global_config_path, state_dir};

pub const DEFAULT_ENDPOINT_URL: &str = "https://mcp.deepwiki.com/mcp";
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepwikiConfig {
    /// MCP endpoint and handshake settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// MCP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Streamable HTTP endpoint
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Wall-clock limit per request, including body read
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Largest response body accepted
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,

    /// MCP protocol revision sent in `initialize`
    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,

    /// `clientInfo.name` sent in `initialize`
    #[serde(default = "default_client_name")]
    pub client_name: String,

    /// `clientInfo.version` sent in `initialize`
    #[serde(default = "default_client_version")]
    pub client_version: String,
}

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

fn default_protocol_version() -> String {
    DEFAULT_PROTOCOL_VERSION.to_string()
}

fn default_client_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_client_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            timeout_ms: default_timeout_ms(),
            max_response_bytes: default_max_response_bytes(),
            protocol_version: default_protocol_version(),
            client_name: default_client_name(),
            client_version: default_client_version(),
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// `User-Agent` header value.
    pub fn user_agent(&self) -> String {
        format!("{}-client/{}", self.client_name, self.client_version)
    }

    /// Validate client configuration
    pub fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.endpoint_url)
            .map_err(|e| format!("Invalid endpoint URL '{}': {}", self.endpoint_url, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "Endpoint URL must use http or https, got '{}'",
                url.scheme()
            ));
        }
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than zero".to_string());
        }
        if self.max_response_bytes == 0 {
            return Err("Maximum response size must be greater than zero".to_string());
        }
        if self.protocol_version.trim().is_empty() {
            return Err("Protocol version cannot be empty".to_string());
        }
        if self.client_name.trim().is_empty() {
            return Err("Client name cannot be empty".to_string());
        }
        Ok(())
    }
}

impl DeepwikiConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ClientError> {
        self.client
            .validate()
            .map_err(|e| ClientError::Config(format!("client: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| ClientError::Config(format!("logging: {}", e)))
    }
}
