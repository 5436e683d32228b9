//! CLI route: run context built from configuration, and the single execution path
//! from a command request to printable output.

use crate::cli::parse::Cli;
use crate::cli::presentation::{format_result, OutputFormat};
use crate::config::DeepwikiConfig;
use crate::error::ClientError;
use crate::rpc::transport::millis;
use crate::rpc::{HttpTransport, RpcSession, SessionOptions, Transport};
use std::time::Instant;
use tracing::info;

/// The `(command, target, extra)` triple taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub command: String,
    pub target: String,
    pub extra: String,
}

impl CommandRequest {
    pub fn new(command: &str, target: &str, extra: &str) -> Self {
        Self {
            command: command.to_string(),
            target: target.to_string(),
            extra: extra.to_string(),
        }
    }

    /// `None` when the command or target is missing; the caller shows usage.
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        let command = cli.command.as_deref().filter(|c| !c.is_empty())?;
        let target = cli.target.as_deref().filter(|t| !t.is_empty())?;
        Some(Self::new(command, target, &cli.extra.join(" ")))
    }
}

/// Overrides taken from CLI flags, applied over loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientOverrides {
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl ClientOverrides {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            endpoint: cli.endpoint.clone(),
            timeout_ms: cli.timeout_ms,
        }
    }
}

/// Runtime context for CLI execution: effective configuration and output format.
pub struct RunContext {
    config: DeepwikiConfig,
    format: OutputFormat,
}

impl RunContext {
    pub fn from_config(
        mut config: DeepwikiConfig,
        overrides: ClientOverrides,
        format: &str,
    ) -> Result<Self, ClientError> {
        if let Some(endpoint) = overrides.endpoint {
            config.client.endpoint_url = endpoint;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            config.client.timeout_ms = timeout_ms;
        }
        config.validate()?;

        Ok(Self {
            config,
            format: OutputFormat::parse(format)?,
        })
    }

    pub fn config(&self) -> &DeepwikiConfig {
        &self.config
    }

    /// Execute a request against the configured HTTP endpoint.
    pub fn execute(&self, request: &CommandRequest) -> Result<String, ClientError> {
        let client = &self.config.client;
        let transport = HttpTransport::new(
            client.endpoint_url.clone(),
            &client.user_agent(),
            client.max_response_bytes,
        )?;

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ClientError::Config(format!("Failed to create runtime: {}", e)))?;
        rt.block_on(self.execute_with(transport, request))
    }

    /// Execute a request over any transport and render the result.
    pub async fn execute_with<T: Transport>(
        &self,
        transport: T,
        request: &CommandRequest,
    ) -> Result<String, ClientError> {
        let started = Instant::now();
        let mut session = RpcSession::new(transport, SessionOptions::from(&self.config.client));
        let result = session
            .run(&request.command, &request.target, &request.extra)
            .await?;
        info!(
            command = %request.command,
            target = %request.target,
            elapsed_ms = millis(started.elapsed()),
            "command completed"
        );
        Ok(format_result(&result, self.format))
    }
}
