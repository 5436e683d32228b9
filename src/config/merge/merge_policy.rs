//! Merge rules: defaults first, later sources override earlier ones.

use crate::config::{DEFAULT_ENDPOINT_URL, DEFAULT_MAX_RESPONSE_BYTES, DEFAULT_TIMEOUT_MS};
use crate::rpc::DEFAULT_PROTOCOL_VERSION;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("client.endpoint_url", DEFAULT_ENDPOINT_URL)?
        .set_default("client.timeout_ms", DEFAULT_TIMEOUT_MS as i64)?
        .set_default("client.max_response_bytes", DEFAULT_MAX_RESPONSE_BYTES as i64)?
        .set_default("client.protocol_version", DEFAULT_PROTOCOL_VERSION)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
