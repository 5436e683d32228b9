//! Response decoder: turns a raw HTTP reply into exactly one logical response.
//!
//! The server may answer a POST with a bare JSON document or with SSE framing
//! (`data: <json>` lines), so decoding walks an ordered list of strategies and
//! keeps the first envelope that carries a `result` or an `error`. When no
//! strategy finds one, the HTTP status decides between a server error and a
//! protocol error.

use crate::error::ClientError;
use crate::rpc::transport::RawResponse;
use crate::rpc::{LogicalResponse, RpcEnvelope};
use tracing::debug;

/// Maximum number of body characters quoted in an error.
pub const SNIPPET_CHARS: usize = 500;

const SSE_DATA_PREFIX: &str = "data: ";

/// Ways of locating an envelope in a response body, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// First `data: ` line holding a complete envelope.
    SseDataLines,
    /// The entire body as one JSON document.
    WholeBody,
}

impl DecodeStrategy {
    pub const ORDER: [DecodeStrategy; 2] = [DecodeStrategy::SseDataLines, DecodeStrategy::WholeBody];

    pub fn name(&self) -> &'static str {
        match self {
            DecodeStrategy::SseDataLines => "sse-data-lines",
            DecodeStrategy::WholeBody => "whole-body",
        }
    }

    pub fn extract(&self, body: &str) -> Option<LogicalResponse> {
        match self {
            DecodeStrategy::SseDataLines => body
                .lines()
                .filter_map(|line| line.strip_prefix(SSE_DATA_PREFIX))
                // Partial stream fragments are expected; skip what does not parse.
                .find_map(parse_envelope),
            DecodeStrategy::WholeBody => parse_envelope(body),
        }
    }
}

fn parse_envelope(text: &str) -> Option<LogicalResponse> {
    serde_json::from_str::<RpcEnvelope>(text)
        .ok()
        .and_then(RpcEnvelope::into_logical)
}

/// Decode one reply. Pure: the same input always yields the same outcome.
pub fn decode(raw: &RawResponse) -> Result<LogicalResponse, ClientError> {
    let text = String::from_utf8_lossy(&raw.body);

    for strategy in DecodeStrategy::ORDER {
        if let Some(response) = strategy.extract(&text) {
            debug!(strategy = strategy.name(), status = raw.status, "decoded envelope");
            return Ok(response);
        }
    }

    let snippet = body_snippet(&text);
    if !raw.is_success() {
        let snippet = if snippet.is_empty() {
            "Unknown Error".to_string()
        } else {
            snippet
        };
        return Err(ClientError::ServerHttp {
            status: raw.status,
            snippet,
        });
    }
    Err(ClientError::Protocol { snippet })
}

/// First `SNIPPET_CHARS` characters of the body.
pub fn body_snippet(text: &str) -> String {
    text.chars().take(SNIPPET_CHARS).collect()
}
