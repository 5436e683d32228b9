//! HTTP transport: one POST per call, full body collected under a deadline.

use crate::error::ClientError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Status code and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Only 200 counts; other 2xx codes are not treated as success.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Sends one serialized JSON-RPC request and returns the raw reply.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, body: Vec<u8>, timeout: Duration) -> Result<RawResponse, ClientError>;
}

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// reqwest-backed transport for the MCP endpoint.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    max_response_bytes: usize,
}

impl HttpTransport {
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: &str,
        max_response_bytes: usize,
    ) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // The server picks the framing, so both must be acceptable.
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/event-stream"),
        );
        let agent = HeaderValue::from_str(user_agent)
            .map_err(|_| ClientError::Config(format!("Invalid user agent: {}", user_agent)))?;
        headers.insert(USER_AGENT, agent);

        let client = Client::builder()
            .no_proxy()
            .connect_timeout(CONNECT_TIMEOUT)
            .redirect(Policy::none())
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            max_response_bytes,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, body: Vec<u8>, timeout: Duration) -> Result<RawResponse, ClientError> {
        debug!(endpoint = %self.endpoint, bytes = body.len(), "POST");
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(timeout)
            .body(body)
            .send()
            .await
            .map_err(|e| map_http_error(e, timeout))?;

        let status = response.status().as_u16();
        let body = read_body_with_limit(response, self.max_response_bytes, timeout).await?;
        debug!(status, bytes = body.len(), "response received");

        Ok(RawResponse { status, body })
    }
}

async fn read_body_with_limit(
    mut response: reqwest::Response,
    limit: usize,
    timeout: Duration,
) -> Result<Vec<u8>, ClientError> {
    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| map_http_error(e, timeout))?
    {
        let total = body.len().saturating_add(chunk.len());
        if total > limit {
            return Err(ClientError::ResponseTooLarge {
                actual: total,
                limit,
            });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn map_http_error(error: reqwest::Error, timeout: Duration) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout {
            timeout_ms: millis(timeout),
        }
    } else if error.is_connect() {
        ClientError::Network(format!("Connection error: {}", error_chain(&error)))
    } else {
        ClientError::Network(error_chain(&error))
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// reqwest's top-level message hides the cause (refused, DNS, TLS).
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Transport double that replays canned replies in order and records every
/// request body it was handed.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<RawResponse, ClientError>>>,
    requests: Mutex<Vec<Vec<u8>>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<RawResponse, ClientError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Convenience for scripts made only of successful HTTP exchanges.
    pub fn with_responses(responses: Vec<RawResponse>) -> Self {
        Self::new(responses.into_iter().map(Ok).collect())
    }

    /// Request bodies received so far, in order.
    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, body: Vec<u8>, _timeout: Duration) -> Result<RawResponse, ClientError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(body);
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Network("scripted transport exhausted".to_string())))
    }
}
