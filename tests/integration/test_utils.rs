//! Shared test utilities for integration tests
//!
//! A hyper-backed HTTP stub that serves scripted replies in order and records
//! every request it receives.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{HeaderMap, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;

/// One scripted reply.
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Bytes,
    pub delay: Duration,
}

impl StubReply {
    pub fn json(body: &str) -> Self {
        Self::with_status(StatusCode::OK, "application/json", body.to_string())
    }

    pub fn sse(payload: &str) -> Self {
        Self::with_status(
            StatusCode::OK,
            "text/event-stream",
            format!("event: message\ndata: {}\n\n", payload),
        )
    }

    pub fn status(status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        Self::with_status(status, "text/plain", body.to_string())
    }

    fn with_status(status: StatusCode, content_type: &'static str, body: String) -> Self {
        Self {
            status,
            content_type,
            body: Bytes::from(body),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl From<StubReply> for Response<Full<Bytes>> {
    fn from(reply: StubReply) -> Self {
        let mut response = Response::new(Full::new(reply.body));
        *response.status_mut() = reply.status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(reply.content_type));
        response
    }
}

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: hyper::Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Serve `replies` in order; once they run out every request gets a 500.
    pub async fn start(replies: Vec<StubReply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let replies = Arc::new(Mutex::new(VecDeque::from(replies)));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let requests_task = Arc::clone(&requests);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accept = listener.accept() => {
                        let Ok((stream, _)) = accept else { continue };
                        let requests = Arc::clone(&requests_task);
                        let replies = Arc::clone(&replies);
                        tokio::spawn(async move {
                            let service = service_fn(move |req: Request<Incoming>| {
                                let requests = Arc::clone(&requests);
                                let replies = Arc::clone(&replies);
                                async move {
                                    let (parts, body) = req.into_parts();
                                    let body = body.collect().await?.to_bytes();
                                    requests.lock().await.push(CapturedRequest {
                                        method: parts.method,
                                        path: parts.uri.path().to_string(),
                                        headers: parts.headers,
                                        body,
                                    });
                                    let reply = replies.lock().await.pop_front().unwrap_or_else(|| {
                                        StubReply::status(500, "stub replies exhausted")
                                    });
                                    tokio::time::sleep(reply.delay).await;
                                    Ok::<_, hyper::Error>(Response::from(reply))
                                }
                            });
                            let _ = http1::Builder::new()
                                .serve_connection(TokioIo::new(stream), service)
                                .await;
                        });
                    }
                }
            }
        });

        Self {
            addr,
            requests,
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/mcp", self.addr)
    }

    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().await.clone()
    }

    /// Stop accepting and return everything captured.
    pub async fn shutdown(mut self) -> Vec<CapturedRequest> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.handle).await;
        self.requests().await
    }
}

/// An address nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/mcp", addr)
}

pub fn handshake_result() -> &'static str {
    r#"{"jsonrpc":"2.0","id":1,"result":{"protocolVersion":"2024-11-05","capabilities":{"tools":{}},"serverInfo":{"name":"DeepWiki","version":"0.0.1"}}}"#
}
