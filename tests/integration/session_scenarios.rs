//! End-to-end session scenarios: handshake then tool call, over a real HTTP
//! stub and over a custom transport.

use async_trait::async_trait;
use deepwiki::cli::{format_result, OutputFormat};
use deepwiki::error::ClientError;
use deepwiki::rpc::{
    HttpTransport, RawResponse, RpcSession, SessionOptions, SessionState, Transport,
};
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

use crate::integration::test_utils::{handshake_result, StubReply, StubServer};

fn options() -> SessionOptions {
    SessionOptions {
        timeout: Duration::from_secs(5),
        ..SessionOptions::default()
    }
}

fn http(server: &StubServer) -> HttpTransport {
    HttpTransport::new(server.url(), "deepwiki-client/1.0.0", 1024 * 1024).unwrap()
}

#[tokio::test]
async fn test_structure_over_http() {
    let server = StubServer::start(vec![
        StubReply::json(handshake_result()),
        StubReply::sse(
            r#"{"jsonrpc":"2.0","id":2,"result":{"content":[{"type":"text","text":"root\n  a.md\n  b.md"}]}}"#,
        ),
    ])
    .await;

    let mut session = RpcSession::new(http(&server), options());
    let result = session.run("structure", "acme/widgets", "").await.unwrap();
    assert_eq!(session.state(), SessionState::Done);
    assert_eq!(
        format_result(&result, OutputFormat::Text),
        "root\n  a.md\n  b.md"
    );

    let requests = server.shutdown().await;
    assert_eq!(requests.len(), 2);

    let initialize = requests[0].json();
    assert_eq!(initialize["jsonrpc"], "2.0");
    assert_eq!(initialize["id"], 1);
    assert_eq!(initialize["method"], "initialize");
    assert_eq!(initialize["params"]["protocolVersion"], "2024-11-05");
    assert_eq!(initialize["params"]["clientInfo"]["name"], "deepwiki");

    let call = requests[1].json();
    assert_eq!(call["id"], 2);
    assert_eq!(call["method"], "tools/call");
    assert_eq!(
        call["params"],
        json!({ "name": "read_wiki_structure", "arguments": { "repoName": "acme/widgets" } })
    );
}

#[tokio::test]
async fn test_contents_fault_over_http() {
    let server = StubServer::start(vec![
        StubReply::json(handshake_result()),
        StubReply::sse(
            r#"{"jsonrpc":"2.0","id":2,"error":{"code":-32602,"message":"page not found"}}"#,
        ),
    ])
    .await;

    let mut session = RpcSession::new(http(&server), options());
    let err = session
        .run("contents", "acme/widgets", "missing/page")
        .await
        .unwrap_err();
    assert_eq!(session.state(), SessionState::Failed);
    assert_eq!(err.to_string(), "MCP Error: page not found (code: -32602)");

    let requests = server.shutdown().await;
    assert_eq!(
        requests[1].json()["params"]["arguments"],
        json!({ "repoName": "acme/widgets", "path": "missing/page" })
    );
}

#[tokio::test]
async fn test_server_error_during_handshake_stops_session() {
    let server = StubServer::start(vec![StubReply::status(502, "")]).await;

    let mut session = RpcSession::new(http(&server), options());
    let err = session.run("ask", "acme/widgets", "why").await.unwrap_err();
    match err {
        ClientError::ServerHttp { status, ref snippet } => {
            assert_eq!(status, 502);
            assert_eq!(snippet, "Unknown Error");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }

    assert_eq!(server.shutdown().await.len(), 1);
}

/// Answers `initialize` with an empty result and echoes tool arguments back as
/// a text item.
#[derive(Default)]
struct EchoTransport {
    methods: Mutex<Vec<String>>,
}

#[async_trait]
impl Transport for EchoTransport {
    async fn send(&self, body: Vec<u8>, _timeout: Duration) -> Result<RawResponse, ClientError> {
        let request: Value = serde_json::from_slice(&body)?;
        let method = request["method"].as_str().unwrap_or_default().to_string();
        self.methods.lock().unwrap().push(method.clone());

        let result = match method.as_str() {
            "initialize" => json!({}),
            _ => json!({
                "content": [{ "type": "text", "text": request["params"]["arguments"].to_string() }]
            }),
        };
        let reply = json!({ "jsonrpc": "2.0", "id": request["id"], "result": result });
        Ok(RawResponse::new(200, reply.to_string()))
    }
}

#[tokio::test]
async fn test_ask_arguments_reach_the_tool() {
    let mut session = RpcSession::new(EchoTransport::default(), options());
    let result = session
        .run("ask", "octocat/hello-world", "what does this do?")
        .await
        .unwrap();

    let echoed: Value =
        serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(
        echoed,
        json!({ "repoName": "octocat/hello-world", "question": "what does this do?" })
    );
    assert_eq!(
        *session.transport().methods.lock().unwrap(),
        vec!["initialize".to_string(), "tools/call".to_string()]
    );
}

#[tokio::test]
async fn test_unknown_command_never_reaches_transport() {
    let mut session = RpcSession::new(EchoTransport::default(), options());
    let err = session.run("frobnicate", "acme/widgets", "").await.unwrap_err();
    assert!(err.is_usage());
    assert_eq!(session.state(), SessionState::Failed);
    assert!(session.transport().methods.lock().unwrap().is_empty());
}
