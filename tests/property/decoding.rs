//! Property-based tests for response decoding

use deepwiki::error::ClientError;
use deepwiki::rpc::decoder::SNIPPET_CHARS;
use deepwiki::rpc::{decode, LogicalResponse, RawResponse};
use proptest::prelude::*;
use serde_json::json;

/// A valid data line is found wherever it sits among non-data lines
#[test]
fn test_data_line_found_among_noise_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec("[a-z ]{0,30}", 0..8),
                prop::collection::vec("[a-z ]{0,30}", 0..8),
                any::<i64>(),
            ),
            |(before, after, answer)| {
                let envelope = json!({ "jsonrpc": "2.0", "id": 2, "result": { "answer": answer } });
                let mut lines = before;
                lines.push(format!("data: {}", envelope));
                lines.extend(after);
                let raw = RawResponse::new(200, lines.join("\n"));

                prop_assert_eq!(
                    decode(&raw).unwrap(),
                    LogicalResponse::Result(json!({ "answer": answer }))
                );
                Ok(())
            },
        )
        .unwrap();
}

/// Decoding the same reply twice gives the same outcome
#[test]
fn test_decode_is_repeatable_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(any::<u16>(), any::<String>()), |(status, body)| {
            let raw = RawResponse::new(status, body);
            let first = decode(&raw).map_err(|e| e.to_string());
            let second = decode(&raw).map_err(|e| e.to_string());
            prop_assert_eq!(first, second);
            Ok(())
        })
        .unwrap();
}

/// Error snippets never quote more than the snippet limit
#[test]
fn test_snippet_is_bounded_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(200u16..600, "[^{\\[]{0,1500}"), |(status, body)| {
            let raw = RawResponse::new(status, body.clone());
            let snippet = match decode(&raw) {
                Err(ClientError::ServerHttp { snippet, .. }) => {
                    prop_assert!(status != 200);
                    snippet
                }
                Err(ClientError::Protocol { snippet }) => {
                    prop_assert_eq!(status, 200);
                    snippet
                }
                other => return Err(TestCaseError::fail(format!("unexpected {:?}", other))),
            };
            prop_assert!(snippet.chars().count() <= SNIPPET_CHARS);
            if !body.is_empty() {
                prop_assert!(body.starts_with(&snippet));
            }
            Ok(())
        })
        .unwrap();
}
