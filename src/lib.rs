//! DeepWiki: MCP client for repository wikis
//!
//! Performs the MCP handshake against a DeepWiki endpoint, invokes one wiki
//! tool (ask, structure, contents) and decodes the reply whether the server
//! answers with plain JSON or an SSE stream of `data:` lines.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod rpc;
