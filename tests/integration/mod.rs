//! Integration tests for the DeepWiki MCP client

mod session_scenarios;
mod test_utils;
