//! CLI parse: clap types for deepwiki. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// DeepWiki CLI - query repository wikis over MCP
#[derive(Parser, Debug)]
#[command(name = "deepwiki")]
#[command(version)]
#[command(about = "Query DeepWiki repository documentation over MCP")]
pub struct Cli {
    /// Command: ask, structure, or contents
    pub command: Option<String>,

    /// Repository in owner/repo form
    pub target: Option<String>,

    /// Question text (ask) or wiki page path (contents); joined with spaces
    #[arg(trailing_var_arg = true)]
    pub extra: Vec<String>,

    /// MCP endpoint URL (overrides configuration)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in milliseconds (overrides configuration)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Configuration file path (replaces the user config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Enable verbose logging to stderr (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
