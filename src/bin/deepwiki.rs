//! DeepWiki CLI Binary
//!
//! Command-line interface for querying DeepWiki repository wikis over MCP.

use clap::Parser;
use deepwiki::cli::{map_error, usage_text, Cli, ClientOverrides, CommandRequest, RunContext};
use deepwiki::config::{ConfigLoader, DeepwikiConfig};
use deepwiki::dispatch::WikiCommand;
use deepwiki::error::ClientError;
use deepwiki::logging::{init_logging, resolve_log_file_path, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Missing command or repository is informational, not a failure
    let request = match CommandRequest::from_cli(&cli) {
        Some(request) => request,
        None => {
            println!("{}", usage_text());
            process::exit(0);
        }
    };

    // Unknown commands are reported before configuration is read
    if let Err(e) = WikiCommand::parse(&request.command) {
        fail(&e);
    }

    let loaded = ConfigLoader::load(cli.config.as_deref());

    let logging_config = build_logging_config(&cli, loaded.as_ref().ok());
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("DeepWiki CLI starting");

    let context = match loaded.and_then(|config| {
        RunContext::from_config(config, ClientOverrides::from_cli(&cli), &cli.format)
    }) {
        Ok(ctx) => ctx,
        Err(e) => fail(&e),
    };

    match context.execute(&request) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &ClientError) -> ! {
    error!("Command failed: {}", e);
    eprintln!("{}", map_error(e));
    process::exit(1);
}

/// Build logging configuration from CLI args and the loaded config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: Option<&DeepwikiConfig>) -> LoggingConfig {
    let mut logging = config.map(|c| c.logging.clone()).unwrap_or_default();

    // Logging stays off unless asked for; stdout belongs to the result.
    logging.enabled = cli.verbose;
    if cli.verbose && cli.log_level.is_none() {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }

    if logging.output.contains("file") {
        if let Ok(path) = resolve_log_file_path(cli.log_file.clone(), logging.file.clone()) {
            logging.file = Some(path);
        }
    }

    logging
}
