//! CLI domain: parse, route, help, output, and presentation only.
//! Protocol work lives in `rpc`; this layer turns arguments into a request and
//! a result into text.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::usage_text;
pub use output::map_error;
pub use parse::Cli;
pub use presentation::{content_items, format_result, ContentItem, OutputFormat};
pub use route::{ClientOverrides, CommandRequest, RunContext};
