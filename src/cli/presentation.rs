//! CLI presentation: text and json formatters for tool results.

mod content;

pub use content::{content_items, format_result, ContentItem, OutputFormat};
