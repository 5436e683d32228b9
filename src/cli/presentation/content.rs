//! Tool result presentation: `content` items as text, or the raw result as json.

use crate::error::ClientError;
use serde_json::Value;

/// Output format selected with --format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(format: &str) -> Result<Self, ClientError> {
        match format {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ClientError::Config(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                format
            ))),
        }
    }
}

/// One entry of a tool result's `content` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    Text(String),
    Resource { uri: String, text: String },
}

impl ContentItem {
    fn from_value(item: &Value) -> Option<Self> {
        match item.get("type").and_then(Value::as_str)? {
            "text" => Some(ContentItem::Text(string_field(item, "text"))),
            "resource" => {
                let resource = item.get("resource").unwrap_or(&Value::Null);
                Some(ContentItem::Resource {
                    uri: string_field(resource, "uri"),
                    text: string_field(resource, "text"),
                })
            }
            // images, audio and future types have no text rendering
            _ => None,
        }
    }

    fn render(&self) -> String {
        match self {
            ContentItem::Text(text) => text.clone(),
            ContentItem::Resource { uri, text } => format!("[Resource: {}]\n{}", uri, text),
        }
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Items of `result.content`, or `None` when the result has no content array.
pub fn content_items(result: &Value) -> Option<Vec<ContentItem>> {
    let items = result.get("content")?.as_array()?;
    Some(items.iter().filter_map(ContentItem::from_value).collect())
}

/// Render a tool result for stdout.
pub fn format_result(result: &Value, format: OutputFormat) -> String {
    let pretty = || serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string());
    match format {
        OutputFormat::Json => pretty(),
        OutputFormat::Text => match content_items(result) {
            Some(items) => items
                .iter()
                .map(ContentItem::render)
                .collect::<Vec<_>>()
                .join("\n"),
            None => format!("Result (raw):\n{}", pretty()),
        },
    }
}
