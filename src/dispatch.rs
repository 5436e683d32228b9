//! Command dispatch: CLI command name to MCP tool name and argument mapping.

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Wiki commands understood by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WikiCommand {
    Ask,
    Structure,
    Contents,
}

impl WikiCommand {
    pub const ALL: [WikiCommand; 3] = [
        WikiCommand::Ask,
        WikiCommand::Structure,
        WikiCommand::Contents,
    ];

    pub fn parse(name: &str) -> Result<Self, ClientError> {
        match name {
            "ask" => Ok(WikiCommand::Ask),
            "structure" => Ok(WikiCommand::Structure),
            "contents" => Ok(WikiCommand::Contents),
            _ => Err(ClientError::Usage {
                command: name.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WikiCommand::Ask => "ask",
            WikiCommand::Structure => "structure",
            WikiCommand::Contents => "contents",
        }
    }

    /// Remote tool this command invokes.
    pub fn capability(&self) -> &'static str {
        match self {
            WikiCommand::Ask => "ask_question",
            WikiCommand::Structure => "read_wiki_structure",
            WikiCommand::Contents => "read_wiki_contents",
        }
    }
}

/// A named tool call with its arguments, embedded in a `tools/call` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityInvocation {
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl CapabilityInvocation {
    /// `tools/call` params: `{name, arguments}`.
    pub fn to_params(&self) -> Value {
        json!({
            "name": self.name,
            "arguments": self.arguments,
        })
    }
}

/// Build the tool invocation for `command`. Unknown commands fail here, before
/// anything touches the network.
pub fn dispatch(
    command: &str,
    target: &str,
    extra: &str,
) -> Result<CapabilityInvocation, ClientError> {
    let command = WikiCommand::parse(command)?;

    let mut arguments = Map::new();
    arguments.insert("repoName".to_string(), json!(target));
    match command {
        WikiCommand::Ask => {
            arguments.insert("question".to_string(), json!(extra));
        }
        WikiCommand::Structure => {}
        WikiCommand::Contents => {
            arguments.insert("path".to_string(), json!(extra));
        }
    }

    Ok(CapabilityInvocation {
        name: command.capability().to_string(),
        arguments,
    })
}
