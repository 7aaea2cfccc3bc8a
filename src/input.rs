//! Input parsing for PAI hook JSON payloads
//!
//! One JSON object arrives on stdin per invocation. Each hook event has its
//! own shape; unknown fields are ignored.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{HookError, Result};

/// Parse a hook payload, treating blank input as `EmptyInput`
fn parse<T: DeserializeOwned>(json: &str) -> Result<T> {
    if json.trim().is_empty() {
        return Err(HookError::EmptyInput);
    }
    Ok(serde_json::from_str(json)?)
}

/// PreToolUse payload
#[derive(Debug, Deserialize)]
pub struct ToolUseInput {
    #[serde(default)]
    pub session_id: Option<String>,

    /// Name of the tool being invoked (e.g., "Bash", "Read", "Edit")
    #[serde(default)]
    pub tool_name: String,

    #[serde(default)]
    pub tool_input: ToolInput,
}

/// Tool-specific input variants
#[derive(Debug, Clone, Default)]
pub enum ToolInput {
    /// Bare string payload, taken as the command itself
    Text(String),

    /// Object carrying a `command` field
    Command {
        command: String,
        #[allow(dead_code)]
        description: Option<String>,
    },

    /// Anything else - pass through
    Unknown {
        #[allow(dead_code)]
        raw: serde_json::Value,
    },

    #[default]
    Missing,
}

impl<'de> Deserialize<'de> for ToolInput {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        if let Some(text) = value.as_str() {
            return Ok(ToolInput::Text(text.to_string()));
        }

        if let Some(obj) = value.as_object() {
            if let Some(command) = obj.get("command").and_then(|v| v.as_str()) {
                return Ok(ToolInput::Command {
                    command: command.to_string(),
                    description: obj
                        .get("description")
                        .and_then(|v| v.as_str())
                        .map(String::from),
                });
            }
        }

        Ok(ToolInput::Unknown { raw: value })
    }
}

impl ToolInput {
    /// The command string, or "" when the payload carries none
    pub fn command(&self) -> &str {
        match self {
            ToolInput::Text(text) => text,
            ToolInput::Command { command, .. } => command,
            ToolInput::Unknown { .. } | ToolInput::Missing => "",
        }
    }
}

impl ToolUseInput {
    pub fn from_json(json: &str) -> Result<Self> {
        parse(json)
    }

    /// Only Bash invocations are classified
    pub fn is_bash(&self) -> bool {
        self.tool_name == "Bash"
    }
}

/// UserPromptSubmit payload
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PromptInput {
    pub session_id: String,
    pub prompt: String,
    pub transcript_path: String,
    pub hook_event_name: String,
}

impl PromptInput {
    pub fn from_json(json: &str) -> Result<Self> {
        parse(json)
    }
}

/// Stop payload
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StopInput {
    pub session_id: String,
    pub transcript_path: String,
    pub hook_event_name: String,
    pub stop_hook_output: Option<String>,
}

impl StopInput {
    pub fn from_json(json: &str) -> Result<Self> {
        parse(json)
    }
}
