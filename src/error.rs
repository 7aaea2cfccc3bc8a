//! Error types for pai-hooks
//!
//! Every hook resolves these to its most permissive outcome; only the
//! agents CLI turns them into a non-zero exit code.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while reading input, loading configuration or agent files
#[derive(Debug, Error)]
pub enum HookError {
    /// Stdin or a state/transcript file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing arrived on stdin before the read deadline
    #[error("timed out after {0:?} waiting for hook input")]
    Timeout(Duration),

    /// Stdin was empty or whitespace only
    #[error("empty hook input")]
    EmptyInput,

    /// Hook input was not valid JSON for the expected event
    #[error("failed to parse hook input: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file exists but is not valid TOML for `Config`
    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    /// No `<name>.md` in the agents directory
    #[error("agent not found: {name}")]
    AgentNotFound { name: String, available: Vec<String> },
}

pub type Result<T> = std::result::Result<T, HookError>;
