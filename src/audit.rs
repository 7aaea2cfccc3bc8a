//! JSONL security event log
//!
//! Records blocked and confirmation-required commands. Logging is best
//! effort: a failed write never changes the decision.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::engine::common::{redact_secrets, truncate_chars};
use crate::output::Decision;
use crate::rules::Category;

/// Kind of security event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    AttackBlocked,
    ConfirmationRequired,
}

/// One security event record
#[derive(Debug, Serialize)]
pub struct SecurityEvent {
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "type")]
    pub event_type: EventType,

    pub category: Category,

    /// Source of the regex that matched
    pub pattern: String,

    /// Truncated, redacted command
    pub command: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl SecurityEvent {
    /// Build an event for a deny decision; `None` for allows
    pub fn from_decision(
        decision: &Decision,
        command: &str,
        session_id: Option<&str>,
        max_command_chars: usize,
    ) -> Option<Self> {
        let (event_type, category, pattern) = match decision {
            Decision::Allow { .. } => return None,
            Decision::Block { category, pattern } => (EventType::AttackBlocked, *category, *pattern),
            Decision::Confirm { category, pattern } => {
                (EventType::ConfirmationRequired, *category, *pattern)
            }
        };

        Some(Self {
            timestamp: Utc::now(),
            event_type,
            category,
            pattern: pattern.to_string(),
            command: redact_secrets(truncate_chars(command, max_command_chars)),
            session_id: session_id.map(String::from),
        })
    }
}

/// Append-only security event logger
#[derive(Debug, Default)]
pub struct AuditLogger {
    path: Option<PathBuf>,
}

impl AuditLogger {
    /// Create a logger; `None` disables logging
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Append one event
    pub fn log(&self, event: &SecurityEvent) -> Result<(), std::io::Error> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }

    /// Append one event, ignoring any failure
    pub fn record(&self, event: &SecurityEvent) {
        let _ = self.log(event);
    }
}
