//! Stop-event persistence
//!
//! Keeps the assistant working until it signals completion. A single state
//! file holds the iteration counter for the current session; the transcript
//! is scanned for a completion signal or a run of identical tool errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::config::PersistenceConfig;
use crate::engine::common::truncate_chars;
use crate::error::Result;

const COMPLETE_MARKER: &str = "TASK_COMPLETE:";
const COMPLETED_MARKER: &str = "COMPLETED:";
const COMPLETED_WORDS: &[&str] = &["successfully", "finished", "done"];

/// Characters of an error's content used to compare errors
const ERROR_KEY_CHARS: usize = 100;

/// Iteration counter persisted between Stop events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: String,
    pub iteration_count: u32,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub task_complete: bool,
}

impl SessionState {
    pub fn new(session_id: &str) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.to_string(),
            iteration_count: 0,
            started_at: now,
            last_activity: now,
            task_complete: false,
        }
    }

    /// Stored state for `session_id`, or a fresh one if the file is missing,
    /// unreadable, or belongs to another session
    pub fn load(path: &Path, session_id: &str) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<SessionState>(&content).ok())
            .filter(|state| state.session_id == session_id)
            .unwrap_or_else(|| Self::new(session_id))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// What the Stop hook decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Completion signal found; let the session stop
    Complete { iterations: u32 },

    /// Repeated identical errors; stop for user intervention
    Stuck { iterations: u32 },

    /// Safety limit hit
    MaxIterations { max: u32 },

    /// Not done yet; inject the continuation prompt
    Continue { iteration: u32, max: u32 },
}

impl Outcome {
    /// Text injected into the assistant's context, if any
    pub fn reminder(&self) -> Option<String> {
        match self {
            Outcome::Complete { .. } | Outcome::Stuck { .. } => None,
            Outcome::MaxIterations { max } => Some(max_iterations_reminder(*max)),
            Outcome::Continue { iteration, max } => Some(continuation_reminder(*iteration, *max)),
        }
    }

    /// Operator diagnostic for stderr
    pub fn diagnostic(&self) -> String {
        match self {
            Outcome::Complete { iterations } => {
                format!("[persistence-hook] Task complete after {} iterations", iterations)
            }
            Outcome::Stuck { .. } => {
                "[persistence-hook] Detected stuck state - allowing stop for user intervention"
                    .to_string()
            }
            Outcome::MaxIterations { max } => {
                format!("[persistence-hook] Max iterations ({}) reached - safety stop", max)
            }
            Outcome::Continue { iteration, max } => {
                format!("[persistence-hook] Iteration {}/{} - continuing", iteration, max)
            }
        }
    }
}

/// Last `n` JSON entries of a JSONL transcript; non-JSON lines are skipped
fn recent_entries(transcript: &Path, n: usize) -> Vec<Value> {
    let Ok(content) = std::fs::read_to_string(transcript) else {
        return Vec::new();
    };
    let lines: Vec<&str> = content.trim().lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..]
        .iter()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}

fn text_signals_completion(text: &str) -> bool {
    text.contains(COMPLETE_MARKER)
        || (text.contains(COMPLETED_MARKER) && COMPLETED_WORDS.iter().any(|w| text.contains(w)))
}

fn entry_signals_completion(entry: &Value) -> bool {
    match entry.pointer("/message/content") {
        Some(Value::String(text)) => text_signals_completion(text),
        Some(Value::Array(blocks)) => blocks.iter().any(|block| {
            block.get("type").and_then(Value::as_str) == Some("text")
                && block
                    .get("text")
                    .and_then(Value::as_str)
                    .is_some_and(|t| t.contains(COMPLETE_MARKER))
        }),
        _ => false,
    }
}

/// Any of the last `recent` transcript entries carries a completion signal
pub fn is_task_complete(transcript: &Path, recent: usize) -> bool {
    recent_entries(transcript, recent)
        .iter()
        .any(entry_signals_completion)
}

/// `threshold` or more identical tool errors among the last `window` entries
pub fn is_stuck(transcript: &Path, window: usize, threshold: usize) -> bool {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for entry in recent_entries(transcript, window) {
        let is_error = entry.get("type").and_then(Value::as_str) == Some("tool_result")
            && entry.get("is_error").and_then(Value::as_bool) == Some(true);
        if !is_error {
            continue;
        }
        let Some(content) = entry.get("content") else {
            continue;
        };
        let serialized = serde_json::to_string(content).unwrap_or_default();
        let key = truncate_chars(&serialized, ERROR_KEY_CHARS).to_string();
        *counts.entry(key).or_insert(0) += 1;
    }

    counts.values().any(|&count| count >= threshold)
}

/// Advance the session counter and decide whether to keep going.
///
/// State save failures are returned alongside the outcome so the caller can
/// report them without changing the decision.
pub fn evaluate(
    config: &PersistenceConfig,
    state_path: &Path,
    session_id: &str,
    transcript: &Path,
) -> (Outcome, Option<String>) {
    let mut state = SessionState::load(state_path, session_id);
    state.iteration_count += 1;
    state.last_activity = Utc::now();

    let outcome = if is_task_complete(transcript, config.recent_lines) {
        state.task_complete = true;
        Outcome::Complete {
            iterations: state.iteration_count,
        }
    } else if is_stuck(transcript, config.stuck_window, config.stuck_threshold) {
        Outcome::Stuck {
            iterations: state.iteration_count,
        }
    } else if state.iteration_count >= config.max_iterations {
        Outcome::MaxIterations {
            max: config.max_iterations,
        }
    } else {
        Outcome::Continue {
            iteration: state.iteration_count,
            max: config.max_iterations,
        }
    };

    let save_error = state
        .save(state_path)
        .err()
        .map(|e| format!("[persistence-hook] Failed to save state: {}", e));

    (outcome, save_error)
}

fn continuation_reminder(iteration: u32, max: u32) -> String {
    format!(
        "<system-reminder>
PERSISTENCE MODE ACTIVE (Iteration {iteration}/{max})

The task is NOT complete. Continue working.

Remaining iterations: {remaining}

Checklist before stopping:
- [ ] All SCOPING completion criteria met?
- [ ] Tests passing?
- [ ] Build succeeds?
- [ ] Verification checklist complete?

If ANY is unchecked → Keep working.

When truly done, include: TASK_COMPLETE: [summary]
</system-reminder>",
        remaining = max.saturating_sub(iteration),
    )
}

fn max_iterations_reminder(max: u32) -> String {
    format!(
        "<system-reminder>
MAX ITERATIONS REACHED ({max})

Safety limit hit. Task may be incomplete.
Review the work done and decide whether to:
1. Continue with: \"keep going\"
2. Accept current state
3. Take a different approach

This limit prevents infinite loops.
</system-reminder>"
    )
}
