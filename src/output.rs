//! Output formatting for PAI hook responses
//!
//! The validator answers with a single JSON line; the other hooks answer with
//! plain text. Every hook may add one diagnostic line on stderr.

use serde::Serialize;
use std::io::{self, Write};

use crate::engine::common::truncate_chars;
use crate::engine::validator::Warnings;
use crate::rules::Category;

/// Exit code the host treats as a blocking error
pub const EXIT_BLOCK: i32 = 2;

/// Characters of the command quoted back in confirmation feedback
const FEEDBACK_COMMAND_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionDecision {
    Allow,
    Deny,
}

/// Validator output object
#[derive(Debug, Serialize)]
pub struct HookOutput {
    #[serde(rename = "permissionDecision")]
    pub permission_decision: PermissionDecision,

    /// Context injected for the assistant
    #[serde(rename = "additionalContext", skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,

    /// Explanation shown when the command is denied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Decision result from the security validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Allow, optionally with advisory messages
    Allow { warnings: Warnings },

    /// Deny outright
    Block {
        category: Category,
        pattern: &'static str,
    },

    /// Deny until the user confirms
    Confirm {
        category: Category,
        pattern: &'static str,
    },
}

impl Decision {
    pub fn allow() -> Self {
        Decision::Allow {
            warnings: Warnings::default(),
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }

    pub fn is_deny(&self) -> bool {
        !self.is_allow()
    }

    /// Category of the matched rule, if any
    pub fn category(&self) -> Option<Category> {
        match self {
            Decision::Allow { .. } => None,
            Decision::Block { category, .. } | Decision::Confirm { category, .. } => {
                Some(*category)
            }
        }
    }

    /// 0 lets the tool run, 2 tells the host to block
    pub fn exit_code(&self) -> i32 {
        match self {
            Decision::Allow { .. } => 0,
            Decision::Block { .. } | Decision::Confirm { .. } => EXIT_BLOCK,
        }
    }
}

impl HookOutput {
    /// Plain allow, no context
    pub fn allow() -> Self {
        HookOutput {
            permission_decision: PermissionDecision::Allow,
            additional_context: None,
            feedback: None,
        }
    }

    /// Create output from a Decision; `command` is quoted in confirmation feedback
    pub fn from_decision(decision: &Decision, command: &str) -> Self {
        match decision {
            Decision::Allow { warnings } => HookOutput {
                permission_decision: PermissionDecision::Allow,
                additional_context: warnings.has_warnings().then(|| warnings.joined()),
                feedback: None,
            },
            Decision::Block { category, .. } => HookOutput {
                permission_decision: PermissionDecision::Deny,
                additional_context: Some(format!("🚨 SECURITY: Blocked {} pattern", category)),
                feedback: Some(format!(
                    "This command matched a security pattern ({}). If this is legitimate, please rephrase the command.",
                    category
                )),
            },
            Decision::Confirm { category, .. } => HookOutput {
                permission_decision: PermissionDecision::Deny,
                additional_context: Some(format!(
                    "⚠️ DANGEROUS: {} operation requires confirmation",
                    category
                )),
                feedback: Some(format!(
                    "This is a dangerous operation ({}...). This can cause data loss. If you're sure, explicitly confirm this command.",
                    truncate_chars(command, FEEDBACK_COMMAND_CHARS)
                )),
            },
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"permissionDecision":"allow"}"#.to_string())
    }
}

/// Everything a hook process emits: stdout payload, stderr line, exit code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookResponse {
    pub stdout: Option<String>,
    pub diagnostic: Option<String>,
    pub exit_code: i32,
}

impl HookResponse {
    /// Nothing on stdout, exit 0
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn text(body: impl Into<String>) -> Self {
        Self {
            stdout: Some(body.into()),
            ..Self::default()
        }
    }

    pub fn json(output: &HookOutput, exit_code: i32) -> Self {
        Self {
            stdout: Some(output.to_json()),
            diagnostic: None,
            exit_code,
        }
    }

    pub fn with_diagnostic(mut self, line: impl Into<String>) -> Self {
        self.diagnostic = Some(line.into());
        self
    }

    /// Write to stdout/stderr and return the exit code
    pub fn emit(&self) -> i32 {
        if let Some(ref body) = self.stdout {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let _ = writeln!(handle, "{}", body);
            let _ = handle.flush();
        }
        if let Some(ref line) = self.diagnostic {
            eprintln!("{}", line);
        }
        self.exit_code
    }
}
