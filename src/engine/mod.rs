//! Hook engine for pai-hooks
//!
//! Turns a raw stdin payload into a `HookResponse` for each hook. Every
//! failure path fails open: allow for the validator, no output for the rest.

pub mod common;
pub mod persistence;
pub mod scope;
pub mod validator;

use std::path::Path;

use crate::audit::{AuditLogger, SecurityEvent};
use crate::config::Config;
use crate::error::{HookError, Result};
use crate::input::{PromptInput, StopInput, ToolUseInput};
use crate::output::{Decision, HookOutput, HookResponse};

use self::validator::Detection;

/// Runs the individual hooks against one shared, read-only configuration
pub struct HookEngine {
    config: Config,
    audit: AuditLogger,
}

impl HookEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        let audit = AuditLogger::new(config.audit_path().as_deref());
        Self { config, audit }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decide on a single command
    pub fn check_command(&self, command: &str) -> Decision {
        match validator::classify(command) {
            Detection::Blocked { category, pattern } => Decision::Block { category, pattern },
            Detection::RequiresConfirmation { category, pattern } => {
                Decision::Confirm { category, pattern }
            }
            Detection::Clean => Decision::Allow {
                warnings: validator::collect_warnings(command),
            },
        }
    }

    /// Decide on a PreToolUse event; non-Bash tools and empty commands pass
    pub fn check(&self, input: &ToolUseInput) -> Decision {
        if !input.is_bash() {
            return Decision::allow();
        }
        let command = input.tool_input.command();
        if command.is_empty() {
            return Decision::allow();
        }
        self.check_command(command)
    }

    /// PreToolUse: classify the Bash command and answer with JSON
    pub fn security_validator(&self, raw: Result<String>) -> HookResponse {
        let input = match raw.and_then(|text| ToolUseInput::from_json(&text)) {
            Ok(input) => input,
            Err(e) => return fail_open_allow("security-validator", &e),
        };

        let decision = self.check(&input);
        let command = input.tool_input.command();

        if let Some(event) = SecurityEvent::from_decision(
            &decision,
            command,
            input.session_id.as_deref(),
            self.config.validator.log_command_chars,
        ) {
            // Synchronous append before the decision is emitted; failures are ignored
            self.audit.record(&event);
        }

        let output = HookOutput::from_decision(&decision, command);
        HookResponse::json(&output, decision.exit_code())
    }

    /// UserPromptSubmit: inject scoping guidance for Medium/Complex prompts
    pub fn analyze_task_scope(&self, raw: Result<String>) -> HookResponse {
        let input = match raw.and_then(|text| PromptInput::from_json(&text)) {
            Ok(input) => input,
            Err(HookError::EmptyInput) | Err(HookError::Timeout(_)) => {
                return HookResponse::silent()
            }
            Err(e) => {
                return HookResponse::silent()
                    .with_diagnostic(format!("[analyze-task-scope] Error: {}", e))
            }
        };

        let prompt = input.prompt.as_str();
        if prompt.chars().count() < self.config.scope.min_prompt_chars {
            return HookResponse::silent();
        }

        let analysis = scope::analyze_complexity(prompt);
        let guidance = scope::generate_scoping_guidance(&analysis, prompt);
        if guidance.is_empty() {
            return HookResponse::silent();
        }

        HookResponse::text(guidance).with_diagnostic(format!(
            "[analyze-task-scope] {} task ({}/{})",
            analysis.level,
            analysis.score,
            scope::MAX_SCORE
        ))
    }

    /// Stop: keep the session going until the task signals completion
    pub fn persistence(&self, raw: Result<String>) -> HookResponse {
        let input = match raw.and_then(|text| StopInput::from_json(&text)) {
            Ok(input) => input,
            Err(HookError::EmptyInput) | Err(HookError::Timeout(_)) => {
                return HookResponse::silent()
            }
            Err(e) => {
                return HookResponse::silent()
                    .with_diagnostic(format!("[persistence-hook] Error: {}", e))
            }
        };

        let (outcome, save_error) = persistence::evaluate(
            &self.config.persistence,
            &self.config.state_path(),
            &input.session_id,
            Path::new(&input.transcript_path),
        );

        let mut diagnostic = outcome.diagnostic();
        if let Some(err) = save_error {
            diagnostic = format!("{}\n{}", err, diagnostic);
        }

        let response = match outcome.reminder() {
            Some(text) => HookResponse::text(text),
            None => HookResponse::silent(),
        };
        response.with_diagnostic(diagnostic)
    }
}

fn fail_open_allow(hook: &str, error: &HookError) -> HookResponse {
    let response = HookResponse::json(&HookOutput::allow(), 0);
    match error {
        HookError::EmptyInput => response,
        _ => response.with_diagnostic(format!("[{}] {} (allowing)", hook, error)),
    }
}
