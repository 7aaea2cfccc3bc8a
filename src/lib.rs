//! pai-hooks - Lifecycle hooks for the PAI coding-assistant runtime
//!
//! This library provides the decision logic behind the PAI hook executables.
//! Each hook reads one JSON event from stdin and answers on stdout.
//!
//! # Features
//!
//! - **Security validator**: Blocks or asks for confirmation on dangerous Bash commands
//! - **Advisory warnings**: Non-blocking hints for risky but legitimate commands
//! - **Task scope analysis**: Scores prompt complexity and injects scoping guidance
//! - **Persistence**: Keeps a session working until the task reports completion
//! - **Agent spawner**: Renders Task tool prompts from agent definitions
//! - **Audit logging**: JSONL log of blocked and confirmation-required commands
//!
//! # Example
//!
//! ```
//! use pai_hooks::{classify, collect_warnings, analyze_complexity, Level};
//!
//! assert!(classify("rm -rf /").is_blocked());
//! assert!(classify("git push --force origin main").requires_confirmation());
//! assert!(collect_warnings("rm -rf ./build").has_warnings());
//!
//! let analysis = analyze_complexity("Fix the typo in README.md line 12");
//! assert_eq!(analysis.level, Level::Simple);
//! ```

pub mod agents;
pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;
pub mod rules;
pub mod stdin;

// Re-exports for convenience
pub use config::Config;
pub use engine::scope::{
    analyze_complexity, generate_scoping_guidance, is_continuation, is_informational,
    ComplexityAnalysis, Level,
};
pub use engine::validator::{classify, collect_warnings, Detection, SecurityValidator, Warnings};
pub use engine::HookEngine;
pub use error::{HookError, Result};
pub use input::{PromptInput, StopInput, ToolInput, ToolUseInput};
pub use output::{Decision, HookOutput, HookResponse};
pub use rules::Category;
