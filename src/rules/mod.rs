//! Static rule tables for pai-hooks
//!
//! Command risk patterns (block, confirm and warn tiers) and the prompt
//! complexity signal tables. Everything here is `const` data; the engine
//! compiles it once per process.

pub mod dangerous;
pub mod scope;
pub mod warnings;

use serde::Serialize;
use std::fmt;

/// Risk category attached to a block or confirm match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ReverseShell,
    InstructionOverride,
    CatastrophicDeletion,
    DangerousFileOps,
    DangerousGit,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ReverseShell => "reverse_shell",
            Category::InstructionOverride => "instruction_override",
            Category::CatastrophicDeletion => "catastrophic_deletion",
            Category::DangerousFileOps => "dangerous_file_ops",
            Category::DangerousGit => "dangerous_git",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single command pattern
#[derive(Debug, Clone)]
pub struct Rule {
    /// Unique identifier for this rule
    pub id: &'static str,

    /// Regex pattern to match against the raw command
    pub pattern: &'static str,
}

impl Rule {
    pub const fn new(id: &'static str, pattern: &'static str) -> Self {
        Self { id, pattern }
    }
}

/// An ordered list of rules sharing one category
#[derive(Debug, Clone)]
pub struct PatternGroup {
    pub category: Category,
    pub rules: &'static [Rule],
}

/// Advisory pattern: matching commands are allowed with `message` attached
#[derive(Debug, Clone)]
pub struct WarningRule {
    pub id: &'static str,
    pub pattern: &'static str,
    pub message: &'static str,
}

impl WarningRule {
    pub const fn new(id: &'static str, pattern: &'static str, message: &'static str) -> Self {
        Self {
            id,
            pattern,
            message,
        }
    }
}

/// A named group of advisory patterns
#[derive(Debug, Clone)]
pub struct WarningGroup {
    pub name: &'static str,
    pub rules: &'static [WarningRule],
}
