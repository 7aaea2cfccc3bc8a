//! Block and confirm tier rules for Bash commands
//!
//! Group order is precedence order. Patterns run against the raw command
//! string; nothing is unquoted or expanded first.

use crate::rules::{Category, PatternGroup, Rule};

/// Raw TCP/UDP device paths and interactive shells redirected to a device
pub const REVERSE_SHELL_RULES: &[Rule] = &[
    Rule::new("dev-tcp-udp", r"/dev/(tcp|udp)/[0-9]"),
    Rule::new("bash-interactive-redirect", r"bash\s+-i\s+>&?\s*/dev/"),
];

/// Prompt-injection phrases smuggled into a command
pub const INSTRUCTION_OVERRIDE_RULES: &[Rule] = &[
    Rule::new(
        "ignore-previous-instructions",
        r"(?i)ignore\s+(all\s+)?previous\s+instructions?",
    ),
    Rule::new(
        "disregard-prior-rules",
        r"(?i)disregard\s+(all\s+)?(prior|previous)\s+(instructions?|rules?)",
    ),
];

/// Filesystem destruction
pub const CATASTROPHIC_DELETION_RULES: &[Rule] = &[
    Rule::new("rm-root", r"\brm\s+(-[rfivd]+\s+)*/\s*$"),
    Rule::new("rm-root-wildcard", r"\brm\s+(-[rfivd]+\s+)*/\*\s*$"),
    // Matches any trailing ` ~` or ` ~/`, not only rm invocations
    Rule::new("trailing-tilde", r"\s+~/?(\s*$|\s+)"),
    Rule::new("rm-then-tilde", r"\brm\s+(-[rfivd]+\s+)*\S+\s+~/?"),
    Rule::new("rm-cwd", r"\brm\s+(-[rfivd]+\s+)*\./\s*$"),
    Rule::new("rm-parent", r"\brm\s+(-[rfivd]+\s+)*\.\./\s*$"),
];

/// Permission changes that lock everyone out
pub const DANGEROUS_FILE_OPS_RULES: &[Rule] = &[Rule::new(
    "chmod-zero",
    r"\bchmod\s+(-R\s+)?0{3,}",
)];

/// High blast radius git operations that need explicit confirmation
pub const DANGEROUS_GIT_RULES: &[Rule] = &[
    Rule::new("git-push-force", r"(?i)\bgit\s+push\s+.*(-f\b|--force)"),
    Rule::new("git-reset-hard", r"(?i)\bgit\s+reset\s+--hard"),
];

/// Hard deny groups, in precedence order
pub const BLOCK_GROUPS: &[PatternGroup] = &[
    PatternGroup {
        category: Category::ReverseShell,
        rules: REVERSE_SHELL_RULES,
    },
    PatternGroup {
        category: Category::InstructionOverride,
        rules: INSTRUCTION_OVERRIDE_RULES,
    },
    PatternGroup {
        category: Category::CatastrophicDeletion,
        rules: CATASTROPHIC_DELETION_RULES,
    },
    PatternGroup {
        category: Category::DangerousFileOps,
        rules: DANGEROUS_FILE_OPS_RULES,
    },
];

/// Deny-pending-confirmation groups, checked only when no block group matched
pub const CONFIRM_GROUPS: &[PatternGroup] = &[PatternGroup {
    category: Category::DangerousGit,
    rules: DANGEROUS_GIT_RULES,
}];
