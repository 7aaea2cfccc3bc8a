//! Warn tier rules: the command is allowed, the message is attached
//!
//! Every group is evaluated; identical messages are reported once.

use crate::rules::{WarningGroup, WarningRule};

const PREFER_BUN: &str = "💡 Reminder: PAI prefers 'bun install' for JS/TS projects.";

pub const DESTRUCTIVE_RULES: &[WarningRule] = &[
    WarningRule::new(
        "rm-wildcard-or-parent",
        r"\brm\s+(-[rfivd]+\s+)*(\*|\.\.)",
        "⚠️ DESTRUCTIVE COMMAND: Verify target path before execution.",
    ),
    WarningRule::new(
        "rm-with-flags",
        r"\brm\s+(-[rfivd]+\s+)+",
        "⚠️ Recursive delete detected: Double-check the target path.",
    ),
];

pub const FORCE_PUSH_RULES: &[WarningRule] = &[
    WarningRule::new(
        "git-push-force",
        r"(?i)\bgit\s+push\s+.*(-f\b|--force)",
        "⚠️ Force push detected: Ensure you're not overwriting shared branches.",
    ),
    WarningRule::new(
        "git-push-force-with-lease",
        r"(?i)\bgit\s+push\s+--force-with-lease",
        "💡 force-with-lease is safer than --force, but still verify the target branch.",
    ),
];

pub const PACKAGE_MANAGER_RULES: &[WarningRule] = &[
    WarningRule::new("npm-install", r"\bnpm\s+(install|i|add|ci)\b", PREFER_BUN),
    WarningRule::new("yarn-install", r"\byarn\s+(install|add)\b", PREFER_BUN),
    WarningRule::new("pnpm-install", r"\bpnpm\s+(install|i|add)\b", PREFER_BUN),
    WarningRule::new(
        "pip-install",
        r"\bpip\s+install\b",
        "💡 Reminder: PAI prefers 'uv pip install' for Python projects.",
    ),
];

pub const GIT_SAFETY_RULES: &[WarningRule] = &[
    WarningRule::new(
        "git-push",
        r"\bgit\s+push\b",
        "🔒 Security: Run 'git remote -v' to verify repository before pushing.",
    ),
    WarningRule::new(
        "git-clone",
        r"\bgit\s+clone\b",
        "🔒 Verify the repository URL is from a trusted source.",
    ),
];

/// All advisory groups, in reporting order
pub const WARNING_GROUPS: &[WarningGroup] = &[
    WarningGroup {
        name: "destructive",
        rules: DESTRUCTIVE_RULES,
    },
    WarningGroup {
        name: "force_push",
        rules: FORCE_PUSH_RULES,
    },
    WarningGroup {
        name: "package_manager",
        rules: PACKAGE_MANAGER_RULES,
    },
    WarningGroup {
        name: "git_safety",
        rules: GIT_SAFETY_RULES,
    },
];
