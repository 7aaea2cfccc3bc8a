//! Bash command risk classification
//!
//! Three tiers over the raw command string. Block groups are tried first and
//! the first matching rule wins; confirm groups are tried only when nothing
//! blocked. Warn groups are never short-circuited: every advisory that
//! applies is collected, once per distinct message.

use once_cell::sync::Lazy;
use regex::RegexSet;

use crate::rules::dangerous::{BLOCK_GROUPS, CONFIRM_GROUPS};
use crate::rules::warnings::WARNING_GROUPS;
use crate::rules::{Category, PatternGroup, WarningRule};

/// Outcome of classifying one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// No block or confirm rule matched
    Clean,

    /// Hard deny
    Blocked {
        category: Category,
        pattern: &'static str,
    },

    /// Deny until the user explicitly confirms
    RequiresConfirmation {
        category: Category,
        pattern: &'static str,
    },
}

impl Detection {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Detection::Blocked { .. })
    }

    pub fn requires_confirmation(&self) -> bool {
        matches!(self, Detection::RequiresConfirmation { .. })
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, Detection::Clean)
    }

    /// Category of the matching rule, if any
    pub fn category(&self) -> Option<Category> {
        match self {
            Detection::Clean => None,
            Detection::Blocked { category, .. } => Some(*category),
            Detection::RequiresConfirmation { category, .. } => Some(*category),
        }
    }

    /// Source text of the matching regex, if any
    pub fn pattern(&self) -> Option<&'static str> {
        match self {
            Detection::Clean => None,
            Detection::Blocked { pattern, .. } => Some(*pattern),
            Detection::RequiresConfirmation { pattern, .. } => Some(*pattern),
        }
    }
}

/// Advisory messages for an allowed command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings {
    pub messages: Vec<&'static str>,
}

impl Warnings {
    pub fn has_warnings(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Messages joined the way the host expects them in `additionalContext`
    pub fn joined(&self) -> String {
        self.messages.join(" ")
    }
}

/// A tier flattened into one `RegexSet`, with each index mapped back to its rule
struct CompiledTier {
    set: RegexSet,
    rules: Vec<(Category, &'static str)>,
}

impl CompiledTier {
    fn new(groups: &[PatternGroup]) -> Self {
        let rules: Vec<(Category, &'static str)> = groups
            .iter()
            .flat_map(|g| g.rules.iter().map(move |r| (g.category, r.pattern)))
            .collect();
        let set = RegexSet::new(rules.iter().map(|(_, p)| *p)).unwrap();
        Self { set, rules }
    }

    /// Lowest matching index is the first rule in precedence order
    fn first_match(&self, command: &str) -> Option<(Category, &'static str)> {
        self.set
            .matches(command)
            .iter()
            .next()
            .and_then(|idx| self.rules.get(idx).copied())
    }
}

/// Pattern tables compiled once for the life of the process
pub struct SecurityValidator {
    block: CompiledTier,
    confirm: CompiledTier,
    warn_set: RegexSet,
    warn_rules: Vec<&'static WarningRule>,
}

impl SecurityValidator {
    pub fn new() -> Self {
        let warn_rules: Vec<&'static WarningRule> = WARNING_GROUPS
            .iter()
            .flat_map(|g| g.rules.iter())
            .collect();
        let warn_set = RegexSet::new(warn_rules.iter().map(|r| r.pattern)).unwrap();

        Self {
            block: CompiledTier::new(BLOCK_GROUPS),
            confirm: CompiledTier::new(CONFIRM_GROUPS),
            warn_set,
            warn_rules,
        }
    }

    /// Classify a command into blocked / requires-confirmation / clean
    pub fn classify(&self, command: &str) -> Detection {
        if let Some((category, pattern)) = self.block.first_match(command) {
            return Detection::Blocked { category, pattern };
        }

        if let Some((category, pattern)) = self.confirm.first_match(command) {
            return Detection::RequiresConfirmation { category, pattern };
        }

        Detection::Clean
    }

    /// Collect every applicable advisory, deduplicated by message text
    pub fn collect_warnings(&self, command: &str) -> Warnings {
        let mut messages: Vec<&'static str> = Vec::new();

        for idx in self.warn_set.matches(command).iter() {
            if let Some(rule) = self.warn_rules.get(idx) {
                if !messages.contains(&rule.message) {
                    messages.push(rule.message);
                }
            }
        }

        Warnings { messages }
    }
}

impl Default for SecurityValidator {
    fn default() -> Self {
        Self::new()
    }
}

static VALIDATOR: Lazy<SecurityValidator> = Lazy::new(SecurityValidator::new);

/// Classify using the process-wide rule tables
pub fn classify(command: &str) -> Detection {
    VALIDATOR.classify(command)
}

/// Collect warnings using the process-wide rule tables
pub fn collect_warnings(command: &str) -> Warnings {
    VALIDATOR.collect_warnings(command)
}
