//! Prompt complexity signal tables
//!
//! Keyword groups are shallow regex heuristics. Within a group only the
//! first matching signal counts toward the score.

/// One keyword signal and the label reported when it fires
#[derive(Debug, Clone)]
pub struct Signal {
    pub pattern: &'static str,
    pub label: &'static str,
}

impl Signal {
    pub const fn new(pattern: &'static str, label: &'static str) -> Self {
        Self { pattern, label }
    }
}

/// Which kind of keyword group a signal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Ambiguity,
    Domain,
    Risk,
    Scope,
}

impl SignalKind {
    /// Human-readable indicator for a fired signal
    pub fn indicator(&self, label: &str) -> String {
        match self {
            SignalKind::Ambiguity => format!("ambiguous: \"{}\"", label),
            SignalKind::Domain => format!("domain: {}", label),
            SignalKind::Risk => format!("risk: {}", label),
            SignalKind::Scope => format!("scope: {}", label),
        }
    }
}

/// A keyword group with its score contribution
#[derive(Debug, Clone)]
pub struct SignalGroup {
    pub kind: SignalKind,
    pub weight: u8,
    pub signals: &'static [Signal],
}

/// Word-count thresholds: above the first adds 2, above the second 1 more
pub const LENGTHY_WORDS: usize = 50;
pub const VERY_DETAILED_WORDS: usize = 100;

/// Numbered list, comma-joined follow-on clause, bulleted list
pub const MULTI_PART_PATTERNS: &[&str] = &[
    r"\d+\.\s",
    r"(?i),\s*(and|then|also)\s",
    r"(?m)^[-•*]\s",
];

/// The prompt talks about code in general terms
pub const MENTIONS_CODE_PATTERN: &str = r"(?i)\b(file|code|function|component|module|class)\b";

/// The prompt names something concrete: a path separator or a file extension
pub const HAS_LOCATION_PATTERN: &str = r"(?i)[/\\]|\.ts|\.js|\.tsx|\.jsx|\.md|\.json";

pub const VAGUE_SIGNALS: &[Signal] = &[
    Signal::new(r"(?i)\bsomething\b", "something"),
    Signal::new(r"(?i)\bsomehow\b", "somehow"),
    Signal::new(r"(?i)\bmaybe\b", "maybe"),
    Signal::new(r"(?i)\bperhaps\b", "perhaps"),
    Signal::new(r"(?i)\bkind of\b", "kind of"),
    Signal::new(r"(?i)\bsort of\b", "sort of"),
    Signal::new(r"(?i)\bfix it\b", "fix it"),
    Signal::new(r"(?i)\bmake it work\b", "make it work"),
    Signal::new(r"(?i)\bimprove\b", "improve"),
    Signal::new(r"(?i)\bbetter\b", "better"),
    Signal::new(r"(?i)\bclean up\b", "clean up"),
];

pub const DOMAIN_SIGNALS: &[Signal] = &[
    Signal::new(r"(?i)\barchitect", "architecture"),
    Signal::new(r"(?i)\bsecurity\b", "security"),
    Signal::new(r"(?i)\bauth", "authentication"),
    Signal::new(r"(?i)\bdatabase\b", "database"),
    Signal::new(r"(?i)\bmigrat", "migration"),
    Signal::new(r"(?i)\bdeploy", "deployment"),
    Signal::new(r"(?i)\brefactor", "refactoring"),
    Signal::new(r"(?i)\bredesign", "redesign"),
    Signal::new(r"(?i)\brewrite\b", "rewrite"),
    Signal::new(r"(?i)\bperformance\b", "performance"),
    Signal::new(r"(?i)\bscal(e|ing|able)", "scaling"),
];

pub const RISK_SIGNALS: &[Signal] = &[
    Signal::new(r"(?i)\bdelete\b", "delete"),
    Signal::new(r"(?i)\bremove all\b", "remove all"),
    Signal::new(r"(?i)\bdrop\b", "drop"),
    Signal::new(r"(?i)\bproduction\b", "production"),
    Signal::new(r"(?i)\bprod\b", "prod"),
    Signal::new(r"(?i)\bpublish\b", "publish"),
    Signal::new(r"(?i)\bpayment", "payment"),
    Signal::new(r"(?i)\bfinancial", "financial"),
    Signal::new(r"(?i)\birreversible", "irreversible"),
];

pub const SYSTEM_WIDE_SIGNALS: &[Signal] = &[
    Signal::new(r"(?i)\ball files\b", "all files"),
    Signal::new(r"(?i)\bentire\b", "entire"),
    Signal::new(r"(?i)\bwhole project\b", "whole project"),
    Signal::new(r"(?i)\beverywhere\b", "everywhere"),
    Signal::new(r"(?i)\bacross the\b", "across"),
    Signal::new(r"(?i)\bthroughout\b", "throughout"),
    Signal::new(r"(?i)\bglobal", "global"),
];

/// Keyword groups scored after the structural checks
pub const AMBIGUITY_GROUP: SignalGroup = SignalGroup {
    kind: SignalKind::Ambiguity,
    weight: 1,
    signals: VAGUE_SIGNALS,
};

pub const KEYWORD_GROUPS: &[SignalGroup] = &[
    SignalGroup {
        kind: SignalKind::Domain,
        weight: 2,
        signals: DOMAIN_SIGNALS,
    },
    SignalGroup {
        kind: SignalKind::Risk,
        weight: 2,
        signals: RISK_SIGNALS,
    },
    SignalGroup {
        kind: SignalKind::Scope,
        weight: 2,
        signals: SYSTEM_WIDE_SIGNALS,
    },
];

/// Whole-prompt acknowledgements that never get guidance
pub const CONTINUATION_PATTERNS: &[&str] = &[
    r"(?i)^(yes|no|ok|sure|thanks|thank you|continue|proceed|go ahead|do it|yep|yeah|nope|nah)\.?$",
    r"(?i)^(sounds good|looks good|perfect|great|awesome|cool)\.?$",
    r"(?i)^(please|pls)$",
    r"(?i)^(next|more|again)$",
];

/// Questions about concepts rather than requests for work
pub const INFORMATIONAL_PATTERNS: &[&str] = &[
    r"(?i)^(what|how|why|when|where|who|which|explain|describe|tell me about)\s",
    r"\?$",
];

/// Questions that are really task requests
pub const TASK_QUESTION_PATTERNS: &[&str] = &[
    r"(?i)can you (create|make|build|implement|add|fix|update|change)",
    r"(?i)could you (create|make|build|implement|add|fix|update|change)",
    r"(?i)would you (create|make|build|implement|add|fix|update|change)",
    r"(?i)how do i (create|make|build|implement|add|fix|update|change)",
];
