//! Prompt complexity scoring and scoping guidance
//!
//! Scores a prompt 0-10 from independent additive signals and, for Medium
//! and Complex prompts, renders a `<system-reminder>` asking the assistant to
//! scope the task before acting.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use std::fmt;

use crate::engine::common::word_count;
use crate::rules::scope::{
    SignalGroup, SignalKind, AMBIGUITY_GROUP, CONTINUATION_PATTERNS, HAS_LOCATION_PATTERN,
    INFORMATIONAL_PATTERNS, KEYWORD_GROUPS, LENGTHY_WORDS, MENTIONS_CODE_PATTERN,
    MULTI_PART_PATTERNS, TASK_QUESTION_PATTERNS, VERY_DETAILED_WORDS,
};

pub const MAX_SCORE: u8 = 10;

/// Indicators listed in the guidance block
const MAX_LISTED_INDICATORS: usize = 4;

/// Discrete complexity level derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Simple,
    Medium,
    Complex,
}

impl Level {
    /// 0-3 Simple, 4-6 Medium, 7-10 Complex
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=3 => Level::Simple,
            4..=6 => Level::Medium,
            _ => Level::Complex,
        }
    }

    pub fn suggested_questions(&self) -> u8 {
        match self {
            Level::Simple => 2,
            Level::Medium => 4,
            Level::Complex => 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Simple => "Simple",
            Level::Medium => "Medium",
            Level::Complex => "Complex",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexityAnalysis {
    pub score: u8,
    pub level: Level,
    /// Detected signals, in detection order
    pub indicators: Vec<String>,
    pub suggested_questions: u8,
}

struct CompiledGroup {
    kind: SignalKind,
    weight: u8,
    signals: Vec<(Regex, &'static str)>,
}

impl CompiledGroup {
    fn new(group: &SignalGroup) -> Self {
        let signals = group
            .signals
            .iter()
            .map(|s| (Regex::new(s.pattern).unwrap(), s.label))
            .collect();
        Self {
            kind: group.kind,
            weight: group.weight,
            signals,
        }
    }

    /// Label of the first signal that fires
    fn first_label(&self, prompt: &str) -> Option<&'static str> {
        self.signals
            .iter()
            .find(|(re, _)| re.is_match(prompt))
            .map(|(_, label)| *label)
    }
}

fn compile_set(patterns: &[&str]) -> RegexSet {
    RegexSet::new(patterns).unwrap()
}

/// Signal tables compiled once for the life of the process
pub struct ScopeAnalyzer {
    multi_part: RegexSet,
    mentions_code: Regex,
    has_location: Regex,
    ambiguity: CompiledGroup,
    keywords: Vec<CompiledGroup>,
    continuation: RegexSet,
    informational: RegexSet,
    task_question: RegexSet,
}

impl ScopeAnalyzer {
    pub fn new() -> Self {
        Self {
            multi_part: compile_set(MULTI_PART_PATTERNS),
            mentions_code: Regex::new(MENTIONS_CODE_PATTERN).unwrap(),
            has_location: Regex::new(HAS_LOCATION_PATTERN).unwrap(),
            ambiguity: CompiledGroup::new(&AMBIGUITY_GROUP),
            keywords: KEYWORD_GROUPS.iter().map(CompiledGroup::new).collect(),
            continuation: compile_set(CONTINUATION_PATTERNS),
            informational: compile_set(INFORMATIONAL_PATTERNS),
            task_question: compile_set(TASK_QUESTION_PATTERNS),
        }
    }

    /// Score a prompt from its heuristic signals
    pub fn analyze(&self, prompt: &str) -> ComplexityAnalysis {
        let mut score: u8 = 0;
        let mut indicators = Vec::new();
        let words = word_count(prompt);

        if words > LENGTHY_WORDS {
            score += 2;
            indicators.push("lengthy request".to_string());
        }
        if words > VERY_DETAILED_WORDS {
            score += 1;
            indicators.push("very detailed".to_string());
        }

        if self.multi_part.is_match(prompt) {
            score += 2;
            indicators.push("multi-part request".to_string());
        }

        if let Some(label) = self.ambiguity.first_label(prompt) {
            score += self.ambiguity.weight;
            indicators.push(self.ambiguity.kind.indicator(label));
        }

        if self.is_missing_location(prompt) {
            score += 1;
            indicators.push("missing file/location".to_string());
        }

        for group in &self.keywords {
            if let Some(label) = group.first_label(prompt) {
                score += group.weight;
                indicators.push(group.kind.indicator(label));
            }
        }

        let score = score.min(MAX_SCORE);
        let level = Level::from_score(score);

        ComplexityAnalysis {
            score,
            level,
            indicators,
            suggested_questions: level.suggested_questions(),
        }
    }

    /// Mentions code in general terms but names no path or file extension
    fn is_missing_location(&self, prompt: &str) -> bool {
        let mentions_code = self.mentions_code.is_match(prompt);
        let has_location = self.has_location.is_match(prompt);
        mentions_code && !has_location
    }

    /// Whole prompt is a short acknowledgement ("ok", "sounds good", ...)
    pub fn is_continuation(&self, prompt: &str) -> bool {
        let trimmed = prompt.trim().to_lowercase();
        self.continuation.is_match(&trimmed)
    }

    /// Question about concepts, unless phrased as a request for work
    pub fn is_informational(&self, prompt: &str) -> bool {
        self.informational.is_match(prompt) && !self.task_question.is_match(prompt)
    }

    /// Render the scoping directive, or an empty string when none is warranted
    pub fn guidance(&self, analysis: &ComplexityAnalysis, prompt: &str) -> String {
        if analysis.level == Level::Simple
            || self.is_continuation(prompt)
            || self.is_informational(prompt)
        {
            return String::new();
        }
        render_guidance(analysis)
    }
}

impl Default for ScopeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_guidance(analysis: &ComplexityAnalysis) -> String {
    let indicator_list = if analysis.indicators.is_empty() {
        String::new()
    } else {
        let listed: Vec<&str> = analysis
            .indicators
            .iter()
            .take(MAX_LISTED_INDICATORS)
            .map(String::as_str)
            .collect();
        format!("\nDetected: {}", listed.join(", "))
    };

    let depth = match analysis.level {
        Level::Complex => "thorough (4-6 questions)",
        _ => "moderate (2-4 questions)",
    };

    let risk_warning = if analysis.level == Level::Complex {
        "
COMPLEX TASK DETECTED:
- Confirm understanding before implementation
- Consider breaking into phases
- Define rollback plan for risky operations
- Ensure completion criteria are measurable"
    } else {
        ""
    };

    format!(
        "<system-reminder>
TASK SCOPING (Auto-analyzed)

Complexity: {level} ({score}/{max}){indicator_list}

Before proceeding:
1. Use SCOPING section in response format
2. Ask {depth} clarifying questions
3. Define completion criteria:
   - Observable behaviors (manual verification)
   - Code tests (if implementation involved)
{risk_warning}
Reference TDD skill for test patterns when code changes are involved.
</system-reminder>",
        level = analysis.level,
        score = analysis.score,
        max = MAX_SCORE,
    )
}

static ANALYZER: Lazy<ScopeAnalyzer> = Lazy::new(ScopeAnalyzer::new);

/// Score a prompt using the process-wide signal tables
pub fn analyze_complexity(prompt: &str) -> ComplexityAnalysis {
    ANALYZER.analyze(prompt)
}

/// Scoping directive for an analyzed prompt; empty when suppressed or Simple
pub fn generate_scoping_guidance(analysis: &ComplexityAnalysis, prompt: &str) -> String {
    ANALYZER.guidance(analysis, prompt)
}

pub fn is_continuation(prompt: &str) -> bool {
    ANALYZER.is_continuation(prompt)
}

pub fn is_informational(prompt: &str) -> bool {
    ANALYZER.is_informational(prompt)
}
