//! Common utilities for the hook engines
//!
//! Text helpers shared by the validator, the security event log and the
//! agent spawner.

use once_cell::sync::Lazy;
use regex::Regex;

/// Secret shapes scrubbed from commands before they reach the event log
pub static SECRET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // API keys and tokens (flexible matching for various formats)
        r"(?i)api[_-]?key\s*[=:]\s*['\x22]?[a-zA-Z0-9_]{16,}",
        r"(?i)secret[_-]?key\s*[=:]\s*['\x22]?[a-zA-Z0-9_]{16,}",
        r"(?i)access[_-]?token\s*[=:]\s*['\x22]?[a-zA-Z0-9_]{16,}",
        // AWS access key id
        r"AKIA[0-9A-Z]{16}",
        // GitHub tokens
        r"gh[pousr]_[A-Za-z0-9_]{36,}",
        r"github_pat_[A-Za-z0-9_]{22,}",
        // Generic passwords in commands
        r"(?i)(password|passwd|pwd)\s*[=:]\s*['\x22][^'\x22]+['\x22]",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Redact secrets in text for logging
pub fn redact_secrets(text: &str) -> String {
    let mut redacted = text.to_string();

    for pattern in SECRET_PATTERNS.iter() {
        redacted = pattern.replace_all(&redacted, "[REDACTED]").to_string();
    }

    redacted
}

/// First `max` characters of `text`, never splitting a UTF-8 sequence
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Whitespace-separated word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
