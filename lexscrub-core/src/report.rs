// lexscrub-core/src/report.rs
//! Provides the request/response data structures for a scrub operation and
//! utility functions for logging matched content without leaking it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use lazy_static::lazy_static;

lazy_static! {
    /// A static boolean that is initialized once to determine if matched
    /// listing text is allowed to appear verbatim in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("LEXSCRUB_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A single scrub request, transport-agnostic.
///
/// `categories` selects which lexicon categories participate in matching; an
/// empty set is valid and means "no redaction" (the engine echoes the input).
/// `keywords` is a caller-supplied pool of desired keywords for the
/// augmentation stage. `hotwords`, when non-empty, overrides keyword
/// augmentation entirely: every whitespace-separated word in it must be
/// present in the final text. `trim` enables importance-scored eviction down
/// to the output ceiling; without it only a plain truncate applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScrubRequest {
    pub text: String,
    pub categories: Vec<String>,
    pub keywords: Vec<String>,
    pub hotwords: Option<String>,
    pub trim: bool,
}

/// The outcome of one scrub call. Constructed once per request, immutable
/// thereafter, never stored by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScrubResult {
    pub cleaned_text: String,
    /// Every removed piece of text, deduplicated case-insensitively and
    /// sorted longest-first, then lexicographically.
    pub removed_tokens: Vec<String>,
    /// Removed text grouped by the lexicon category that claimed it.
    pub removed_by_category: BTreeMap<String, Vec<String>>,
    /// Keywords or hotwords appended by the augmentation stage, in append
    /// order.
    pub appended_keywords: Vec<String>,
}

/// Ordering used for `removed_tokens` and per-category lists: longest first,
/// ties broken lexicographically (case-insensitive, then exact).
pub fn removal_order(a: &str, b: &str) -> Ordering {
    b.chars()
        .count()
        .cmp(&a.chars().count())
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.chars().count() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.chars().count())
    }
}

/// Content guard for debug logging: listing text only appears verbatim when
/// `LEXSCRUB_ALLOW_DEBUG_PII=true` is set in the environment.
pub(crate) fn loggable(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn test_removal_order_longest_first() {
        let mut items = vec!["ever", "money laundering", "best", "Nike"];
        items.sort_by(|a, b| removal_order(a, b));
        assert_eq!(items, vec!["money laundering", "best", "ever", "Nike"]);
    }

    #[test]
    fn test_removal_order_case_insensitive_ties() {
        let mut items = vec!["beta", "Alfa", "alfa"];
        items.sort_by(|a, b| removal_order(a, b));
        assert_eq!(items, vec!["Alfa", "alfa", "beta"]);
    }
}
