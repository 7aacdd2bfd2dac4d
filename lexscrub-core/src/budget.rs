// lexscrub-core/src/budget.rs
//! Importance-scored token eviction that forces text under a fixed length
//! ceiling without ever splitting a token in half.
//!
//! Tokens are scored (protected and flagged tokens up, long and repeated
//! tokens up, stopwords down) and evicted one occurrence at a time in
//! ascending importance order until the text fits. Protected tokens are
//! never touched by the scored pass; the character-level hard truncate is
//! the last resort when eviction alone cannot reach the ceiling.

use std::cmp::Ordering;
use std::collections::HashSet;

use lazy_static::lazy_static;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::matcher::remove_first_word;
use crate::tokenizer::{tokenize, Token};

/// Default output ceiling, in characters.
pub const MAX_OUTPUT_CHARS: usize = 255;

/// Closed set of low-value words evicted before anything else.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "of", "to", "in", "on", "at", "by", "for",
    "with", "from", "as", "is", "are", "was", "be", "been", "it", "its", "this", "that",
    "these", "those", "i", "you", "he", "she", "we", "they", "them", "his", "her", "my",
    "your", "our", "their", "me", "us", "so", "than", "then", "too", "very", "can", "will",
    "just", "not", "no", "do", "does",
];

lazy_static! {
    static ref STOPWORD_SET: HashSet<&'static str> = STOPWORDS.iter().copied().collect();
}

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Token sets that modulate importance. Both sets hold lowercase tokens.
#[derive(Debug, Clone, Default)]
pub struct BudgetContext {
    /// Appended keywords and hotwords; never evicted by the scored pass.
    pub protected: HashSet<String>,
    /// Tokens that were removed as matches yet still appear in the text.
    /// Should not normally occur; weighted up defensively.
    pub flagged: HashSet<String>,
}

/// Importance score of one token under the given context.
pub fn token_importance(token: &Token, ctx: &BudgetContext) -> f64 {
    let mut score = 0.0;
    if ctx.protected.contains(&token.text) {
        score += 3.0;
    }
    if ctx.flagged.contains(&token.text) {
        score += 2.0;
    }
    score += 0.3 * token.text.chars().count().min(10) as f64;
    score += 0.5 * token.freq.min(5) as f64;
    if STOPWORD_SET.contains(token.text.as_str()) {
        score -= 3.0;
    }
    score
}

/// Evicts tokens in ascending importance order (ties: shorter length, then
/// lower frequency), one word-boundary occurrence at a time, until the text
/// fits within `limit` characters. Hard-truncates as a last resort.
pub fn enforce_budget(text: &str, ctx: &BudgetContext, limit: usize) -> String {
    let mut current = collapse_whitespace(text);

    loop {
        if current.chars().count() <= limit {
            return current;
        }

        let tokens = tokenize(&current);
        let mut evictable: Vec<&Token> = tokens
            .iter()
            .filter(|t| !ctx.protected.contains(&t.text))
            .collect();
        if evictable.is_empty() {
            break;
        }
        evictable.sort_by(|a, b| {
            token_importance(a, ctx)
                .partial_cmp(&token_importance(b, ctx))
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.text.chars().count().cmp(&b.text.chars().count()))
                .then_with(|| a.freq.cmp(&b.freq))
        });

        let mut evicted = false;
        for victim in evictable {
            if let Some(next) = remove_first_word(&current, &victim.text) {
                debug!("evicted one occurrence of '{}' for length budget", victim.text);
                current = collapse_whitespace(&next);
                evicted = true;
                break;
            }
        }
        if !evicted {
            break;
        }
    }

    truncate_to_limit(&current, limit)
}

/// Character-level truncation to `limit`, with no word-boundary guarantee.
/// Operating on `char` boundaries keeps multi-byte sequences intact.
pub fn truncate_to_limit(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    text.chars().take(limit).collect::<String>().trim_end().to_string()
}

/// Collapses runs of whitespace left behind by removals and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    MULTI_SPACE.replace_all(text, " ").trim().to_string()
}
