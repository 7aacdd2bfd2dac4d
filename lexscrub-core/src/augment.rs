// lexscrub-core/src/augment.rs
//! Keyword augmentation: additive-only rewriting of the cleaned text.
//!
//! Two mutually exclusive sources per request: a fuzzy-matched keyword pool
//! (caller keywords plus the designated keyword category) applied per
//! surviving token, or an explicit hotwords string whose every word must be
//! present in the final text. Neither path ever removes content.

use std::cmp::Ordering;

use log::debug;

use crate::finder::{similarity, SIMILARITY_FLOOR};
use crate::matcher::contains_word;
use crate::report::loggable;
use crate::tokenizer::Token;

/// One keyword available for augmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTerm {
    pub text: String,
    pub lower: String,
}

impl KeywordTerm {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lower = text.to_lowercase();
        Self { text, lower }
    }
}

/// For each surviving token, appends the single best pool keyword with
/// similarity at or above the floor, once, space-separated. Keywords already
/// appended or already present in the text (word boundary) are skipped.
pub fn augment_with_pool(
    text: &str,
    surviving: &[Token],
    pool: &[KeywordTerm],
) -> (String, Vec<String>) {
    let mut out = text.to_string();
    let mut appended: Vec<String> = Vec::new();

    for token in surviving {
        let mut best: Option<(&KeywordTerm, f64)> = None;
        for term in pool {
            let score = similarity(&token.text, &term.lower);
            if score < SIMILARITY_FLOOR {
                continue;
            }
            let better = match best {
                None => true,
                Some((current, current_score)) => {
                    keyword_order(score, term, current_score, current) == Ordering::Less
                }
            };
            if better {
                best = Some((term, score));
            }
        }

        let Some((term, score)) = best else {
            continue;
        };
        if appended.iter().any(|a| a.eq_ignore_ascii_case(&term.text)) {
            continue;
        }
        if contains_word(&out, &term.text) {
            continue;
        }
        debug!(
            "appending keyword '{}' for token '{}' (similarity {:.2})",
            loggable(&term.text),
            loggable(&token.text),
            score
        );
        out.push(' ');
        out.push_str(&term.text);
        appended.push(term.text.clone());
    }

    (out, appended)
}

/// Ranking between two scored keywords: similarity descending, keyword
/// length descending, keyword ascending. `Less` means "ranks ahead".
fn keyword_order(a_score: f64, a: &KeywordTerm, b_score: f64, b: &KeywordTerm) -> Ordering {
    b_score
        .partial_cmp(&a_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.lower.chars().count().cmp(&a.lower.chars().count()))
        .then_with(|| a.lower.cmp(&b.lower))
}

/// Ensures every whitespace-separated word of `hotwords` is present in the
/// text (word-boundary check); missing words are appended verbatim, each
/// exactly once.
pub fn augment_with_hotwords(text: &str, hotwords: &str) -> (String, Vec<String>) {
    let mut out = text.to_string();
    let mut appended: Vec<String> = Vec::new();

    for word in hotwords.split_whitespace() {
        if appended.iter().any(|a| a.eq_ignore_ascii_case(word)) {
            continue;
        }
        if contains_word(&out, word) {
            continue;
        }
        out.push(' ');
        out.push_str(word);
        appended.push(word.to_string());
    }

    (out, appended)
}
