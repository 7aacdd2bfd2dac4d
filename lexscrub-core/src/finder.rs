// lexscrub-core/src/finder.rs
//! Token-level fuzzy candidate search over a lexicon snapshot.
//!
//! For a token, retrieves every snapshot term containing the token as a
//! substring and scores it with a normalized edit-similarity ratio. The
//! similarity floor and top-N cutoff are a precision/cost tradeoff gating
//! what is offered to the synonym oracle, not an accuracy guarantee.

use std::cmp::Ordering;

use strsim::normalized_levenshtein;

use crate::lexicon::{LexiconSnapshot, Severity};

/// Candidates below this similarity are treated as unrelated and never
/// offered to the synonym oracle.
pub const SIMILARITY_FLOOR: f64 = 0.6;

/// At most this many candidates are kept per token.
pub const MAX_CANDIDATES: usize = 5;

/// An ephemeral candidate pairing one input token with one lexicon term.
/// Produced per token, ranked, and discarded within one scrub call.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub token: String,
    /// Display form of the matched lexicon term.
    pub phrase: String,
    /// Lowercased form of the term.
    pub lower: String,
    pub category: String,
    pub severity: Severity,
    /// `Some(entry phrase)` when the matched term is an alias.
    pub canonical: Option<String>,
    /// Normalized edit similarity in `[0, 1]`.
    pub similarity: f64,
}

/// Normalized edit-similarity ratio between two strings, case-insensitive.
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// Ranking for candidates: similarity descending, then phrase length
/// descending, then phrase ascending.
pub(crate) fn candidate_order(a: &MatchCandidate, b: &MatchCandidate) -> Ordering {
    b.similarity
        .partial_cmp(&a.similarity)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.lower.chars().count().cmp(&a.lower.chars().count()))
        .then_with(|| a.lower.cmp(&b.lower))
}

/// Finds the top candidates for one token within the snapshot.
pub fn find_candidates(token: &str, snapshot: &LexiconSnapshot) -> Vec<MatchCandidate> {
    let mut candidates: Vec<MatchCandidate> = snapshot
        .containing(token)
        .into_iter()
        .filter_map(|term| {
            let score = similarity(token, &term.lower);
            if score < SIMILARITY_FLOOR {
                return None;
            }
            Some(MatchCandidate {
                token: token.to_string(),
                phrase: term.text.clone(),
                lower: term.lower.clone(),
                category: term.category.clone(),
                severity: term.severity,
                canonical: term.canonical.clone(),
                similarity: score,
            })
        })
        .collect();

    candidates.sort_by(candidate_order);
    candidates.truncate(MAX_CANDIDATES);
    candidates
}
