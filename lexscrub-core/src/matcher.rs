// lexscrub-core/src/matcher.rs
//! Overlap-safe, case-insensitive, longest-match-first phrase removal.
//!
//! Terms are compiled once per matcher, sorted so that longer phrases are
//! removed before shorter ones: removing "car" before "carbon" would leave a
//! dangling "bon" whenever both are match targets. Because the matcher only
//! deletes and never inserts, a single descending pass is sufficient.
//!
//! Matching mode is an explicit parameter rather than a hard-coded choice:
//! `Substring` suits coarse category-wide scrubs of human-curated phrase
//! lists, `WordBoundary` is required for anything derived from fuzzy or
//! extractor output, where "apple" must not eat the inside of "pineapple".
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use regex::Regex;

use crate::lexicon::MatchTerm;
use crate::report::loggable;

/// Maximum allowed length for a matchable phrase, matching the lexicon
/// store's column width. Longer terms are skipped, never a hard failure.
pub const MAX_PHRASE_LENGTH: usize = 200;

/// How occurrences of a phrase are located in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Raw substring matching; may remove fragments of larger words.
    Substring,
    /// `\b`-anchored matching; only whole words are removed.
    WordBoundary,
}

/// One phrase that was found and removed, with the category that claimed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseHit {
    /// Lexicon display form of the term.
    pub phrase: String,
    /// Actual text of the first occurrence (original casing).
    pub matched: String,
    pub category: String,
    pub occurrences: usize,
}

#[derive(Debug)]
struct CompiledTerm {
    regex: Regex,
    term: MatchTerm,
}

/// A compiled, reusable phrase remover for one set of terms and one mode.
#[derive(Debug)]
pub struct PhraseMatcher {
    terms: Vec<CompiledTerm>,
    mode: MatchMode,
}

impl PhraseMatcher {
    /// Compiles the given terms, longest first. Blank, over-long, or
    /// uncompilable terms are skipped with a warning so that one bad lexicon
    /// row never takes down a scrub.
    pub fn new(mut terms: Vec<MatchTerm>, mode: MatchMode) -> Self {
        terms.sort_by(|a, b| {
            b.lower
                .chars()
                .count()
                .cmp(&a.lower.chars().count())
                .then_with(|| a.lower.cmp(&b.lower))
        });

        let mut compiled = Vec::with_capacity(terms.len());
        for term in terms {
            if term.lower.is_empty() {
                continue;
            }
            if term.lower.chars().count() > MAX_PHRASE_LENGTH {
                warn!(
                    "skipping over-long lexicon term in category '{}' ({} chars)",
                    term.category,
                    term.lower.chars().count()
                );
                continue;
            }
            match term_regex(&term.text, mode) {
                Ok(regex) => compiled.push(CompiledTerm { regex, term }),
                Err(e) => {
                    warn!("skipping uncompilable lexicon term '{}': {}", loggable(&term.text), e);
                }
            }
        }
        debug!("phrase matcher compiled: {} terms, mode {:?}", compiled.len(), mode);

        Self { terms: compiled, mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Removes every occurrence of every present term in one descending
    /// pass. Returns the cleaned text and one `PhraseHit` per matched term.
    ///
    /// Re-running on the returned text with the same matcher yields no
    /// further change.
    pub fn scrub(&self, text: &str) -> (String, Vec<PhraseHit>) {
        let mut current = text.to_string();
        let mut hits: Vec<PhraseHit> = Vec::new();

        for compiled in &self.terms {
            let Some(first) = compiled.regex.find(&current) else {
                continue;
            };
            let matched = first.as_str().to_string();
            let occurrences = compiled.regex.find_iter(&current).count();
            current = compiled.regex.replace_all(&current, "").into_owned();
            debug!(
                "removed {} occurrence(s) of '{}' (category '{}')",
                occurrences,
                loggable(&compiled.term.text),
                compiled.term.category
            );
            hits.push(PhraseHit {
                phrase: compiled.term.text.clone(),
                matched,
                category: compiled.term.category.clone(),
                occurrences,
            });
        }

        (current, hits)
    }
}

/// Compiles a case-insensitive regex for one literal term in the given mode.
pub(crate) fn term_regex(term: &str, mode: MatchMode) -> Result<Regex, regex::Error> {
    let escaped = regex::escape(term);
    let pattern = match mode {
        MatchMode::Substring => format!("(?i){escaped}"),
        MatchMode::WordBoundary => format!(r"(?i)\b{escaped}\b"),
    };
    Regex::new(&pattern)
}

/// Word-boundary presence check, used by the augmenter and budgeter.
pub(crate) fn contains_word(text: &str, word: &str) -> bool {
    term_regex(word, MatchMode::WordBoundary)
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

/// Removes a single word-boundary occurrence of `word`, or `None` when no
/// occurrence exists.
pub(crate) fn remove_first_word(text: &str, word: &str) -> Option<String> {
    let re = term_regex(word, MatchMode::WordBoundary).ok()?;
    re.find(text)?;
    Some(re.replace(text, "").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Severity;

    fn term(text: &str, category: &str) -> MatchTerm {
        MatchTerm {
            text: text.to_string(),
            lower: text.to_lowercase(),
            category: category.to_string(),
            severity: Severity::Low,
            canonical: None,
        }
    }

    #[test]
    fn test_longest_match_first_no_fragment() {
        // With "car" and "carbon" both active, "carbon" must go first or a
        // dangling "bon" is left behind.
        let matcher = PhraseMatcher::new(
            vec![term("car", "forbidden"), term("carbon", "forbidden")],
            MatchMode::Substring,
        );
        let (cleaned, hits) = matcher.scrub("pure carbon fiber");
        assert!(!cleaned.contains("bon"));
        assert_eq!(hits[0].phrase, "carbon");
    }

    #[test]
    fn test_substring_mode_removes_fragments() {
        let matcher = PhraseMatcher::new(vec![term("apple", "brand")], MatchMode::Substring);
        let (cleaned, _) = matcher.scrub("pineapple juice");
        assert_eq!(cleaned, "pine juice");
    }

    #[test]
    fn test_word_boundary_mode_spares_containing_words() {
        let matcher = PhraseMatcher::new(vec![term("apple", "brand")], MatchMode::WordBoundary);
        let (cleaned, hits) = matcher.scrub("pineapple juice");
        assert_eq!(cleaned, "pineapple juice");
        assert!(hits.is_empty());

        let (cleaned, hits) = matcher.scrub("fresh apple juice");
        assert_eq!(cleaned, "fresh  juice");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_case_insensitive_all_occurrences() {
        let matcher = PhraseMatcher::new(vec![term("nike", "brand")], MatchMode::Substring);
        let (cleaned, hits) = matcher.scrub("Nike shoes, NIKE caps, nike socks");
        assert!(!cleaned.to_lowercase().contains("nike"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].occurrences, 3);
        assert_eq!(hits[0].matched, "Nike");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let matcher = PhraseMatcher::new(
            vec![term("car", "forbidden"), term("carbon", "forbidden")],
            MatchMode::Substring,
        );
        let (once, _) = matcher.scrub("carbon car carbide");
        let (twice, hits) = matcher.scrub(&once);
        assert_eq!(once, twice);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_empty_term_set_is_noop() {
        let matcher = PhraseMatcher::new(Vec::new(), MatchMode::Substring);
        assert!(matcher.is_empty());
        let (cleaned, hits) = matcher.scrub("anything at all");
        assert_eq!(cleaned, "anything at all");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_over_long_term_skipped() {
        let long = "x".repeat(MAX_PHRASE_LENGTH + 1);
        let matcher = PhraseMatcher::new(vec![term(&long, "forbidden")], MatchMode::Substring);
        assert!(matcher.is_empty());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let matcher = PhraseMatcher::new(vec![term("no.1", "forbidden")], MatchMode::Substring);
        let (cleaned, _) = matcher.scrub("the no.1 seller, not nox1");
        assert_eq!(cleaned, "the  seller, not nox1");
    }

    #[test]
    fn test_contains_word_and_remove_first() {
        assert!(contains_word("buy VIP access", "vip"));
        assert!(!contains_word("vipers only", "vip"));
        let removed = remove_first_word("new shoes new deal", "new").unwrap();
        assert_eq!(removed, " shoes new deal");
        assert!(remove_first_word("nothing here", "absent").is_none());
    }
}
