// lexscrub-core/src/engine.rs
//! The scrub pipeline: tokenize, fuzzy-match, confirm, remove, extract
//! brands, augment, and trim, in that order, synchronously.
//!
//! Once input validation has passed, no stage is permitted to surface an
//! error: every external-dependency failure (lexicon store, synonym oracle,
//! brand extractor, audit sink) degrades to fewer redactions, because
//! availability of the rewritten text outranks completeness of redaction.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use log::{debug, warn};
use uuid::Uuid;

use crate::audit::{AuditEvent, NullAudit, UsageAudit};
use crate::brand::BrandExtractor;
use crate::budget::{collapse_whitespace, enforce_budget, truncate_to_limit, BudgetContext, MAX_OUTPUT_CHARS};
use crate::errors::ScrubError;
use crate::finder::{find_candidates, MatchCandidate};
use crate::lexicon::{LexiconSnapshot, LexiconStore, MatchTerm};
use crate::matcher::{MatchMode, PhraseMatcher};
use crate::oracle::{SynonymJudge, SynonymOracle};
use crate::report::{removal_order, ScrubRequest, ScrubResult};
use crate::tokenizer::tokenize;
use crate::augment::{augment_with_hotwords, augment_with_pool, KeywordTerm};

/// Tunables for a `ScrubEngine`, applied to every request it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Matching mode for the category-wide literal pass over curated
    /// phrases/aliases. Fuzzy and extractor removals always use
    /// `WordBoundary` regardless of this setting.
    pub literal_mode: MatchMode,
    /// Category that brand-extractor hits are recorded under; the extractor
    /// is only consulted when a request includes this category.
    pub brand_category: String,
    /// Lexicon category feeding the keyword-augmentation pool.
    pub keyword_category: String,
    /// Output ceiling in characters.
    pub max_output_chars: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            literal_mode: MatchMode::Substring,
            brand_category: "brand".to_string(),
            keyword_category: "keyword".to_string(),
            max_output_chars: MAX_OUTPUT_CHARS,
        }
    }
}

impl EngineOptions {
    pub fn with_literal_mode(mut self, mode: MatchMode) -> Self {
        self.literal_mode = mode;
        self
    }

    pub fn with_brand_category(mut self, category: impl Into<String>) -> Self {
        self.brand_category = category.into();
        self
    }

    pub fn with_keyword_category(mut self, category: impl Into<String>) -> Self {
        self.keyword_category = category.into();
        self
    }

    pub fn with_max_output_chars(mut self, limit: usize) -> Self {
        self.max_output_chars = limit;
        self
    }
}

/// The scrubbing engine. Holds its collaborator seams and no per-request
/// state: concurrent `scrub` calls share nothing mutable.
pub struct ScrubEngine {
    store: Arc<dyn LexiconStore>,
    oracle: Option<Arc<dyn SynonymOracle>>,
    extractor: Option<Arc<dyn BrandExtractor>>,
    audit: Arc<dyn UsageAudit>,
    options: EngineOptions,
}

impl ScrubEngine {
    pub fn new(store: Arc<dyn LexiconStore>) -> Self {
        Self::with_options(store, EngineOptions::default())
    }

    pub fn with_options(store: Arc<dyn LexiconStore>, options: EngineOptions) -> Self {
        Self {
            store,
            oracle: None,
            extractor: None,
            audit: Arc::new(NullAudit),
            options,
        }
    }

    pub fn with_oracle(mut self, oracle: Arc<dyn SynonymOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn BrandExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn with_audit(mut self, audit: Arc<dyn UsageAudit>) -> Self {
        self.audit = audit;
        self
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Runs one scrub request through the full pipeline.
    ///
    /// An empty category set short-circuits: the input text is echoed
    /// verbatim with all result lists empty. Blank text is the only input
    /// rejected with an error.
    pub fn scrub(&self, request: &ScrubRequest) -> Result<ScrubResult, ScrubError> {
        if request.text.trim().is_empty() {
            return Err(ScrubError::EmptyInput);
        }
        if request.categories.is_empty() {
            debug!("no categories requested; returning input unchanged");
            return Ok(ScrubResult {
                cleaned_text: request.text.clone(),
                ..Default::default()
            });
        }

        let run_id = Uuid::new_v4().to_string();
        let snapshot = match LexiconSnapshot::load(self.store.as_ref(), &request.categories) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("lexicon store unavailable, proceeding without lexicon terms: {e}");
                LexiconSnapshot::default()
            }
        };

        // Fuzzy candidates are gathered against the original text, before
        // any removal has shifted word boundaries.
        let tokens = tokenize(&request.text);
        let confirmed = self.confirm_fuzzy_matches(&tokens, &snapshot);

        // Category-wide literal pass over curated phrases and aliases.
        let literal_matcher = PhraseMatcher::new(snapshot.terms().to_vec(), self.options.literal_mode);
        let (mut current, literal_hits) = literal_matcher.scrub(&request.text);
        for hit in &literal_hits {
            self.audit.record(AuditEvent::new(
                &run_id,
                &hit.category,
                &hit.phrase,
                &request.text,
            ));
        }

        let mut removals: Vec<(String, String)> = literal_hits
            .iter()
            .map(|hit| (hit.category.clone(), hit.matched.clone()))
            .collect();

        // Confirmed fuzzy tokens are removed as whole words only.
        if !confirmed.is_empty() {
            let terms: Vec<MatchTerm> = confirmed
                .iter()
                .map(|candidate| MatchTerm {
                    text: candidate.token.clone(),
                    lower: candidate.token.clone(),
                    category: candidate.category.clone(),
                    severity: candidate.severity,
                    canonical: Some(candidate.phrase.clone()),
                })
                .collect();
            let fuzzy_matcher = PhraseMatcher::new(terms, MatchMode::WordBoundary);
            let (next, fuzzy_hits) = fuzzy_matcher.scrub(&current);
            current = next;
            removals.extend(
                fuzzy_hits
                    .into_iter()
                    .map(|hit| (hit.category, hit.matched)),
            );
        }

        // Whole-text brand pass, word-boundary only: extractor output is
        // too noisy to be trusted with substring deletion.
        if let Some(brands) = self.extract_brands(&request.categories, &current) {
            let terms: Vec<MatchTerm> = brands
                .into_iter()
                .map(|brand| MatchTerm {
                    lower: brand.to_lowercase(),
                    text: brand,
                    category: self.options.brand_category.clone(),
                    severity: Default::default(),
                    canonical: None,
                })
                .collect();
            let brand_matcher = PhraseMatcher::new(terms, MatchMode::WordBoundary);
            let (next, brand_hits) = brand_matcher.scrub(&current);
            current = next;
            removals.extend(
                brand_hits
                    .into_iter()
                    .map(|hit| (hit.category, hit.matched)),
            );
        }

        current = collapse_whitespace(&current);

        // Augmentation: hotwords and the keyword pool are mutually
        // exclusive per request.
        let hotwords = request
            .hotwords
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty());
        let (augmented, appended) = match hotwords {
            Some(hot) => augment_with_hotwords(&current, hot),
            None => {
                let surviving = tokenize(&current);
                let pool = self.keyword_pool(&request.keywords);
                augment_with_pool(&current, &surviving, &pool)
            }
        };
        current = augmented;

        // Length budget. Protected tokens come from what we just appended
        // plus the hotwords contract; flagged tokens are removals that
        // somehow survived, weighted up defensively.
        let mut protected: HashSet<String> = HashSet::new();
        for keyword in &appended {
            protected.extend(tokenize(keyword).into_iter().map(|t| t.text));
        }
        if let Some(hot) = hotwords {
            protected.extend(tokenize(hot).into_iter().map(|t| t.text));
        }
        let mut flagged: HashSet<String> = HashSet::new();
        for (_, removed) in &removals {
            flagged.extend(tokenize(removed).into_iter().map(|t| t.text));
        }
        let ctx = BudgetContext { protected, flagged };
        current = if request.trim {
            enforce_budget(&current, &ctx, self.options.max_output_chars)
        } else {
            truncate_to_limit(&collapse_whitespace(&current), self.options.max_output_chars)
        };

        Ok(assemble_result(current, removals, appended))
    }

    /// Confirms at most one lexicon candidate per input token, consulting
    /// the oracle only for candidates the similarity floor lets through.
    fn confirm_fuzzy_matches(
        &self,
        tokens: &[crate::tokenizer::Token],
        snapshot: &LexiconSnapshot,
    ) -> Vec<MatchCandidate> {
        let mut judge = SynonymJudge::new(self.oracle.as_deref());
        let mut confirmed: Vec<MatchCandidate> = Vec::new();
        for token in tokens {
            for candidate in find_candidates(&token.text, snapshot) {
                if judge.is_equivalent(&candidate.token, &candidate.lower, candidate.similarity) {
                    debug!(
                        "token confirmed against '{}' in category '{}' (similarity {:.2})",
                        crate::report::loggable(&candidate.phrase),
                        candidate.category,
                        candidate.similarity
                    );
                    confirmed.push(candidate);
                    break;
                }
            }
        }
        confirmed
    }

    /// Runs the brand extractor when the request asks for the brand
    /// category. `None` means "nothing to remove", whatever the cause.
    fn extract_brands(&self, categories: &[String], text: &str) -> Option<Vec<String>> {
        if !categories.iter().any(|c| *c == self.options.brand_category) {
            return None;
        }
        let extractor = self.extractor.as_ref()?;
        match extractor.extract(text) {
            Ok(brands) if brands.is_empty() => None,
            Ok(brands) => Some(brands),
            Err(e) => {
                warn!("brand extractor '{}' degraded to no-op: {e}", extractor.name());
                None
            }
        }
    }

    /// Builds the augmentation pool: caller keywords first, then the
    /// designated keyword category, deduplicated case-insensitively.
    fn keyword_pool(&self, keywords: &[String]) -> Vec<KeywordTerm> {
        let mut pool: Vec<KeywordTerm> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for keyword in keywords {
            let term = KeywordTerm::new(keyword.clone());
            if seen.insert(term.lower.clone()) {
                pool.push(term);
            }
        }
        if !self.options.keyword_category.is_empty() {
            let categories = std::slice::from_ref(&self.options.keyword_category);
            match LexiconSnapshot::load(self.store.as_ref(), categories) {
                Ok(snapshot) => {
                    for term in snapshot.terms() {
                        if seen.insert(term.lower.clone()) {
                            pool.push(KeywordTerm::new(term.text.clone()));
                        }
                    }
                }
                Err(e) => {
                    warn!("keyword category unavailable, augmenting from caller keywords only: {e}");
                }
            }
        }
        pool
    }
}

fn assemble_result(
    cleaned_text: String,
    removals: Vec<(String, String)>,
    appended: Vec<String>,
) -> ScrubResult {
    let mut removed_by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut removed_tokens: Vec<String> = Vec::new();

    for (category, text) in removals {
        let list = removed_by_category.entry(category).or_default();
        if !list.iter().any(|t| t.eq_ignore_ascii_case(&text)) {
            list.push(text.clone());
        }
        if !removed_tokens.iter().any(|t| t.eq_ignore_ascii_case(&text)) {
            removed_tokens.push(text);
        }
    }
    for list in removed_by_category.values_mut() {
        list.sort_by(|a, b| removal_order(a, b));
    }
    removed_tokens.sort_by(|a, b| removal_order(a, b));

    ScrubResult {
        cleaned_text,
        removed_tokens,
        removed_by_category,
        appended_keywords: appended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{LexiconEntry, MemoryLexiconStore};

    fn store_with(words: &[(&str, &str)]) -> Arc<MemoryLexiconStore> {
        let mut store = MemoryLexiconStore::new();
        for (phrase, category) in words {
            store.insert(LexiconEntry {
                phrase: phrase.to_string(),
                category: category.to_string(),
                ..Default::default()
            });
        }
        Arc::new(store)
    }

    #[test]
    fn test_blank_text_rejected() {
        let engine = ScrubEngine::new(store_with(&[]));
        let request = ScrubRequest {
            text: "   \n".to_string(),
            categories: vec!["forbidden".to_string()],
            ..Default::default()
        };
        assert!(matches!(engine.scrub(&request), Err(ScrubError::EmptyInput)));
    }

    #[test]
    fn test_empty_categories_echo_input() {
        let engine = ScrubEngine::new(store_with(&[("best", "forbidden")]));
        let request = ScrubRequest {
            text: "the best offer".to_string(),
            ..Default::default()
        };
        let result = engine.scrub(&request).unwrap();
        assert_eq!(result.cleaned_text, "the best offer");
        assert!(result.removed_tokens.is_empty());
        assert!(result.removed_by_category.is_empty());
        assert!(result.appended_keywords.is_empty());
    }

    #[test]
    fn test_options_builders() {
        let options = EngineOptions::default()
            .with_literal_mode(MatchMode::WordBoundary)
            .with_brand_category("brands")
            .with_keyword_category("kw")
            .with_max_output_chars(100);
        assert_eq!(options.literal_mode, MatchMode::WordBoundary);
        assert_eq!(options.brand_category, "brands");
        assert_eq!(options.keyword_category, "kw");
        assert_eq!(options.max_output_chars, 100);
    }

    #[test]
    fn test_assemble_result_dedup_and_order() {
        let removals = vec![
            ("brand".to_string(), "Nike".to_string()),
            ("brand".to_string(), "nike".to_string()),
            ("forbidden".to_string(), "ever".to_string()),
            ("forbidden".to_string(), "money laundering".to_string()),
        ];
        let result = assemble_result(String::new(), removals, Vec::new());
        assert_eq!(result.removed_by_category["brand"], vec!["Nike".to_string()]);
        assert_eq!(
            result.removed_by_category["forbidden"],
            vec!["money laundering".to_string(), "ever".to_string()]
        );
        assert_eq!(
            result.removed_tokens,
            vec![
                "money laundering".to_string(),
                "ever".to_string(),
                "Nike".to_string()
            ]
        );
    }
}
