// lexscrub-core/src/lib.rs
//! # LexScrub Core Library
//!
//! `lexscrub-core` provides the fundamental, platform-independent logic for
//! lexicon-driven text scrubbing: identifying occurrences of curated phrases
//! and their aliases (including fuzzy and leet-speak variants), redacting
//! them without double-deletion or partial-word corruption, augmenting the
//! text with desired keywords, and forcing the result under a hard length
//! budget.
//!
//! The library is designed to be pure and stateless per request: a scrub
//! call reads an immutable lexicon snapshot, consults its collaborator seams
//! (synonym oracle, brand extractor, usage audit), and returns a result
//! without retaining any state. External dependencies degrade rather than
//! fail: availability of the rewritten text outranks completeness of
//! redaction.
//!
//! ## Modules
//!
//! * `lexicon`: Lexicon entries, aliases, the `LexiconStore` seam, and the
//!   per-call `LexiconSnapshot`.
//! * `matcher`: Overlap-safe, longest-match-first phrase removal with
//!   explicit `Substring`/`WordBoundary` modes.
//! * `tokenizer`: ASCII alphanumeric/apostrophe token splitting.
//! * `finder`: Token-level fuzzy candidate search with similarity ranking.
//! * `oracle`: The synonym-oracle seam, remote adapter, and per-call judge.
//! * `brand`: The brand-extractor seam and defensive output parsing.
//! * `augment`: Keyword-pool and hotword augmentation.
//! * `budget`: Importance-scored token eviction under a length ceiling.
//! * `engine`: The `ScrubEngine` pipeline tying the stages together.
//! * `report`: Request/result types and PII-safe logging helpers.
//! * `audit`: Fire-and-forget usage-audit sinks.
//! * `errors`: The `ScrubError` taxonomy.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use lexscrub_core::{LexiconEntry, MemoryLexiconStore, ScrubEngine, ScrubRequest};
//!
//! fn main() -> Result<(), lexscrub_core::ScrubError> {
//!     let mut store = MemoryLexiconStore::new();
//!     store.insert(LexiconEntry {
//!         phrase: "best".to_string(),
//!         category: "forbidden".to_string(),
//!         ..Default::default()
//!     });
//!
//!     let engine = ScrubEngine::new(Arc::new(store));
//!     let result = engine.scrub(&ScrubRequest {
//!         text: "the best price in town".to_string(),
//!         categories: vec!["forbidden".to_string()],
//!         ..Default::default()
//!     })?;
//!
//!     assert!(!result.cleaned_text.contains("best"));
//!     assert_eq!(result.removed_tokens, vec!["best".to_string()]);
//!     Ok(())
//! }
//! ```
//!
//! ## Design Principles
//!
//! * **Pluggable collaborators:** the lexicon store, synonym oracle, brand
//!   extractor, and audit sink are trait seams injected at construction
//!   time, so the algorithmic core is unit-testable with deterministic
//!   stubs.
//! * **Fail open, degrade silently:** once input validation passes, no
//!   external failure aborts a scrub.
//! * **Deterministic output:** every emitted list is sorted and
//!   deduplicated, independent of collaborator timing.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod audit;
pub mod augment;
pub mod brand;
pub mod budget;
pub mod engine;
pub mod errors;
pub mod finder;
pub mod lexicon;
pub mod matcher;
pub mod oracle;
pub mod report;
pub mod tokenizer;

/// Re-exports the public lexicon types and the store seam.
pub use lexicon::{
    CategorySection,
    LexiconEntry,
    LexiconFile,
    LexiconSnapshot,
    LexiconStore,
    MatchTerm,
    MemoryLexiconStore,
    Severity,
    WordAlias,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ScrubError;

/// Re-exports the engine and its options.
pub use engine::{EngineOptions, ScrubEngine};

/// Re-exports the phrase matcher and its explicit matching modes.
pub use matcher::{MatchMode, PhraseHit, PhraseMatcher, MAX_PHRASE_LENGTH};

/// Re-exports request/result types.
pub use report::{redact_sensitive, ScrubRequest, ScrubResult};

/// Re-exports fuzzy-search types and thresholds.
pub use finder::{find_candidates, similarity, MatchCandidate, MAX_CANDIDATES, SIMILARITY_FLOOR};

/// Re-exports the synonym-oracle seam and adapters.
pub use oracle::{RemoteSynonymOracle, SynonymJudge, SynonymOracle, FAST_PATH_SIMILARITY, ORACLE_TIMEOUT_SECS};

/// Re-exports the brand-extractor seam and adapters.
pub use brand::{BrandExtractor, NullBrandExtractor, RemoteBrandExtractor, EXTRACTOR_TIMEOUT_SECS};

/// Re-exports the augmentation helpers.
pub use augment::{augment_with_hotwords, augment_with_pool, KeywordTerm};

/// Re-exports the budgeter.
pub use budget::{enforce_budget, token_importance, truncate_to_limit, BudgetContext, MAX_OUTPUT_CHARS};

/// Re-exports the usage-audit seam and sinks.
pub use audit::{AuditEvent, ChannelAudit, FileAudit, NullAudit, UsageAudit};

/// Re-exports the tokenizer.
pub use tokenizer::{tokenize, Token, MIN_TOKEN_LEN};
