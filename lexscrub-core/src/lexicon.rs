//! Lexicon management for `lexscrub-core`.
//!
//! This module defines the core data structures for lexicon entries and
//! aliases, the `LexiconStore` collaborator seam, an in-memory store used by
//! the CLI and tests, and the immutable per-call `LexiconSnapshot` the
//! matching stages read from. It also handles deserialization of the YAML
//! lexicon file format.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::errors::ScrubError;

/// Enforcement strictness of a lexicon entry, 1 (low) to 3 (high).
///
/// Severity drives seeding precedence when duplicate phrases arrive from
/// several categories; the matching algorithm itself ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Low
    }
}

impl From<Severity> for u8 {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Severity::Low),
            2 => Ok(Severity::Medium),
            3 => Ok(Severity::High),
            other => Err(format!("severity must be 1, 2 or 3, got {other}")),
        }
    }
}

/// A single lexicon entry. `phrase` is unique within a lexicon; only
/// `active` entries participate in matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconEntry {
    pub phrase: String,
    pub category: String,
    pub severity: Severity,
    pub active: bool,
}

impl Default for LexiconEntry {
    fn default() -> Self {
        Self {
            phrase: String::new(),
            category: String::new(),
            severity: Severity::Low,
            active: true,
        }
    }
}

/// An alias for a lexicon entry. `(phrase, alias)` is unique; an alias
/// inherits its entry's category and severity for matching purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WordAlias {
    /// Canonical phrase of the entry this alias belongs to.
    pub phrase: String,
    pub alias: String,
}

/// The external lexicon store seam. Implementations own persistence and
/// consistency; the engine only ever reads through this trait, once per
/// scrub call.
pub trait LexiconStore: Send + Sync {
    /// Active entries, optionally restricted to the given categories.
    fn active_entries(&self, categories: Option<&[String]>) -> Result<Vec<LexiconEntry>, ScrubError>;

    /// Aliases of active entries, optionally restricted to the categories of
    /// the entries they belong to.
    fn aliases(&self, categories: Option<&[String]>) -> Result<Vec<WordAlias>, ScrubError>;
}

/// In-memory `LexiconStore` used by the CLI and tests.
///
/// Upserts are first-write-wins per unique phrase (case-insensitive): the
/// caller seeds the most severe categories first and later duplicates are
/// rejected unless `force` is passed.
#[derive(Debug, Clone, Default)]
pub struct MemoryLexiconStore {
    entries: Vec<LexiconEntry>,
    aliases: Vec<WordAlias>,
}

impl MemoryLexiconStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry unless its phrase is already present. Returns whether
    /// the entry was stored.
    pub fn insert(&mut self, entry: LexiconEntry) -> bool {
        self.upsert(entry, false)
    }

    /// Inserts an entry; with `force`, an existing entry with the same phrase
    /// is replaced in place (category, severity and active flag updated).
    pub fn upsert(&mut self, entry: LexiconEntry, force: bool) -> bool {
        if entry.phrase.trim().is_empty() {
            warn!("skipping lexicon entry with blank phrase");
            return false;
        }
        let lower = entry.phrase.to_lowercase();
        match self.entries.iter_mut().find(|e| e.phrase.to_lowercase() == lower) {
            Some(existing) => {
                if force {
                    *existing = entry;
                    true
                } else {
                    debug!("phrase already present, first write wins: '{}'", existing.phrase);
                    false
                }
            }
            None => {
                self.entries.push(entry);
                true
            }
        }
    }

    /// Registers an alias for an existing entry. Duplicate `(phrase, alias)`
    /// pairs and aliases of unknown phrases are rejected.
    pub fn insert_alias(&mut self, alias: WordAlias) -> bool {
        if alias.alias.trim().is_empty() {
            return false;
        }
        let phrase_lower = alias.phrase.to_lowercase();
        if !self.entries.iter().any(|e| e.phrase.to_lowercase() == phrase_lower) {
            warn!("alias '{}' refers to unknown phrase '{}'", alias.alias, alias.phrase);
            return false;
        }
        let alias_lower = alias.alias.to_lowercase();
        let duplicate = self.aliases.iter().any(|a| {
            a.phrase.to_lowercase() == phrase_lower && a.alias.to_lowercase() == alias_lower
        });
        if duplicate {
            return false;
        }
        self.aliases.push(alias);
        true
    }

    pub fn all_entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn all_aliases(&self) -> &[WordAlias] {
        &self.aliases
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_for(&self, phrase: &str) -> Option<&LexiconEntry> {
        let lower = phrase.to_lowercase();
        self.entries.iter().find(|e| e.phrase.to_lowercase() == lower)
    }
}

fn category_selected(categories: Option<&[String]>, category: &str) -> bool {
    match categories {
        None => true,
        Some(wanted) => wanted.iter().any(|c| c == category),
    }
}

impl LexiconStore for MemoryLexiconStore {
    fn active_entries(&self, categories: Option<&[String]>) -> Result<Vec<LexiconEntry>, ScrubError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.active && category_selected(categories, &e.category))
            .cloned()
            .collect())
    }

    fn aliases(&self, categories: Option<&[String]>) -> Result<Vec<WordAlias>, ScrubError> {
        Ok(self
            .aliases
            .iter()
            .filter(|a| {
                self.entry_for(&a.phrase)
                    .map(|e| e.active && category_selected(categories, &e.category))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }
}

/// One category section of a lexicon YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySection {
    pub name: String,
    pub severity: Severity,
    pub words: Vec<String>,
    /// Canonical word -> alias spellings.
    pub aliases: BTreeMap<String, Vec<String>>,
    /// Words kept in the file but excluded from matching.
    pub disabled: Vec<String>,
}

impl Default for CategorySection {
    fn default() -> Self {
        Self {
            name: String::new(),
            severity: Severity::Low,
            words: Vec::new(),
            aliases: BTreeMap::new(),
            disabled: Vec::new(),
        }
    }
}

/// Top-level structure of a lexicon YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LexiconFile {
    pub categories: Vec<CategorySection>,
}

impl LexiconFile {
    /// Loads a lexicon from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file: {}", path.display()))?;
        Self::load_from_str(&contents)
            .with_context(|| format!("Failed to parse lexicon file: {}", path.display()))
    }

    pub fn load_from_str(contents: &str) -> Result<Self> {
        let file: LexiconFile =
            serde_yml::from_str(contents).context("Invalid lexicon YAML structure")?;
        Ok(file)
    }

    /// Seeds an in-memory store from this file, in file order, so that the
    /// first category listing a phrase claims it (first-write-wins).
    pub fn into_store(self) -> MemoryLexiconStore {
        let mut store = MemoryLexiconStore::new();
        for section in self.categories {
            for word in &section.words {
                store.insert(LexiconEntry {
                    phrase: word.clone(),
                    category: section.name.clone(),
                    severity: section.severity,
                    active: true,
                });
            }
            for word in &section.disabled {
                store.insert(LexiconEntry {
                    phrase: word.clone(),
                    category: section.name.clone(),
                    severity: section.severity,
                    active: false,
                });
            }
            for (phrase, aliases) in &section.aliases {
                for alias in aliases {
                    store.insert_alias(WordAlias {
                        phrase: phrase.clone(),
                        alias: alias.clone(),
                    });
                }
            }
        }
        debug!(
            "seeded lexicon store with {} entries and {} aliases",
            store.all_entries().len(),
            store.all_aliases().len()
        );
        store
    }
}

/// One matchable term of a snapshot: either an entry phrase or an alias
/// resolved to its entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTerm {
    /// Display form, as stored in the lexicon.
    pub text: String,
    /// Lowercased form used for matching and deduplication.
    pub lower: String,
    pub category: String,
    pub severity: Severity,
    /// `Some(entry phrase)` when this term is an alias.
    pub canonical: Option<String>,
}

impl MatchTerm {
    fn from_entry(entry: &LexiconEntry) -> Self {
        Self {
            text: entry.phrase.clone(),
            lower: entry.phrase.to_lowercase(),
            category: entry.category.clone(),
            severity: entry.severity,
            canonical: None,
        }
    }
}

/// An immutable, queryable view of the active lexicon for one scrub call.
///
/// Built once per operation from a `LexiconStore`; terms are deduplicated by
/// lowercase text, first occurrence winning, and aliases inherit their
/// entry's category and severity.
#[derive(Debug, Clone, Default)]
pub struct LexiconSnapshot {
    terms: Vec<MatchTerm>,
}

impl LexiconSnapshot {
    pub fn load(store: &dyn LexiconStore, categories: &[String]) -> Result<Self, ScrubError> {
        let entries = store.active_entries(Some(categories))?;
        let aliases = store.aliases(Some(categories))?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut terms: Vec<MatchTerm> = Vec::with_capacity(entries.len() + aliases.len());

        for entry in &entries {
            let term = MatchTerm::from_entry(entry);
            if seen.insert(term.lower.clone()) {
                terms.push(term);
            }
        }
        for alias in &aliases {
            let parent = entries
                .iter()
                .find(|e| e.phrase.to_lowercase() == alias.phrase.to_lowercase());
            let Some(parent) = parent else {
                // Alias of an entry outside the requested categories.
                continue;
            };
            let lower = alias.alias.to_lowercase();
            if seen.insert(lower.clone()) {
                terms.push(MatchTerm {
                    text: alias.alias.clone(),
                    lower,
                    category: parent.category.clone(),
                    severity: parent.severity,
                    canonical: Some(parent.phrase.clone()),
                });
            }
        }

        debug!("lexicon snapshot loaded: {} terms", terms.len());
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[MatchTerm] {
        &self.terms
    }

    /// Terms whose lowercase text contains `token` as a substring.
    pub fn containing(&self, token: &str) -> Vec<&MatchTerm> {
        let token = token.to_lowercase();
        self.terms.iter().filter(|t| t.lower.contains(&token)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}
