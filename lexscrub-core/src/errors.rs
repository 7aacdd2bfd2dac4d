//! errors.rs - Custom error types for the lexscrub-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `lexscrub-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions. This prevents them from
/// matching all variants exhaustively, thus avoiding breaking changes.
///
/// Only `EmptyInput` is ever surfaced by the scrub pipeline itself; the
/// collaborator variants (`LexiconUnavailable`, `OracleUnavailable`,
/// `ExtractorUnavailable`, `MalformedExtractorOutput`) are produced by the
/// adapter seams and degraded to fewer redactions inside the engine.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScrubError {
    #[error("input text is empty or blank")]
    EmptyInput,

    #[error("lexicon store unavailable: {0}")]
    LexiconUnavailable(String),

    #[error("synonym oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("brand extractor unavailable: {0}")]
    ExtractorUnavailable(String),

    #[error("malformed extractor output: {0}")]
    MalformedExtractorOutput(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
