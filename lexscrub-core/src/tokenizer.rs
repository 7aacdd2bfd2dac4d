// lexscrub-core/src/tokenizer.rs
//! Splits listing text into lowercase alphanumeric/apostrophe tokens.
//!
//! Tokenization is pure and order-independent of any external call: the same
//! input always yields the same finite token sequence, so downstream stages
//! can re-tokenize intermediate text freely.

/// Tokens shorter than this are discarded.
pub const MIN_TOKEN_LEN: usize = 2;

/// A deduplicated token with enough position information for word-boundary
/// substitution downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercased token text.
    pub text: String,
    /// Number of occurrences in the source text.
    pub freq: usize,
    /// Byte offset of the first occurrence in the source text.
    pub first_offset: usize,
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '\''
}

/// Splits on any run of characters outside `[A-Za-z0-9']`, discards tokens
/// shorter than `MIN_TOKEN_LEN`, lowercases, and de-duplicates preserving
/// first-seen order, frequency, and first byte offset.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut current = String::new();
    let mut start = 0usize;

    let mut flush = |buf: &mut String, offset: usize, out: &mut Vec<Token>| {
        if buf.chars().count() >= MIN_TOKEN_LEN {
            let lower = buf.to_lowercase();
            match out.iter_mut().find(|t| t.text == lower) {
                Some(existing) => existing.freq += 1,
                None => out.push(Token {
                    text: lower,
                    freq: 1,
                    first_offset: offset,
                }),
            }
        }
        buf.clear();
    };

    for (idx, c) in text.char_indices() {
        if is_token_char(c) {
            if current.is_empty() {
                start = idx;
            }
            current.push(c);
        } else {
            flush(&mut current, start, &mut tokens);
        }
    }
    flush(&mut current, start, &mut tokens);

    tokens
}
