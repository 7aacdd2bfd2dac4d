// lexscrub-core/src/brand.rs
//! The brand extractor seam and its adapters.
//!
//! Brand identification benefits from whole-document context, so the
//! extractor runs once per scrub call over the full text, not per token.
//! Its output is untrusted: a structured JSON list is preferred, a
//! bracketed-substring salvage and a comma-split are fallbacks, and tokens
//! that are mostly digits or too short are discarded. A failed, empty, or
//! unconfigured extractor means zero brand removals, never an error.
//!
//! License: MIT OR APACHE 2.0

use std::time::Duration;

use log::debug;
use serde_json::{json, Value};

use crate::errors::ScrubError;

/// Hard deadline for one remote extraction call.
pub const EXTRACTOR_TIMEOUT_SECS: u64 = 8;

/// A token whose digit share reaches this ratio (with at least
/// `MIN_DIGITS_FOR_RATIO` digits) is discarded as a model number or SKU.
pub const DIGIT_RATIO_LIMIT: f64 = 0.6;
const MIN_DIGITS_FOR_RATIO: usize = 3;

/// Extracted strings shorter than this are discarded.
pub const MIN_BRAND_LEN: usize = 2;

/// A capability that extracts brand names from free-form text.
pub trait BrandExtractor: Send + Sync {
    fn name(&self) -> &str;

    fn extract(&self, text: &str) -> Result<Vec<String>, ScrubError>;
}

/// The no-op extractor used when no remote endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBrandExtractor;

impl BrandExtractor for NullBrandExtractor {
    fn name(&self) -> &str {
        "null"
    }

    fn extract(&self, _text: &str) -> Result<Vec<String>, ScrubError> {
        Ok(Vec::new())
    }
}

/// Remote structured extractor speaking an OpenAI-style chat-completion
/// protocol with a strict JSON-array prompt contract.
pub struct RemoteBrandExtractor {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl RemoteBrandExtractor {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ScrubError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(EXTRACTOR_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScrubError::ExtractorUnavailable(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

impl BrandExtractor for RemoteBrandExtractor {
    fn name(&self) -> &str {
        "remote-chat"
    }

    fn extract(&self, text: &str) -> Result<Vec<String>, ScrubError> {
        let body = json!({
            "model": self.model,
            "temperature": 0,
            "messages": [
                {
                    "role": "system",
                    "content": "Extract every brand or trademark name mentioned in the user's text. Respond with a JSON array of strings only. Respond with [] if there are none."
                },
                {
                    "role": "user",
                    "content": text
                }
            ]
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| ScrubError::ExtractorUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrubError::ExtractorUnavailable(format!("status {status}")));
        }

        let payload: Value = response
            .json()
            .map_err(|e| ScrubError::MalformedExtractorOutput(e.to_string()))?;
        let content = payload
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ScrubError::MalformedExtractorOutput("missing completion content".to_string())
            })?;

        Ok(parse_brand_list(content))
    }
}

/// Parses untrusted extractor output into a clean brand list.
pub(crate) fn parse_brand_list(content: &str) -> Vec<String> {
    let trimmed = content.trim();

    let structured: Option<Vec<String>> = serde_json::from_str(trimmed)
        .ok()
        .or_else(|| bracketed_salvage(trimmed));

    let raw: Vec<String> = match structured {
        Some(list) => list,
        None => {
            debug!("extractor output is not a JSON array; falling back to comma split");
            trimmed.split(',').map(str::to_string).collect()
        }
    };

    let mut seen: Vec<String> = Vec::new();
    let mut brands: Vec<String> = Vec::new();
    for item in raw {
        let cleaned = item.trim().trim_matches(|c| c == '"' || c == '\'').trim();
        if cleaned.chars().count() < MIN_BRAND_LEN {
            continue;
        }
        if mostly_digits(cleaned) {
            continue;
        }
        let lower = cleaned.to_lowercase();
        if seen.contains(&lower) {
            continue;
        }
        seen.push(lower);
        brands.push(cleaned.to_string());
    }
    brands
}

/// Attempts to parse the first `[...]` span inside otherwise chatty output.
fn bracketed_salvage(content: &str) -> Option<Vec<String>> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&content[start..=end]).ok()
}

fn mostly_digits(s: &str) -> bool {
    let total = s.chars().count();
    if total == 0 {
        return true;
    }
    let digits = s.chars().filter(|c| c.is_ascii_digit()).count();
    digits >= MIN_DIGITS_FOR_RATIO && (digits as f64 / total as f64) >= DIGIT_RATIO_LIMIT
}
