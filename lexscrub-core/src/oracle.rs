// lexscrub-core/src/oracle.rs
//! The synonym oracle seam and its adapters.
//!
//! `is_equivalent` decisions combine a local fast path (high similarity
//! confirms without any remote call) with an optional remote semantic judge
//! behind a strict yes/no contract. The remote call carries a bounded
//! timeout and is never retried; any transport failure, non-2xx response, or
//! ambiguous content counts as "not a synonym" for that token this cycle.
//! The adapter therefore fails closed: it never blocks removal of a
//! mismatch, and never falsely forces a removal.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use serde_json::{json, Value};

use crate::errors::ScrubError;
use crate::report::loggable;

/// Similarity at or above this confirms equivalence without a remote call.
pub const FAST_PATH_SIMILARITY: f64 = 0.92;

/// Hard deadline for one remote oracle call.
pub const ORACLE_TIMEOUT_SECS: u64 = 6;

/// A capability that judges whether two strings denote the same concept or
/// brand. Implementations must be safe to call concurrently.
pub trait SynonymOracle: Send + Sync {
    fn name(&self) -> &str;

    /// Returns whether `token` and `phrase` denote the same concept. Errors
    /// are degraded by the caller, never surfaced to the scrub request.
    fn check(&self, token: &str, phrase: &str) -> Result<bool, ScrubError>;
}

/// Remote semantic judge speaking an OpenAI-style chat-completion protocol.
pub struct RemoteSynonymOracle {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl RemoteSynonymOracle {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ScrubError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(ORACLE_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScrubError::OracleUnavailable(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

impl SynonymOracle for RemoteSynonymOracle {
    fn name(&self) -> &str {
        "remote-chat"
    }

    fn check(&self, token: &str, phrase: &str) -> Result<bool, ScrubError> {
        let body = json!({
            "model": self.model,
            "temperature": 0,
            "messages": [
                {
                    "role": "system",
                    "content": "You judge whether two short strings refer to the same product, brand, or concept. Answer with exactly one word: yes or no."
                },
                {
                    "role": "user",
                    "content": format!("A: {token}\nB: {phrase}\nSame meaning?")
                }
            ]
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| ScrubError::OracleUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrubError::OracleUnavailable(format!("status {status}")));
        }

        let payload: Value = response
            .json()
            .map_err(|e| ScrubError::OracleUnavailable(e.to_string()))?;
        Ok(parse_verdict(&payload))
    }
}

fn completion_content(payload: &Value) -> Option<&str> {
    payload
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}

/// Extracts a yes/no verdict from a chat-completion payload. Only a leading
/// "yes" confirms; "no", empty, or anything else fails closed.
pub(crate) fn parse_verdict(payload: &Value) -> bool {
    let Some(content) = completion_content(payload) else {
        return false;
    };
    let first = content.split_whitespace().next().unwrap_or("");
    let word: String = first
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    word == "yes"
}

/// Per-call equivalence judge: fast path, optional remote slow path, and a
/// memo of verdicts so duplicate `(token, phrase)` pairs within one scrub
/// never trigger duplicate remote calls.
pub struct SynonymJudge<'a> {
    remote: Option<&'a dyn SynonymOracle>,
    cache: HashMap<(String, String), bool>,
}

impl<'a> SynonymJudge<'a> {
    pub fn new(remote: Option<&'a dyn SynonymOracle>) -> Self {
        Self {
            remote,
            cache: HashMap::new(),
        }
    }

    /// Decides whether `token` is equivalent to `phrase`, given the already
    /// computed similarity between them.
    pub fn is_equivalent(&mut self, token: &str, phrase: &str, similarity: f64) -> bool {
        if similarity >= FAST_PATH_SIMILARITY {
            return true;
        }
        let Some(oracle) = self.remote else {
            return false;
        };
        let key = (token.to_lowercase(), phrase.to_lowercase());
        if let Some(&verdict) = self.cache.get(&key) {
            return verdict;
        }
        let verdict = match oracle.check(token, phrase) {
            Ok(v) => v,
            Err(e) => {
                debug!(
                    "oracle '{}' degraded to local-only for '{}': {}",
                    oracle.name(),
                    loggable(token),
                    e
                );
                false
            }
        };
        self.cache.insert(key, verdict);
        verdict
    }
}
