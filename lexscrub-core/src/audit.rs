// lexscrub-core/src/audit.rs
//! Usage-audit logging for lexicon hits.
//!
//! Auditing is strictly fire-and-forget: recording never blocks a scrub and
//! failures are swallowed. Events carry a truncated context snippet together
//! with a canonical context hash, so downstream consumers can deduplicate
//! and correlate hits without holding raw listing text.
//!
//! License: MIT OR APACHE 2.0

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use hex;
use log::warn;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::mpsc;

/// Maximum characters of context carried in one event.
pub const SNIPPET_MAX_CHARS: usize = 80;

/// A single, auditable record of one lexicon phrase hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: String,
    pub run_id: String,
    pub category: String,
    pub phrase: String,
    pub context_snippet: String,
    pub context_hash: String,
}

impl AuditEvent {
    pub fn new(run_id: &str, category: &str, phrase: &str, context: &str) -> Self {
        let snippet: String = context.chars().take(SNIPPET_MAX_CHARS).collect();
        Self {
            timestamp: Utc::now().to_rfc3339(),
            run_id: run_id.to_string(),
            category: category.to_string(),
            phrase: phrase.to_string(),
            context_hash: canonical_context_hash(category, context),
            context_snippet: snippet,
        }
    }
}

/// Stable hash of a context snippet: whitespace-normalized, lowercased, and
/// namespaced by category so the same snippet hashes differently across
/// categories.
pub fn canonical_context_hash(category: &str, snippet: &str) -> String {
    let normalized = snippet
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(category.as_bytes());
    hasher.update(b":");
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

/// The usage-audit collaborator seam. Implementations must be best-effort:
/// `record` never blocks and never reports failure to the caller.
pub trait UsageAudit: Send + Sync {
    fn record(&self, event: AuditEvent);
}

/// Discards every event. The default when no audit sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudit;

impl UsageAudit for NullAudit {
    fn record(&self, _event: AuditEvent) {}
}

/// Tees events into a bounded channel for an external consumer. Events are
/// dropped when the channel is full or closed.
pub struct ChannelAudit {
    tx: mpsc::Sender<AuditEvent>,
}

impl ChannelAudit {
    pub fn new(tx: mpsc::Sender<AuditEvent>) -> Self {
        Self { tx }
    }
}

impl UsageAudit for ChannelAudit {
    fn record(&self, event: AuditEvent) {
        let _ = self.tx.try_send(event);
    }
}

/// Appends events as JSON lines to a file.
#[derive(Debug, Clone)]
pub struct FileAudit {
    path: PathBuf,
}

impl FileAudit {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl UsageAudit for FileAudit {
    fn record(&self, event: AuditEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!("failed to serialize audit event: {e}");
                return;
            }
        };
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{line}"));
        if let Err(e) = result {
            warn!("usage audit write failed for {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_context_hash_consistency() {
        let h1 = canonical_context_hash("brand", "Buy NIKE  shoes ");
        let h2 = canonical_context_hash("brand", "buy nike shoes");
        assert_eq!(h1, h2);
        let h3 = canonical_context_hash("forbidden", "buy nike shoes");
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_event_snippet_truncated() {
        let context = "x".repeat(SNIPPET_MAX_CHARS * 2);
        let event = AuditEvent::new("run", "brand", "nike", &context);
        assert_eq!(event.context_snippet.chars().count(), SNIPPET_MAX_CHARS);
        // Hash still covers the full context.
        assert_eq!(event.context_hash, canonical_context_hash("brand", &context));
    }

    #[test]
    fn test_file_audit_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let audit = FileAudit::new(&path);
        audit.record(AuditEvent::new("run-1", "brand", "nike", "some context"));
        audit.record(AuditEvent::new("run-1", "forbidden", "best", "other context"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let event: AuditEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(event.phrase, "nike");
    }

    #[test]
    fn test_channel_audit_drops_when_full() {
        let (tx, mut rx) = mpsc::channel(1);
        let audit = ChannelAudit::new(tx);
        audit.record(AuditEvent::new("run", "brand", "nike", "ctx"));
        audit.record(AuditEvent::new("run", "brand", "puma", "ctx"));
        let first = rx.try_recv().unwrap();
        assert_eq!(first.phrase, "nike");
        assert!(rx.try_recv().is_err());
    }
}
