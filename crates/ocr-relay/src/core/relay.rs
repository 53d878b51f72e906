//! The relay service: one history, its snapshot, and the resolver.
//!
//! Every ingestion path funnels through [`OcrRelay::ingest`], which appends to
//! the store and then rewrites the snapshot. Snapshot write failures are logged
//! and absorbed; the in-memory history stays authoritative until the next
//! successful write.

use serde::Deserialize;
use std::sync::Arc;

use crate::core::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::persistence::SnapshotFile;
use crate::resolution::{Resolved, Resolver};
use crate::store::ResultStore;
use crate::types::ResultRecord;

/// Body accepted by the wire submit call: `{ "text": "..." }`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub text: String,
}

#[derive(Debug)]
pub struct OcrRelay {
    store: Arc<ResultStore>,
    snapshot: SnapshotFile,
    resolver: Resolver,
}

impl OcrRelay {
    /// Build an empty relay from configuration without touching the disk.
    pub fn new(config: &RelayConfig) -> Self {
        let store = Arc::new(ResultStore::with_capacity(config.capacity));
        let resolver = Resolver::new(config.handoff_path.clone(), Arc::clone(&store));
        Self {
            store,
            snapshot: SnapshotFile::new(config.snapshot_path.clone()),
            resolver,
        }
    }

    /// Build a relay and warm-start its history from the snapshot file.
    pub fn open(config: &RelayConfig) -> Self {
        let relay = Self::new(config);
        let records = relay.snapshot.load();
        relay.store.restore(records);
        relay
    }

    pub fn store(&self) -> &Arc<ResultStore> {
        &self.store
    }

    pub fn snapshot(&self) -> &SnapshotFile {
        &self.snapshot
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Direct in-process submission of a recognized text.
    ///
    /// Behaves exactly like the wire path: an empty string is recorded as a
    /// history entry like any other text, and later resolutions from history
    /// will return it until something newer arrives.
    pub fn submit(&self, text: impl Into<String>) -> ResultRecord {
        self.ingest(text.into())
    }

    /// Wire submission: parse `{ "text": ... }` and ingest it.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Validation` when the payload is not a JSON object
    /// with a string `text` field. The history is left untouched.
    pub fn submit_payload(&self, payload: &[u8]) -> Result<ResultRecord> {
        let request: SubmitRequest = serde_json::from_slice(payload)
            .map_err(|e| RelayError::validation_with_source(format!("Invalid OCR payload: {}", e), e))?;
        Ok(self.ingest(request.text))
    }

    fn ingest(&self, text: String) -> ResultRecord {
        let record = self.store.add(text);
        tracing::info!("OCR result recorded: {}", record.text());
        self.persist();
        record
    }

    /// Empty the history and persist the empty snapshot.
    pub fn clear(&self) {
        self.store.clear();
        tracing::info!("OCR results cleared");
        self.persist();
    }

    /// Two-source lookup of the latest text.
    pub fn resolve(&self) -> Resolved {
        self.resolver.resolve()
    }

    pub fn history(&self) -> Vec<ResultRecord> {
        self.store.get_all()
    }

    /// Write the current history to disk, reporting failure to the caller.
    pub fn flush(&self) -> Result<()> {
        self.snapshot.save_with(|| self.store.get_all())
    }

    fn persist(&self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to persist OCR results: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> RelayConfig {
        RelayConfig {
            snapshot_path: dir.join("ocr_results.json"),
            handoff_path: dir.join("ocr_result.txt"),
            ..RelayConfig::default()
        }
    }

    #[test]
    fn test_submit_persists_snapshot() {
        let dir = tempdir().unwrap();
        let relay = OcrRelay::new(&config_in(dir.path()));

        relay.submit("ABC1");

        let on_disk = relay.snapshot().load();
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk[0].text(), "ABC1");
    }

    #[test]
    fn test_submit_records_empty_text_like_wire_path() {
        let dir = tempdir().unwrap();
        let relay = OcrRelay::new(&config_in(dir.path()));
        relay.submit("older");

        relay.submit("");
        relay.submit_payload(br#"{"text":""}"#).unwrap();

        let texts: Vec<_> = relay.history().into_iter().map(ResultRecord::into_text).collect();
        assert_eq!(texts, ["older", "", ""]);
        assert_eq!(relay.resolve().text, "");
    }

    #[test]
    fn test_submit_payload_accepts_text() {
        let dir = tempdir().unwrap();
        let relay = OcrRelay::new(&config_in(dir.path()));

        let record = relay.submit_payload(br#"{"text":"ABC1"}"#).unwrap();

        assert_eq!(record.text(), "ABC1");
        assert_eq!(relay.history(), vec![record]);
    }

    #[test]
    fn test_submit_payload_rejects_missing_text() {
        let dir = tempdir().unwrap();
        let relay = OcrRelay::new(&config_in(dir.path()));
        relay.submit("existing");

        let err = relay.submit_payload(b"{}").unwrap_err();

        assert!(err.is_validation());
        assert_eq!(relay.history().len(), 1);
    }

    #[test]
    fn test_submit_payload_rejects_wrong_type() {
        let dir = tempdir().unwrap();
        let relay = OcrRelay::new(&config_in(dir.path()));

        assert!(relay.submit_payload(br#"{"text": 42}"#).unwrap_err().is_validation());
        assert!(relay.submit_payload(b"not json").unwrap_err().is_validation());
        assert!(relay.history().is_empty());
        assert!(!relay.snapshot().path().exists());
    }

    #[test]
    fn test_clear_persists_empty_snapshot() {
        let dir = tempdir().unwrap();
        let relay = OcrRelay::new(&config_in(dir.path()));
        relay.submit("a");
        relay.submit("b");

        relay.clear();

        assert!(relay.history().is_empty());
        assert!(relay.snapshot().load().is_empty());
    }

    #[test]
    fn test_open_warm_starts_from_snapshot() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        {
            let relay = OcrRelay::new(&config);
            relay.submit("first");
            relay.submit("second");
        }

        let reopened = OcrRelay::open(&config);
        let texts: Vec<_> = reopened.history().into_iter().map(ResultRecord::into_text).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[test]
    fn test_open_truncates_oversized_snapshot() {
        let dir = tempdir().unwrap();
        let config = RelayConfig {
            capacity: 3,
            ..config_in(dir.path())
        };
        let records: Vec<_> = (0..5)
            .map(|i| ResultRecord::from_parts(format!("r{i}"), "10:00:00", 1_700_000_000 + i))
            .collect();
        SnapshotFile::new(&config.snapshot_path).save(&records).unwrap();

        let relay = OcrRelay::open(&config);

        assert_eq!(relay.history(), records[2..].to_vec());
    }

    #[test]
    fn test_resolve_uses_history_fallback() {
        let dir = tempdir().unwrap();
        let relay = OcrRelay::new(&config_in(dir.path()));
        relay.submit("XYZ987");
        assert_eq!(relay.resolve().text, "XYZ987");
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();
        let config = RelayConfig {
            snapshot_path: blocker.join("ocr_results.json"),
            ..config_in(dir.path())
        };
        let relay = OcrRelay::new(&config);

        relay.submit("kept in memory");

        assert_eq!(relay.history().len(), 1);
        assert!(relay.flush().is_err());
    }
}
