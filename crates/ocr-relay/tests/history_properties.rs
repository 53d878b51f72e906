//! History behavior tests.
//!
//! Validates the bounded history end to end through `OcrRelay`:
//! - insertion order up to capacity
//! - FIFO eviction past capacity
//! - clear followed by a snapshot round trip
//! - snapshot round trips preserve every field

use ocr_relay::{DEFAULT_CAPACITY, OcrRelay, RelayConfig, ResultRecord, SnapshotFile};
use std::path::Path;
use tempfile::TempDir;

fn config_in(dir: &Path) -> RelayConfig {
    RelayConfig {
        snapshot_path: dir.join("ocr_results.json"),
        handoff_path: dir.join("ocr_result.txt"),
        ..RelayConfig::default()
    }
}

fn texts(records: Vec<ResultRecord>) -> Vec<String> {
    records.into_iter().map(ResultRecord::into_text).collect()
}

#[test]
fn test_adds_up_to_capacity_keep_insertion_order() {
    let temp_dir = TempDir::new().unwrap();
    let relay = OcrRelay::new(&config_in(temp_dir.path()));

    for count in [1usize, 17, DEFAULT_CAPACITY] {
        relay.clear();
        let expected: Vec<String> = (0..count).map(|i| format!("plate-{i}")).collect();
        for text in &expected {
            relay.submit(text.clone());
        }

        assert_eq!(texts(relay.history()), expected, "order mismatch for {count} adds");
    }
}

#[test]
fn test_add_past_capacity_evicts_first_record() {
    let temp_dir = TempDir::new().unwrap();
    let relay = OcrRelay::new(&config_in(temp_dir.path()));

    for i in 1..=DEFAULT_CAPACITY + 1 {
        relay.submit(format!("plate-{i}"));
    }

    let history = texts(relay.history());
    assert_eq!(history.len(), DEFAULT_CAPACITY);
    assert!(!history.contains(&"plate-1".to_string()));
    assert_eq!(history.last().map(String::as_str), Some("plate-101"));

    let on_disk = texts(relay.snapshot().load());
    assert_eq!(on_disk, history, "snapshot should mirror the evicted history");
}

#[test]
fn test_clear_then_round_trip_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let relay = OcrRelay::new(&config_in(temp_dir.path()));
    relay.submit("ABC1");
    relay.submit("XYZ987");

    relay.clear();
    assert!(relay.history().is_empty());

    relay.snapshot().save(&relay.history()).unwrap();
    assert!(relay.snapshot().load().is_empty());
}

#[test]
fn test_snapshot_round_trip_preserves_fields() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = SnapshotFile::new(temp_dir.path().join("ocr_results.json"));

    let records: Vec<ResultRecord> = (0..DEFAULT_CAPACITY as i64)
        .map(|i| {
            ResultRecord::from_parts(
                format!("文字-{i} \"quoted\""),
                format!("{:02}:{:02}:{:02}", i % 24, i % 60, (i * 7) % 60),
                1_700_000_000 + i,
            )
        })
        .collect();

    snapshot.save(&records).unwrap();

    assert_eq!(snapshot.load(), records);
}

#[test]
fn test_restart_restores_history() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(temp_dir.path());

    let before = {
        let relay = OcrRelay::open(&config);
        relay.submit("cdEFG123");
        relay.submit("XYZ987");
        relay.history()
    };

    let after = OcrRelay::open(&config).history();
    assert_eq!(after, before);
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(temp_dir.path());
    std::fs::write(&config.snapshot_path, b"\x00\x01 definitely not json").unwrap();

    let relay = OcrRelay::open(&config);
    assert!(relay.history().is_empty());

    relay.submit("fresh");
    assert_eq!(texts(relay.snapshot().load()), ["fresh"]);
}
