//! Bounded, thread-safe history of recognition results.
//!
//! # Thread Safety
//!
//! [`ResultStore`] is `Send + Sync` and is meant to be shared behind an `Arc`.
//! A single `parking_lot::Mutex` serializes every read and write, so each call
//! observes the history either entirely before or entirely after any concurrent
//! mutation. Readers always receive owned copies; the lock is never held after
//! a method returns, which keeps file I/O outside the critical section.
//!
//! # Example
//!
//! ```rust
//! use ocr_relay::store::ResultStore;
//!
//! let store = ResultStore::with_capacity(2);
//! store.add("first");
//! store.add("second");
//! store.add("third");
//!
//! let texts: Vec<_> = store.get_all().into_iter().map(|r| r.into_text()).collect();
//! assert_eq!(texts, ["second", "third"]);
//! ```

use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::types::ResultRecord;

/// Default number of records retained before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 100;

/// Capacity-bounded FIFO history of [`ResultRecord`]s, oldest first.
#[derive(Debug)]
pub struct ResultStore {
    records: Mutex<VecDeque<ResultRecord>>,
    capacity: usize,
}

impl ResultStore {
    /// Create an empty store holding at most [`DEFAULT_CAPACITY`] records.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty store with a custom bound. A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record stamped with the current time, evicting the oldest on overflow.
    ///
    /// Returns a copy of the record that was stored.
    pub fn add(&self, text: impl Into<String>) -> ResultRecord {
        let record = ResultRecord::now(text);
        self.insert(record.clone());
        record
    }

    pub(crate) fn insert(&self, record: ResultRecord) {
        let mut records = self.records.lock();
        records.push_back(record);
        while records.len() > self.capacity {
            records.pop_front();
        }
    }

    /// Point-in-time copy of the history, oldest first.
    pub fn get_all(&self) -> Vec<ResultRecord> {
        self.records.lock().iter().cloned().collect()
    }

    /// Most recently added record, if any.
    pub fn latest(&self) -> Option<ResultRecord> {
        self.records.lock().back().cloned()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Replace the history with records read back from a snapshot.
    ///
    /// Only the newest `capacity` records are kept. Returns how many older
    /// records were dropped to honor the bound.
    pub fn restore(&self, records: Vec<ResultRecord>) -> usize {
        let overflow = records.len().saturating_sub(self.capacity);
        let kept: VecDeque<ResultRecord> = records.into_iter().skip(overflow).collect();

        *self.records.lock() = kept;

        if overflow > 0 {
            tracing::warn!(
                dropped = overflow,
                capacity = self.capacity,
                "Snapshot held more records than the history capacity; oldest entries dropped"
            );
        }
        overflow
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(store: &ResultStore) -> Vec<String> {
        store.get_all().into_iter().map(ResultRecord::into_text).collect()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ResultStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.capacity(), DEFAULT_CAPACITY);
        assert!(store.latest().is_none());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let store = ResultStore::new();
        for i in 0..10 {
            store.add(format!("text-{i}"));
        }

        let expected: Vec<String> = (0..10).map(|i| format!("text-{i}")).collect();
        assert_eq!(texts(&store), expected);
    }

    #[test]
    fn test_add_returns_stored_record() {
        let store = ResultStore::new();
        let record = store.add("ABC1");
        assert_eq!(record.text(), "ABC1");
        assert_eq!(store.latest(), Some(record));
    }

    #[test]
    fn test_fill_to_capacity_keeps_everything() {
        let store = ResultStore::new();
        for i in 0..DEFAULT_CAPACITY {
            store.add(format!("text-{i}"));
        }
        assert_eq!(store.len(), DEFAULT_CAPACITY);
        assert_eq!(store.get_all()[0].text(), "text-0");
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let store = ResultStore::new();
        for i in 1..=DEFAULT_CAPACITY + 1 {
            store.add(format!("text-{i}"));
        }

        let all = store.get_all();
        assert_eq!(all.len(), DEFAULT_CAPACITY);
        assert!(all.iter().all(|r| r.text() != "text-1"));
        assert_eq!(all[0].text(), "text-2");
        assert_eq!(store.latest().unwrap().text(), "text-101");
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let store = ResultStore::with_capacity(0);
        assert_eq!(store.capacity(), 1);
        store.add("a");
        store.add("b");
        assert_eq!(texts(&store), ["b"]);
    }

    #[test]
    fn test_clear_empties_store() {
        let store = ResultStore::new();
        store.add("a");
        store.add("b");
        store.clear();
        assert!(store.is_empty());
        assert!(store.latest().is_none());
    }

    #[test]
    fn test_get_all_is_a_copy() {
        let store = ResultStore::new();
        store.add("a");
        let before = store.get_all();
        store.add("b");
        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_restore_within_capacity_keeps_all() {
        let store = ResultStore::with_capacity(5);
        store.add("stale");
        let records: Vec<_> = (0..3)
            .map(|i| ResultRecord::from_parts(format!("r{i}"), "10:00:00", 1_700_000_000 + i))
            .collect();

        let dropped = store.restore(records.clone());

        assert_eq!(dropped, 0);
        assert_eq!(store.get_all(), records);
    }

    #[test]
    fn test_restore_over_capacity_keeps_newest() {
        let store = ResultStore::with_capacity(3);
        let records: Vec<_> = (0..5)
            .map(|i| ResultRecord::from_parts(format!("r{i}"), "10:00:00", 1_700_000_000 + i))
            .collect();

        let dropped = store.restore(records);

        assert_eq!(dropped, 2);
        assert_eq!(texts(&store), ["r2", "r3", "r4"]);
    }
}
