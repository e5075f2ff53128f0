use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{RecordKey, StoreError, WeatherStore};
use crate::weather::WeatherRecord;

/// In-memory store used by tests and local dry runs.
///
/// Mirrors the backend contract: unconditional upsert, timestamp-only scan
/// across all locations, exact-key delete. Write and delete failures can be
/// injected to exercise the abort-on-first-error policy.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<(String, i64), WeatherRecord>>,
    fail_writes: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record directly, bypassing the trait
    pub fn insert(&self, record: WeatherRecord) {
        let mut records = self.records.lock().unwrap();
        records.insert((record.location_id.clone(), record.timestamp), record);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, location_id: &str, timestamp: i64) -> bool {
        self.records
            .lock()
            .unwrap()
            .contains_key(&(location_id.to_string(), timestamp))
    }

    pub fn get(&self, location_id: &str, timestamp: i64) -> Option<WeatherRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&(location_id.to_string(), timestamp))
            .cloned()
    }

    /// Makes every subsequent `put` fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `delete` fail
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl WeatherStore for MemoryStore {
    async fn put(&self, record: &WeatherRecord) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write("injected write failure".to_string()));
        }

        self.insert(record.clone());
        Ok(())
    }

    async fn scan_older_than(&self, cutoff: i64) -> Result<Vec<RecordKey>, StoreError> {
        let records = self.records.lock().unwrap();

        Ok(records
            .keys()
            .filter(|(_, timestamp)| *timestamp < cutoff)
            .map(|(location_id, timestamp)| RecordKey {
                location_id: location_id.clone(),
                timestamp: *timestamp,
            })
            .collect())
    }

    async fn delete(&self, key: &RecordKey) -> Result<(), StoreError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Delete("injected delete failure".to_string()));
        }

        let mut records = self.records.lock().unwrap();
        records.remove(&(key.location_id.clone(), key.timestamp));
        Ok(())
    }
}
