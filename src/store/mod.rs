pub mod dynamo;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::weather::WeatherRecord;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

/// Errors that can occur on the store's write, scan, or delete paths
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store write failed: {0}")]
    Write(String),

    #[error("Store scan failed: {0}")]
    Scan(String),

    #[error("Store delete failed: {0}")]
    Delete(String),

    #[error("Malformed stored item: {0}")]
    Data(String),
}

/// Natural key of a stored weather record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub location_id: String,
    pub timestamp: i64,
}

/// Key/range-keyed persistence for weather records.
///
/// Implementations are injected into the runner so tests can substitute
/// an in-memory double for the real backend.
#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Unconditional upsert under `(location_id, timestamp)`; an existing
    /// record with the same key is silently overwritten.
    async fn put(&self, record: &WeatherRecord) -> Result<(), StoreError>;

    /// Returns the keys of every record with `timestamp < cutoff`, across
    /// all location partitions.
    async fn scan_older_than(&self, cutoff: i64) -> Result<Vec<RecordKey>, StoreError>;

    /// Deletes one record by exact key
    async fn delete(&self, key: &RecordKey) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: WeatherStore + ?Sized> WeatherStore for std::sync::Arc<S> {
    async fn put(&self, record: &WeatherRecord) -> Result<(), StoreError> {
        (**self).put(record).await
    }

    async fn scan_older_than(&self, cutoff: i64) -> Result<Vec<RecordKey>, StoreError> {
        (**self).scan_older_than(cutoff).await
    }

    async fn delete(&self, key: &RecordKey) -> Result<(), StoreError> {
        (**self).delete(key).await
    }
}
