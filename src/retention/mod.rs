use thiserror::Error;
use tracing::{debug, info};

use crate::store::{StoreError, WeatherStore};

/// Default retention window: 30 days in seconds
pub const DEFAULT_RETENTION_SECS: i64 = 30 * 24 * 60 * 60;

/// Errors surfaced by the retention sweep, from either the scan or a delete
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Retention sweep failed: {0}")]
    Store(#[from] StoreError),
}

/// Deletes every record older than the retention window.
///
/// The scan filters on timestamp alone, across all location partitions; in
/// a multi-location table one location's run would sweep every location's
/// old records. That matches the deployed single-location behavior and is
/// kept as-is. Deletes are issued one by one and the first failure aborts
/// the sweep.
pub async fn sweep<S: WeatherStore + ?Sized>(
    store: &S,
    now: i64,
    retention_seconds: i64,
) -> Result<u64, SweepError> {
    let cutoff = now - retention_seconds;
    debug!("Sweeping records older than timestamp {}", cutoff);

    let expired = store.scan_older_than(cutoff).await?;

    let mut deleted = 0u64;
    for key in &expired {
        store.delete(key).await?;
        deleted += 1;
        debug!(
            "Deleted expired record ('{}', {})",
            key.location_id, key.timestamp
        );
    }

    if deleted > 0 {
        info!("Retention sweep completed: deleted {} record(s)", deleted);
    } else {
        debug!("Retention sweep completed: no expired records");
    }

    Ok(deleted)
}
