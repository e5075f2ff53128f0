use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::debug;

use super::{RecordKey, StoreError, WeatherStore};
use crate::weather::WeatherRecord;

/// Upper bound on scan pages before the sweep is treated as runaway
const MAX_SCAN_PAGES: usize = 1000;

/// DynamoDB-backed record store.
///
/// The table uses `location_id` (string) as partition key and `timestamp`
/// (number) as sort key.
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl WeatherStore for DynamoStore {
    async fn put(&self, record: &WeatherRecord) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("location_id", AttributeValue::S(record.location_id.clone()))
            .item("timestamp", AttributeValue::N(record.timestamp.to_string()))
            .item("temperature", AttributeValue::N(record.temperature.to_string()))
            .item("humidity", AttributeValue::N(record.humidity.to_string()))
            .item("rainfall", AttributeValue::N(record.rainfall.to_string()))
            .item("wind_speed", AttributeValue::N(record.wind_speed.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        debug!(
            "Saved record for '{}' at timestamp {}",
            record.location_id, record.timestamp
        );

        Ok(())
    }

    async fn scan_older_than(&self, cutoff: i64) -> Result<Vec<RecordKey>, StoreError> {
        let mut keys = Vec::new();
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        let mut pages = 0usize;

        // Page-exhaustion loop over the scan cursor. `timestamp` is a
        // reserved word in filter expressions, hence the #ts alias.
        loop {
            pages += 1;
            if pages > MAX_SCAN_PAGES {
                return Err(StoreError::Scan(format!(
                    "scan exceeded {MAX_SCAN_PAGES} pages, aborting"
                )));
            }

            let mut request = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("#ts < :cutoff")
                .expression_attribute_names("#ts", "timestamp")
                .expression_attribute_values(":cutoff", AttributeValue::N(cutoff.to_string()));

            if let Some(start_key) = exclusive_start_key.take() {
                request = request.set_exclusive_start_key(Some(start_key));
            }

            let response = request
                .send()
                .await
                .map_err(|e| StoreError::Scan(e.to_string()))?;

            for item in response.items() {
                keys.push(record_key_from_item(item)?);
            }

            exclusive_start_key = response.last_evaluated_key().cloned();
            if exclusive_start_key.is_none() {
                break;
            }
        }

        debug!("Scan found {} records older than {}", keys.len(), cutoff);

        Ok(keys)
    }

    async fn delete(&self, key: &RecordKey) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("location_id", AttributeValue::S(key.location_id.clone()))
            .key("timestamp", AttributeValue::N(key.timestamp.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Delete(e.to_string()))?;

        Ok(())
    }
}

/// Extracts the natural key from a scanned item
fn record_key_from_item(item: &HashMap<String, AttributeValue>) -> Result<RecordKey, StoreError> {
    let location_id = item
        .get("location_id")
        .and_then(|v| v.as_s().ok())
        .ok_or_else(|| StoreError::Data("item missing string attribute 'location_id'".to_string()))?
        .clone();

    let timestamp = item
        .get("timestamp")
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| StoreError::Data("item missing number attribute 'timestamp'".to_string()))?
        .parse::<i64>()
        .map_err(|e| StoreError::Data(format!("unparseable timestamp: {e}")))?;

    Ok(RecordKey {
        location_id,
        timestamp,
    })
}
