use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::alerts::evaluator::exceeds_thresholds;
use crate::alerts::notifier::{alert_subject, format_alert, AlertPublisher};
use crate::config::TenkiConfig;
use crate::error::TenkiError;
use crate::retention;
use crate::store::WeatherStore;
use crate::weather::WeatherFetcher;

/// Result of a successful invocation, mirroring the platform handler
/// contract: status 200 with a JSON success body. Failures are propagated
/// as errors instead of a structured payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

/// Runs one fetch -> save -> alert -> sweep invocation.
///
/// The store and publisher are injected so tests can substitute doubles
/// for the real backends.
pub struct Runner<S, P> {
    config: TenkiConfig,
    fetcher: WeatherFetcher,
    store: S,
    publisher: P,
}

impl<S: WeatherStore, P: AlertPublisher> Runner<S, P> {
    pub fn new(config: TenkiConfig, fetcher: WeatherFetcher, store: S, publisher: P) -> Self {
        Self {
            config,
            fetcher,
            store,
            publisher,
        }
    }

    /// Executes the four steps in strict sequence. Any error aborts the
    /// remainder of the invocation; a failed notification means the
    /// retention sweep never runs.
    pub async fn run(&self) -> Result<InvocationResponse, TenkiError> {
        let record = self
            .fetcher
            .fetch(&self.config.location.id, &self.config.location.code)
            .await?;
        info!(
            "Fetched observation for '{}' at {}: temp={}, humidity={}, rainfall={}, wind={}",
            record.location_id,
            record.timestamp,
            record.temperature,
            record.humidity,
            record.rainfall,
            record.wind_speed
        );

        self.store.put(&record).await?;
        info!("Observation saved to store");

        if exceeds_thresholds(&record, &self.config.alert_thresholds) {
            warn!(
                "Alert condition met for '{}': temp={}, rainfall={}",
                record.location_id, record.temperature, record.rainfall
            );
            self.publisher
                .publish(&alert_subject(&record), &format_alert(&record))
                .await?;
            info!("Alert published");
        }

        let deleted = retention::sweep(
            &self.store,
            Utc::now().timestamp(),
            self.config.retention_seconds(),
        )
        .await?;
        info!("Old record cleanup completed ({} deleted)", deleted);

        Ok(InvocationResponse {
            status_code: 200,
            body: json!({ "message": "Success" }).to_string(),
        })
    }
}
