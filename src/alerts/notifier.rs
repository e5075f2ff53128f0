use async_trait::async_trait;
use aws_sdk_sns::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::weather::WeatherRecord;

/// Errors that can occur when publishing an alert
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to publish alert: {0}")]
    Publish(String),
}

/// Delivery channel for alert messages.
///
/// Injected into the runner so tests can record published messages instead
/// of hitting a real topic.
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError>;
}

#[async_trait]
impl<P: AlertPublisher + ?Sized> AlertPublisher for Box<P> {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        (**self).publish(subject, message).await
    }
}

#[async_trait]
impl<P: AlertPublisher + ?Sized> AlertPublisher for std::sync::Arc<P> {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        (**self).publish(subject, message).await
    }
}

/// Publishes alerts to an SNS topic
pub struct SnsPublisher {
    client: Client,
    topic_arn: String,
}

impl SnsPublisher {
    pub fn new(client: Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }
}

#[async_trait]
impl AlertPublisher for SnsPublisher {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| NotifyError::Publish(e.to_string()))?;

        debug!("Published alert to {}", self.topic_arn);

        Ok(())
    }
}

/// Log-only publisher used when no topic is configured
pub struct LogPublisher;

#[async_trait]
impl AlertPublisher for LogPublisher {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        warn!("{}: {}", subject, message);
        Ok(())
    }
}

/// Subject line for an alert on the given record
pub fn alert_subject(record: &WeatherRecord) -> String {
    format!("Weather alert for {}", record.location_id)
}

/// Renders the full record into the alert message body
pub fn format_alert(record: &WeatherRecord) -> String {
    format!(
        "Alert condition met at {} (timestamp {}): temperature {:.1} C, humidity {:.0}%, rainfall {:.1} mm/h, wind speed {:.1} m/s",
        record.location_id,
        record.timestamp,
        record.temperature,
        record.humidity,
        record.rainfall,
        record.wind_speed
    )
}
