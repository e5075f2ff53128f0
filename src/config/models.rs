use serde::{Deserialize, Serialize};
use validator::Validate;

/// The main configuration structure for Tenki
///
/// Every field has a default matching the deployed single-location setup,
/// so a missing config file is equivalent to an empty one. The provider API
/// key is a secret and is read from the `OPENWEATHERMAP_API_KEY`
/// environment variable, never from this file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TenkiConfig {
    /// Location whose observations are ingested
    #[serde(default)]
    #[validate]
    pub location: LocationConfig,

    /// Record store table name
    #[serde(default = "default_table_name")]
    #[validate(length(min = 1))]
    pub table_name: String,

    /// SNS topic for alert notifications; alerts are logged locally when
    /// no topic is configured
    #[serde(default)]
    pub topic_arn: Option<String>,

    /// Days a record is kept before the retention sweep deletes it
    #[serde(default = "default_retention_days")]
    #[validate(range(min = 1))]
    pub retention_days: u32,

    /// Static alert thresholds
    #[serde(default)]
    pub alert_thresholds: AlertThresholds,

    /// Override for the weather provider endpoint URL
    #[serde(default)]
    pub provider_url: Option<String>,
}

/// Identifies the configured location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationConfig {
    /// Identifier used as the store partition key
    #[serde(default = "default_location_id")]
    #[validate(length(min = 1))]
    pub id: String,

    /// Provider-specific place identifier used in the weather API query
    #[serde(default = "default_location_code")]
    #[validate(length(min = 1))]
    pub code: String,
}

/// Static thresholds whose breach triggers a notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Degrees Celsius
    #[serde(default = "default_temperature_threshold")]
    pub temperature: f64,

    /// Millimeters over the preceding hour
    #[serde(default = "default_rainfall_threshold")]
    pub rainfall: f64,
}

impl TenkiConfig {
    /// Retention window in seconds
    pub fn retention_seconds(&self) -> i64 {
        i64::from(self.retention_days) * 24 * 60 * 60
    }
}

impl Default for TenkiConfig {
    fn default() -> Self {
        Self {
            location: LocationConfig::default(),
            table_name: default_table_name(),
            topic_arn: None,
            retention_days: default_retention_days(),
            alert_thresholds: AlertThresholds::default(),
            provider_url: None,
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            id: default_location_id(),
            code: default_location_code(),
        }
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            temperature: default_temperature_threshold(),
            rainfall: default_rainfall_threshold(),
        }
    }
}

fn default_location_id() -> String {
    "tokyo".to_string()
}

// OpenWeatherMap city id for Tokyo
fn default_location_code() -> String {
    "1850147".to_string()
}

fn default_table_name() -> String {
    "weather_records".to_string()
}

fn default_retention_days() -> u32 {
    30
}

fn default_temperature_threshold() -> f64 {
    30.0
}

fn default_rainfall_threshold() -> f64 {
    30.0
}
