use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use super::models::WeatherRecord;

/// Default OpenWeatherMap current-weather endpoint.
pub const DEFAULT_PROVIDER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Errors that can occur when fetching an observation
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error with status code: {0}")]
    Http(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("JSON parsing error: {0}")]
    Json(String),

    #[error("Missing required field '{0}' in provider response")]
    MissingField(&'static str),
}

/// Fetches current weather observations from the provider and normalizes
/// them into [`WeatherRecord`]s.
pub struct WeatherFetcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherFetcher {
    /// Creates a fetcher against the default provider endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_PROVIDER_URL, api_key)
    }

    /// Creates a fetcher against a custom endpoint URL
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetches one snapshot for the given location and normalizes it.
    ///
    /// `timestamp` is stamped with the wall clock at the moment of the call,
    /// not the provider's own observation time. A missing `rain` object is
    /// normalized to 0.0 mm; any other missing field is an error.
    pub async fn fetch(
        &self,
        location_id: &str,
        location_code: &str,
    ) -> Result<WeatherRecord, FetchError> {
        debug!("Fetching weather for '{}' (code {})", location_id, location_code);

        let response = match self
            .client
            .get(&self.base_url)
            .query(&[
                ("id", location_code),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                error!("Network error fetching weather for '{}': {}", location_id, e);
                return Err(FetchError::Network(e.to_string()));
            }
        };

        let status = response.status();

        if !status.is_success() {
            error!(
                "HTTP error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            );
            return Err(FetchError::Http(status.as_u16()));
        }

        let json: Value = match response.json().await {
            Ok(json) => json,
            Err(e) => {
                error!("JSON parsing error: {}", e);
                return Err(FetchError::Json(e.to_string()));
            }
        };

        let record = WeatherRecord {
            location_id: location_id.to_string(),
            timestamp: Utc::now().timestamp(),
            temperature: required_f64(&json, "main.temp")?,
            humidity: required_f64(&json, "main.humidity")?,
            rainfall: extract_f64(&json, "rain.1h").unwrap_or(0.0),
            wind_speed: required_f64(&json, "wind.speed")?,
        };

        debug!(
            "Normalized observation: temp={}, humidity={}, rainfall={}, wind={}",
            record.temperature, record.humidity, record.rainfall, record.wind_speed
        );

        Ok(record)
    }
}

/// Extracts a float from JSON using a dot-notation path
fn extract_f64(json: &Value, path: &str) -> Option<f64> {
    let mut current = json;
    for component in path.split('.') {
        current = current.get(component)?;
    }
    current.as_f64()
}

fn required_f64(json: &Value, path: &'static str) -> Result<f64, FetchError> {
    extract_f64(json, path).ok_or(FetchError::MissingField(path))
}
